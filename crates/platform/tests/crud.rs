mod common;

use common::{platform, position, risk_profile, symbol, user};
use core_types::{
    CreateSymbol, CreateUser, CreateVault, Role, UpdatePosition, UpdateSymbol, UpdateUser,
    UpdateVault,
};
use platform::{EntityKind, Error, ErrorCode};
use rust_decimal_macros::dec;
use std::thread;
use std::time::Duration;

#[tokio::test]
async fn create_then_get_returns_the_stored_record() {
    let platform = platform();
    let created = platform
        .create_user(CreateUser {
            name: "  Alice  ".to_string(),
            email: "Alice@Example.com".to_string(),
            wallet_address: common::wallet(1),
            role: Role::Trader,
            profile_picture: Some("https://cdn.example.com/alice.png".to_string()),
        })
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Alice");
    assert_eq!(created.email, "alice@example.com");
    assert_eq!(created.created_at, created.updated_at);

    let fetched = platform.get_user_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn empty_update_only_refreshes_updated_at() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    thread::sleep(Duration::from_millis(5));

    let updated = platform
        .update_user(UpdateUser {
            id: trader.id.clone(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(updated.updated_at > trader.updated_at);
    assert_eq!(
        core_types::User {
            updated_at: trader.updated_at,
            ..updated
        },
        trader
    );
}

#[tokio::test]
async fn update_merges_and_revalidates_supplied_fields() {
    let platform = platform();
    let btc = symbol(&platform, "BTC").await;

    let updated = platform
        .update_symbol(UpdateSymbol {
            id: btc.id.clone(),
            symbol: Some("xbt".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.symbol, "XBT");
    assert_eq!(updated.name, btc.name);

    let err = platform
        .update_symbol(UpdateSymbol {
            id: btc.id.clone(),
            picture: Some("not a url".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ref e) if e.field == "picture"));
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let platform = platform();
    let err = platform
        .update_vault(UpdateVault {
            id: "missing".to_string(),
            name: Some("Renamed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: EntityKind::Vault, .. }));
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.to_string(), "Vault not found");
}

#[tokio::test]
async fn validation_fails_before_reaching_storage() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;

    let err = platform
        .create_vault(CreateVault {
            user_id: trader.id.clone(),
            name: "Alpha".to_string(),
            picture: "alpha.png".to_string(),
            balance: dec!(1000),
            profit_share_ratio: 100,
            payout_cycle: 3,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(ref e) if e.field == "profitShareRatio"));
    assert_eq!(err.code(), ErrorCode::BadRequest);
    assert!(platform.get_all_vaults().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_returns_last_state_then_get_is_not_found() {
    let platform = platform();
    let btc = symbol(&platform, "BTC").await;

    let deleted = platform.delete_symbol(&btc.id).await.unwrap();
    assert_eq!(deleted, btc);

    let err = platform.get_symbol_by_id(&btc.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: EntityKind::Symbol, ref id } if *id == btc.id));

    let err = platform.delete_symbol(&btc.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_does_not_cascade() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let open = position(&platform, &trader, &btc).await;

    platform.delete_user(&trader.id).await.unwrap();

    let remaining = platform.get_positions_by_user_id(&trader.id).await.unwrap();
    assert_eq!(remaining, vec![open]);
}

#[tokio::test]
async fn get_all_lists_newest_first() {
    let platform = platform();
    let first = symbol(&platform, "BTC").await;
    let second = symbol(&platform, "ETH").await;
    let third = symbol(&platform, "SOL").await;

    let tickers: Vec<String> = platform
        .get_all_symbols()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.symbol)
        .collect();
    assert_eq!(tickers, vec![third.symbol, second.symbol, first.symbol]);
}

#[tokio::test]
async fn symbol_uniqueness_is_case_insensitive() {
    let platform = platform();
    symbol(&platform, "BTC").await;

    let err = platform
        .create_symbol(CreateSymbol {
            name: "Bitcoin again".to_string(),
            symbol: "btc".to_string(),
            picture: "https://cdn.example.com/btc.png".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Conflict { entity: EntityKind::Symbol, ref field } if field == "symbol"
    ));
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.to_string(), "Symbol with this symbol already exists");
}

#[tokio::test]
async fn user_email_and_wallet_are_unique() {
    let platform = platform();
    let existing = user(&platform, 1, Role::Trader).await;

    let duplicate_email = platform
        .create_user(CreateUser {
            name: "Other".to_string(),
            email: existing.email.to_uppercase(),
            wallet_address: common::wallet(2),
            role: Role::Investor,
            profile_picture: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(duplicate_email, Error::Conflict { ref field, .. } if field == "email"));

    let duplicate_wallet = platform
        .create_user(CreateUser {
            name: "Other".to_string(),
            email: "other@example.com".to_string(),
            wallet_address: existing.wallet_address.clone(),
            role: Role::Investor,
            profile_picture: None,
        })
        .await
        .unwrap_err();
    assert!(
        matches!(duplicate_wallet, Error::Conflict { ref field, .. } if field == "walletAddress")
    );
}

#[tokio::test]
async fn user_can_be_found_by_wallet_address() {
    let platform = platform();
    let alice = user(&platform, 7, Role::Investor).await;

    let found = platform.get_user_by_wallet_address(&alice.wallet_address).await.unwrap();
    assert_eq!(found, alice);

    let err = platform
        .get_user_by_wallet_address(&common::wallet(8))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = platform.get_user_by_wallet_address("0x123").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
}

#[tokio::test]
async fn close_stamps_closed_at_and_keeps_quantities() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let open = position(&platform, &trader, &btc).await;
    assert!(open.is_open());

    let closed = platform.close_position(&open.id).await.unwrap();
    assert!(closed.closed_at.is_some());
    assert_eq!(closed.total_quantity, open.total_quantity);
    assert_eq!(closed.average_buy_price, open.average_buy_price);
    assert_eq!(closed.realized_pnl, open.realized_pnl);
    assert!(closed.updated_at >= open.updated_at);

    let reopened = platform
        .update_position(UpdatePosition {
            id: open.id.clone(),
            closed_at: Some(None),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(reopened.is_open());

    let err = platform.close_position("missing").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn filtered_lookups_return_only_matching_records() {
    let platform = platform();
    let alice = user(&platform, 1, Role::Trader).await;
    let bob = user(&platform, 2, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let eth = symbol(&platform, "ETH").await;

    let alice_btc = position(&platform, &alice, &btc).await;
    let alice_eth = position(&platform, &alice, &eth).await;
    let bob_btc = position(&platform, &bob, &btc).await;

    assert_eq!(
        platform.get_positions_by_user_id(&alice.id).await.unwrap(),
        vec![alice_eth, alice_btc.clone()]
    );
    assert_eq!(
        platform.get_positions_by_symbol_id(&btc.id).await.unwrap(),
        vec![bob_btc, alice_btc]
    );
    assert!(platform.get_positions_by_user_id("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn risk_profile_bounds_are_enforced_on_update() {
    let platform = platform();
    let profile = risk_profile(&platform, 30).await;

    let err = platform
        .update_risk_profile(core_types::UpdateRiskProfile {
            id: profile.id.clone(),
            challenge_time_box: Some(0),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ref e) if e.message == "Challenge time box must be at least 1 day"
    ));

    let updated = platform
        .update_risk_profile(core_types::UpdateRiskProfile {
            id: profile.id.clone(),
            max_drawdown: Some(dec!(12.5)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.max_drawdown, dec!(12.5));
    assert_eq!(updated.challenge_time_box, 30);
}
