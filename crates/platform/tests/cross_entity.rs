mod common;

use chrono::Duration;
use common::{platform, position, risk_profile, symbol, user};
use core_types::{
    CreateChallenge, CreatePosition, CreateTrade, CreateVault, Role, TradeSide, UpdateChallenge,
};
use platform::{CHALLENGE_STARTING_BALANCE, EntityKind, Error, ErrorCode};
use rust_decimal_macros::dec;

fn trade(user_id: &str, position_id: &str, symbol_id: &str) -> CreateTrade {
    CreateTrade {
        user_id: user_id.to_string(),
        position_id: position_id.to_string(),
        symbol_id: symbol_id.to_string(),
        side: TradeSide::Buy,
        quantity: dec!(0.5),
        price: dec!(31000),
        fee: dec!(1.25),
    }
}

fn vault(user_id: &str) -> CreateVault {
    CreateVault {
        user_id: user_id.to_string(),
        name: "Alpha".to_string(),
        picture: "alpha.png".to_string(),
        balance: dec!(5000),
        profit_share_ratio: 20,
        payout_cycle: 3,
    }
}

#[tokio::test]
async fn challenge_gets_fixed_balance_and_derived_end_date() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    let profile = risk_profile(&platform, 30).await;

    let challenge = platform
        .create_challenge(CreateChallenge {
            user_id: trader.id.clone(),
            risk_profile_id: profile.id.clone(),
        })
        .await
        .unwrap();

    assert_eq!(challenge.balance, CHALLENGE_STARTING_BALANCE);
    assert_eq!(challenge.end_date - challenge.start_date, Duration::days(30));
    assert_eq!(challenge.created_at, challenge.start_date);

    let listed = platform.get_challenges_by_user_id(&trader.id).await.unwrap();
    assert_eq!(listed, vec![challenge]);
}

#[tokio::test]
async fn challenge_update_does_not_recompute_end_date() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    let monthly = risk_profile(&platform, 30).await;
    let weekly = risk_profile(&platform, 7).await;

    let challenge = platform
        .create_challenge(CreateChallenge {
            user_id: trader.id.clone(),
            risk_profile_id: monthly.id.clone(),
        })
        .await
        .unwrap();

    let updated = platform
        .update_challenge(UpdateChallenge {
            id: challenge.id.clone(),
            risk_profile_id: Some(weekly.id.clone()),
            balance: Some(dec!(12500.75)),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.risk_profile_id, weekly.id);
    assert_eq!(updated.balance, dec!(12500.75));
    assert_eq!(updated.end_date, challenge.end_date);
}

#[tokio::test]
async fn investors_cannot_own_challenges_or_vaults() {
    let platform = platform();
    let investor = user(&platform, 1, Role::Investor).await;
    let profile = risk_profile(&platform, 30).await;

    let err = platform
        .create_challenge(CreateChallenge {
            user_id: investor.id.clone(),
            risk_profile_id: profile.id.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.to_string(), "Only traders can create challenges");

    let err = platform.create_vault(vault(&investor.id)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.to_string(), "Only traders can create vaults");

    assert!(platform.get_all_challenges().await.unwrap().is_empty());
    assert!(platform.get_all_vaults().await.unwrap().is_empty());
}

#[tokio::test]
async fn risk_profile_lookup_runs_before_the_role_gate() {
    let platform = platform();
    let investor = user(&platform, 1, Role::Investor).await;

    let err = platform
        .create_challenge(CreateChallenge {
            user_id: investor.id.clone(),
            risk_profile_id: "missing".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound { entity: EntityKind::RiskProfile, ref id } if id == "missing"
    ));
    assert_eq!(err.to_string(), "Risk profile not found");
}

#[tokio::test]
async fn trader_vault_is_created_and_listed_by_owner() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    let other = user(&platform, 2, Role::Trader).await;

    let created = platform.create_vault(vault(&trader.id)).await.unwrap();
    platform.create_vault(vault(&other.id)).await.unwrap();

    assert_eq!(platform.get_vaults_by_user_id(&trader.id).await.unwrap(), vec![created]);
    assert_eq!(platform.get_all_vaults().await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_references_are_reported_in_input_order() {
    let platform = platform();
    let trader = user(&platform, 1, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let open = position(&platform, &trader, &btc).await;

    let err = platform.create_trade(trade("ghost", "ghost", "ghost")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: EntityKind::User, .. }));

    let err = platform
        .create_trade(trade(&trader.id, "ghost", "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: EntityKind::Position, .. }));

    let err = platform
        .create_trade(trade(&trader.id, &open.id, "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: EntityKind::Symbol, .. }));

    let err = platform
        .create_position(CreatePosition {
            user_id: trader.id.clone(),
            symbol_id: "ghost".to_string(),
            total_quantity: dec!(1),
            average_buy_price: dec!(10),
            realized_pnl: dec!(0),
            closed_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: EntityKind::Symbol, .. }));
    assert_eq!(err.to_string(), "Symbol not found");
}

#[tokio::test]
async fn trade_on_another_users_position_is_forbidden() {
    let platform = platform();
    let alice = user(&platform, 1, Role::Trader).await;
    let bob = user(&platform, 2, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let eth = symbol(&platform, "ETH").await;
    let alices = position(&platform, &alice, &btc).await;

    // Ownership is checked before the symbol, so a mismatch on both is Forbidden.
    let err = platform
        .create_trade(trade(&bob.id, &alices.id, &eth.id))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.to_string(), "Position does not belong to this user");
    assert!(platform.get_all_trades().await.unwrap().is_empty());
}

#[tokio::test]
async fn trade_symbol_must_match_position_symbol() {
    let platform = platform();
    let alice = user(&platform, 1, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let eth = symbol(&platform, "ETH").await;
    let open = position(&platform, &alice, &btc).await;

    let err = platform
        .create_trade(trade(&alice.id, &open.id, &eth.id))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
    assert_eq!(err.to_string(), "Symbol does not match position symbol");
}

#[tokio::test]
async fn valid_trade_is_recorded_and_indexed() {
    let platform = platform();
    let alice = user(&platform, 1, Role::Trader).await;
    let btc = symbol(&platform, "BTC").await;
    let open = position(&platform, &alice, &btc).await;

    let recorded = platform
        .create_trade(trade(&alice.id, &open.id, &btc.id))
        .await
        .unwrap();
    assert_eq!(recorded.side, TradeSide::Buy);
    assert_eq!(recorded.fee, dec!(1.25));

    assert_eq!(platform.get_trade_by_id(&recorded.id).await.unwrap(), recorded);
    assert_eq!(
        platform.get_trades_by_position_id(&open.id).await.unwrap(),
        vec![recorded.clone()]
    );
    assert_eq!(
        platform.get_trades_by_symbol_id(&btc.id).await.unwrap(),
        vec![recorded.clone()]
    );
    assert_eq!(platform.get_trades_by_user_id(&alice.id).await.unwrap(), vec![recorded]);

    // Closing the position leaves its trades alone.
    platform.close_position(&open.id).await.unwrap();
    assert_eq!(platform.get_trades_by_position_id(&open.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn trade_validation_runs_before_reference_checks() {
    let platform = platform();

    let mut input = trade("ghost", "ghost", "ghost");
    input.quantity = dec!(0);
    let err = platform.create_trade(input).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ref e) if e.message == "Quantity must be positive"));
}
