#![allow(dead_code)]

use core_types::{
    CreatePosition, CreateRiskProfile, CreateSymbol, CreateUser, Position, RiskProfile, Role,
    Symbol, User,
};
use database::Db;
use platform::Platform;
use rust_decimal_macros::dec;

pub fn platform() -> Platform {
    Platform::new(Db::in_memory())
}

/// A wallet address unique to `seed`.
pub fn wallet(seed: u8) -> String {
    format!("0x{:040x}", seed)
}

pub async fn user(platform: &Platform, seed: u8, role: Role) -> User {
    platform
        .create_user(CreateUser {
            name: format!("User {seed}"),
            email: format!("user{seed}@example.com"),
            wallet_address: wallet(seed),
            role,
            profile_picture: None,
        })
        .await
        .unwrap()
}

pub async fn symbol(platform: &Platform, ticker: &str) -> Symbol {
    platform
        .create_symbol(CreateSymbol {
            name: format!("{ticker} coin"),
            symbol: ticker.to_string(),
            picture: format!("https://cdn.example.com/{ticker}.png"),
        })
        .await
        .unwrap()
}

pub async fn risk_profile(platform: &Platform, days: i32) -> RiskProfile {
    platform
        .create_risk_profile(CreateRiskProfile {
            name: "Standard".to_string(),
            description: "Evaluation with a 10% drawdown limit".to_string(),
            image: "standard.png".to_string(),
            max_drawdown: dec!(10),
            challenge_profit_target: dec!(8),
            challenge_time_box: days,
        })
        .await
        .unwrap()
}

pub async fn position(platform: &Platform, user: &User, symbol: &Symbol) -> Position {
    platform
        .create_position(CreatePosition {
            user_id: user.id.clone(),
            symbol_id: symbol.id.clone(),
            total_quantity: dec!(2),
            average_buy_price: dec!(30000.5),
            realized_pnl: dec!(0),
            closed_at: None,
        })
        .await
        .unwrap()
}
