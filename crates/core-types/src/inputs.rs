// In crates/core-types/src/inputs.rs

//! Create and update payload shapes.
//!
//! Create shapes carry every required field; update shapes carry the target
//! `id` plus optional fields. Unknown fields are rejected when decoding, which
//! is how server-derived fields (a challenge's balance and dates, for example)
//! are kept out of create payloads. Serializing an update shape yields exactly
//! the supplied fields, ready to be merged into the stored document.

use crate::rules;
use crate::types::{Role, TradeSide};
use crate::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Checks field constraints, normalizing values (trim, case) in place.
pub trait Validate {
    fn validate(&mut self) -> Result<()>;
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// --- Lookup inputs ---

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdInput {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserIdInput {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SymbolIdInput {
    pub symbol_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PositionIdInput {
    pub position_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WalletAddressInput {
    pub wallet_address: String,
}

// --- User ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub wallet_address: String,
    pub role: Role,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Validate for CreateUser {
    fn validate(&mut self) -> Result<()> {
        rules::user::name(&mut self.name)?;
        rules::user::email(&mut self.email)?;
        rules::user::wallet_address(&self.wallet_address)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUser {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl Validate for UpdateUser {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "User ID is required")?;
        if let Some(name) = self.name.as_mut() {
            rules::user::name(name)?;
        }
        if let Some(email) = self.email.as_mut() {
            rules::user::email(email)?;
        }
        if let Some(address) = self.wallet_address.as_deref() {
            rules::user::wallet_address(address)?;
        }
        Ok(())
    }
}

// --- Symbol ---

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSymbol {
    pub name: String,
    pub symbol: String,
    pub picture: String,
}

impl Validate for CreateSymbol {
    fn validate(&mut self) -> Result<()> {
        rules::symbol::name(&mut self.name)?;
        rules::symbol::symbol(&mut self.symbol)?;
        rules::symbol::picture(&self.picture)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSymbol {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Validate for UpdateSymbol {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "Symbol ID is required")?;
        if let Some(name) = self.name.as_mut() {
            rules::symbol::name(name)?;
        }
        if let Some(symbol) = self.symbol.as_mut() {
            rules::symbol::symbol(symbol)?;
        }
        if let Some(picture) = self.picture.as_deref() {
            rules::symbol::picture(picture)?;
        }
        Ok(())
    }
}

// --- RiskProfile ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRiskProfile {
    pub name: String,
    pub description: String,
    pub image: String,
    pub max_drawdown: Decimal,
    pub challenge_profit_target: Decimal,
    pub challenge_time_box: i32,
}

impl Validate for CreateRiskProfile {
    fn validate(&mut self) -> Result<()> {
        rules::risk_profile::name(&mut self.name)?;
        rules::risk_profile::description(&mut self.description)?;
        rules::risk_profile::image(&self.image)?;
        rules::risk_profile::max_drawdown(self.max_drawdown)?;
        rules::risk_profile::challenge_profit_target(self.challenge_profit_target)?;
        rules::risk_profile::challenge_time_box(self.challenge_time_box)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateRiskProfile {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_profit_target: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_time_box: Option<i32>,
}

impl Validate for UpdateRiskProfile {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "Risk Profile ID is required")?;
        if let Some(name) = self.name.as_mut() {
            rules::risk_profile::name(name)?;
        }
        if let Some(description) = self.description.as_mut() {
            rules::risk_profile::description(description)?;
        }
        if let Some(image) = self.image.as_deref() {
            rules::risk_profile::image(image)?;
        }
        if let Some(max_drawdown) = self.max_drawdown {
            rules::risk_profile::max_drawdown(max_drawdown)?;
        }
        if let Some(target) = self.challenge_profit_target {
            rules::risk_profile::challenge_profit_target(target)?;
        }
        if let Some(days) = self.challenge_time_box {
            rules::risk_profile::challenge_time_box(days)?;
        }
        Ok(())
    }
}

// --- Challenge ---

/// Balance and dates are derived by the server and are not accepted here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateChallenge {
    pub user_id: String,
    pub risk_profile_id: String,
}

impl Validate for CreateChallenge {
    fn validate(&mut self) -> Result<()> {
        rules::challenge::user_id(&self.user_id)?;
        rules::challenge::risk_profile_id(&self.risk_profile_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateChallenge {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Validate for UpdateChallenge {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "Challenge ID is required")?;
        if let Some(user_id) = self.user_id.as_deref() {
            rules::challenge::user_id(user_id)?;
        }
        if let Some(risk_profile_id) = self.risk_profile_id.as_deref() {
            rules::challenge::risk_profile_id(risk_profile_id)?;
        }
        if let Some(balance) = self.balance {
            rules::challenge::balance(balance)?;
        }
        Ok(())
    }
}

// --- Vault ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateVault {
    pub user_id: String,
    pub name: String,
    pub picture: String,
    pub balance: Decimal,
    pub profit_share_ratio: i32,
    pub payout_cycle: i32,
}

impl Validate for CreateVault {
    fn validate(&mut self) -> Result<()> {
        rules::vault::user_id(&self.user_id)?;
        rules::vault::name(&mut self.name)?;
        rules::vault::picture(&self.picture)?;
        rules::vault::balance(self.balance)?;
        rules::vault::profit_share_ratio(self.profit_share_ratio)?;
        rules::vault::payout_cycle(self.payout_cycle)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateVault {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_share_ratio: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_cycle: Option<i32>,
}

impl Validate for UpdateVault {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "Vault ID is required")?;
        if let Some(user_id) = self.user_id.as_deref() {
            rules::vault::user_id(user_id)?;
        }
        if let Some(name) = self.name.as_mut() {
            rules::vault::name(name)?;
        }
        if let Some(picture) = self.picture.as_deref() {
            rules::vault::picture(picture)?;
        }
        if let Some(balance) = self.balance {
            rules::vault::balance(balance)?;
        }
        if let Some(ratio) = self.profit_share_ratio {
            rules::vault::profit_share_ratio(ratio)?;
        }
        if let Some(cycle) = self.payout_cycle {
            rules::vault::payout_cycle(cycle)?;
        }
        Ok(())
    }
}

// --- Position ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePosition {
    pub user_id: String,
    pub symbol_id: String,
    pub total_quantity: Decimal,
    pub average_buy_price: Decimal,
    #[serde(default, rename = "realizedPnL")]
    pub realized_pnl: Decimal,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Validate for CreatePosition {
    fn validate(&mut self) -> Result<()> {
        rules::position::user_id(&self.user_id)?;
        rules::position::symbol_id(&self.symbol_id)?;
        rules::position::total_quantity(self.total_quantity)?;
        rules::position::average_buy_price(self.average_buy_price)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePosition {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_buy_price: Option<Decimal>,
    #[serde(default, rename = "realizedPnL", skip_serializing_if = "Option::is_none")]
    pub realized_pnl: Option<Decimal>,
    /// `Some(None)` reopens the position.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<Option<DateTime<Utc>>>,
}

impl Validate for UpdatePosition {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "Position ID is required")?;
        if let Some(user_id) = self.user_id.as_deref() {
            rules::position::user_id(user_id)?;
        }
        if let Some(symbol_id) = self.symbol_id.as_deref() {
            rules::position::symbol_id(symbol_id)?;
        }
        if let Some(quantity) = self.total_quantity {
            rules::position::total_quantity(quantity)?;
        }
        if let Some(price) = self.average_buy_price {
            rules::position::average_buy_price(price)?;
        }
        Ok(())
    }
}

// --- Trade ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTrade {
    pub user_id: String,
    pub position_id: String,
    pub symbol_id: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub quantity: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub fee: Decimal,
}

impl Validate for CreateTrade {
    fn validate(&mut self) -> Result<()> {
        rules::trade::user_id(&self.user_id)?;
        rules::trade::position_id(&self.position_id)?;
        rules::trade::symbol_id(&self.symbol_id)?;
        rules::trade::quantity(self.quantity)?;
        rules::trade::price(self.price)?;
        rules::trade::fee(self.fee)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTrade {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub side: Option<TradeSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
}

impl Validate for UpdateTrade {
    fn validate(&mut self) -> Result<()> {
        rules::required("id", &self.id, "Trade ID is required")?;
        if let Some(user_id) = self.user_id.as_deref() {
            rules::trade::user_id(user_id)?;
        }
        if let Some(position_id) = self.position_id.as_deref() {
            rules::trade::position_id(position_id)?;
        }
        if let Some(symbol_id) = self.symbol_id.as_deref() {
            rules::trade::symbol_id(symbol_id)?;
        }
        if let Some(quantity) = self.quantity {
            rules::trade::quantity(quantity)?;
        }
        if let Some(price) = self.price {
            rules::trade::price(price)?;
        }
        if let Some(fee) = self.fee {
            rules::trade::fee(fee)?;
        }
        Ok(())
    }
}
