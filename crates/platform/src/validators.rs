// In crates/platform/src/validators.rs

//! Rules that span more than one record.
//!
//! Handlers call these after schema validation and in a fixed order: each
//! referenced record is resolved in the order the input declares it, then the
//! role and ownership gates run on the resolved records.

use crate::{EntityKind, Error, Platform, Result, get_document};
use core_types::{Position, RiskProfile, Role, Symbol, User};

impl Platform {
    pub(crate) async fn require_user(&self, id: &str) -> Result<User> {
        get_document(self.db.users.as_ref(), EntityKind::User, id, "fetch user").await
    }

    pub(crate) async fn require_symbol(&self, id: &str) -> Result<Symbol> {
        get_document(self.db.symbols.as_ref(), EntityKind::Symbol, id, "fetch symbol").await
    }

    pub(crate) async fn require_risk_profile(&self, id: &str) -> Result<RiskProfile> {
        get_document(
            self.db.risk_profiles.as_ref(),
            EntityKind::RiskProfile,
            id,
            "fetch risk profile",
        )
        .await
    }

    pub(crate) async fn require_position(&self, id: &str) -> Result<Position> {
        get_document(self.db.positions.as_ref(), EntityKind::Position, id, "fetch position").await
    }
}

/// Challenges and vaults can only be owned by traders.
///
/// `what` is the plural of the thing being created, e.g. "vaults".
pub fn ensure_trader(user: &User, what: &str) -> Result<()> {
    if user.role != Role::Trader {
        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            what,
            "Non-trader tried to create a trader-only record"
        );
        return Err(Error::Forbidden(format!("Only traders can create {what}")));
    }
    Ok(())
}

/// A trade must be booked against a position of the same user and symbol.
pub fn ensure_position_matches(position: &Position, user_id: &str, symbol_id: &str) -> Result<()> {
    if position.user_id != user_id {
        tracing::warn!(position_id = %position.id, user_id, "Position belongs to another user");
        return Err(Error::Forbidden("Position does not belong to this user".to_string()));
    }
    if position.symbol_id != symbol_id {
        tracing::warn!(
            position_id = %position.id,
            symbol_id,
            "Trade symbol differs from position symbol"
        );
        return Err(Error::BadRequest("Symbol does not match position symbol".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn user(role: Role) -> User {
        let now = Utc::now();
        User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            wallet_address: format!("0x{}", "a".repeat(40)),
            role,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn position() -> Position {
        let now = Utc::now();
        Position {
            id: "p1".into(),
            user_id: "u1".into(),
            symbol_id: "s1".into(),
            total_quantity: dec!(1),
            average_buy_price: dec!(100),
            realized_pnl: dec!(0),
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn only_traders_pass_the_role_gate() {
        assert!(ensure_trader(&user(Role::Trader), "vaults").is_ok());
        let err = ensure_trader(&user(Role::Investor), "vaults").unwrap_err();
        assert!(
            matches!(err, Error::Forbidden(ref msg) if msg == "Only traders can create vaults")
        );
    }

    #[test]
    fn ownership_is_checked_before_symbol() {
        let position = position();
        assert!(ensure_position_matches(&position, "u1", "s1").is_ok());
        assert!(matches!(
            ensure_position_matches(&position, "u2", "s2"),
            Err(Error::Forbidden(_))
        ));
        assert!(matches!(
            ensure_position_matches(&position, "u1", "s2"),
            Err(Error::BadRequest(_))
        ));
    }
}
