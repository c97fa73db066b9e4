// In crates/core-types/src/rules.rs

//! Field constraints.
//!
//! Every field rule lives here exactly once. The create and update schemas in
//! `inputs` both call into these functions, so a field validates the same way
//! whether it arrives in a full create payload or a partial update.

use crate::{Result, ValidationError};
use rust_decimal::Decimal;

/// Trims `value` in place, then checks it is non-empty and at most `max` chars.
pub fn text(field: &str, label: &str, value: &mut String, max: usize) -> Result<()> {
    trim_in_place(value);
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("{label} cannot be more than {max} characters"),
        ));
    }
    Ok(())
}

/// Checks that a value is present, without normalizing it.
pub fn required(field: &str, value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

pub fn at_least(field: &str, value: Decimal, min: Decimal, message: &str) -> Result<()> {
    if value < min {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

pub fn at_most(field: &str, value: Decimal, max: Decimal, message: &str) -> Result<()> {
    if value > max {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

pub fn positive(field: &str, value: Decimal, message: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Checks an integer against an inclusive range, with one message per bound.
pub fn int_range(
    field: &str,
    value: i32,
    (min, min_message): (i32, &str),
    (max, max_message): (i32, &str),
) -> Result<()> {
    if value < min {
        return Err(ValidationError::new(field, min_message));
    }
    if value > max {
        return Err(ValidationError::new(field, max_message));
    }
    Ok(())
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// `\S+@\S+\.\S+`: something, an `@`, something, a dot, something.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // The dot must have at least one character on either side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn looks_like_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

pub mod user {
    use super::*;

    pub fn name(value: &mut String) -> Result<()> {
        text("name", "Name", value, 100)
    }

    pub fn email(value: &mut String) -> Result<()> {
        trim_in_place(value);
        *value = value.to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::new("email", "Email is required"));
        }
        if !looks_like_email(value) {
            return Err(ValidationError::new("email", "Please enter a valid email"));
        }
        Ok(())
    }

    /// An EVM-style address: `0x` followed by exactly 40 hex digits.
    pub fn wallet_address(value: &str) -> Result<()> {
        let valid = value
            .strip_prefix("0x")
            .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if !valid {
            return Err(ValidationError::new(
                "walletAddress",
                "Wallet address must be a valid Ethereum address",
            ));
        }
        Ok(())
    }
}

pub mod symbol {
    use super::*;

    pub fn name(value: &mut String) -> Result<()> {
        text("name", "Name", value, 100)
    }

    /// Tickers are stored uppercase so uniqueness is case-insensitive.
    pub fn symbol(value: &mut String) -> Result<()> {
        text("symbol", "Symbol", value, 20)?;
        *value = value.to_uppercase();
        Ok(())
    }

    pub fn picture(value: &str) -> Result<()> {
        if !looks_like_url(value) {
            return Err(ValidationError::new("picture", "Picture must be a valid URL"));
        }
        Ok(())
    }
}

pub mod risk_profile {
    use super::*;

    pub fn name(value: &mut String) -> Result<()> {
        text("name", "Name", value, 100)
    }

    pub fn description(value: &mut String) -> Result<()> {
        text("description", "Description", value, 500)
    }

    pub fn image(value: &str) -> Result<()> {
        required("image", value, "Image is required")
    }

    pub fn max_drawdown(value: Decimal) -> Result<()> {
        at_least("maxDrawdown", value, Decimal::ZERO, "Max drawdown cannot be negative")?;
        at_most("maxDrawdown", value, Decimal::ONE_HUNDRED, "Max drawdown cannot exceed 100%")
    }

    pub fn challenge_profit_target(value: Decimal) -> Result<()> {
        at_least(
            "challengeProfitTarget",
            value,
            Decimal::ZERO,
            "Challenge profit target cannot be negative",
        )
    }

    pub fn challenge_time_box(value: i32) -> Result<()> {
        int_range(
            "challengeTimeBox",
            value,
            (1, "Challenge time box must be at least 1 day"),
            (365, "Challenge time box cannot exceed 365 days"),
        )
    }
}

pub mod challenge {
    use super::*;

    pub fn user_id(value: &str) -> Result<()> {
        required("userId", value, "User ID is required")
    }

    pub fn risk_profile_id(value: &str) -> Result<()> {
        required("riskProfileId", value, "Risk Profile ID is required")
    }

    pub fn balance(value: Decimal) -> Result<()> {
        at_least("balance", value, Decimal::ZERO, "Balance cannot be negative")
    }
}

pub mod vault {
    use super::*;

    pub fn user_id(value: &str) -> Result<()> {
        required("userId", value, "User ID is required")
    }

    pub fn name(value: &mut String) -> Result<()> {
        text("name", "Name", value, 100)
    }

    pub fn picture(value: &str) -> Result<()> {
        required("picture", value, "Picture is required")
    }

    pub fn balance(value: Decimal) -> Result<()> {
        at_least("balance", value, Decimal::ZERO, "Balance cannot be negative")
    }

    pub fn profit_share_ratio(value: i32) -> Result<()> {
        int_range(
            "profitShareRatio",
            value,
            (1, "Profit share ratio must be at least 1%"),
            (99, "Profit share ratio cannot exceed 99%"),
        )
    }

    pub fn payout_cycle(value: i32) -> Result<()> {
        int_range(
            "payoutCycle",
            value,
            (1, "Payout cycle must be at least 1 month"),
            (12, "Payout cycle cannot exceed 12 months"),
        )
    }
}

pub mod position {
    use super::*;

    pub fn user_id(value: &str) -> Result<()> {
        required("userId", value, "User ID is required")
    }

    pub fn symbol_id(value: &str) -> Result<()> {
        required("symbolId", value, "Symbol ID is required")
    }

    pub fn total_quantity(value: Decimal) -> Result<()> {
        at_least("totalQuantity", value, Decimal::ZERO, "Total quantity cannot be negative")
    }

    pub fn average_buy_price(value: Decimal) -> Result<()> {
        at_least(
            "averageBuyPrice",
            value,
            Decimal::ZERO,
            "Average buy price cannot be negative",
        )
    }
}

pub mod trade {
    use super::*;

    pub fn user_id(value: &str) -> Result<()> {
        required("userId", value, "User ID is required")
    }

    pub fn position_id(value: &str) -> Result<()> {
        required("positionId", value, "Position ID is required")
    }

    pub fn symbol_id(value: &str) -> Result<()> {
        required("symbolId", value, "Symbol ID is required")
    }

    pub fn quantity(value: Decimal) -> Result<()> {
        positive("quantity", value, "Quantity must be positive")
    }

    pub fn price(value: Decimal) -> Result<()> {
        positive("price", value, "Price must be positive")
    }

    pub fn fee(value: Decimal) -> Result<()> {
        at_least("fee", value, Decimal::ZERO, "Fee cannot be negative")
    }
}
