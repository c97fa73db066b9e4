// In crates/web-server/src/procedures.rs

//! The procedure catalog and the dispatcher that routes a call by name to its
//! `Platform` handler.

use crate::types::{Procedure, ProcedureKind};
use crate::{Error, Result};
use core_types::{
    IdInput, PositionIdInput, SymbolIdInput, UserIdInput, ValidationError, WalletAddressInput,
};
use platform::Platform;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const fn query(name: &'static str, description: &'static str) -> Procedure {
    Procedure {
        name,
        kind: ProcedureKind::Query,
        description,
    }
}

const fn mutation(name: &'static str, description: &'static str) -> Procedure {
    Procedure {
        name,
        kind: ProcedureKind::Mutation,
        description,
    }
}

pub const PROCEDURES: &[Procedure] = &[
    mutation("user.create", "Create a new user with name, email, wallet address, and role."),
    query(
        "user.getAll",
        "Retrieve all users from the database, sorted by creation date (newest first).",
    ),
    query("user.getById", "Retrieve a specific user by their unique ID."),
    query("user.getByWalletAddress", "Retrieve a specific user by their wallet address."),
    mutation(
        "user.update",
        "Update an existing user's information. All fields are optional except ID.",
    ),
    mutation("user.delete", "Permanently delete a user from the database by their ID."),
    mutation("symbol.create", "Create a new trading symbol with name, symbol, and picture URL."),
    query(
        "symbol.getAll",
        "Retrieve all trading symbols from the database, sorted by creation date (newest first).",
    ),
    query("symbol.getById", "Retrieve a specific symbol by their unique ID."),
    mutation(
        "symbol.update",
        "Update an existing symbol's information. All fields are optional except ID.",
    ),
    mutation("symbol.delete", "Permanently delete a symbol from the database by their ID."),
    mutation(
        "riskProfile.create",
        "Create a new risk profile with trading parameters and challenge settings.",
    ),
    query(
        "riskProfile.getAll",
        "Retrieve all risk profiles from the database, sorted by creation date (newest first).",
    ),
    query("riskProfile.getById", "Retrieve a specific risk profile by their unique ID."),
    mutation(
        "riskProfile.update",
        "Update an existing risk profile's information. All fields are optional except ID.",
    ),
    mutation(
        "riskProfile.delete",
        "Permanently delete a risk profile from the database by their ID.",
    ),
    mutation(
        "challenge.create",
        "Create a new challenge. Auto-generates startDate, endDate, and balance based on risk profile.",
    ),
    query(
        "challenge.getAll",
        "Retrieve all challenges from the database, sorted by creation date (newest first).",
    ),
    query("challenge.getById", "Retrieve a specific challenge by their unique ID."),
    query("challenge.getByUserId", "Retrieve all challenges owned by a specific user."),
    mutation(
        "challenge.update",
        "Update an existing challenge's information. All fields are optional except ID.",
    ),
    mutation("challenge.delete", "Permanently delete a challenge from the database by their ID."),
    mutation("vault.create", "Create a new vault. Only users with trader role can create vaults."),
    query(
        "vault.getAll",
        "Retrieve all vaults from the database, sorted by creation date (newest first).",
    ),
    query("vault.getById", "Retrieve a specific vault by their unique ID."),
    query("vault.getByUserId", "Retrieve all vaults owned by a specific user."),
    mutation(
        "vault.update",
        "Update an existing vault's information. All fields are optional except ID.",
    ),
    mutation("vault.delete", "Permanently delete a vault from the database by their ID."),
    mutation("position.create", "Create a new trading position for a user in a specific symbol."),
    query(
        "position.getAll",
        "Retrieve all positions from the database, sorted by creation date (newest first).",
    ),
    query("position.getById", "Retrieve a specific position by their unique ID."),
    query("position.getByUserId", "Retrieve all positions owned by a specific user."),
    query("position.getBySymbolId", "Retrieve all positions for a specific symbol."),
    mutation("position.close", "Close a position by setting closedAt timestamp."),
    mutation(
        "position.update",
        "Update an existing position's information. All fields are optional except ID.",
    ),
    mutation("position.delete", "Permanently delete a position from the database by their ID."),
    mutation("trade.create", "Create a new trade execution record."),
    query(
        "trade.getAll",
        "Retrieve all trades from the database, sorted by creation date (newest first).",
    ),
    query("trade.getById", "Retrieve a specific trade by their unique ID."),
    query("trade.getByUserId", "Retrieve all trades executed by a specific user."),
    query("trade.getByPositionId", "Retrieve all trades for a specific position."),
    query("trade.getBySymbolId", "Retrieve all trades for a specific symbol."),
    mutation(
        "trade.update",
        "Update an existing trade's information. All fields are optional except ID.",
    ),
    mutation("trade.delete", "Permanently delete a trade from the database by their ID."),
];

pub fn find(name: &str) -> Option<&'static Procedure> {
    PROCEDURES.iter().find(|procedure| procedure.name == name)
}

/// Decodes a procedure input. Shape errors are reported as validation
/// failures on the `input` field.
fn decode<T: DeserializeOwned>(input: Value) -> Result<T> {
    serde_json::from_value(input).map_err(|err| {
        platform::Error::Validation(ValidationError::new("input", err.to_string())).into()
    })
}

fn encode<T: Serialize>(output: T) -> Result<Value> {
    serde_json::to_value(output).map_err(|err| {
        tracing::error!(error = %err, "Procedure output could not be encoded");
        platform::Error::Internal("Failed to encode response".to_string()).into()
    })
}

/// Runs the named procedure. Input-less procedures ignore `input`.
pub async fn dispatch(platform: &Platform, name: &str, input: Value) -> Result<Value> {
    match name {
        "user.create" => encode(platform.create_user(decode(input)?).await?),
        "user.getAll" => encode(platform.get_all_users().await?),
        "user.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_user_by_id(&id).await?)
        }
        "user.getByWalletAddress" => {
            let WalletAddressInput { wallet_address } = decode(input)?;
            encode(platform.get_user_by_wallet_address(&wallet_address).await?)
        }
        "user.update" => encode(platform.update_user(decode(input)?).await?),
        "user.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_user(&id).await?)
        }

        "symbol.create" => encode(platform.create_symbol(decode(input)?).await?),
        "symbol.getAll" => encode(platform.get_all_symbols().await?),
        "symbol.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_symbol_by_id(&id).await?)
        }
        "symbol.update" => encode(platform.update_symbol(decode(input)?).await?),
        "symbol.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_symbol(&id).await?)
        }

        "riskProfile.create" => encode(platform.create_risk_profile(decode(input)?).await?),
        "riskProfile.getAll" => encode(platform.get_all_risk_profiles().await?),
        "riskProfile.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_risk_profile_by_id(&id).await?)
        }
        "riskProfile.update" => encode(platform.update_risk_profile(decode(input)?).await?),
        "riskProfile.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_risk_profile(&id).await?)
        }

        "challenge.create" => encode(platform.create_challenge(decode(input)?).await?),
        "challenge.getAll" => encode(platform.get_all_challenges().await?),
        "challenge.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_challenge_by_id(&id).await?)
        }
        "challenge.getByUserId" => {
            let UserIdInput { user_id } = decode(input)?;
            encode(platform.get_challenges_by_user_id(&user_id).await?)
        }
        "challenge.update" => encode(platform.update_challenge(decode(input)?).await?),
        "challenge.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_challenge(&id).await?)
        }

        "vault.create" => encode(platform.create_vault(decode(input)?).await?),
        "vault.getAll" => encode(platform.get_all_vaults().await?),
        "vault.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_vault_by_id(&id).await?)
        }
        "vault.getByUserId" => {
            let UserIdInput { user_id } = decode(input)?;
            encode(platform.get_vaults_by_user_id(&user_id).await?)
        }
        "vault.update" => encode(platform.update_vault(decode(input)?).await?),
        "vault.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_vault(&id).await?)
        }

        "position.create" => encode(platform.create_position(decode(input)?).await?),
        "position.getAll" => encode(platform.get_all_positions().await?),
        "position.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_position_by_id(&id).await?)
        }
        "position.getByUserId" => {
            let UserIdInput { user_id } = decode(input)?;
            encode(platform.get_positions_by_user_id(&user_id).await?)
        }
        "position.getBySymbolId" => {
            let SymbolIdInput { symbol_id } = decode(input)?;
            encode(platform.get_positions_by_symbol_id(&symbol_id).await?)
        }
        "position.close" => {
            let IdInput { id } = decode(input)?;
            encode(platform.close_position(&id).await?)
        }
        "position.update" => encode(platform.update_position(decode(input)?).await?),
        "position.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_position(&id).await?)
        }

        "trade.create" => encode(platform.create_trade(decode(input)?).await?),
        "trade.getAll" => encode(platform.get_all_trades().await?),
        "trade.getById" => {
            let IdInput { id } = decode(input)?;
            encode(platform.get_trade_by_id(&id).await?)
        }
        "trade.getByUserId" => {
            let UserIdInput { user_id } = decode(input)?;
            encode(platform.get_trades_by_user_id(&user_id).await?)
        }
        "trade.getByPositionId" => {
            let PositionIdInput { position_id } = decode(input)?;
            encode(platform.get_trades_by_position_id(&position_id).await?)
        }
        "trade.getBySymbolId" => {
            let SymbolIdInput { symbol_id } = decode(input)?;
            encode(platform.get_trades_by_symbol_id(&symbol_id).await?)
        }
        "trade.update" => encode(platform.update_trade(decode(input)?).await?),
        "trade.delete" => {
            let IdInput { id } = decode(input)?;
            encode(platform.delete_trade(&id).await?)
        }

        other => Err(Error::UnknownProcedure(other.to_string())),
    }
}
