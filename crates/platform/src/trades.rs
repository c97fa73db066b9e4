// In crates/platform/src/trades.rs

use crate::error::storage;
use crate::validators::ensure_position_matches;
use crate::{
    EntityKind, Platform, Result, delete_document, get_document, into_patch, list_documents, new_id,
    update_document,
};
use chrono::Utc;
use core_types::{CreateTrade, Trade, UpdateTrade, Validate, rules};
use database::Filter;

impl Platform {
    /// Records a trade execution.
    ///
    /// Checks run in this order: user, position and symbol exist, then the
    /// position must belong to the user (`Forbidden`) and be for the same
    /// symbol (`BadRequest`).
    pub async fn create_trade(&self, mut input: CreateTrade) -> Result<Trade> {
        input.validate()?;

        self.require_user(&input.user_id).await?;
        let position = self.require_position(&input.position_id).await?;
        self.require_symbol(&input.symbol_id).await?;
        ensure_position_matches(&position, &input.user_id, &input.symbol_id)?;

        let now = Utc::now();
        let trade = Trade {
            id: new_id(),
            user_id: input.user_id,
            position_id: input.position_id,
            symbol_id: input.symbol_id,
            side: input.side,
            quantity: input.quantity,
            price: input.price,
            fee: input.fee,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .db
            .trades
            .save(&trade)
            .await
            .map_err(storage(EntityKind::Trade, "create trade"))?;
        tracing::info!(
            trade_id = %saved.id,
            position_id = %saved.position_id,
            side = ?saved.side,
            quantity = %saved.quantity,
            price = %saved.price,
            "Trade recorded"
        );
        Ok(saved)
    }

    pub async fn get_all_trades(&self) -> Result<Vec<Trade>> {
        list_documents(
            self.db.trades.as_ref(),
            EntityKind::Trade,
            Filter::All,
            "fetch trades",
        )
        .await
    }

    pub async fn get_trade_by_id(&self, id: &str) -> Result<Trade> {
        rules::required("id", id, "Trade ID is required")?;
        get_document(self.db.trades.as_ref(), EntityKind::Trade, id, "fetch trade").await
    }

    pub async fn get_trades_by_user_id(&self, user_id: &str) -> Result<Vec<Trade>> {
        rules::trade::user_id(user_id)?;
        list_documents(
            self.db.trades.as_ref(),
            EntityKind::Trade,
            Filter::eq("userId", user_id),
            "fetch user trades",
        )
        .await
    }

    pub async fn get_trades_by_position_id(&self, position_id: &str) -> Result<Vec<Trade>> {
        rules::trade::position_id(position_id)?;
        list_documents(
            self.db.trades.as_ref(),
            EntityKind::Trade,
            Filter::eq("positionId", position_id),
            "fetch position trades",
        )
        .await
    }

    pub async fn get_trades_by_symbol_id(&self, symbol_id: &str) -> Result<Vec<Trade>> {
        rules::trade::symbol_id(symbol_id)?;
        list_documents(
            self.db.trades.as_ref(),
            EntityKind::Trade,
            Filter::eq("symbolId", symbol_id),
            "fetch symbol trades",
        )
        .await
    }

    /// Field constraints are re-checked; references and ownership are not.
    pub async fn update_trade(&self, mut input: UpdateTrade) -> Result<Trade> {
        input.validate()?;
        let patch = into_patch(EntityKind::Trade, &input, Utc::now())?;
        update_document(
            self.db.trades.as_ref(),
            EntityKind::Trade,
            &input.id,
            patch,
            "update trade",
        )
        .await
    }

    pub async fn delete_trade(&self, id: &str) -> Result<Trade> {
        rules::required("id", id, "Trade ID is required")?;
        delete_document(self.db.trades.as_ref(), EntityKind::Trade, id, "delete trade").await
    }
}
