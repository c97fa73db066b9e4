// In crates/platform/src/positions.rs

use crate::error::storage;
use crate::{
    EntityKind, Platform, Result, delete_document, into_patch, list_documents, new_id,
    update_document,
};
use chrono::Utc;
use core_types::{CreatePosition, Position, UpdatePosition, Validate, rules};
use database::Filter;
use serde::Serialize;

/// The patch a close applies: only `closedAt`, which `into_patch` stamps
/// alongside `updatedAt`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClosePosition {
    closed_at: chrono::DateTime<Utc>,
}

impl Platform {
    pub async fn create_position(&self, mut input: CreatePosition) -> Result<Position> {
        input.validate()?;

        self.require_user(&input.user_id).await?;
        self.require_symbol(&input.symbol_id).await?;

        let now = Utc::now();
        let position = Position {
            id: new_id(),
            user_id: input.user_id,
            symbol_id: input.symbol_id,
            total_quantity: input.total_quantity,
            average_buy_price: input.average_buy_price,
            realized_pnl: input.realized_pnl,
            closed_at: input.closed_at,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .db
            .positions
            .save(&position)
            .await
            .map_err(storage(EntityKind::Position, "create position"))?;
        tracing::info!(
            position_id = %saved.id,
            user_id = %saved.user_id,
            symbol_id = %saved.symbol_id,
            "Position opened"
        );
        Ok(saved)
    }

    pub async fn get_all_positions(&self) -> Result<Vec<Position>> {
        list_documents(
            self.db.positions.as_ref(),
            EntityKind::Position,
            Filter::All,
            "fetch positions",
        )
        .await
    }

    pub async fn get_position_by_id(&self, id: &str) -> Result<Position> {
        rules::required("id", id, "Position ID is required")?;
        self.require_position(id).await
    }

    pub async fn get_positions_by_user_id(&self, user_id: &str) -> Result<Vec<Position>> {
        rules::position::user_id(user_id)?;
        list_documents(
            self.db.positions.as_ref(),
            EntityKind::Position,
            Filter::eq("userId", user_id),
            "fetch user positions",
        )
        .await
    }

    pub async fn get_positions_by_symbol_id(&self, symbol_id: &str) -> Result<Vec<Position>> {
        rules::position::symbol_id(symbol_id)?;
        list_documents(
            self.db.positions.as_ref(),
            EntityKind::Position,
            Filter::eq("symbolId", symbol_id),
            "fetch symbol positions",
        )
        .await
    }

    /// Stamps `closedAt` with the current time. Quantities and prices are untouched.
    pub async fn close_position(&self, id: &str) -> Result<Position> {
        rules::required("id", id, "Position ID is required")?;
        let now = Utc::now();
        let patch = into_patch(EntityKind::Position, &ClosePosition { closed_at: now }, now)?;
        let closed = update_document(
            self.db.positions.as_ref(),
            EntityKind::Position,
            id,
            patch,
            "close position",
        )
        .await?;
        tracing::info!(position_id = %closed.id, "Position closed");
        Ok(closed)
    }

    pub async fn update_position(&self, mut input: UpdatePosition) -> Result<Position> {
        input.validate()?;
        let patch = into_patch(EntityKind::Position, &input, Utc::now())?;
        update_document(
            self.db.positions.as_ref(),
            EntityKind::Position,
            &input.id,
            patch,
            "update position",
        )
        .await
    }

    /// Trades booked against the position are kept.
    pub async fn delete_position(&self, id: &str) -> Result<Position> {
        rules::required("id", id, "Position ID is required")?;
        delete_document(
            self.db.positions.as_ref(),
            EntityKind::Position,
            id,
            "delete position",
        )
        .await
    }
}
