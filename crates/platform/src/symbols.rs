// In crates/platform/src/symbols.rs

use crate::error::storage;
use crate::{
    EntityKind, Platform, Result, delete_document, get_document, into_patch, list_documents, new_id,
    update_document,
};
use chrono::Utc;
use core_types::{CreateSymbol, Symbol, UpdateSymbol, Validate, rules};
use database::Filter;

impl Platform {
    /// Lists a new trading symbol. The ticker is stored uppercase, so "btc"
    /// conflicts with an existing "BTC".
    pub async fn create_symbol(&self, mut input: CreateSymbol) -> Result<Symbol> {
        input.validate()?;

        let now = Utc::now();
        let symbol = Symbol {
            id: new_id(),
            name: input.name,
            symbol: input.symbol,
            picture: input.picture,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .db
            .symbols
            .save(&symbol)
            .await
            .map_err(storage(EntityKind::Symbol, "create symbol"))?;
        tracing::info!(symbol_id = %saved.id, ticker = %saved.symbol, "Symbol created");
        Ok(saved)
    }

    pub async fn get_all_symbols(&self) -> Result<Vec<Symbol>> {
        list_documents(
            self.db.symbols.as_ref(),
            EntityKind::Symbol,
            Filter::All,
            "fetch symbols",
        )
        .await
    }

    pub async fn get_symbol_by_id(&self, id: &str) -> Result<Symbol> {
        rules::required("id", id, "Symbol ID is required")?;
        get_document(self.db.symbols.as_ref(), EntityKind::Symbol, id, "fetch symbol").await
    }

    pub async fn update_symbol(&self, mut input: UpdateSymbol) -> Result<Symbol> {
        input.validate()?;
        let patch = into_patch(EntityKind::Symbol, &input, Utc::now())?;
        update_document(
            self.db.symbols.as_ref(),
            EntityKind::Symbol,
            &input.id,
            patch,
            "update symbol",
        )
        .await
    }

    pub async fn delete_symbol(&self, id: &str) -> Result<Symbol> {
        rules::required("id", id, "Symbol ID is required")?;
        delete_document(self.db.symbols.as_ref(), EntityKind::Symbol, id, "delete symbol").await
    }
}
