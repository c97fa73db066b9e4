// In crates/database/src/document.rs

use chrono::{DateTime, Utc};
use core_types::{Challenge, Position, RiskProfile, Symbol, Trade, User, Vault};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A unique index over one top-level document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueKey {
    /// The document key, as it appears in the stored JSON.
    pub field: &'static str,
    /// The name of the backing index in the `documents` table.
    pub index: &'static str,
}

/// A record type that can live in a `Collection`.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the partition key in the `documents` table.
    const COLLECTION: &'static str;
    const UNIQUE_KEYS: &'static [UniqueKey] = &[];

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;

    /// Maps a violated index name back to the document key it guards.
    fn unique_field_for_index(index: &str) -> Option<&'static str> {
        Self::UNIQUE_KEYS
            .iter()
            .find(|key| key.index == index)
            .map(|key| key.field)
    }
}

/// Which documents a `find` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    /// Top-level string field equality, e.g. `userId = "..."`.
    Eq { field: &'static str, value: String },
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Eq {
            field,
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => {
                doc.get(*field).and_then(Value::as_str) == Some(value.as_str())
            }
        }
    }
}

macro_rules! impl_document {
    ($ty:ty, $collection:literal, [$($field:literal => $index:literal),* $(,)?]) => {
        impl Document for $ty {
            const COLLECTION: &'static str = $collection;
            const UNIQUE_KEYS: &'static [UniqueKey] = &[
                $(UniqueKey { field: $field, index: $index }),*
            ];

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        }
    };
}

impl_document!(User, "users", [
    "email" => "users_email_key",
    "walletAddress" => "users_wallet_address_key",
]);
impl_document!(Symbol, "symbols", ["symbol" => "symbols_symbol_key"]);
impl_document!(RiskProfile, "risk_profiles", []);
impl_document!(Challenge, "challenges", []);
impl_document!(Vault, "vaults", []);
impl_document!(Position, "positions", []);
impl_document!(Trade, "trades", []);
