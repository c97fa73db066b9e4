// In crates/database/src/lib.rs

use app_config::types::DatabaseSettings;
use async_trait::async_trait;
use core_types::{Challenge, Position, RiskProfile, Symbol, Trade, User, Vault};
use serde_json::{Map, Value};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;

pub mod document;
pub mod error;
pub mod memory;
pub mod postgres;

// Re-export the most important types for easy access.
pub use document::{Document, Filter, UniqueKey};
pub use error::{Error, Result};
pub use memory::MemoryCollection;
pub use postgres::PgCollection;

/// The storage collaborator for one kind of document.
///
/// Every method is a single atomic call against the backing store. Listing
/// methods return documents newest first (by `createdAt`, then insertion order).
#[async_trait]
pub trait Collection<D: Document>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<D>>;

    async fn find(&self, filter: &Filter) -> Result<Vec<D>>;

    /// Inserts a new document. Fails with `Error::DuplicateKey` on a unique
    /// index collision.
    async fn save(&self, doc: &D) -> Result<D>;

    /// Shallow-merges `patch` into the stored document and returns the new
    /// state, or `None` if no document has this id.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<D>>;

    /// Removes the document and returns its last state.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<D>>;
}

/// Every collection the platform uses, registered once at startup.
#[derive(Clone)]
pub struct Db {
    pub users: Arc<dyn Collection<User>>,
    pub symbols: Arc<dyn Collection<Symbol>>,
    pub risk_profiles: Arc<dyn Collection<RiskProfile>>,
    pub challenges: Arc<dyn Collection<Challenge>>,
    pub vaults: Arc<dyn Collection<Vault>>,
    pub positions: Arc<dyn Collection<Position>>,
    pub trades: Arc<dyn Collection<Trade>>,
}

impl Db {
    /// A process-local store. Nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryCollection::new()),
            symbols: Arc::new(MemoryCollection::new()),
            risk_profiles: Arc::new(MemoryCollection::new()),
            challenges: Arc::new(MemoryCollection::new()),
            vaults: Arc::new(MemoryCollection::new()),
            positions: Arc::new(MemoryCollection::new()),
            trades: Arc::new(MemoryCollection::new()),
        }
    }

    /// Collections backed by the `documents` table of a migrated pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgCollection::new(pool.clone())),
            symbols: Arc::new(PgCollection::new(pool.clone())),
            risk_profiles: Arc::new(PgCollection::new(pool.clone())),
            challenges: Arc::new(PgCollection::new(pool.clone())),
            vaults: Arc::new(PgCollection::new(pool.clone())),
            positions: Arc::new(PgCollection::new(pool.clone())),
            trades: Arc::new(PgCollection::new(pool)),
        }
    }
}

/// Establishes the document store described by `settings`.
///
/// For a PostgreSQL URL this opens a connection pool and runs migrations, so
/// the unique indexes exist before the first request. `memory://` selects the
/// in-process store.
///
/// # Arguments
///
/// * `settings`: The database configuration settings.
///
/// # Returns
///
/// A `Result` containing the `Db` on success, or an `Error` on failure.
pub async fn connect(settings: &DatabaseSettings) -> Result<Db> {
    if settings.is_in_memory() {
        tracing::warn!("Using the in-memory document store. Data will not be persisted.");
        return Ok(Db::in_memory());
    }

    // Create a connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        // The `?` operator uses the `#[from]` attribute in our error enum
        // to automatically convert the `sqlx::Error` into a `database::Error`.
        .connect(&settings.url)
        .await?;

    migrate(&pool).await?;

    Ok(Db::postgres(pool))
}

/// Runs database migrations. This ensures the schema is up-to-date.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await.map_err(Error::from)
}
