// In crates/platform/src/lib.rs

use chrono::{DateTime, SecondsFormat, Utc};
use database::{Collection, Db, Document, Filter};
use serde::Serialize;
use serde_json::{Map, Value};

mod challenges;
pub mod error;
mod positions;
mod risk_profiles;
mod symbols;
mod trades;
mod users;
pub mod validators;
mod vaults;

// Re-export public types
pub use challenges::CHALLENGE_STARTING_BALANCE;
pub use error::{EntityKind, Error, ErrorCode, Result};

use error::storage;

/// The operation handlers for every record kind.
///
/// Each handler validates its input, runs the cross-entity checks for that
/// operation, makes exactly one storage write (or one query) and returns the
/// resulting record. Handlers hold no state of their own.
#[derive(Clone)]
pub struct Platform {
    db: Db,
}

impl Platform {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

/// A fresh opaque document identifier.
fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Serializes the supplied fields of an update and stamps `updatedAt`.
fn into_patch<U: Serialize>(
    entity: EntityKind,
    changes: &U,
    now: DateTime<Utc>,
) -> Result<Map<String, Value>> {
    let mut patch = match serde_json::to_value(changes) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            tracing::error!(%entity, ?other, "Update did not serialize to an object");
            return Err(Error::Internal(format!("Failed to update {}", noun(entity))));
        }
        Err(err) => {
            tracing::error!(%entity, error = %err, "Update could not be serialized");
            return Err(Error::Internal(format!("Failed to update {}", noun(entity))));
        }
    };
    let stamp = now.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    patch.insert("updatedAt".to_string(), Value::String(stamp));
    Ok(patch)
}

fn noun(entity: EntityKind) -> String {
    entity.to_string().to_lowercase()
}

// --- Generic CRUD shapes shared by the per-entity modules ---

async fn get_document<D: Document>(
    collection: &dyn Collection<D>,
    entity: EntityKind,
    id: &str,
    action: &'static str,
) -> Result<D> {
    collection
        .find_by_id(id)
        .await
        .map_err(storage(entity, action))?
        .ok_or_else(|| Error::not_found(entity, id))
}

async fn list_documents<D: Document>(
    collection: &dyn Collection<D>,
    entity: EntityKind,
    filter: Filter,
    action: &'static str,
) -> Result<Vec<D>> {
    collection.find(&filter).await.map_err(storage(entity, action))
}

async fn update_document<D: Document>(
    collection: &dyn Collection<D>,
    entity: EntityKind,
    id: &str,
    patch: Map<String, Value>,
    action: &'static str,
) -> Result<D> {
    collection
        .find_by_id_and_update(id, patch)
        .await
        .map_err(storage(entity, action))?
        .ok_or_else(|| Error::not_found(entity, id))
}

async fn delete_document<D: Document>(
    collection: &dyn Collection<D>,
    entity: EntityKind,
    id: &str,
    action: &'static str,
) -> Result<D> {
    let deleted = collection
        .find_by_id_and_delete(id)
        .await
        .map_err(storage(entity, action))?
        .ok_or_else(|| Error::not_found(entity, id))?;
    tracing::info!(%entity, id, "Document deleted");
    Ok(deleted)
}
