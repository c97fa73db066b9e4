// In crates/database/src/postgres.rs

use crate::{Collection, Document, Error, Filter, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::types::Json;
use std::marker::PhantomData;

/// A collection stored as JSONB rows in the shared `documents` table.
///
/// Rows are partitioned by `collection`. Unique keys are partial expression
/// indexes created by the migrations, so a duplicate surfaces as a unique
/// violation which is mapped back to the document key here.
pub struct PgCollection<D> {
    pool: PgPool,
    _marker: PhantomData<fn() -> D>,
}

impl<D: Document> PgCollection<D> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

/// The document key guarded by a violated unique constraint, if it is one of ours.
pub(crate) fn duplicate_field<D: Document>(constraint: Option<&str>) -> Option<&'static str> {
    match constraint? {
        "documents_pkey" => Some("_id"),
        index => D::unique_field_for_index(index),
    }
}

/// Translates unique violations into `Error::DuplicateKey`.
fn write_error<D: Document>(err: sqlx::Error) -> Error {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(field) = duplicate_field::<D>(db_err.constraint()) {
                return Error::DuplicateKey {
                    field: field.to_string(),
                };
            }
        }
    }
    Error::OperationFailed(err)
}

fn decode<D: Document>(row: Option<Json<Value>>) -> Result<Option<D>> {
    row.map(|Json(doc)| serde_json::from_value(doc).map_err(Error::from))
        .transpose()
}

#[async_trait]
impl<D: Document> Collection<D> for PgCollection<D> {
    async fn find_by_id(&self, id: &str) -> Result<Option<D>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT doc FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(D::COLLECTION)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::OperationFailed)?;

        decode(row)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<D>> {
        let rows = match filter {
            Filter::All => {
                sqlx::query_scalar::<_, Json<Value>>(
                    r#"
                    SELECT doc FROM documents
                    WHERE collection = $1
                    ORDER BY created_at DESC, seq DESC
                    "#,
                )
                .bind(D::COLLECTION)
                .fetch_all(&self.pool)
                .await
            }
            Filter::Eq { field, value } => {
                sqlx::query_scalar::<_, Json<Value>>(
                    r#"
                    SELECT doc FROM documents
                    WHERE collection = $1 AND doc ->> $2 = $3
                    ORDER BY created_at DESC, seq DESC
                    "#,
                )
                .bind(D::COLLECTION)
                .bind(*field)
                .bind(value.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(Error::OperationFailed)?;

        rows.into_iter()
            .map(|Json(doc)| serde_json::from_value(doc).map_err(Error::from))
            .collect()
    }

    async fn save(&self, doc: &D) -> Result<D> {
        let value = serde_json::to_value(doc)?;

        let Json(saved) = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            INSERT INTO documents (collection, id, doc, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING doc
            "#,
        )
        .bind(D::COLLECTION)
        .bind(doc.id())
        .bind(Json(value))
        .bind(doc.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(write_error::<D>)?;

        Ok(serde_json::from_value(saved)?)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<D>> {
        // `||` on JSONB replaces top-level keys, matching a `$set` of the patch.
        let row = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            UPDATE documents SET doc = doc || $3
            WHERE collection = $1 AND id = $2
            RETURNING doc
            "#,
        )
        .bind(D::COLLECTION)
        .bind(id)
        .bind(Json(Value::Object(patch)))
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error::<D>)?;

        decode(row)
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<D>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING doc",
        )
        .bind(D::COLLECTION)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::OperationFailed)?;

        decode(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Symbol, Trade, User};

    #[test]
    fn primary_key_violation_is_an_id_clash() {
        assert_eq!(duplicate_field::<User>(Some("documents_pkey")), Some("_id"));
        assert_eq!(duplicate_field::<Trade>(Some("documents_pkey")), Some("_id"));
    }

    #[test]
    fn unique_indexes_map_to_their_document_keys() {
        assert_eq!(duplicate_field::<User>(Some("users_email_key")), Some("email"));
        assert_eq!(
            duplicate_field::<User>(Some("users_wallet_address_key")),
            Some("walletAddress")
        );
        assert_eq!(duplicate_field::<Symbol>(Some("symbols_symbol_key")), Some("symbol"));
    }

    #[test]
    fn foreign_or_missing_constraints_are_not_mapped() {
        // Another collection's index is not this document's key.
        assert_eq!(duplicate_field::<User>(Some("symbols_symbol_key")), None);
        assert_eq!(duplicate_field::<Symbol>(Some("some_other_index")), None);
        assert_eq!(duplicate_field::<Symbol>(None), None);
    }
}
