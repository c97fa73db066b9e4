// In crates/database/src/memory.rs

use crate::{Collection, Document, Error, Filter, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

/// An in-process collection holding documents as JSON, like the real store.
///
/// Each call takes the lock once, so every call is atomic with respect to the
/// others. Unique keys are enforced on save and update.
pub struct MemoryCollection<D> {
    inner: Mutex<Inner>,
    _marker: PhantomData<fn() -> D>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    rows: Vec<Row>,
}

struct Row {
    seq: u64,
    id: String,
    created_at: DateTime<Utc>,
    doc: Value,
}

impl<D: Document> MemoryCollection<D> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            _marker: PhantomData,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave a half-written row behind.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<D: Document> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Fails if `doc` shares a unique key value with any row other than `id`.
    fn check_unique<D: Document>(&self, id: &str, doc: &Value) -> Result<()> {
        for key in D::UNIQUE_KEYS {
            let Some(value) = doc.get(key.field).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = self
                .rows
                .iter()
                .any(|row| row.id != id && row.doc.get(key.field) == Some(value));
            if taken {
                return Err(Error::DuplicateKey {
                    field: key.field.to_string(),
                });
            }
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}

#[async_trait]
impl<D: Document> Collection<D> for MemoryCollection<D> {
    async fn find_by_id(&self, id: &str) -> Result<Option<D>> {
        let inner = self.lock();
        inner
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| serde_json::from_value(row.doc.clone()).map_err(Error::from))
            .transpose()
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<D>> {
        let inner = self.lock();
        let mut rows: Vec<&Row> = inner
            .rows
            .iter()
            .filter(|row| filter.matches(&row.doc))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.seq.cmp(&a.seq)));
        rows.into_iter()
            .map(|row| serde_json::from_value(row.doc.clone()).map_err(Error::from))
            .collect()
    }

    async fn save(&self, doc: &D) -> Result<D> {
        let value = serde_json::to_value(doc)?;
        let mut inner = self.lock();

        if inner.position(doc.id()).is_some() {
            return Err(Error::DuplicateKey {
                field: "_id".to_string(),
            });
        }
        inner.check_unique::<D>(doc.id(), &value)?;

        let saved = serde_json::from_value(value.clone())?;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.rows.push(Row {
            seq,
            id: doc.id().to_string(),
            created_at: doc.created_at(),
            doc: value,
        });
        Ok(saved)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<D>> {
        let mut inner = self.lock();
        let Some(index) = inner.position(id) else {
            return Ok(None);
        };

        let mut merged = inner.rows[index].doc.clone();
        if let Value::Object(fields) = &mut merged {
            fields.extend(patch);
        }
        // Reject a patch that would leave the document unreadable.
        let updated: D = serde_json::from_value(merged.clone())?;
        inner.check_unique::<D>(id, &merged)?;

        inner.rows[index].doc = merged;
        Ok(Some(updated))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<D>> {
        let mut inner = self.lock();
        match inner.position(id) {
            Some(index) => {
                let row = inner.rows.remove(index);
                Ok(Some(serde_json::from_value(row.doc)?))
            }
            None => Ok(None),
        }
    }
}
