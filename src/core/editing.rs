//! Single-row inline editor shared by the list pages.

use crate::errors::{AppError, AppResult};
use crate::store::{Record, RowStore, fetch, update_record};
use log::{error, info};
use serde_json::Value;

/// A loaded collection with at most one row under edit.
pub struct InlineEditor<T: Record> {
    rows: Vec<T>,
    draft: Option<T>,
}

impl<T: Record> InlineEditor<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows, draft: None }
    }

    /// Full fetch with the record's list ordering.
    pub fn load(store: &impl RowStore) -> AppResult<Self> {
        let rows = fetch(store, T::TABLE, &T::list_query())?;
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Start editing the row with `key`. Any pending edit is discarded.
    pub fn begin(&mut self, key: &Value) -> AppResult<()> {
        let row = self
            .rows
            .iter()
            .find(|r| &r.key() == key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("{} {}", T::TABLE, key)))?;
        self.draft = Some(row);
        Ok(())
    }

    pub fn current(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.draft.as_mut()
    }

    /// Drop the pending edit; the loaded rows are untouched.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Whole-row update keyed by identity, then a full refetch.
    ///
    /// On a failed update the draft stays in place so it can be retried.
    pub fn save(&mut self, store: &impl RowStore) -> AppResult<()> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| AppError::Other("no row is being edited".into()))?;

        update_record(store, draft)?;
        info!("event=record_updated table={} key={} status=ok", T::TABLE, draft.key());
        self.draft = None;

        match fetch(store, T::TABLE, &T::list_query()) {
            Ok(rows) => self.rows = rows,
            Err(e) => error!("event=refetch table={} status=error error={}", T::TABLE, e),
        }
        Ok(())
    }

    pub fn find(&self, key: &Value) -> Option<&T> {
        self.rows.iter().find(|r| &r.key() == key)
    }
}
