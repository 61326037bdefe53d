//! Shared add/edit flow for the list-filter-edit pages.

use crate::core::audit;
use crate::core::editing::InlineEditor;
use crate::errors::{AppError, AppResult};
use crate::session::{Session, SessionStorage};
use crate::store::{Record, RowStore, Table, insert_one};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

/// Capability check, parse, insert, audit. The check runs first so a
/// standard session never reaches the store.
pub fn create_elevated<S, N, P>(
    store: &impl RowStore,
    session: &Session<S>,
    table: Table,
    parse: P,
    describe: impl Fn(&N) -> String,
) -> AppResult<N>
where
    S: SessionStorage,
    N: Serialize,
    P: FnOnce() -> AppResult<N>,
{
    session.require_elevated()?;
    let payload = parse()?;
    insert_one(store, table, &payload)?;

    let summary = describe(&payload);
    info!("event=record_created table={} status=ok", table);
    audit::record(store, "add", table.as_str(), &summary);
    Ok(payload)
}

/// Load the collection, edit one row through `apply`, save, and return the
/// refetched row.
pub fn edit_row<S, T>(
    store: &impl RowStore,
    session: &Session<S>,
    key: Value,
    apply: impl FnOnce(&mut T) -> AppResult<()>,
) -> AppResult<T>
where
    S: SessionStorage,
    T: Record,
{
    session.require_signed_in()?;

    let mut editor = InlineEditor::<T>::load(store)?;
    editor.begin(&key)?;
    let draft = editor
        .current_mut()
        .ok_or_else(|| AppError::Other("edit was not started".into()))?;
    if let Err(e) = apply(draft) {
        editor.cancel();
        warn!("event=record_edit table={} key={} status=rejected error={}", T::TABLE, key, e);
        return Err(e);
    }
    editor.save(store)?;

    audit::record(store, "edit", T::TABLE.as_str(), &format!("id {}", key));
    editor
        .find(&key)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("{} {}", T::TABLE, key)))
}
