//! Client notes: create, list, update and delete on `client_notes`.

use crate::core::audit;
use crate::core::filter::{NoteSearch, RecordFilter};
use crate::errors::{AppError, AppResult};
use crate::models::form::required_text;
use crate::models::{ClientNote, NewNote, NoteForm, NoteUpdate};
use crate::session::{Session, SessionStorage};
use crate::store::records::to_row;
use crate::store::{Query, Record, RowStore, delete_record, fetch, fetch_one, insert_one};
use chrono::Utc;
use log::info;
use serde_json::Value;

/// Same text shape as the column default.
fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Newest edits first, optionally narrowed by a search term.
pub fn list<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    search: &NoteSearch,
) -> AppResult<Vec<ClientNote>> {
    session.require_signed_in()?;
    let rows: Vec<ClientNote> = fetch(store, ClientNote::TABLE, &ClientNote::list_query())?;
    Ok(search.apply(&rows).into_iter().cloned().collect())
}

pub fn create<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    form: &NoteForm,
) -> AppResult<NewNote> {
    session.require_signed_in()?;
    let note = form.parse()?;
    insert_one(store, ClientNote::TABLE, &note)?;

    info!("event=note_created status=ok");
    audit::record(store, "add", ClientNote::TABLE.as_str(), &note.client_name);
    Ok(note)
}

/// Rewrites name and body and stamps `updated_at`.
pub fn update<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    id: &str,
    client_name: &str,
    note: &str,
) -> AppResult<()> {
    session.require_signed_in()?;
    let patch = NoteUpdate {
        client_name: required_text("client_name", client_name)?,
        note: required_text("note", note)?,
        updated_at: timestamp_now(),
    };

    let key = Value::from(id);
    let affected = store.update(ClientNote::TABLE, &to_row(&patch)?, "id", &key)?;
    if affected == 0 {
        return Err(AppError::NotFound(format!("note {}", id)));
    }

    info!("event=note_updated status=ok id={}", id);
    audit::record(store, "edit", ClientNote::TABLE.as_str(), &format!("id {}", id));
    Ok(())
}

pub fn delete<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    id: &str,
) -> AppResult<()> {
    session.require_signed_in()?;
    delete_record(store, ClientNote::TABLE, &Value::from(id))?;

    info!("event=note_deleted status=ok id={}", id);
    audit::record(store, "del", ClientNote::TABLE.as_str(), &format!("id {}", id));
    Ok(())
}

/// Fetch a single note by id.
pub fn get(store: &impl RowStore, id: &str) -> AppResult<ClientNote> {
    fetch_one(store, ClientNote::TABLE, &Query::new().eq("id", id))
}
