use super::form::required_text;
use crate::errors::AppResult;
use crate::store::{Direction, Query, Record, Table};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientNote {
    pub id: String,
    pub client_name: String,
    pub note: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for ClientNote {
    const TABLE: Table = Table::ClientNotes;

    fn key(&self) -> Value {
        Value::from(self.id.clone())
    }

    fn list_query() -> Query {
        Query::new().order_by("updated_at", Direction::Desc)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub client_name: String,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoteForm {
    pub client_name: String,
    pub note: String,
}

impl NoteForm {
    pub fn parse(&self) -> AppResult<NewNote> {
        Ok(NewNote {
            client_name: required_text("client_name", &self.client_name)?,
            note: required_text("note", &self.note)?,
        })
    }
}

/// Columns written by a note edit.
#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdate {
    pub client_name: String,
    pub note: String,
    pub updated_at: String,
}
