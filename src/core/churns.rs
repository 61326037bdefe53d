use crate::core::filter::{ChurnFilter, RecordFilter};
use crate::core::pages::{create_elevated, edit_row};
use crate::errors::AppResult;
use crate::models::{ChurnEvent, ChurnForm, ChurnPatch, NewChurn};
use crate::session::{Session, SessionStorage};
use crate::store::{Record, RowStore, fetch};
use serde_json::Value;

/// Full fetch ordered by churn date (newest first), then filtered locally.
pub fn list<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    filter: &ChurnFilter,
) -> AppResult<Vec<ChurnEvent>> {
    session.require_signed_in()?;
    let rows: Vec<ChurnEvent> = fetch(store, ChurnEvent::TABLE, &ChurnEvent::list_query())?;
    Ok(filter.apply(&rows).into_iter().cloned().collect())
}

pub fn add<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    form: &ChurnForm,
) -> AppResult<NewChurn> {
    create_elevated(
        store,
        session,
        ChurnEvent::TABLE,
        || form.parse(),
        |c: &NewChurn| format!("{} on {} ({:.2})", c.company, c.churn_date, c.lost_value),
    )
}

pub fn edit<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    id: i64,
    patch: &ChurnPatch,
) -> AppResult<ChurnEvent> {
    edit_row(store, session, Value::from(id), |c: &mut ChurnEvent| {
        patch.apply(c)
    })
}
