use crate::core::filter::{RecordFilter, UpsellFilter};
use crate::core::pages::{create_elevated, edit_row};
use crate::errors::AppResult;
use crate::models::{NewUpsell, UpsellEvent, UpsellForm, UpsellPatch};
use crate::session::{Session, SessionStorage};
use crate::store::{Record, RowStore, fetch};
use serde_json::Value;

pub fn list<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    filter: &UpsellFilter,
) -> AppResult<Vec<UpsellEvent>> {
    session.require_signed_in()?;
    let rows: Vec<UpsellEvent> = fetch(store, UpsellEvent::TABLE, &UpsellEvent::list_query())?;
    Ok(filter.apply(&rows).into_iter().cloned().collect())
}

pub fn add<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    form: &UpsellForm,
) -> AppResult<NewUpsell> {
    create_elevated(
        store,
        session,
        UpsellEvent::TABLE,
        || form.parse(),
        |u: &NewUpsell| {
            format!(
                "{} / {} on {} ({:.2})",
                u.company, u.service, u.upsell_date, u.gained_value
            )
        },
    )
}

pub fn edit<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    id: i64,
    patch: &UpsellPatch,
) -> AppResult<UpsellEvent> {
    edit_row(store, session, Value::from(id), |u: &mut UpsellEvent| {
        patch.apply(u)
    })
}
