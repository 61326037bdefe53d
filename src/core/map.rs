use crate::core::filter::{LocationFilter, RecordFilter};
use crate::core::pages::{create_elevated, edit_row};
use crate::errors::AppResult;
use crate::models::{Location, LocationForm, LocationPatch, NewLocation};
use crate::session::{Session, SessionStorage};
use crate::store::{Record, RowStore, fetch};
use serde_json::Value;

/// A location with its parsed marker position, when it has a valid one.
pub struct Marker<'a> {
    pub location: &'a Location,
    pub position: Option<(f64, f64)>,
}

pub fn list<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
) -> AppResult<Vec<Location>> {
    session.require_signed_in()?;
    fetch(store, Location::TABLE, &Location::list_query())
}

pub fn markers<'a>(locations: &'a [Location], filter: &LocationFilter) -> Vec<Marker<'a>> {
    filter
        .apply(locations)
        .into_iter()
        .map(|location| Marker {
            location,
            position: location.coordinates(),
        })
        .collect()
}

pub fn add<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    form: &LocationForm,
) -> AppResult<NewLocation> {
    create_elevated(
        store,
        session,
        Location::TABLE,
        || form.parse(),
        |l: &NewLocation| format!("{} ({}, {})", l.company, l.city, l.country),
    )
}

pub fn edit<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    id: i64,
    patch: &LocationPatch,
) -> AppResult<Location> {
    edit_row(store, session, Value::from(id), |l: &mut Location| patch.apply(l))
}
