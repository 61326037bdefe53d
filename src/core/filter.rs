//! Client-side filters applied to fully fetched collections.
//!
//! Every populated field must pass (logical AND). An unset field always
//! passes, and so does a record whose own value is absent.

use crate::models::{ChurnEvent, ClientNote, Location, UpsellEvent};
use chrono::NaiveDate;

/// Case-insensitive substring test. An empty needle matches anything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn text_matches(value: Option<&str>, needle: &Option<String>) -> bool {
    match (value, needle.as_deref()) {
        (_, None) => true,
        (None, Some(_)) => true,
        (Some(v), Some(n)) => contains_ci(v, n),
    }
}

/// Inclusive `[start, end]`; either side may be open.
pub fn in_date_range(d: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.is_none_or(|s| d >= s) && end.is_none_or(|e| d <= e)
}

pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;

    /// Keep only matching records, preserving order.
    fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl RecordFilter<Location> for LocationFilter {
    fn matches(&self, l: &Location) -> bool {
        text_matches(Some(&l.company), &self.company)
            && text_matches(Some(&l.city), &self.city)
            && text_matches(Some(&l.state), &self.state)
            && text_matches(Some(&l.country), &self.country)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChurnFilter {
    pub company: Option<String>,
    pub reason: Option<String>,
    pub manager: Option<String>,
    pub squad: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RecordFilter<ChurnEvent> for ChurnFilter {
    fn matches(&self, c: &ChurnEvent) -> bool {
        text_matches(c.company.as_deref(), &self.company)
            && text_matches(c.reason.as_deref(), &self.reason)
            && text_matches(c.manager.as_deref(), &self.manager)
            && text_matches(c.squad.as_deref(), &self.squad)
            && in_date_range(c.churn_date, self.start, self.end)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpsellFilter {
    pub company: Option<String>,
    pub service: Option<String>,
    pub manager: Option<String>,
    pub squad: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RecordFilter<UpsellEvent> for UpsellFilter {
    fn matches(&self, u: &UpsellEvent) -> bool {
        text_matches(u.company.as_deref(), &self.company)
            && text_matches(u.service.as_deref(), &self.service)
            && text_matches(u.manager.as_deref(), &self.manager)
            && text_matches(u.squad.as_deref(), &self.squad)
            && in_date_range(u.upsell_date, self.start, self.end)
    }
}

/// Notes search: client name OR body.
#[derive(Debug, Clone, Default)]
pub struct NoteSearch {
    pub term: Option<String>,
}

impl RecordFilter<ClientNote> for NoteSearch {
    fn matches(&self, n: &ClientNote) -> bool {
        match self.term.as_deref() {
            None => true,
            Some(t) => contains_ci(&n.client_name, t) || contains_ci(&n.note, t),
        }
    }
}
