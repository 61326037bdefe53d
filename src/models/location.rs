use super::form::required_text;
use crate::errors::{AppError, AppResult};
use crate::store::{Record, Table};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// A company location shown as a map marker.
///
/// Coordinates are kept as decimal text (that is what the table stores) and
/// only parsed when a marker is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub created_at: String,
    pub company: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl Record for Location {
    const TABLE: Table = Table::Locations;

    fn key(&self) -> Value {
        Value::from(self.id)
    }
}

impl Location {
    /// `(lat, lon)` when both parse and fall inside valid ranges.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        parse_coordinates(&self.latitude, &self.longitude).ok()
    }
}

/// Insert payload: identity and timestamp come from the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewLocation {
    pub company: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

/// Raw text of the add-location form.
#[derive(Debug, Clone, Default)]
pub struct LocationForm {
    pub company: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl LocationForm {
    pub fn parse(&self) -> AppResult<NewLocation> {
        let latitude = coordinate_text("latitude", &self.latitude)?;
        let longitude = coordinate_text("longitude", &self.longitude)?;
        parse_coordinates(&latitude, &longitude)?;

        Ok(NewLocation {
            company: required_text("company", &self.company)?,
            city: required_text("city", &self.city)?,
            state: required_text("state", &self.state)?,
            country: required_text("country", &self.country)?,
            latitude,
            longitude,
        })
    }
}

/// Edit payload: `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl LocationPatch {
    pub fn apply(&self, loc: &mut Location) -> AppResult<()> {
        if let Some(v) = &self.company {
            loc.company = required_text("company", v)?;
        }
        if let Some(v) = &self.city {
            loc.city = required_text("city", v)?;
        }
        if let Some(v) = &self.state {
            loc.state = required_text("state", v)?;
        }
        if let Some(v) = &self.country {
            loc.country = required_text("country", v)?;
        }
        if self.latitude.is_none() && self.longitude.is_none() {
            return Ok(());
        }
        if let Some(v) = &self.latitude {
            loc.latitude = coordinate_text("latitude", v)?;
        }
        if let Some(v) = &self.longitude {
            loc.longitude = coordinate_text("longitude", v)?;
        }
        parse_coordinates(&loc.latitude, &loc.longitude)?;
        Ok(())
    }
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("static coordinate regex"))
}

/// Input pattern check, the same one the add form enforces.
fn coordinate_text(field: &'static str, raw: &str) -> AppResult<String> {
    let t = required_text(field, raw)?;
    if !coordinate_pattern().is_match(&t) {
        return Err(AppError::InvalidCoordinate(format!("{field}: '{t}'")));
    }
    Ok(t)
}

pub fn parse_coordinates(lat: &str, lon: &str) -> AppResult<(f64, f64)> {
    let lat_v: f64 = lat
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidCoordinate(format!("latitude: '{lat}'")))?;
    let lon_v: f64 = lon
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidCoordinate(format!("longitude: '{lon}'")))?;

    if !(-90.0..=90.0).contains(&lat_v) {
        return Err(AppError::InvalidCoordinate(format!(
            "latitude out of range: {lat_v}"
        )));
    }
    if !(-180.0..=180.0).contains(&lon_v) {
        return Err(AppError::InvalidCoordinate(format!(
            "longitude out of range: {lon_v}"
        )));
    }
    Ok((lat_v, lon_v))
}
