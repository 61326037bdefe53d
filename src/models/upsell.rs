use super::form::{optional_text, parse_amount, parse_form_date, required_text};
use crate::errors::AppResult;
use crate::store::{Direction, Query, Record, Table};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recorded customer expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsellEvent {
    pub id: i64,
    pub created_at: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub upsell_date: NaiveDate,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub gained_value: Option<f64>,
    #[serde(default)]
    pub squad: Option<String>,
}

impl Record for UpsellEvent {
    const TABLE: Table = Table::UpsellEvents;

    fn key(&self) -> Value {
        Value::from(self.id)
    }

    fn list_query() -> Query {
        Query::new().order_by("upsell_date", Direction::Desc)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUpsell {
    pub company: String,
    pub service: String,
    pub upsell_date: NaiveDate,
    pub manager: String,
    pub gained_value: f64,
    pub squad: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpsellForm {
    pub company: String,
    pub service: String,
    pub upsell_date: String,
    pub manager: String,
    pub gained_value: String,
    pub squad: String,
}

impl UpsellForm {
    pub fn parse(&self) -> AppResult<NewUpsell> {
        Ok(NewUpsell {
            company: required_text("company", &self.company)?,
            service: required_text("service", &self.service)?,
            upsell_date: parse_form_date("upsell_date", &self.upsell_date)?,
            manager: required_text("manager", &self.manager)?,
            gained_value: parse_amount("gained_value", &self.gained_value)?,
            squad: optional_text(&self.squad),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpsellPatch {
    pub company: Option<String>,
    pub service: Option<String>,
    pub upsell_date: Option<String>,
    pub manager: Option<String>,
    pub gained_value: Option<String>,
    pub squad: Option<String>,
}

impl UpsellPatch {
    pub fn apply(&self, ev: &mut UpsellEvent) -> AppResult<()> {
        if let Some(v) = &self.company {
            ev.company = optional_text(v);
        }
        if let Some(v) = &self.service {
            ev.service = optional_text(v);
        }
        if let Some(v) = &self.upsell_date {
            ev.upsell_date = parse_form_date("upsell_date", v)?;
        }
        if let Some(v) = &self.manager {
            ev.manager = optional_text(v);
        }
        if let Some(v) = &self.gained_value {
            ev.gained_value = Some(parse_amount("gained_value", v)?);
        }
        if let Some(v) = &self.squad {
            ev.squad = optional_text(v);
        }
        Ok(())
    }
}
