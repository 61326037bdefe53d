use super::form::{optional_text, parse_amount, parse_form_date, required_text};
use crate::errors::AppResult;
use crate::store::{Direction, Query, Record, Table};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recorded customer loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnEvent {
    pub id: i64,
    pub created_at: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub churn_date: NaiveDate,
    /// Lifetime value of the lost customer.
    #[serde(default)]
    pub ltv: Option<f64>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub lost_value: Option<f64>,
    #[serde(default)]
    pub squad: Option<String>,
}

impl Record for ChurnEvent {
    const TABLE: Table = Table::ChurnEvents;

    fn key(&self) -> Value {
        Value::from(self.id)
    }

    fn list_query() -> Query {
        Query::new().order_by("churn_date", Direction::Desc)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChurn {
    pub company: String,
    pub reason: String,
    pub churn_date: NaiveDate,
    pub ltv: f64,
    pub manager: String,
    pub lost_value: f64,
    pub squad: Option<String>,
}

/// Raw text of the add-churn form.
#[derive(Debug, Clone, Default)]
pub struct ChurnForm {
    pub company: String,
    pub reason: String,
    pub churn_date: String,
    pub ltv: String,
    pub manager: String,
    pub lost_value: String,
    pub squad: String,
}

impl ChurnForm {
    pub fn parse(&self) -> AppResult<NewChurn> {
        Ok(NewChurn {
            company: required_text("company", &self.company)?,
            reason: required_text("reason", &self.reason)?,
            churn_date: parse_form_date("churn_date", &self.churn_date)?,
            ltv: parse_amount("ltv", &self.ltv)?,
            manager: required_text("manager", &self.manager)?,
            lost_value: parse_amount("lost_value", &self.lost_value)?,
            squad: optional_text(&self.squad),
        })
    }
}

/// Inline-edit payload. Blank text clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct ChurnPatch {
    pub company: Option<String>,
    pub reason: Option<String>,
    pub churn_date: Option<String>,
    pub ltv: Option<String>,
    pub manager: Option<String>,
    pub lost_value: Option<String>,
    pub squad: Option<String>,
}

impl ChurnPatch {
    pub fn apply(&self, ev: &mut ChurnEvent) -> AppResult<()> {
        if let Some(v) = &self.company {
            ev.company = optional_text(v);
        }
        if let Some(v) = &self.reason {
            ev.reason = optional_text(v);
        }
        if let Some(v) = &self.churn_date {
            ev.churn_date = parse_form_date("churn_date", v)?;
        }
        if let Some(v) = &self.ltv {
            ev.ltv = Some(parse_amount("ltv", v)?);
        }
        if let Some(v) = &self.manager {
            ev.manager = optional_text(v);
        }
        if let Some(v) = &self.lost_value {
            ev.lost_value = Some(parse_amount("lost_value", v)?);
        }
        if let Some(v) = &self.squad {
            ev.squad = optional_text(v);
        }
        Ok(())
    }
}
