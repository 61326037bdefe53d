//! Period aggregator behind the `dashboard` command.

use crate::errors::AppResult;
use crate::models::{CURRENT_TARGET_ID, ChurnEvent, SalesTarget, UpsellEvent};
use crate::store::{Query, Record, RowStore, Table, fetch, fetch_one};
use crate::utils::date::{month_bounds, month_key, previous_month_bounds};
use chrono::NaiveDate;
use clap::ValueEnum;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Label used when a grouping field is absent or blank.
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Current,
    #[value(alias = "last")]
    Previous,
}

impl Period {
    /// Inclusive date bounds relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Current => month_bounds(today),
            Period::Previous => previous_month_bounds(today),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Current => "current month",
            Period::Previous => "previous month",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: String,
    pub gained: f64,
    pub lost: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardReport {
    pub total_gained: f64,
    pub total_lost: f64,
    pub gained_by_squad: Vec<GroupTotal>,
    pub gained_by_service: Vec<GroupTotal>,
    pub lost_by_squad: Vec<GroupTotal>,
    pub lost_by_reason: Vec<GroupTotal>,
    pub monthly: Vec<MonthlyPoint>,
}

impl DashboardReport {
    pub fn current_total(&self) -> f64 {
        self.total_gained - self.total_lost
    }
}

fn group_label(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

/// Sum per group, groups listed in order of first appearance.
fn sum_by<T>(
    items: &[T],
    key: impl Fn(&T) -> Option<&str>,
    amount: impl Fn(&T) -> f64,
) -> Vec<GroupTotal> {
    let mut out: Vec<GroupTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let label = group_label(key(item));
        match index.get(label) {
            Some(&i) => out[i].total += amount(item),
            None => {
                index.insert(label.to_string(), out.len());
                out.push(GroupTotal {
                    label: label.to_string(),
                    total: amount(item),
                });
            }
        }
    }
    out
}

fn gained(u: &UpsellEvent) -> f64 {
    u.gained_value.unwrap_or(0.0)
}

fn lost(c: &ChurnEvent) -> f64 {
    c.lost_value.unwrap_or(0.0)
}

/// Pure aggregation over already-fetched events.
pub fn aggregate(upsells: &[UpsellEvent], churns: &[ChurnEvent]) -> DashboardReport {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for u in upsells {
        months.entry(month_key(u.upsell_date)).or_default().0 += gained(u);
    }
    for c in churns {
        months.entry(month_key(c.churn_date)).or_default().1 += lost(c);
    }

    DashboardReport {
        total_gained: upsells.iter().map(gained).sum(),
        total_lost: churns.iter().map(lost).sum(),
        gained_by_squad: sum_by(upsells, |u| u.squad.as_deref(), gained),
        gained_by_service: sum_by(upsells, |u| u.service.as_deref(), gained),
        lost_by_squad: sum_by(churns, |c| c.squad.as_deref(), lost),
        lost_by_reason: sum_by(churns, |c| c.reason.as_deref(), lost),
        monthly: months
            .into_iter()
            .map(|(month, (gained, lost))| MonthlyPoint { month, gained, lost })
            .collect(),
    }
}

/// Progress of the net result against the monthly target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub current_total: f64,
    pub target: f64,
}

impl Progress {
    pub fn new(current_total: f64, target: f64) -> Self {
        Self {
            current_total,
            target,
        }
    }

    /// Raw percentage, 0 when no positive target is set.
    pub fn percent(&self) -> f64 {
        if self.target <= 0.0 {
            0.0
        } else {
            self.current_total / self.target * 100.0
        }
    }

    /// Displayed magnitude, clamped to 100.
    pub fn magnitude(&self) -> f64 {
        self.percent().abs().min(100.0)
    }

    pub fn is_negative(&self) -> bool {
        self.current_total < 0.0
    }

    /// Text bar of `width` cells filled by the displayed magnitude.
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.magnitude() / 100.0) * width as f64).round() as usize;
        format!(
            "[{}{}]",
            "#".repeat(filled.min(width)),
            ".".repeat(width.saturating_sub(filled))
        )
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{:.1}%", sign, self.magnitude())
    }
}

/// Dashboard view state. A failed refresh keeps the previous state.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub period: Period,
    pub target: f64,
    pub report: DashboardReport,
}

impl Dashboard {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.report.current_total(), self.target)
    }

    /// Fetch target, upsells and churns for the period. Any failure aborts
    /// the whole load.
    pub fn load(
        store: &impl RowStore,
        period: Period,
        today: NaiveDate,
    ) -> AppResult<(f64, DashboardReport)> {
        let target: SalesTarget = fetch_one(
            store,
            Table::SalesTargets,
            &Query::new().eq("id", CURRENT_TARGET_ID),
        )?;

        let (start, end) = period.bounds(today);
        let (start, end) = (start.to_string(), end.to_string());

        let upsells: Vec<UpsellEvent> = fetch(
            store,
            UpsellEvent::TABLE,
            &Query::new()
                .gte("upsell_date", start.as_str())
                .lte("upsell_date", end.as_str()),
        )?;
        let churns: Vec<ChurnEvent> = fetch(
            store,
            ChurnEvent::TABLE,
            &Query::new()
                .gte("churn_date", start.as_str())
                .lte("churn_date", end.as_str()),
        )?;

        Ok((target.monthly_target, aggregate(&upsells, &churns)))
    }

    /// Reload for the current period. Returns whether new data was applied.
    pub fn refresh(&mut self, store: &impl RowStore, today: NaiveDate) -> bool {
        match Self::load(store, self.period, today) {
            Ok((target, report)) => {
                info!(
                    "event=dashboard_refresh status=ok period={:?} months={}",
                    self.period,
                    report.monthly.len()
                );
                self.target = target;
                self.report = report;
                true
            }
            Err(e) => {
                error!(
                    "event=dashboard_refresh status=error period={:?} error={}",
                    self.period, e
                );
                false
            }
        }
    }

    pub fn set_period(&mut self, store: &impl RowStore, period: Period, today: NaiveDate) -> bool {
        self.period = period;
        self.refresh(store, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn up(date: &str, service: Option<&str>, squad: Option<&str>, v: f64) -> UpsellEvent {
        UpsellEvent {
            id: 0,
            created_at: String::new(),
            company: Some("Acme".into()),
            service: service.map(String::from),
            upsell_date: d(date),
            manager: None,
            gained_value: Some(v),
            squad: squad.map(String::from),
        }
    }

    fn ch(date: &str, reason: Option<&str>, squad: Option<&str>, v: Option<f64>) -> ChurnEvent {
        ChurnEvent {
            id: 0,
            created_at: String::new(),
            company: None,
            reason: reason.map(String::from),
            churn_date: d(date),
            ltv: None,
            manager: None,
            lost_value: v,
            squad: squad.map(String::from),
        }
    }

    #[test]
    fn progress_examples() {
        assert_eq!(Progress::new(1000.0 - 400.0, 1000.0).to_string(), "60.0%");
        assert_eq!(Progress::new(200.0 - 900.0, 1000.0).to_string(), "-70.0%");
    }

    #[test]
    fn progress_clamps_and_handles_zero_target() {
        assert_eq!(Progress::new(5000.0, 1000.0).to_string(), "100.0%");
        assert_eq!(Progress::new(-5000.0, 1000.0).to_string(), "-100.0%");
        assert_eq!(Progress::new(300.0, 0.0).percent(), 0.0);
        assert_eq!(Progress::new(300.0, -10.0).to_string(), "0.0%");
        assert_eq!(Progress::new(-1.0, 0.0).to_string(), "-0.0%");
    }

    #[test]
    fn groups_keep_first_appearance_and_placeholder() {
        let ups = vec![
            up("2025-03-02", Some("CRM"), Some("Beta"), 100.0),
            up("2025-03-03", None, Some("Alpha"), 50.0),
            up("2025-03-04", Some(" "), None, 25.0),
            up("2025-03-05", Some("CRM"), Some("Beta"), 10.0),
        ];
        let r = aggregate(&ups, &[]);

        let squads: Vec<(&str, f64)> = r
            .gained_by_squad
            .iter()
            .map(|g| (g.label.as_str(), g.total))
            .collect();
        assert_eq!(
            squads,
            vec![("Beta", 110.0), ("Alpha", 50.0), (NOT_SPECIFIED, 25.0)]
        );
        assert_eq!(r.gained_by_service[1].label, NOT_SPECIFIED);
        assert_eq!(r.gained_by_service[1].total, 75.0);
    }

    #[test]
    fn group_sums_equal_totals() {
        let ups = vec![
            up("2025-01-10", Some("A"), Some("x"), 10.5),
            up("2025-02-10", Some("B"), None, 20.25),
        ];
        let chs = vec![
            ch("2025-01-11", Some("Price"), Some("x"), Some(3.0)),
            ch("2025-02-11", None, None, None),
            ch("2025-02-12", Some("Price"), Some("y"), Some(7.0)),
        ];
        let r = aggregate(&ups, &chs);

        let s = |g: &[GroupTotal]| g.iter().map(|t| t.total).sum::<f64>();
        assert_eq!(s(&r.gained_by_squad), r.total_gained);
        assert_eq!(s(&r.gained_by_service), r.total_gained);
        assert_eq!(s(&r.lost_by_squad), r.total_lost);
        assert_eq!(s(&r.lost_by_reason), r.total_lost);
        assert_eq!(r.total_lost, 10.0);
    }

    #[test]
    fn monthly_series_merges_and_sorts() {
        let ups = vec![
            up("2025-03-01", None, None, 5.0),
            up("2024-12-31", None, None, 1.0),
        ];
        let chs = vec![
            ch("2025-01-15", None, None, Some(2.0)),
            ch("2025-03-20", None, None, Some(4.0)),
        ];
        let r = aggregate(&ups, &chs);

        let keys: Vec<&str> = r.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2024-12", "2025-01", "2025-03"]);
        assert_eq!(r.monthly[2].gained, 5.0);
        assert_eq!(r.monthly[2].lost, 4.0);
        assert_eq!(r.monthly[1].gained, 0.0);
    }

    #[test]
    fn period_bounds() {
        let today = d("2025-03-18");
        assert_eq!(
            Period::Current.bounds(today),
            (d("2025-03-01"), d("2025-03-31"))
        );
        assert_eq!(
            Period::Previous.bounds(d("2025-01-05")),
            (d("2024-12-01"), d("2024-12-31"))
        );
    }

    #[test]
    fn progress_bar_is_clamped() {
        assert_eq!(Progress::new(50.0, 100.0).bar(4), "[##..]");
        assert_eq!(Progress::new(500.0, 100.0).bar(4), "[####]");
    }
}
