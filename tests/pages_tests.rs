use opsboard::core::dashboard::{Dashboard, Period};
use opsboard::core::filter::{ChurnFilter, LocationFilter};
use opsboard::core::{auth, churns, map, target, upsells};
use opsboard::errors::AppError;
use opsboard::models::{ChurnForm, ChurnPatch, LocationForm, LocationPatch, Role, UpsellForm};
use opsboard::session::{MemorySessionStorage, Session};
use opsboard::store::Table;
use opsboard::store::records::to_row;
use chrono::NaiveDate;

mod common;
use common::RecordingStore;

fn signed_in(store: &RecordingStore, role: Role) -> Session<MemorySessionStorage> {
    let email = format!("{}@acme.io", role.to_db_str());
    auth::create_credential_unchecked(store, &email, "pw", role).unwrap();
    let mut session = Session::open(MemorySessionStorage::new());
    auth::sign_in(store, &mut session, &email, "pw").unwrap();
    store.reset();
    session
}

fn churn_form(company: &str, date: &str, lost: &str) -> ChurnForm {
    ChurnForm {
        company: company.into(),
        reason: "Price".into(),
        churn_date: date.into(),
        ltv: "1000".into(),
        manager: "Ana".into(),
        lost_value: lost.into(),
        squad: "Alpha".into(),
    }
}

fn upsell_form(company: &str, date: &str, gained: &str) -> UpsellForm {
    UpsellForm {
        company: company.into(),
        service: "CRM".into(),
        upsell_date: date.into(),
        manager: "Rui".into(),
        gained_value: gained.into(),
        squad: String::new(),
    }
}

fn location_form() -> LocationForm {
    LocationForm {
        company: "Acme".into(),
        city: "Recife".into(),
        state: "PE".into(),
        country: "Brasil".into(),
        latitude: "-8.05".into(),
        longitude: "-34.88".into(),
    }
}

#[test]
fn standard_session_issues_no_mutation_for_elevated_actions() {
    let store = RecordingStore::new();
    let member = signed_in(&store, Role::Member);

    let results = [
        map::add(&store, &member, &location_form()).map(|_| ()),
        churns::add(&store, &member, &churn_form("Acme", "2025-01-02", "10")).map(|_| ()),
        upsells::add(&store, &member, &upsell_form("Acme", "2025-01-02", "10")).map(|_| ()),
        target::set(&store, &member, "5000").map(|_| ()),
        auth::create_credential(&store, &member, "x@acme.io", "pw", Role::Admin),
    ];

    for r in results {
        assert!(matches!(r, Err(AppError::AccessDenied)));
    }
    assert_eq!(store.mutation_count(), 0);
}

#[test]
fn anonymous_session_is_rejected_before_store() {
    let store = RecordingStore::new();
    let anon = Session::open(MemorySessionStorage::new());

    let res = churns::list(&store, &anon, &ChurnFilter::default());
    assert!(matches!(res, Err(AppError::NotSignedIn)));
    let res = churns::add(&store, &anon, &churn_form("Acme", "2025-01-02", "10"));
    assert!(matches!(res, Err(AppError::NotSignedIn)));
    assert_eq!(store.mutation_count(), 0);
}

#[test]
fn unchanged_edit_patches_with_the_original_row() {
    let store = RecordingStore::new();
    let admin = signed_in(&store, Role::Admin);
    churns::add(&store, &admin, &churn_form("Acme", "2025-01-02", "10,5")).unwrap();

    let original = churns::list(&store, &admin, &ChurnFilter::default())
        .unwrap()
        .remove(0);
    store.reset();

    let saved = churns::edit(&store, &admin, original.id, &ChurnPatch::default()).unwrap();
    assert_eq!(saved, original);

    let updates = store.updates.borrow();
    assert_eq!(updates.len(), 1);
    let (table, patch, key) = &updates[0];
    assert_eq!(*table, Table::ChurnEvents);
    assert_eq!(key, &serde_json::Value::from(original.id));
    assert_eq!(patch, &to_row(&original).unwrap());
}

#[test]
fn failed_edit_keeps_stored_row() {
    let store = RecordingStore::new();
    let admin = signed_in(&store, Role::Admin);
    map::add(&store, &admin, &location_form()).unwrap();
    let loc = map::list(&store, &admin).unwrap().remove(0);
    store.reset();

    let patch = LocationPatch {
        latitude: Some("95".into()),
        ..Default::default()
    };
    let res = map::edit(&store, &admin, loc.id, &patch);
    assert!(matches!(res, Err(AppError::InvalidCoordinate(_))));
    assert!(store.updates.borrow().is_empty());
    assert_eq!(map::list(&store, &admin).unwrap()[0], loc);
}

#[test]
fn member_can_edit_but_not_add() {
    let store = RecordingStore::new();
    let admin = signed_in(&store, Role::Admin);
    map::add(&store, &admin, &location_form()).unwrap();
    let id = map::list(&store, &admin).unwrap()[0].id;

    let member = signed_in(&store, Role::Member);
    let patch = LocationPatch {
        city: Some("Olinda".into()),
        ..Default::default()
    };
    let saved = map::edit(&store, &member, id, &patch).unwrap();
    assert_eq!(saved.city, "Olinda");

    let markers_src = map::list(&store, &member).unwrap();
    let filter = LocationFilter {
        city: Some("olin".into()),
        ..Default::default()
    };
    let markers = map::markers(&markers_src, &filter);
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].position, Some((-8.05, -34.88)));
}

#[test]
fn dashboard_reflects_current_month_only() {
    let store = RecordingStore::new();
    let admin = signed_in(&store, Role::Admin);
    let today = NaiveDate::from_ymd_opt(2025, 3, 18).unwrap();

    target::set(&store, &admin, "1000").unwrap();
    upsells::add(&store, &admin, &upsell_form("Acme", "2025-03-01", "1000")).unwrap();
    upsells::add(&store, &admin, &upsell_form("Acme", "2025-02-28", "999")).unwrap();
    churns::add(&store, &admin, &churn_form("Globex", "2025-03-31", "400")).unwrap();

    let mut dash = Dashboard::new(Period::Current);
    assert!(dash.refresh(&store, today));
    assert_eq!(dash.report.total_gained, 1000.0);
    assert_eq!(dash.report.total_lost, 400.0);
    assert_eq!(dash.progress().to_string(), "60.0%");
    assert_eq!(dash.report.gained_by_squad[0].label, "Not specified");

    assert!(dash.set_period(&store, Period::Previous, today));
    assert_eq!(dash.report.total_gained, 999.0);
    assert_eq!(dash.report.total_lost, 0.0);
    assert_eq!(dash.report.monthly.len(), 1);
    assert_eq!(dash.report.monthly[0].month, "2025-02");
}

#[test]
fn dashboard_keeps_state_when_refresh_fails() {
    let store = RecordingStore::new();
    let admin = signed_in(&store, Role::Admin);
    let today = NaiveDate::from_ymd_opt(2025, 3, 18).unwrap();
    upsells::add(&store, &admin, &upsell_form("Acme", "2025-03-02", "250")).unwrap();

    let mut dash = Dashboard::new(Period::Current);
    assert!(dash.refresh(&store, today));

    store
        .inner
        .conn
        .execute_batch("DROP TABLE churn_events;")
        .unwrap();
    assert!(!dash.refresh(&store, today));
    assert_eq!(dash.report.total_gained, 250.0);
}
