//! The singleton monthly sales target.

use crate::core::audit;
use crate::errors::{AppError, AppResult};
use crate::models::form::parse_amount;
use crate::models::{CURRENT_TARGET_ID, SalesTarget, TargetUpdate};
use crate::session::{Session, SessionStorage};
use crate::store::records::to_row;
use crate::store::{Query, RowStore, Table, fetch_one};
use log::info;
use serde_json::Value;

pub fn current(store: &impl RowStore) -> AppResult<SalesTarget> {
    fetch_one(
        store,
        Table::SalesTargets,
        &Query::new().eq("id", CURRENT_TARGET_ID),
    )
}

/// Admin-only. The text value is parsed after the capability check and
/// before any store call.
pub fn set<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    raw: &str,
) -> AppResult<f64> {
    session.require_elevated()?;
    let monthly_target = parse_amount("monthly_target", raw)?;

    let patch = to_row(&TargetUpdate { monthly_target })?;
    let affected = store.update(
        Table::SalesTargets,
        &patch,
        "id",
        &Value::from(CURRENT_TARGET_ID),
    )?;
    if affected == 0 {
        return Err(AppError::NotFound(format!(
            "sales target `{}`",
            CURRENT_TARGET_ID
        )));
    }

    info!("event=target_updated status=ok value={}", monthly_target);
    audit::record(
        store,
        "edit",
        Table::SalesTargets.as_str(),
        &format!("monthly target set to {:.2}", monthly_target),
    );
    Ok(monthly_target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::SqliteStore;
    use crate::models::{Identity, Role};
    use crate::session::MemorySessionStorage;

    fn session(role: Role) -> Session<MemorySessionStorage> {
        let mut s = Session::open(MemorySessionStorage::new());
        s.sign_in(Identity {
            id: 1,
            created_at: String::new(),
            email: "a@acme.io".into(),
            password: "pw".into(),
            role,
        })
        .unwrap();
        s
    }

    fn store() -> SqliteStore {
        let s = SqliteStore::open_in_memory().unwrap();
        crate::db::initialize::init_db(&s.conn).unwrap();
        s
    }

    #[test]
    fn admin_sets_target() {
        let store = store();
        assert_eq!(current(&store).unwrap().monthly_target, 0.0);

        set(&store, &session(Role::Admin), "15000,50").unwrap();
        assert_eq!(current(&store).unwrap().monthly_target, 15000.5);
    }

    #[test]
    fn member_is_denied_before_parsing() {
        let store = store();
        let res = set(&store, &session(Role::Member), "not a number");
        assert!(matches!(res, Err(AppError::AccessDenied)));
    }

    #[test]
    fn invalid_number_leaves_target_alone() {
        let store = store();
        let res = set(&store, &session(Role::Admin), "12k");
        assert!(matches!(res, Err(AppError::InvalidNumber(_))));
        assert_eq!(current(&store).unwrap().monthly_target, 0.0);
    }
}
