//! Credential check and credential creation.

use crate::core::audit;
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, NewCredential, Role};
use crate::session::{Session, SessionStorage};
use crate::store::{Query, RowStore, Table, fetch, insert_one};
use log::{info, warn};

/// Exact, case-sensitive match of email and password against `credentials`.
///
/// Exactly one matching row becomes the identity. No row, several rows or a
/// store failure all surface as the same `InvalidCredentials`.
pub fn check_credentials(store: &impl RowStore, email: &str, password: &str) -> AppResult<Identity> {
    let query = Query::new().eq("email", email).eq("password", password);

    let mut rows: Vec<Identity> = match fetch(store, Table::Credentials, &query) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("event=login status=error reason=store error={}", e);
            return Err(AppError::InvalidCredentials);
        }
    };

    if rows.len() != 1 {
        warn!("event=login status=rejected matches={}", rows.len());
        return Err(AppError::InvalidCredentials);
    }
    Ok(rows.remove(0))
}

/// Verify credentials and, on success, make the identity current.
pub fn sign_in<S: SessionStorage>(
    store: &impl RowStore,
    session: &mut Session<S>,
    email: &str,
    password: &str,
) -> AppResult<Identity> {
    let identity = check_credentials(store, email, password)?;
    session.sign_in(identity.clone())?;
    Ok(identity)
}

/// Admin-only: add a credentials row.
pub fn create_credential<S: SessionStorage>(
    store: &impl RowStore,
    session: &Session<S>,
    email: &str,
    password: &str,
    role: Role,
) -> AppResult<()> {
    session.require_elevated()?;
    create_credential_unchecked(store, email, password, role)
}

/// First administrator, created by `init` before any session can exist.
/// Refused once any credentials row is present.
pub fn bootstrap_admin(store: &impl RowStore, email: &str, password: &str) -> AppResult<()> {
    let existing: Vec<Identity> = fetch(store, Table::Credentials, &Query::new())?;
    if !existing.is_empty() {
        warn!("event=bootstrap_admin status=rejected existing={}", existing.len());
        return Err(AppError::AccessDenied);
    }
    create_credential_unchecked(store, email, password, Role::Admin)
}

pub fn create_credential_unchecked(
    store: &impl RowStore,
    email: &str,
    password: &str,
    role: Role,
) -> AppResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(AppError::MissingField("password"));
    }

    let cred = NewCredential {
        email: email.to_string(),
        password: password.to_string(),
        role,
    };
    insert_one(store, Table::Credentials, &cred)?;

    info!(
        "event=credential_created status=ok role={}",
        role.to_db_str()
    );
    audit::record(store, "add", "credentials", &format!("{} ({})", email, role.to_db_str()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::SqliteStore;
    use crate::session::MemorySessionStorage;

    fn store() -> SqliteStore {
        let s = SqliteStore::open_in_memory().unwrap();
        crate::db::initialize::init_db(&s.conn).unwrap();
        s
    }

    #[test]
    fn exact_match_signs_in() {
        let store = store();
        create_credential_unchecked(&store, "ops@acme.io", "s3cret", Role::Admin).unwrap();

        let mut session = Session::open(MemorySessionStorage::new());
        let id = sign_in(&store, &mut session, "ops@acme.io", "s3cret").unwrap();
        assert_eq!(id.role, Role::Admin);
        assert!(session.is_elevated());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let store = store();
        create_credential_unchecked(&store, "ops@acme.io", "s3cret", Role::Member).unwrap();

        assert!(matches!(
            check_credentials(&store, "OPS@acme.io", "s3cret"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            check_credentials(&store, "ops@acme.io", "S3cret"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn failed_login_leaves_session_untouched() {
        let store = store();
        let mut session = Session::open(MemorySessionStorage::new());
        assert!(sign_in(&store, &mut session, "nobody", "x").is_err());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn member_cannot_create_credentials() {
        let store = store();
        create_credential_unchecked(&store, "m@acme.io", "pw", Role::Member).unwrap();
        let mut session = Session::open(MemorySessionStorage::new());
        sign_in(&store, &mut session, "m@acme.io", "pw").unwrap();

        let res = create_credential(&store, &session, "new@acme.io", "pw", Role::Admin);
        assert!(matches!(res, Err(AppError::AccessDenied)));
        assert!(check_credentials(&store, "new@acme.io", "pw").is_err());
    }

    #[test]
    fn bootstrap_admin_only_on_empty_credentials() {
        let store = store();
        bootstrap_admin(&store, "first@acme.io", "pw").unwrap();

        let res = bootstrap_admin(&store, "second@acme.io", "pw");
        assert!(matches!(res, Err(AppError::AccessDenied)));
        assert!(check_credentials(&store, "second@acme.io", "pw").is_err());
        assert_eq!(check_credentials(&store, "first@acme.io", "pw").unwrap().role, Role::Admin);
    }
}
