#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use opsboard::db::open_memory_store;
use opsboard::db::pool::SqliteStore;
use opsboard::errors::AppResult;
use opsboard::store::{Query, Row, RowStore, Table};
use serde_json::Value;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN_EMAIL: &str = "admin@acme.io";
pub const ADMIN_PASSWORD: &str = "admin-pw";

pub fn ops() -> Command {
    cargo_bin_cmd!("opsboard")
}

fn temp_file(name: &str, suffix: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_opsboard.{}", name, suffix));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Database and session file paths for one test, removed if left over.
pub struct TestEnv {
    pub db: String,
    pub session: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        Self {
            db: temp_file(name, "sqlite"),
            session: temp_file(name, "session.json"),
        }
    }

    /// Command with `--test`, `--db` and `--session` already set.
    pub fn cmd(&self) -> Command {
        let mut c = ops();
        c.args(["--test", "--db", &self.db, "--session", &self.session]);
        c
    }

    /// Initialized database with one admin account.
    pub fn init(name: &str) -> Self {
        let env = Self::new(name);
        env.cmd()
            .args([
                "init",
                "--admin-email",
                ADMIN_EMAIL,
                "--admin-password",
                ADMIN_PASSWORD,
            ])
            .assert()
            .success();
        env
    }

    pub fn login_admin(&self) {
        self.cmd()
            .args(["login", "--email", ADMIN_EMAIL, "--password", ADMIN_PASSWORD])
            .assert()
            .success();
    }

    /// Create a member account (as admin) and sign in with it.
    pub fn login_member(&self, email: &str) {
        self.login_admin();
        self.cmd()
            .args(["user", "add", "--email", email, "--password", "member-pw"])
            .assert()
            .success();
        self.cmd()
            .args(["login", "--email", email, "--password", "member-pw"])
            .assert()
            .success();
    }
}

/// Wraps a real store and records every mutation call.
pub struct RecordingStore {
    pub inner: SqliteStore,
    pub inserts: RefCell<Vec<(Table, Vec<Row>)>>,
    pub updates: RefCell<Vec<(Table, Row, Value)>>,
    pub deletes: RefCell<Vec<(Table, Value)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: open_memory_store().expect("in-memory store"),
            inserts: RefCell::new(Vec::new()),
            updates: RefCell::new(Vec::new()),
            deletes: RefCell::new(Vec::new()),
        }
    }

    /// Mutations other than audit-log appends.
    pub fn mutation_count(&self) -> usize {
        self.inserts
            .borrow()
            .iter()
            .filter(|(t, _)| *t != Table::AuditLog)
            .count()
            + self.updates.borrow().len()
            + self.deletes.borrow().len()
    }

    pub fn reset(&self) {
        self.inserts.borrow_mut().clear();
        self.updates.borrow_mut().clear();
        self.deletes.borrow_mut().clear();
    }
}

impl RowStore for RecordingStore {
    fn select(&self, table: Table, query: &Query) -> AppResult<Vec<Row>> {
        self.inner.select(table, query)
    }

    fn insert(&self, table: Table, rows: &[Row]) -> AppResult<()> {
        self.inserts.borrow_mut().push((table, rows.to_vec()));
        self.inner.insert(table, rows)
    }

    fn update(&self, table: Table, patch: &Row, key_column: &str, key: &Value) -> AppResult<usize> {
        self.updates
            .borrow_mut()
            .push((table, patch.clone(), key.clone()));
        self.inner.update(table, patch, key_column, key)
    }

    fn delete(&self, table: Table, key_column: &str, key: &Value) -> AppResult<usize> {
        self.deletes.borrow_mut().push((table, key.clone()));
        self.inner.delete(table, key_column, key)
    }
}
