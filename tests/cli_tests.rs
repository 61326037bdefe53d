use chrono::{Datelike, Local};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ADMIN_EMAIL, TestEnv};

fn this_month_day(day: u32) -> String {
    let today = Local::now().date_naive();
    format!("{}-{:02}-{:02}", today.year(), today.month(), day)
}

#[test]
fn init_creates_schema_and_admin() {
    let env = TestEnv::init("cli_init");

    env.cmd()
        .args(["db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("credentials")));
}

#[test]
fn second_init_cannot_add_an_admin() {
    let env = TestEnv::init("cli_reinit");

    env.cmd()
        .args([
            "init",
            "--admin-email",
            "intruder@x.io",
            "--admin-password",
            "pw",
        ])
        .assert()
        .failure()
        .stderr(contains("Access denied"));

    env.cmd()
        .args(["login", "--email", "intruder@x.io", "--password", "pw"])
        .assert()
        .failure()
        .stderr(contains("Invalid credentials"));

    // Re-running init without an admin stays a plain migration pass.
    env.cmd().args(["init"]).assert().success();
}

#[test]
fn views_require_a_session() {
    let env = TestEnv::init("cli_no_session");

    for args in [
        vec!["dashboard"],
        vec!["map", "list"],
        vec!["churn", "list"],
        vec!["upsell", "list"],
        vec!["note", "list"],
    ] {
        env.cmd()
            .args(&args)
            .assert()
            .failure()
            .stderr(contains("opsboard login"));
    }
}

#[test]
fn wrong_password_is_rejected() {
    let env = TestEnv::init("cli_bad_login");

    env.cmd()
        .args(["login", "--email", ADMIN_EMAIL, "--password", "nope"])
        .assert()
        .failure()
        .stderr(contains("Invalid credentials"));

    env.cmd()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(contains("Not signed in"));
}

#[test]
fn login_whoami_logout() {
    let env = TestEnv::init("cli_login_cycle");
    env.login_admin();

    env.cmd()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(contains(ADMIN_EMAIL).and(contains("admin")));

    env.cmd().args(["logout"]).assert().success();
    env.cmd()
        .args(["map", "list"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn member_cannot_add_records_or_set_target() {
    let env = TestEnv::init("cli_member_denied");
    env.login_member("member@acme.io");

    env.cmd()
        .args([
            "churn", "add", "--company", "Acme", "--reason", "Price", "--date", "2025-01-02",
            "--ltv", "100", "--manager", "Ana", "--lost", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Access denied"));

    env.cmd()
        .args(["target", "--set", "1000"])
        .assert()
        .failure()
        .stderr(contains("Access denied"));

    env.cmd()
        .args(["churn", "list"])
        .assert()
        .success()
        .stdout(contains("No churn events found"));
}

#[test]
fn map_add_list_and_edit() {
    let env = TestEnv::init("cli_map");
    env.login_admin();

    env.cmd()
        .args([
            "map", "add", "--company", "Acme", "--city", "Recife", "--state", "PE", "--country",
            "Brasil", "--lat", "-8.0476", "--lon", "-34.8770",
        ])
        .assert()
        .success()
        .stdout(
            contains("Location added")
                .and(contains("Recife"))
                .and(contains("-8.0476"))
                .and(contains("1 marker(s)")),
        );

    env.cmd()
        .args([
            "map", "add", "--company", "Bad", "--city", "X", "--state", "Y", "--country", "Z",
            "--lat", "abc", "--lon", "0",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid coordinate"));

    env.cmd()
        .args(["map", "list", "--city", "reci"])
        .assert()
        .success()
        .stdout(contains("Acme").and(contains("-8.0476")));

    env.cmd()
        .args(["map", "edit", "1", "--city", "Olinda"])
        .assert()
        .success();

    env.cmd()
        .args(["map", "list", "--city", "reci"])
        .assert()
        .success()
        .stdout(contains("No locations found"));
}

#[test]
fn churn_list_filters_by_period() {
    let env = TestEnv::init("cli_churn_filter");
    env.login_admin();

    for (company, date) in [("Acme", "2025-01-15"), ("Globex", "2025-02-15")] {
        env.cmd()
            .args([
                "churn", "add", "--company", company, "--reason", "Price", "--date", date,
                "--ltv", "100", "--manager", "Ana", "--lost", "10,5",
            ])
            .assert()
            .success();
    }

    // The add command ends on the full list.
    env.cmd()
        .args([
            "upsell", "add", "--company", "Initech", "--service", "CRM", "--date",
            "2025-02-20", "--manager", "Rui", "--gained", "50",
        ])
        .assert()
        .success()
        .stdout(contains("Upsell recorded").and(contains("1 upsell event(s)")));

    env.cmd()
        .args(["churn", "list", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("Globex").and(contains("Acme").not()));

    env.cmd()
        .args(["churn", "list", "--company", "ACME"])
        .assert()
        .success()
        .stdout(contains("Acme").and(contains("Globex").not()));
}

#[test]
fn dashboard_shows_progress_against_target() {
    let env = TestEnv::init("cli_dashboard");
    env.login_admin();

    env.cmd().args(["target", "--set", "1000"]).assert().success();

    let d = this_month_day(1);
    env.cmd()
        .args([
            "upsell", "add", "--company", "Acme", "--service", "CRM", "--date", &d,
            "--manager", "Rui", "--gained", "1000", "--squad", "Alpha",
        ])
        .assert()
        .success();
    env.cmd()
        .args([
            "churn", "add", "--company", "Globex", "--reason", "Price", "--date", &d,
            "--ltv", "5000", "--manager", "Ana", "--lost", "400",
        ])
        .assert()
        .success();

    env.cmd()
        .args(["dashboard"])
        .assert()
        .success()
        .stdout(contains("60.0%").and(contains("Alpha")).and(contains("Not specified")));

    env.cmd()
        .args(["dashboard", "--period", "previous"])
        .assert()
        .success()
        .stdout(contains("0.0%"));
}

#[test]
fn notes_add_search_edit_delete() {
    let env = TestEnv::init("cli_notes");
    env.login_member("notes@acme.io");

    env.cmd()
        .args(["note", "add", "--client", "Acme", "--text", "Renewal call in May"])
        .assert()
        .success();
    env.cmd()
        .args(["note", "add", "--client", "Globex", "--text", "Asked for a discount"])
        .assert()
        .success();

    env.cmd()
        .args(["note", "list", "--search", "renewal"])
        .assert()
        .success()
        .stdout(contains("Acme").and(contains("Globex").not()));

    let store = opsboard::db::open_store(&env.db).unwrap();
    let id: String = store
        .conn
        .query_row(
            "SELECT id FROM client_notes WHERE client_name = 'Acme'",
            [],
            |r| r.get(0),
        )
        .unwrap();

    env.cmd()
        .args(["note", "edit", &id, "--text", "Renewed for 12 months"])
        .assert()
        .success();

    env.cmd()
        .args(["note", "list", "--search", "12 months"])
        .assert()
        .success()
        .stdout(contains("Acme"));

    env.cmd()
        .args(["note", "del", &id, "--yes"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    env.cmd()
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(contains("Globex").and(contains("Renewed").not()));
}

#[test]
fn note_delete_without_confirmation_is_cancelled() {
    let env = TestEnv::init("cli_notes_cancel");
    env.login_admin();
    env.cmd()
        .args(["note", "add", "--client", "Acme", "--text", "keep me"])
        .assert()
        .success();

    let store = opsboard::db::open_store(&env.db).unwrap();
    let id: String = store
        .conn
        .query_row("SELECT id FROM client_notes", [], |r| r.get(0))
        .unwrap();

    env.cmd()
        .args(["note", "del", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    env.cmd()
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(contains("keep me"));
}
