//! End-to-end tests for the `cj` binary.
//!
//! Every test runs against its own temporary home and database. Stdout is
//! not a terminal under the test harness, so commands answer in JSON.

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("journal.db")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cj(&self, db: &Path) -> Command {
        let mut cmd = Command::cargo_bin("cj").unwrap();
        cmd.env("CJ_HOME", self.dir.path())
            .env("CJ_DB", db)
            .env("CJ_UTC_OFFSET_MINUTES", "0")
            .env_remove("RUST_LOG");
        cmd
    }

    fn init(&self, db: &Path) {
        self.cj(db).arg("init").assert().success();
    }

    fn json(&self, db: &Path, args: &[&str]) -> Value {
        let output = self.cj(db).args(args).assert().success().get_output().clone();
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn error_json(stderr: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stderr);
    let line = text.lines().last().unwrap_or_default();
    serde_json::from_str(line).unwrap()
}

#[test]
fn version_reports_package_version() {
    let ws = Workspace::new();
    let value = ws.json(&ws.db(), &["version"]);
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn commands_require_init() {
    let ws = Workspace::new();
    let assert = ws.cj(&ws.db()).args(["template", "list"]).assert().code(2);
    let err = error_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn init_twice_needs_force() {
    let ws = Workspace::new();
    ws.init(&ws.db());
    ws.cj(&ws.db()).arg("init").assert().code(2);
    ws.cj(&ws.db()).args(["init", "--force"]).assert().success();
}

#[test]
fn backup_round_trip_between_databases() {
    let ws = Workspace::new();
    let source = ws.db();
    ws.init(&source);

    let template = ws.json(
        &source,
        &["template", "add", "Standup", "--start", "09:00", "--end", "09:15"],
    );
    let template_id = template["id"].as_str().unwrap().to_string();
    ws.json(
        &source,
        &["template", "apply", &template_id, "2025-03-03", "2025-03-04"],
    );

    let backup = ws.path("backup.json");
    let exported = ws.json(
        &source,
        &["backup", "export", "--out", backup.to_str().unwrap()],
    );
    assert_eq!(exported["stats"]["templates"], 1);
    assert_eq!(exported["stats"]["calendar_events"], 2);

    let target = ws.path("restored.db");
    ws.init(&target);
    let imported = ws.json(&target, &["backup", "import", backup.to_str().unwrap()]);
    assert_eq!(imported["stats"]["templates"]["created"], 1);
    assert_eq!(imported["stats"]["calendar_events"]["created"], 2);

    assert_eq!(
        ws.json(&source, &["event", "list"]),
        ws.json(&target, &["event", "list"])
    );
    assert_eq!(
        ws.json(&source, &["template", "list"]),
        ws.json(&target, &["template", "list"])
    );

    // Importing the same file again changes nothing.
    let again = ws.json(&target, &["backup", "import", backup.to_str().unwrap()]);
    assert_eq!(again["stats"]["calendar_events"]["unchanged"], 2);
}

#[test]
fn malformed_backup_is_rejected() {
    let ws = Workspace::new();
    ws.init(&ws.db());
    let backup = ws.path("bad.json");
    std::fs::write(&backup, r#"{"eventData": []}"#).unwrap();

    let assert = ws
        .cj(&ws.db())
        .args(["backup", "import", backup.to_str().unwrap(), "--replace"])
        .assert()
        .code(5);
    let err = error_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "MALFORMED_BACKUP");
}

#[test]
fn duplicate_event_is_rejected() {
    let ws = Workspace::new();
    ws.init(&ws.db());
    let args = [
        "event",
        "add",
        "Dentist",
        "--start",
        "2025-03-10T10:00",
        "--end",
        "2025-03-10T11:00",
    ];
    let created = ws.json(&ws.db(), &args);

    let assert = ws.cj(&ws.db()).args(args).assert().code(4);
    let err = error_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "DUPLICATE_RECORD");
    assert!(
        err["error"]["message"]
            .as_str()
            .unwrap()
            .contains(created["id"].as_str().unwrap())
    );
}

#[test]
fn calendar_export_writes_month_as_jsonl() {
    let ws = Workspace::new();
    ws.init(&ws.db());
    for (title, start, end) in [
        ("In March", "2025-03-05T09:00", "2025-03-05T10:00"),
        ("In April", "2025-04-01T09:00", "2025-04-01T10:00"),
    ] {
        ws.json(
            &ws.db(),
            &["event", "add", title, "--start", start, "--end", end],
        );
    }

    let output = ws
        .cj(&ws.db())
        .args(["calendar", "export", "--year", "2025", "--month", "3"])
        .assert()
        .success()
        .get_output()
        .clone();
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["title"], "In March");
}

#[test]
fn template_move_reorders() {
    let ws = Workspace::new();
    ws.init(&ws.db());
    for title in ["A", "B", "C"] {
        ws.json(
            &ws.db(),
            &["template", "add", title, "--start", "08:00", "--end", "09:00"],
        );
    }

    let listed = ws.json(&ws.db(), &["template", "move", "2", "0"]);
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
}

#[test]
fn backup_uses_seasonal_offset_of_named_zone() {
    let ws = Workspace::new();
    ws.init(&ws.db());
    ws.json(
        &ws.db(),
        &["event", "add", "Fireworks", "--start", "2025-07-04T21:00", "--end", "2025-07-04T22:00"],
    );

    let backup = ws.path("backup.json");
    ws.cj(&ws.db())
        .env_remove("CJ_UTC_OFFSET_MINUTES")
        .env("CJ_TIMEZONE", "America/New_York")
        .args(["backup", "export", "--out", backup.to_str().unwrap()])
        .assert()
        .success();

    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(
        document["calendarEventData"][0]["eventStartDate"],
        "2025-07-04T21:00:00-04:00"
    );
}
