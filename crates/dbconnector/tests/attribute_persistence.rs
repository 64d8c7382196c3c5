//! Integration tests for per-user attribute persistence.
//!
//! These tests drive the public API end to end against the real JSON file
//! backend: `DbConnection` / `AttributeResolver` + `UserSession` +
//! `JsonFileStore`, each test in its own temporary directory.
//!
//! Every test uses the defaults
//! `{driver: "D1", host: "H1", db_name: "employees", win_auth: "yes"}`.

use std::path::{Path, PathBuf};

use dbconnector::{
    AttributeDocument, AttributeError, AttributeResolver, AttributeStore, ConnectionAttributes,
    DbConnection, JsonFileStore, StoreError, UserSession,
};
use dbconnector_core::{DefaultRegistry, InitPolicy, SettingName, SettingsMap};
use uuid::Uuid;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("dbconnector_it_{}", Uuid::new_v4())))
    }

    fn file(&self) -> PathBuf {
        self.0.join("settings").join("excer_sql_attributes.json")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

fn registry() -> DefaultRegistry {
    DefaultRegistry::new("D1", "H1", "employees", "yes")
}

fn connection(path: &Path) -> DbConnection<JsonFileStore> {
    connection_with(path, InitPolicy::AutoMerge, SettingsMap::new())
}

fn connection_with(
    path: &Path,
    policy: InitPolicy,
    initial: SettingsMap,
) -> DbConnection<JsonFileStore> {
    let store = JsonFileStore::open(path).expect("open store");
    DbConnection::new(store, registry(), policy, initial).expect("new connection")
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read document");
    serde_json::from_str(&text).expect("parse document")
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

/// alice changes db_name; only that entry is persisted, and it survives a
/// round trip through bob.
#[test]
fn test_alice_db_name_scenario() {
    // Arrange
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate alice");

    // Act
    conn.set_db_name("sales").expect("set db_name");

    // Assert: exactly one override for alice
    assert_eq!(
        read_json(&tmp.file()),
        serde_json::json!({ "alice": { "db_name": "sales" } })
    );

    // Act: bob, then back to alice
    conn.set_user("bob").expect("activate bob");
    assert_eq!(conn.db_name(), "employees");
    conn.set_user("alice").expect("re-activate alice");

    // Assert
    assert_eq!(conn.db_name(), "sales");
    assert_eq!(conn.resolver().get("db_name"), Some("sales"));
}

#[test]
fn test_set_then_get_for_every_setting() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");

    for name in SettingName::ALL {
        let value = format!("{name}-value");
        conn.set_setting(name, value.clone()).expect("set");
        assert_eq!(conn.resolver().get(name.as_str()), Some(value.as_str()));
    }
}

#[test]
fn test_unset_settings_read_as_defaults() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");
    conn.set_host("H2").expect("set host");

    assert_eq!(conn.driver(), "D1");
    assert_eq!(conn.db_name(), "employees");
    assert_eq!(conn.win_auth(), "yes");
}

#[test]
fn test_setting_default_value_creates_no_file() {
    // Arrange
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");

    // Act
    conn.set_win_auth("yes").expect("set to default");

    // Assert: nothing deviates, so nothing is written
    assert!(!tmp.file().exists());
}

#[test]
fn test_setting_default_value_is_not_persisted_alongside_changes() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");

    conn.set_host("H2").expect("set host");
    conn.set_driver("D1").expect("set driver to default");

    assert_eq!(
        read_json(&tmp.file()),
        serde_json::json!({ "alice": { "host": "H2" } })
    );
}

#[test]
fn test_overrides_are_isolated_between_users() {
    // Arrange
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("A").expect("activate A");
    conn.set_host("H-A").expect("set host");
    conn.set_db_name("db-A").expect("set db");

    // Act
    conn.set_user("B").expect("activate B");

    // Assert
    for name in SettingName::ALL {
        assert_eq!(
            conn.resolver().value(name),
            registry().value(name),
            "{name} leaked from A to B"
        );
    }
}

#[test]
fn test_reset_to_defaults_twice_matches_once() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");
    conn.set_host("H2").expect("set host");

    conn.reset_to_defaults().expect("reset once");
    let once = conn.resolver().snapshot();
    conn.reset_to_defaults().expect("reset twice");

    assert_eq!(conn.resolver().snapshot(), once);
    assert_eq!(&once, registry().get_defaults());
}

/// Reset computes an empty override map, which is never written: the
/// previously stored entry stays on disk.
#[test]
fn test_reset_leaves_previous_entry_on_disk() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");
    conn.set_host("H2").expect("set host");

    conn.reset_to_defaults().expect("reset");

    assert_eq!(
        read_json(&tmp.file()),
        serde_json::json!({ "alice": { "host": "H2" } })
    );
    assert_eq!(conn.host(), "H1");
}

#[test]
fn test_values_survive_a_new_process() {
    // Arrange: first "process"
    let tmp = TempDir::new();
    {
        let mut conn = connection(&tmp.file());
        conn.set_user("emp_exercise_1").expect("activate");
        conn.set_driver("{ODBC Driver 17 for SQL Server}")
            .expect("set driver");
    }

    // Act: second "process" over the same file
    let mut conn = connection(&tmp.file());
    conn.set_user("emp_exercise_1").expect("activate");

    // Assert
    assert_eq!(conn.driver(), "{ODBC Driver 17 for SQL Server}");
    assert_eq!(
        conn.connection_string(),
        "Driver={ODBC Driver 17 for SQL Server}; Server=H1; database=employees; Trusted_Connection=yes"
    );
}

#[test]
fn test_external_edit_to_other_user_is_not_clobbered() {
    // Arrange
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");
    conn.set_host("H2").expect("set host");

    // Someone else adds carol to the file.
    let store = JsonFileStore::open(tmp.file()).expect("open");
    let mut document = store.load().expect("load");
    document.insert("carol", [("driver".to_string(), "D9".to_string())].into());
    store.save(&document).expect("save");

    // Act
    conn.set_db_name("sales").expect("set db");

    // Assert
    assert_eq!(
        read_json(&tmp.file()),
        serde_json::json!({
            "alice": { "host": "H2", "db_name": "sales" },
            "carol": { "driver": "D9" }
        })
    );
}

#[test]
fn test_missing_file_and_empty_object_behave_the_same() {
    let missing = TempDir::new();
    let empty = TempDir::new();
    JsonFileStore::open(empty.file()).expect("open");
    std::fs::write(empty.file(), "{}").expect("write empty document");

    let mut a = connection(&missing.file());
    let mut b = connection(&empty.file());
    a.set_user("alice").expect("activate a");
    b.set_user("alice").expect("activate b");

    assert_eq!(a.resolver().snapshot(), b.resolver().snapshot());
    assert_eq!(a.connection_string(), b.connection_string());
}

// ── Initialisation policies ───────────────────────────────────────────────────

#[test]
fn test_initial_values_apply_under_every_policy() {
    for policy in [
        InitPolicy::ForceDefaults,
        InitPolicy::ForceStored,
        InitPolicy::AutoMerge,
    ] {
        let tmp = TempDir::new();
        let initial: SettingsMap = [("db_name".to_string(), "hr".to_string())].into();
        let conn = connection_with(&tmp.file(), policy, initial);
        assert_eq!(conn.db_name(), "hr", "{policy:?}");
        assert_eq!(conn.host(), "H1", "{policy:?}");
    }
}

/// With initial values configured, whatever alice saved is still what she
/// sees after switching to bob and back.
#[test]
fn test_switch_back_restores_value_with_initial_values() {
    // Arrange
    let tmp = TempDir::new();
    let initial: SettingsMap = [("db_name".to_string(), "hr".to_string())].into();
    let mut conn = connection_with(&tmp.file(), InitPolicy::AutoMerge, initial);
    conn.set_user("alice").expect("activate alice");
    assert_eq!(conn.db_name(), "hr");

    // Act
    conn.set_db_name("sales").expect("set db_name");
    conn.set_user("bob").expect("activate bob");
    assert_eq!(conn.db_name(), "hr");
    conn.set_user("alice").expect("re-activate alice");

    // Assert
    assert_eq!(conn.db_name(), "sales");
    assert_eq!(read_json(&tmp.file())["alice"]["db_name"], "sales");
}

// ── Explicit save ─────────────────────────────────────────────────────────────

/// A write that failed to reach disk is kept in memory; `save` writes it once
/// the file is usable again.
#[test]
fn test_save_writes_value_kept_after_failed_write() {
    // Arrange: alice is active, then a directory takes the document's place.
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());
    conn.set_user("alice").expect("activate");
    std::fs::create_dir(tmp.file()).expect("block document path");

    let result = conn.set_host("H2");
    assert!(matches!(result, Err(AttributeError::Store(_))));
    assert_eq!(conn.host(), "H2");
    std::fs::remove_dir(tmp.file()).expect("unblock document path");

    // Act
    conn.resolver_mut().save().expect("save");

    // Assert
    assert_eq!(
        read_json(&tmp.file()),
        serde_json::json!({ "alice": { "host": "H2" } })
    );
    assert_eq!(
        conn.connection_string(),
        "Driver=D1; Server=H2; database=employees; Trusted_Connection=yes"
    );
}

#[test]
fn test_save_without_identity_is_rejected() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());

    let result = conn.resolver_mut().save();

    assert!(matches!(result, Err(AttributeError::SessionNotBound(_))));
    assert!(!tmp.file().exists());
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_setting_is_rejected() {
    let tmp = TempDir::new();
    let store = JsonFileStore::open(tmp.file()).expect("open");
    let mut resolver =
        AttributeResolver::new(registry(), InitPolicy::AutoMerge, SettingsMap::new()).expect("new");
    resolver.bind_session(UserSession::new(store));
    resolver.set_active_identity("alice").expect("activate");

    let result = resolver.set("port", "1433");

    assert!(matches!(result, Err(AttributeError::UnknownSetting { .. })));
    assert_eq!(resolver.get("port"), None);
    assert!(!tmp.file().exists());
}

#[test]
fn test_write_before_identity_is_rejected() {
    let tmp = TempDir::new();
    let mut conn = connection(&tmp.file());

    let result = conn.set_host("H2");

    assert!(matches!(result, Err(AttributeError::SessionNotBound(_))));
    assert_eq!(conn.host(), "H1");
}

#[test]
fn test_corrupt_document_is_surfaced() {
    let tmp = TempDir::new();
    JsonFileStore::open(tmp.file()).expect("open");
    std::fs::write(tmp.file(), "not json at all").expect("write");
    let mut conn = connection(&tmp.file());

    let result = conn.set_user("alice");

    assert!(matches!(
        result,
        Err(AttributeError::Store(StoreError::Corrupt { .. }))
    ));
    // The file is left as it was.
    assert_eq!(
        std::fs::read_to_string(tmp.file()).expect("read"),
        "not json at all"
    );
}

#[test]
fn test_empty_document_type_round_trips_through_store() {
    let tmp = TempDir::new();
    let store = JsonFileStore::open(tmp.file()).expect("open");

    store.save(&AttributeDocument::new()).expect("save");

    assert!(store.load().expect("load").is_empty());
}
