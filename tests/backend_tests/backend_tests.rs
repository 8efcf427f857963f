//! Tests for backend selection and namespace administration
//!
//! These tests verify:
//! - URL-based engine selection and namespace precedence
//! - The unsupported fallback engine rejects every operation
//! - Export/import round trips, merge and clear semantics
//! - Backend reset and namespace exists/clear

use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use prop::backend::{Property, PropertyCollection, UnsupportedBackend};
use prop::config::Config;
use prop::permissions::StaticIdentity;
use prop::prelude::*;
use tempfile::TempDir;
use url::Url;

// =============================================================================
// Helper Functions
// =============================================================================

fn file_url(temp_dir: &TempDir, query: &str) -> String {
    let mut url = Url::from_directory_path(temp_dir.path()).unwrap();
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    url.to_string()
}

fn open_namespace(temp_dir: &TempDir, namespace: &str) -> FileBackend {
    let config = Config::builder()
        .root(temp_dir.path())
        .namespace(namespace)
        .build();
    FileBackend::open(config, Arc::new(StaticIdentity::new())).unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_unsupported<T: std::fmt::Debug>(result: Result<T>) {
    assert!(
        matches!(result, Err(PropError::Unsupported(_))),
        "expected Unsupported, got {:?}",
        result
    );
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_config_from_url() {
    let url = Url::parse("file:/var/lib/prop/data?namespace=app&system-user=svc&system-group=staff").unwrap();

    let config = Config::from_url(&url, "").unwrap();

    assert_eq!(config.root, std::path::Path::new("/var/lib/prop/data"));
    assert_eq!(config.namespace, "app");
    assert_eq!(config.system_user.as_deref(), Some("svc"));
    assert_eq!(config.system_group.as_deref(), Some("staff"));
    assert_eq!(config.dir_mode, 0o755);
    assert_eq!(config.file_mode, 0o600);
}

#[test]
fn test_config_from_url_namespace_precedence() {
    let url = Url::parse("file:/data?namespace=from-url").unwrap();

    assert_eq!(Config::from_url(&url, "override").unwrap().namespace, "override");
    assert_eq!(Config::from_url(&url, "").unwrap().namespace, "from-url");

    let bare = Url::parse("file:/data").unwrap();
    assert_eq!(Config::from_url(&bare, "").unwrap().namespace, "default");
    assert_eq!(Config::from_url(&bare, "").unwrap().system_user, None);
}

#[test]
fn test_config_from_url_rejects_other_schemes() {
    let url = Url::parse("redis://localhost/0").unwrap();
    assert!(matches!(Config::from_url(&url, ""), Err(PropError::Config(_))));
}

#[test]
fn test_construct_file_backend() {
    let temp_dir = TempDir::new().unwrap();
    let url = file_url(&temp_dir, "namespace=app");

    let backend = construct_backend_with_identity(&url, "", Arc::new(StaticIdentity::new())).unwrap();
    backend.set("port", "8080").unwrap();

    let on_disk = fs::read_to_string(temp_dir.path().join("app").join("port")).unwrap();
    assert_eq!(on_disk, "8080");
}

#[test]
fn test_construct_namespace_override() {
    let temp_dir = TempDir::new().unwrap();
    let url = file_url(&temp_dir, "namespace=app");

    let backend = construct_backend_with_identity(&url, "other", Arc::new(StaticIdentity::new())).unwrap();
    backend.set("port", "8080").unwrap();

    assert!(temp_dir.path().join("other").join("port").is_file());
    assert!(!temp_dir.path().join("app").exists());
}

#[test]
fn test_construct_invalid_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let url = file_url(&temp_dir, "");

    let result = construct_backend_with_identity(&url, "..", Arc::new(StaticIdentity::new()));
    assert!(matches!(result, Err(PropError::InvalidName(_))));
}

#[test]
fn test_construct_other_scheme_is_unsupported() {
    let backend = construct_backend("mysql://user@localhost/props", "app").unwrap();
    assert_unsupported(backend.get("key", ""));
}

#[test]
fn test_construct_unparseable_url_is_unsupported() {
    let backend = construct_backend("not a url at all", "app").unwrap();
    assert_unsupported(backend.set("key", "value"));
}

// =============================================================================
// Unsupported Backend Tests
// =============================================================================

#[test]
fn test_unsupported_backend_rejects_everything() {
    let backend = UnsupportedBackend::new();
    let items = strings(&["a"]);

    assert_unsupported(backend.get("k", "default"));
    assert_unsupported(backend.get_all());
    assert_unsupported(backend.get_all_by_prefix("p"));
    assert_unsupported(backend.set("k", "v"));
    assert_unsupported(backend.del("k"));
    assert_unsupported(backend.exists("k"));

    assert_unsupported(backend.lindex("k", 0));
    assert_unsupported(backend.lismember("k", "a"));
    assert_unsupported(backend.llen("k"));
    assert_unsupported(backend.lrange("k"));
    assert_unsupported(backend.lrange_from("k", 0));
    assert_unsupported(backend.lrange_from_to("k", 0, 1));
    assert_unsupported(backend.lrem("k", 0, "a"));
    assert_unsupported(backend.lset("k", 0, "a"));
    assert_unsupported(backend.rpush("k", &items));

    assert_unsupported(backend.sadd("k", &items));
    assert_unsupported(backend.sismember("k", "a"));
    assert_unsupported(backend.smembers("k"));
    assert_unsupported(backend.srem("k", &items));

    assert_unsupported(backend.backend_export());
    assert_unsupported(backend.backend_import(&PropertyCollection::new(), true));
    assert_unsupported(backend.backend_reset());
    assert_unsupported(backend.namespace_exists("ns"));
    assert_unsupported(backend.namespace_clear("ns"));
}

// =============================================================================
// Export / Import Tests
// =============================================================================

#[test]
fn test_export_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("port", "8080").unwrap();
    backend.rpush("hosts", &strings(&["a", "b"])).unwrap();

    let collection = backend.backend_export().unwrap();

    assert_eq!(
        collection.properties,
        vec![
            Property::string("app", "hosts", "a\nb\n"),
            Property::string("app", "port", "8080"),
        ]
    );
}

#[test]
fn test_export_empty_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    assert!(backend.backend_export().unwrap().is_empty());
}

#[test]
fn test_export_skips_non_utf8_contents() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("ok", "1").unwrap();
    fs::write(temp_dir.path().join("app").join("bin"), [0xff, 0xfe]).unwrap();

    let collection = backend.backend_export().unwrap();

    assert_eq!(collection.properties, vec![Property::string("app", "ok", "1")]);
}

#[test]
fn test_export_import_round_trip_into_fresh_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let source = open_namespace(&temp_dir, "source");

    source.set("port", "8080").unwrap();
    source.set("motd", "hello\nworld").unwrap();
    source.rpush("hosts", &strings(&["a", "b", "a"])).unwrap();
    source.sadd("tags", &strings(&["blue", "red"])).unwrap();

    let collection = source.backend_export().unwrap();

    let target = open_namespace(&temp_dir, "target");
    target.backend_import(&collection, true).unwrap();

    assert_eq!(target.get_all().unwrap(), source.get_all().unwrap());
    assert_eq!(target.lrange("hosts").unwrap(), strings(&["a", "b", "a"]));
    assert!(target.sismember("tags", "red").unwrap());
}

#[test]
fn test_import_merges_without_clear() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("kept", "old").unwrap();
    backend.set("replaced", "old").unwrap();

    let mut collection = PropertyCollection::new();
    collection.push(Property::string("app", "replaced", "new"));
    collection.push(Property::string("app", "added", "new"));
    backend.backend_import(&collection, false).unwrap();

    let expected: BTreeMap<String, String> = [("added", "new"), ("kept", "old"), ("replaced", "new")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(backend.get_all().unwrap(), expected);
}

#[test]
fn test_import_with_clear_removes_existing_keys() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("stale", "old").unwrap();

    let mut collection = PropertyCollection::new();
    collection.push(Property::string("app", "fresh", "new"));
    backend.backend_import(&collection, true).unwrap();

    assert!(!backend.exists("stale").unwrap());
    assert_eq!(backend.get("fresh", "").unwrap(), "new");
}

#[test]
fn test_import_typed_properties() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    let mut collection = PropertyCollection::new();
    collection.push(Property::list("app", "hosts", strings(&["b", "a", "b"])));
    collection.push(Property::set("app", "tags", strings(&["red", "blue", "red"])));
    backend.backend_import(&collection, false).unwrap();

    assert_eq!(backend.lrange("hosts").unwrap(), strings(&["b", "a", "b"]));
    assert_eq!(backend.smembers("tags").unwrap().len(), 2);

    let on_disk = fs::read_to_string(backend.key_path("tags").unwrap()).unwrap();
    assert_eq!(on_disk.lines().count(), 2);
}

#[test]
fn test_import_ignores_property_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    let mut collection = PropertyCollection::new();
    collection.push(Property::string("elsewhere", "key", "value"));
    backend.backend_import(&collection, false).unwrap();

    assert_eq!(backend.get("key", "").unwrap(), "value");
    assert!(!temp_dir.path().join("elsewhere").exists());
}

#[test]
fn test_import_invalid_key_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("existing", "value").unwrap();

    let mut collection = PropertyCollection::new();
    collection.push(Property::string("app", "fine", "value"));
    collection.push(Property::string("app", "../escape", "value"));

    let result = backend.backend_import(&collection, true);

    assert!(matches!(result, Err(PropError::InvalidName(_))));
    assert!(backend.exists("existing").unwrap());
    assert!(!backend.exists("fine").unwrap());
}

#[test]
fn test_import_element_with_line_break_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("existing", "value").unwrap();

    let mut collection = PropertyCollection::new();
    collection.push(Property::list("app", "hosts", strings(&["a", "b\nc"])));

    let result = backend.backend_import(&collection, true);

    assert!(matches!(result, Err(PropError::InvalidValue(_))));
    assert!(backend.exists("existing").unwrap());
    assert!(!backend.exists("hosts").unwrap());
}

// =============================================================================
// Reset / Namespace Tests
// =============================================================================

#[test]
fn test_backend_reset() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.set("a", "1").unwrap();
    backend.sadd("b", &strings(&["x"])).unwrap();

    backend.backend_reset().unwrap();

    assert!(backend.get_all().unwrap().is_empty());
    assert!(temp_dir.path().join("app").is_dir());
}

#[test]
fn test_backend_reset_missing_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.backend_reset().unwrap();
}

#[test]
fn test_backend_reset_leaves_other_namespaces() {
    let temp_dir = TempDir::new().unwrap();
    let app = open_namespace(&temp_dir, "app");
    let other = open_namespace(&temp_dir, "other");

    app.set("a", "1").unwrap();
    other.set("b", "2").unwrap();

    app.backend_reset().unwrap();

    assert_eq!(other.get("b", "").unwrap(), "2");
}

#[test]
fn test_namespace_exists() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    assert!(!backend.namespace_exists("app").unwrap());

    backend.set("a", "1").unwrap();

    assert!(backend.namespace_exists("app").unwrap());
    assert!(!backend.namespace_exists("other").unwrap());
}

#[test]
fn test_namespace_exists_plain_file_is_not_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    fs::write(temp_dir.path().join("stray"), "file").unwrap();

    assert!(!backend.namespace_exists("stray").unwrap());
}

#[test]
fn test_namespace_exists_invalid_name() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    assert!(matches!(backend.namespace_exists("a/b"), Err(PropError::InvalidName(_))));
}

#[test]
fn test_namespace_clear_other_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let app = open_namespace(&temp_dir, "app");
    let other = open_namespace(&temp_dir, "other");

    app.set("a", "1").unwrap();
    other.set("b", "2").unwrap();

    app.namespace_clear("other").unwrap();

    assert!(other.get_all().unwrap().is_empty());
    assert!(app.namespace_exists("other").unwrap());
    assert_eq!(app.get("a", "").unwrap(), "1");
}

#[test]
fn test_namespace_clear_missing_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let backend = open_namespace(&temp_dir, "app");

    backend.namespace_clear("ghost").unwrap();
}
