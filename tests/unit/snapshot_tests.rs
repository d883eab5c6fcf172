//! Snapshot round-trip and persistence tests.

use avl_inventory::Error;
use avl_inventory::config::{EngineConfig, PersistPolicy};
use avl_inventory::inventory::{InventoryEngine, Record, RotationKind};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

fn reload(path: &std::path::Path) -> InventoryEngine {
    let mut fresh = InventoryEngine::new();
    fresh.load(path).unwrap();
    fresh
}

#[test]
fn test_roundtrip_empty_tree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.json");

    let mut engine = InventoryEngine::new();
    engine.save(Some(&path)).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    let fresh = reload(&path);
    assert!(fresh.is_empty());
}

#[test]
fn test_roundtrip_single_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("single.json");

    let mut engine = InventoryEngine::new();
    engine.insert(1, "Lampara", 3, 19.5, "Hogar").unwrap();
    engine.save(Some(&path)).unwrap();

    assert_eq!(reload(&path).in_order(), engine.in_order());
}

#[test]
fn test_roundtrip_seven_records_with_double_rotation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seven.json");

    let mut engine = InventoryEngine::new();
    let mut saw_double = false;
    for (key, category) in [
        (50, "Hogar"),
        (20, "Cocina"),
        (30, "Deportes"),
        (80, "Electrodomesticos"),
        (60, "Hogar"),
        (10, "Cocina"),
        (90, "Deportes"),
    ] {
        let events = engine
            .insert(key, format!("p{key}"), (key % 3) as u32, key as f64 / 2.0, category)
            .unwrap();
        saw_double |= events.len() == 2;
    }
    assert!(saw_double);
    assert_eq!(engine.len(), 7);

    engine.save(Some(&path)).unwrap();
    let fresh = reload(&path);

    assert_eq!(fresh.in_order(), engine.in_order());
    assert!(fresh.tree().check_invariants().is_ok());
}

#[test]
fn test_saved_file_is_key_ordered_and_indented() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ordered.json");

    let mut engine = InventoryEngine::new();
    for key in [3, 1, 2] {
        engine.insert(key, "x", 1, 1.0, "Hogar").unwrap();
    }
    engine.save(Some(&path)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  {\n    \"key\": 1,"));
    let records: Vec<Record> = serde_json::from_str(&text).unwrap();
    let keys: Vec<i64> = records.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![1, 2, 3]);
}

#[test]
fn test_explicit_destination_becomes_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("default.json");

    let mut engine = InventoryEngine::new();
    assert!(matches!(engine.save(None), Err(Error::NoDestinationConfigured)));

    engine.save(Some(&path)).unwrap();
    assert_eq!(engine.snapshot_path(), Some(path.as_path()));
    assert_eq!(engine.save(None).unwrap(), path);
}

#[test]
fn test_auto_persist_after_mutations() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("auto.json");

    let mut engine = InventoryEngine::with_config(EngineConfig::new().with_snapshot_path(&path));
    engine.insert(2, "a", 1, 1.0, "Hogar").unwrap();
    assert_eq!(reload(&path).len(), 1);

    engine.insert(1, "b", 1, 1.0, "Hogar").unwrap();
    engine.update_product(1, Some(0), None).unwrap();
    assert_eq!(reload(&path).out_of_stock().len(), 1);

    engine.delete(2).unwrap();
    assert_eq!(reload(&path).in_order(), engine.in_order());
}

#[test]
fn test_manual_policy_does_not_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manual.json");

    let config = EngineConfig::new()
        .with_snapshot_path(&path)
        .with_persist_policy(PersistPolicy::Manual);
    let mut engine = InventoryEngine::with_config(config);
    engine.insert(1, "a", 1, 1.0, "Hogar").unwrap();
    assert!(!path.exists());

    engine.save(None).unwrap();
    assert!(path.exists());
}

#[test]
fn test_load_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"key": 1}"#).unwrap();

    let mut engine = InventoryEngine::new();
    engine.insert(5, "keep", 1, 1.0, "Hogar").unwrap();

    let err = engine.load(&path).unwrap_err();
    assert!(matches!(err, Error::MalformedSnapshot { .. }));
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let mut engine = InventoryEngine::new();
    let err = engine.load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_notifies_observer_and_accepts_any_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unordered.json");
    fs::write(
        &path,
        r#"[
  {"key": 3, "name": "c", "quantity": 1, "price": 3.0, "category": "Deportes"},
  {"key": 1, "name": "a", "quantity": 1, "price": 1.0, "category": "Hogar"},
  {"key": 2, "name": "b", "quantity": 1, "price": 2.0, "category": "Cocina"}
]"#,
    )
    .unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut engine = InventoryEngine::new();
    engine.set_rotation_observer(move |kind: RotationKind, outer: i64, inner: i64| {
        sink.borrow_mut().push((kind, outer, inner));
    });

    assert_eq!(engine.load(&path).unwrap(), 3);
    assert_eq!(
        *seen.borrow(),
        vec![
            (RotationKind::RotateLeft, 1, 2),
            (RotationKind::RotateRight, 3, 2),
        ]
    );
    assert_eq!(engine.tree().root_key(), Some(2));
    let keys: Vec<i64> = engine.in_order().iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![1, 2, 3]);
}

#[test]
fn test_unwritable_snapshot_target_rejects_mutation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("inv.json");

    let mut engine = InventoryEngine::with_config(EngineConfig::new().with_snapshot_path(&path));
    let err = engine.insert(1, "Lampara", 3, 19.5, "Hogar").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(engine.is_empty());
    assert!(!path.exists());

    fs::create_dir(dir.path().join("no_such_dir")).unwrap();
    engine.insert(1, "Lampara", 3, 19.5, "Hogar").unwrap();
    assert_eq!(engine.len(), 1);
    assert_eq!(reload(&path).in_order(), engine.in_order());
    assert!(engine.take_persist_error().is_none());
}

#[test]
fn test_unwritable_snapshot_target_rejects_load() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.json");
    fs::write(
        &source,
        r#"[{"key": 1, "name": "a", "quantity": 1, "price": 1.0, "category": "Hogar"}]"#,
    )
    .unwrap();

    let mut engine = InventoryEngine::new();
    engine.set_snapshot_path(dir.path().join("missing").join("inv.json"));

    assert!(matches!(engine.load(&source), Err(Error::Io(_))));
    assert!(engine.is_empty());
}
