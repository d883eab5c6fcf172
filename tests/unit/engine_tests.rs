//! Integration tests for the inventory engine.

use super::engine_with_prices;
use avl_inventory::Error;
use avl_inventory::inventory::{InventoryEngine, RebalanceAction, RotationKind};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_ascending_inserts_rotate_once_at_first_key() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut engine = InventoryEngine::new();
    engine.set_rotation_observer(move |kind: RotationKind, outer: i64, inner: i64| {
        sink.borrow_mut().push((kind, outer, inner));
    });
    for key in [10, 20, 30] {
        engine.insert(key, "x", 1, 1.0, "Hogar").unwrap();
    }

    assert_eq!(*seen.borrow(), vec![(RotationKind::RotateLeft, 10, 20)]);
    assert_eq!(engine.tree().root_key(), Some(20));
    assert_eq!(engine.tree().height(), 2);
}

#[test]
fn test_left_right_insert_sequence() {
    let mut engine = InventoryEngine::new();
    engine.insert(30, "x", 1, 1.0, "Hogar").unwrap();
    engine.insert(10, "x", 1, 1.0, "Hogar").unwrap();
    let events = engine.insert(20, "x", 1, 1.0, "Hogar").unwrap();

    let steps: Vec<(RotationKind, i64)> = events.iter().map(|e| (e.kind, e.outer_key)).collect();
    assert_eq!(
        steps,
        vec![(RotationKind::RotateLeft, 10), (RotationKind::RotateRight, 30)]
    );
    assert_eq!(engine.tree().root_key(), Some(20));
}

#[test]
fn test_price_range_selects_inclusive_band() {
    let engine = engine_with_prices(&[(1, 5.0), (2, 12.0), (3, 18.0), (4, 25.0)]);
    let result = engine.search_by_price_range(10.0, 20.0);

    let mut prices: Vec<f64> = result.records.iter().map(|r| r.price).collect();
    prices.sort_by(f64::total_cmp);
    assert_eq!(prices, vec![12.0, 18.0]);
    assert!(!result.path.is_empty());
}

#[test]
fn test_invalid_category_leaves_tree_unmodified() {
    let engine = engine_with_prices(&[(1, 5.0), (2, 12.0), (3, 18.0)]);
    let before = engine.nodes();

    let err = engine.search_by_category("Juguetes").unwrap_err();
    assert!(matches!(err, Error::InvalidCategory { ref category } if category == "Juguetes"));
    assert_eq!(engine.nodes(), before);
    assert_eq!(engine.len(), 3);
}

#[test]
fn test_search_absent_key_reports_path() {
    let engine = engine_with_prices(&[(10, 1.0), (20, 2.0), (30, 3.0), (40, 4.0)]);

    for key in [5, 15, 25, 35, 45] {
        let result = engine.search(key);
        assert!(result.record.is_none());
        assert!(!result.path.is_empty());
        assert_eq!(result.path[0], 20);
    }
}

#[test]
fn test_search_returns_stored_record() {
    let mut engine = InventoryEngine::new();
    engine.insert(7, "Cafetera", 2, 89.9, "Electrodomesticos").unwrap();
    engine.insert(3, "Mantel", 0, 14.0, "Hogar").unwrap();

    let record = engine.search(7).record.unwrap();
    assert_eq!(record.name, "Cafetera");
    assert_eq!(record.quantity, 2);
    assert_eq!(record.category, "Electrodomesticos");
    assert!((record.price - 89.9).abs() < f64::EPSILON);
}

#[test]
fn test_delete_sequence_reports_actions() {
    let mut engine = engine_with_prices(&[(50, 1.0), (30, 1.0), (70, 1.0), (60, 1.0), (80, 1.0)]);

    let actions = engine.delete(30).unwrap();
    assert_eq!(
        actions,
        vec![RebalanceAction {
            kind: RotationKind::RotateLeft,
            key: 50,
        }]
    );
    assert_eq!(engine.tree().root_key(), Some(70));
    assert!(engine.tree().check_invariants().is_ok());

    assert!(engine.delete(1000).unwrap().is_empty());
    assert_eq!(engine.len(), 4);
}

#[test]
fn test_update_then_out_of_stock() {
    let mut engine = engine_with_prices(&[(1, 5.0), (2, 12.0), (3, 18.0)]);
    assert!(engine.out_of_stock().is_empty());

    assert!(engine.update_product(2, Some(0), Some(11.0)).unwrap());
    let empty = engine.out_of_stock();
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].key, 2);
    assert!((empty[0].price - 11.0).abs() < f64::EPSILON);
}
