//! Inventory Walkthrough Example
//!
//! This example demonstrates the main operations of the InventoryEngine:
//! - Inserting products and watching the rotations they trigger
//! - Exact, price range, category and combined searches
//! - Deleting products and reading back the rebalancing actions
//! - Saving a snapshot and loading it into a fresh engine
//!
//! Run with: `cargo run --example inventory_walkthrough`

use avl_inventory::inventory::{CombinedQuery, InventoryEngine, RotationKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> avl_inventory::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("=== Inventory Walkthrough ===");

    let mut engine = InventoryEngine::new();
    engine.set_rotation_observer(|kind: RotationKind, outer: i64, inner: i64| {
        info!("{} at {} (promoting {})", kind, outer, inner);
    });

    // Insert products; 30 -> 10 -> 20 forces a left-right double rotation
    info!("--- Inserting Products ---");
    let products = [
        (30, "Licuadora", 3, 55.0, "Electrodomesticos"),
        (10, "Toalla", 0, 5.0, "Hogar"),
        (20, "Balon", 7, 9.0, "Deportes"),
        (40, "Sarten", 12, 18.0, "Cocina"),
        (50, "Tostadora", 0, 40.0, "Electrodomesticos"),
        (60, "Pesas", 2, 25.0, "Deportes"),
    ];
    for (key, name, quantity, price, category) in products {
        let events = engine.insert(key, name, quantity, price, category)?;
        info!("Inserted {} ({} rotations)", key, events.len());
    }
    info!("Root: {:?}, height: {}", engine.tree().root_key(), engine.tree().height());

    info!("--- Tree Shape (pre-order) ---");
    for view in engine.nodes() {
        info!(
            "{}{} (h={}, left={:?}, right={:?})",
            "  ".repeat(view.depth),
            view.key,
            view.height,
            view.left,
            view.right
        );
    }

    info!("--- Searches ---");
    let found = engine.search(50);
    info!("search(50): {:?} via {:?}", found.record.map(|r| r.name), found.path);

    let missing = engine.search(35);
    info!("search(35): found={} via {:?}", missing.is_found(), missing.path);

    let range = engine.search_by_price_range(8.0, 20.0);
    info!("price 8..=20: {:?} via {:?}", range.keys(), range.path);

    let deportes = engine.search_by_category("Deportes")?;
    info!("Deportes: {:?}", deportes.keys());

    if let Err(err) = engine.search_by_category("Juguetes") {
        info!("Juguetes rejected: {}", err);
    }

    let query = CombinedQuery::new()
        .with_max_price(30.0)
        .with_category("Deportes");
    let combined = engine.combined_search(&query);
    info!("Deportes up to 30: {:?}", combined.keys());

    let empty: Vec<i64> = engine.out_of_stock().iter().map(|r| r.key).collect();
    info!("Out of stock: {:?}", empty);

    info!("--- Deleting ---");
    for key in [10, 20] {
        let actions = engine.delete(key)?;
        let described: Vec<String> = actions.iter().map(ToString::to_string).collect();
        info!("Deleted {}: {:?}", key, described);
    }
    info!("Stats: {}", engine.stats());

    info!("--- Snapshot ---");
    let path = std::env::temp_dir().join("avl_inventory_walkthrough.json");
    engine.save(Some(&path))?;

    let mut restored = InventoryEngine::new();
    let count = restored.load(&path)?;
    info!("Restored {} records from {}", count, path.display());
    info!("Identical: {}", restored.in_order() == engine.in_order());

    Ok(())
}
