//! Minimal inventory counter, the "hello world" of foldstore.

use foldstore::{Event, EventStore};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug)]
enum StockChange {
    Received { sku: u32 },
    Shipped { sku: u32 },
}

type Stock = BTreeMap<u32, u32>;

fn stock_reducer(mut state: Stock, event: &Event<StockChange>) -> Stock {
    match *event.payload() {
        StockChange::Received { sku } => *state.entry(sku).or_insert(0) += 1,
        StockChange::Shipped { sku } => {
            if let Some(qty) = state.get_mut(&sku) {
                *qty = qty.saturating_sub(1);
            }
        }
    }
    state
}

fn main() {
    let store = EventStore::builder(Stock::new(), stock_reducer)
        .name("warehouse")
        .build();

    store.record(StockChange::Received { sku: 1 });
    println!("Received: sku 1");

    store.record(StockChange::Received { sku: 2 });
    println!("Received: sku 2");

    store.record(StockChange::Received { sku: 1 });
    println!("Received: sku 1");

    store.record(StockChange::Shipped { sku: 2 });
    println!("Shipped: sku 2");

    // Fold all events into the current stock levels
    let stock = store.build_state();
    println!("\nStock after {} events:", store.len());
    for (sku, qty) in &stock {
        println!("  sku {sku}: {qty}");
    }
}
