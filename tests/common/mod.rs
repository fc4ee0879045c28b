#![allow(dead_code)]

use foldstore::{Event, EventStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    ItemAdded,
    ItemRemoved,
    /// An operation code the inventory reducer does not understand.
    Unknown(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryOp {
    pub id: u32,
    pub op: Operation,
}

pub type Quantities = HashMap<u32, u32>;

pub fn added(id: u32) -> InventoryOp {
    InventoryOp {
        id,
        op: Operation::ItemAdded,
    }
}

pub fn removed(id: u32) -> InventoryOp {
    InventoryOp {
        id,
        op: Operation::ItemRemoved,
    }
}

// Mutates its owned state in place on purpose: the store must hand it a
// clone, so the seed stays untouched.
pub fn inventory_reducer(mut state: Quantities, event: &Event<InventoryOp>) -> Quantities {
    let InventoryOp { id, op } = *event.payload();
    match op {
        Operation::ItemAdded => *state.entry(id).or_insert(0) += 1,
        Operation::ItemRemoved => {
            if let Some(qty) = state.get_mut(&id) {
                if *qty > 0 {
                    *qty -= 1;
                }
            }
        }
        Operation::Unknown(code) => panic!("unknown operation type: {code}"),
    }
    state
}

pub fn inventory_store() -> EventStore<InventoryOp, Quantities> {
    EventStore::new(Quantities::new(), inventory_reducer)
}

pub fn counter_reducer<P>(state: u64, _event: &Event<P>) -> u64 {
    state + 1
}

/// Order-sensitive, so replaying events out of order shows up in the result.
pub fn hash_reducer(state: i64, event: &Event<i64>) -> i64 {
    state.wrapping_mul(31).wrapping_add(*event.payload())
}

pub fn quantities(pairs: &[(u32, u32)]) -> Quantities {
    pairs.iter().copied().collect()
}

pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}
