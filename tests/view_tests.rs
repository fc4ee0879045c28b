mod common;

use common::{added, counter_reducer, inventory_reducer, inventory_store, quantities, removed};
use common::{InventoryOp, Operation, Quantities};
use foldstore::{Event, View};

#[derive(Default, Clone, Debug, PartialEq)]
struct StatsState {
    added: u64,
    removed: u64,
    last_id: Option<u32>,
}

fn stats_reducer(mut state: StatsState, event: &Event<InventoryOp>) -> StatsState {
    match event.payload().op {
        Operation::ItemAdded => state.added += 1,
        Operation::ItemRemoved => state.removed += 1,
        Operation::Unknown(_) => {}
    }
    state.last_id = Some(event.payload().id);
    state
}

#[test]
fn test_view_fold_empty() {
    let view = View::new("stats", StatsState::default(), stats_reducer);
    let events: Vec<Event<InventoryOp>> = Vec::new();

    assert_eq!(view.fold(&events), StatsState::default());
}

#[test]
fn test_view_fold_and_apply_agree() {
    let view = View::new("inventory", Quantities::new(), inventory_reducer);
    let events = vec![Event::new(added(1)), Event::new(added(1)), Event::new(removed(1))];

    let mut stepped = view.initial_state().clone();
    for event in &events {
        stepped = view.apply(stepped, event);
    }

    assert_eq!(view.fold(&events), stepped);
    assert_eq!(stepped, quantities(&[(1, 1)]));
    assert!(view.initial_state().is_empty());
}

#[test]
fn test_view_name() {
    let view = View::new("stats", StatsState::default(), stats_reducer);
    assert_eq!(view.name(), "stats");
}

#[test]
fn test_project_multiple_views() {
    let store = inventory_store();
    for op in [added(1), added(2), removed(1), added(3)] {
        store.append(Event::new(op));
    }

    let stats = View::new("stats", StatsState::default(), stats_reducer);
    let counter = View::new("counter", 0u64, counter_reducer::<InventoryOp>);

    assert_eq!(
        store.project(&stats),
        StatsState {
            added: 3,
            removed: 1,
            last_id: Some(3),
        }
    );
    assert_eq!(store.project(&counter), 4);
    assert_eq!(store.build_state(), quantities(&[(1, 0), (2, 1), (3, 1)]));
}

#[test]
fn test_project_tolerant_view_over_unknown_ops() {
    // The store's own reducer would panic on this event; a view that
    // ignores unknown operations still folds fine.
    let store = inventory_store();
    store.append(Event::new(added(1)));
    store.append(Event::new(InventoryOp {
        id: 2,
        op: Operation::Unknown(9),
    }));

    let stats = View::new("stats", StatsState::default(), stats_reducer);
    let projected = store.project(&stats);

    assert_eq!(projected.added, 1);
    assert_eq!(projected.last_id, Some(2));
}

#[test]
fn test_cloned_view_folds_identically() {
    let view = View::new("stats", StatsState::default(), stats_reducer);
    let copy = view.clone();
    let events = vec![Event::new(added(5)), Event::new(removed(5))];

    assert_eq!(view.fold(&events), copy.fold(&events));
    assert_eq!(copy.name(), "stats");
}

#[test]
fn test_try_fold_success_and_abort() {
    let store = inventory_store();
    store.append(Event::new(added(1)));
    store.append(Event::new(added(2)));

    let total: Result<u32, String> = store.try_fold(0, |n, event| match event.payload().op {
        Operation::ItemAdded => Ok(n + 1),
        other => Err(format!("unexpected {other:?}")),
    });
    assert_eq!(total, Ok(2));

    store.append(Event::new(InventoryOp {
        id: 3,
        op: Operation::Unknown(1),
    }));
    store.append(Event::new(added(4)));

    let mut visited = 0;
    let aborted: Result<u32, String> = store.try_fold(0, |n, event| {
        visited += 1;
        match event.payload().op {
            Operation::ItemAdded => Ok(n + 1),
            other => Err(format!("unexpected {other:?}")),
        }
    });
    assert_eq!(aborted, Err("unexpected Unknown(1)".to_string()));
    assert_eq!(visited, 3, "fold must stop at the first failure");
}
