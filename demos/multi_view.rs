//! Same event log, two views: todo state and statistics.
//!
//! Demonstrates that different reducers over the same events produce
//! independent states without touching the store's own reducer.

use foldstore::{Event, EventStore, View};

#[derive(Clone, Debug)]
enum TodoEvent {
    Added(String),
    Completed(u64),
    Deleted(u64),
}

// --- Todo view (the store's primary state) ---

#[derive(Default, Clone)]
struct TodoState {
    items: Vec<TodoItem>,
    next_id: u64,
}

#[derive(Clone)]
struct TodoItem {
    id: u64,
    text: String,
    done: bool,
}

fn todo_reducer(mut state: TodoState, event: &Event<TodoEvent>) -> TodoState {
    match event.payload() {
        TodoEvent::Added(text) => {
            state.items.push(TodoItem {
                id: state.next_id,
                text: text.clone(),
                done: false,
            });
            state.next_id += 1;
        }
        TodoEvent::Completed(id) => {
            if let Some(item) = state.items.iter_mut().find(|i| i.id == *id) {
                item.done = true;
            }
        }
        TodoEvent::Deleted(id) => state.items.retain(|i| i.id != *id),
    }
    state
}

// --- Stats view ---

#[derive(Default, Clone)]
struct StatsState {
    created: u64,
    completed: u64,
    deleted: u64,
}

fn stats_reducer(mut state: StatsState, event: &Event<TodoEvent>) -> StatsState {
    match event.payload() {
        TodoEvent::Added(_) => state.created += 1,
        TodoEvent::Completed(_) => state.completed += 1,
        TodoEvent::Deleted(_) => state.deleted += 1,
    }
    state
}

fn main() {
    let store = EventStore::builder(TodoState::default(), todo_reducer)
        .name("todos")
        .build();

    store.record(TodoEvent::Added("buy milk".into()));
    store.record(TodoEvent::Added("write docs".into()));
    store.record(TodoEvent::Added("fix bug".into()));
    store.record(TodoEvent::Completed(0));
    store.record(TodoEvent::Deleted(2));

    let todos = store.build_state();
    println!("Todos:");
    for item in &todos.items {
        let check = if item.done { "x" } else { " " };
        println!("  [{}] {}", check, item.text);
    }

    let stats = store.project(&View::new("stats", StatsState::default(), stats_reducer));
    let rate = if stats.created > 0 {
        (stats.completed * 100) / stats.created
    } else {
        0
    };
    println!(
        "Stats: {} created, {} completed, {} deleted ({}% completion rate)",
        stats.created, stats.completed, stats.deleted, rate
    );
}
