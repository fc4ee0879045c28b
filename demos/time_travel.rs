//! Replaying to a specific point in the event history.
//!
//! Uses a manual clock so the timestamps are predictable, then inspects
//! state by event count and by point in time.

use foldstore::{Event, EventStore, ManualClock};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

fn balance(state: i64, event: &Event<i64>) -> i64 {
    state + event.payload()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let clock = Arc::new(ManualClock::new(start));
    let store = EventStore::builder(0, balance)
        .name("ledger")
        .clock(clock.clone())
        .build();

    // One transaction per minute for 20 minutes
    for i in 0..20 {
        store.record(if i % 3 == 0 { -50 } else { 100 });
        clock.advance(Duration::from_secs(60));
    }

    println!("Full state (20 events): balance = {}", store.build_state());
    println!("State at event 10: balance = {}", store.build_state_at(10)?);
    println!("State at event 5: balance = {}", store.build_state_at(5)?);

    let after_quarter_hour = start + Duration::from_secs(15 * 60);
    println!(
        "State 15 minutes in: balance = {}",
        store.build_state_until(after_quarter_hour)
    );

    // Asking for more history than exists is an error, not a panic
    if let Err(e) = store.build_state_at(21) {
        println!("Replay past the end: {e}");
    }

    Ok(())
}
