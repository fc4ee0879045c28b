//! Several threads appending to one store while another derives state.
//!
//! Also shows optimistic concurrency: a withdrawal is only appended if
//! nobody else appended between reading the balance and writing.

use foldstore::{Error, Event, EventStore};
use std::thread;

fn balance(state: i64, event: &Event<i64>) -> i64 {
    state + event.payload()
}

fn main() {
    let store = EventStore::builder(0, balance).name("account").build();

    thread::scope(|s| {
        for teller in 0..4 {
            let store = &store;
            s.spawn(move || {
                for _ in 0..25 {
                    store.append(Event::new(10).with_actor(format!("teller-{teller}")));
                }
            });
        }

        s.spawn(|| {
            for _ in 0..5 {
                let (state, version) = store.build_state_versioned();
                println!("observer: balance {state} after {version} events");
            }
        });
    });

    println!("Deposits done: balance = {}", store.build_state());

    // Withdraw only if the balance covers it and nothing changed meanwhile
    let (balance, version) = store.build_state_versioned();
    if balance >= 300 {
        match store.append_if(Event::new(-300).with_actor("atm"), version) {
            Ok(position) => println!("Withdrawal recorded at position {position}"),
            Err(Error::Conflict { expected, actual }) => {
                println!("Lost the race: expected {expected} events, found {actual}")
            }
            Err(e) => println!("Withdrawal failed: {e}"),
        }
    }

    println!("Final balance = {}", store.build_state());
}
