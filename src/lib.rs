//! An in-memory, append-only event log where application state is a fold
//! over the recorded events.
//!
//! Construct [`Event`]s, append them to an [`EventStore`], and derive state
//! at any time with [`EventStore::build_state`]. Every derivation replays the
//! full history through the store's reducer, starting from a fresh clone of
//! the initial state.

mod clock;
mod error;
mod event;
mod store;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use event::Event;
pub use store::{EventStore, EventStoreBuilder};
pub use view::{ReduceFn, View};
