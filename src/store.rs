use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::view::{ReduceFn, View};
use parking_lot::RwLock;
use std::ops::Range;
use std::sync::Arc;
use std::time::SystemTime;

const DEFAULT_NAME: &str = "store";

/// A thread-safe, append-only event log whose state is a fold over its events.
///
/// The store owns an ordered event sequence, a reducer and an initial state.
/// Events only ever get appended; state is derived on demand by replaying
/// every stored event, oldest first, through the reducer. Nothing is cached.
///
/// A single readers-writer lock guards the sequence: appends take it
/// exclusively, reads and derivations share it. Shared acquisitions are
/// recursive, so a read nested inside [`EventStore::with_events`] can't
/// deadlock behind a queued append. Share a store between threads
/// with `Arc` or scoped threads; every operation takes `&self`.
///
/// # Examples
///
/// ```
/// use foldstore::{Event, EventStore};
///
/// fn sum(state: i64, event: &Event<i64>) -> i64 {
///     state + event.payload()
/// }
///
/// let store = EventStore::new(0, sum);
/// store.append(Event::new(40));
/// store.append(Event::new(2));
/// assert_eq!(store.build_state(), 42);
/// assert_eq!(store.len(), 2);
/// ```
pub struct EventStore<P, S> {
    events: RwLock<Vec<Event<P>>>,
    view: View<P, S>,
    clock: Arc<dyn Clock>,
}

impl<P, S: std::fmt::Debug> std::fmt::Debug for EventStore<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("name", &self.view.name())
            .field("len", &self.len())
            .field("initial_state", self.view.initial_state())
            .finish()
    }
}

/// Builder for configuring an [`EventStore`].
///
/// # Examples
///
/// ```
/// use foldstore::{Event, EventStore, ManualClock};
/// use std::sync::Arc;
/// use std::time::UNIX_EPOCH;
///
/// fn count(state: usize, _event: &Event<&'static str>) -> usize {
///     state + 1
/// }
///
/// let clock = Arc::new(ManualClock::new(UNIX_EPOCH));
/// let store = EventStore::builder(0, count)
///     .name("clicks")
///     .clock(clock.clone())
///     .capacity(64)
///     .build();
///
/// store.record("button_pressed");
/// assert_eq!(store.name(), "clicks");
/// assert_eq!(store.events()[0].timestamp(), UNIX_EPOCH);
/// ```
pub struct EventStoreBuilder<P, S> {
    name: String,
    initial: S,
    reducer: ReduceFn<P, S>,
    clock: Arc<dyn Clock>,
    capacity: usize,
}

impl<P, S> EventStoreBuilder<P, S> {
    fn new(initial: S, reducer: ReduceFn<P, S>) -> Self {
        EventStoreBuilder {
            name: DEFAULT_NAME.to_string(),
            initial,
            reducer,
            clock: Arc::new(SystemClock),
            capacity: 0,
        }
    }

    /// Name the store. Shows up in log output and `Debug`.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Use `clock` to stamp events created by [`EventStore::record`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Pre-allocate room for `capacity` events.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build the store. The event sequence starts empty.
    pub fn build(self) -> EventStore<P, S> {
        log::debug!(
            "foldstore: store '{}' created (capacity {})",
            self.name,
            self.capacity
        );
        EventStore {
            events: RwLock::new(Vec::with_capacity(self.capacity)),
            view: View::new(&self.name, self.initial, self.reducer),
            clock: self.clock,
        }
    }
}

impl<P, S> EventStore<P, S> {
    /// Create a store with the given initial state and reducer.
    ///
    /// Uses the system clock and the default name. See [`EventStore::builder`]
    /// for the configurable form.
    pub fn new(initial_state: S, reducer: ReduceFn<P, S>) -> Self {
        EventStoreBuilder::new(initial_state, reducer).build()
    }

    /// Start configuring a store.
    pub fn builder(initial_state: S, reducer: ReduceFn<P, S>) -> EventStoreBuilder<P, S> {
        EventStoreBuilder::new(initial_state, reducer)
    }

    /// Returns the store name.
    pub fn name(&self) -> &str {
        self.view.name()
    }

    /// The seed every derivation starts from.
    pub fn initial_state(&self) -> &S {
        self.view.initial_state()
    }

    /// Append an event to the end of the log.
    ///
    /// Returns the zero-based position the event landed at. Concurrent appends
    /// are serialized; their relative order is whichever acquires the lock
    /// first.
    pub fn append(&self, event: Event<P>) -> usize {
        let position = {
            let mut events = self.events.write();
            events.push(event);
            events.len() - 1
        };
        log::trace!("foldstore: '{}' appended event {}", self.name(), position);
        position
    }

    /// Stamp `payload` with the store's clock and append it.
    pub fn record(&self, payload: P) -> usize {
        self.append(Event::new_at(payload, &self.clock))
    }

    /// Append a batch of events under a single lock acquisition.
    ///
    /// The batch lands contiguously; no concurrent append can interleave with
    /// it. Returns the range of positions the batch occupies.
    pub fn append_all(&self, events: impl IntoIterator<Item = Event<P>>) -> Range<usize> {
        // Collected before locking so a lazy iterator can't run under the lock.
        let batch: Vec<Event<P>> = events.into_iter().collect();
        let range = {
            let mut events = self.events.write();
            let start = events.len();
            events.extend(batch);
            start..events.len()
        };
        log::trace!(
            "foldstore: '{}' appended events {}..{}",
            self.name(),
            range.start,
            range.end
        );
        range
    }

    /// Append only if the log currently holds exactly `expected_len` events.
    ///
    /// Pair with [`EventStore::build_state_versioned`] to make a decision on
    /// derived state and append without losing a race to another writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if another append got there first. The
    /// store is left unchanged.
    pub fn append_if(&self, event: Event<P>, expected_len: usize) -> Result<usize> {
        let mut events = self.events.write();
        let actual = events.len();
        if actual != expected_len {
            drop(events);
            log::warn!(
                "foldstore: '{}' conditional append rejected (expected {}, actual {})",
                self.name(),
                expected_len,
                actual
            );
            return Err(Error::Conflict {
                expected: expected_len,
                actual,
            });
        }
        events.push(event);
        Ok(actual)
    }

    /// Number of events in the log.
    pub fn len(&self) -> usize {
        self.events.read_recursive().len()
    }

    /// Returns `true` if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.events.read_recursive().is_empty()
    }

    /// Run `f` against a read-only view of the event sequence.
    ///
    /// No copy is made. Appends block until `f` returns, so keep it short and
    /// don't call back into appending methods of the same store from inside.
    /// Reading the store again from `f` is fine: shared reads are recursive
    /// and never queue behind a waiting writer.
    pub fn with_events<R>(&self, f: impl FnOnce(&[Event<P>]) -> R) -> R {
        let events = self.events.read_recursive();
        f(events.as_slice())
    }

    /// Fold a secondary view over this store's events.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldstore::{Event, EventStore, View};
    ///
    /// fn sum(state: i64, event: &Event<i64>) -> i64 {
    ///     state + event.payload()
    /// }
    ///
    /// fn largest(state: Option<i64>, event: &Event<i64>) -> Option<i64> {
    ///     Some(state.map_or(*event.payload(), |max| max.max(*event.payload())))
    /// }
    ///
    /// let store = EventStore::new(0, sum);
    /// store.append(Event::new(3));
    /// store.append(Event::new(7));
    ///
    /// let largest = View::new("largest", None, largest);
    /// assert_eq!(store.project(&largest), Some(7));
    /// ```
    pub fn project<T: Clone>(&self, view: &View<P, T>) -> T {
        let events = self.events.read_recursive();
        log::debug!(
            "foldstore: '{}' projecting view '{}' over {} events",
            self.name(),
            view.name(),
            events.len()
        );
        view.fold(events.iter())
    }

    /// Fold the events with an ad-hoc fallible function.
    ///
    /// Stops at the first error and returns it; the partially folded value is
    /// discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldstore::{Event, EventStore};
    ///
    /// fn ignore(_state: (), _event: &Event<&'static str>) {}
    ///
    /// let store = EventStore::new((), ignore);
    /// store.append(Event::new("deposit"));
    /// store.append(Event::new("teleport"));
    ///
    /// let result = store.try_fold(0u32, |n, event| match *event.payload() {
    ///     "deposit" => Ok(n + 1),
    ///     other => Err(format!("unknown operation: {other}")),
    /// });
    /// assert_eq!(result, Err("unknown operation: teleport".to_string()));
    /// ```
    pub fn try_fold<T, E, F>(&self, init: T, f: F) -> Result<T, E>
    where
        F: FnMut(T, &Event<P>) -> Result<T, E>,
    {
        let events = self.events.read_recursive();
        events.iter().try_fold(init, f)
    }
}

impl<P: Clone, S> EventStore<P, S> {
    /// A copy of the full event sequence, oldest first.
    ///
    /// The returned vector is independent of the store; changing it has no
    /// effect on the log.
    pub fn events(&self) -> Vec<Event<P>> {
        self.events.read_recursive().to_vec()
    }

    /// A copy of the events from position `start` onwards.
    ///
    /// Returns an empty vector if `start` is at or past the end.
    pub fn events_from(&self, start: usize) -> Vec<Event<P>> {
        let events = self.events.read_recursive();
        events.get(start..).map(<[_]>::to_vec).unwrap_or_default()
    }
}

impl<P, S: Clone> EventStore<P, S> {
    /// Derive the current state by replaying every event.
    ///
    /// Starts from a clone of the initial state and applies the reducer to each
    /// event in append order. With no events, returns the initial state.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by the reducer. No partial state is
    /// returned and the store stays usable afterwards.
    pub fn build_state(&self) -> S {
        self.build_state_versioned().0
    }

    /// Derive the current state along with the number of events it covers.
    ///
    /// Both come from the same lock acquisition, so the length is exactly the
    /// one to pass to [`EventStore::append_if`].
    pub fn build_state_versioned(&self) -> (S, usize) {
        let events = self.events.read_recursive();
        log::debug!(
            "foldstore: '{}' replaying {} events",
            self.name(),
            events.len()
        );
        (self.view.fold(events.iter()), events.len())
    }

    /// Derive the state as it was after the first `n` events.
    ///
    /// `build_state_at(0)` is the initial state; `build_state_at(len)` equals
    /// [`EventStore::build_state`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `n` exceeds the number of events.
    pub fn build_state_at(&self, n: usize) -> Result<S> {
        let events = self.events.read_recursive();
        let len = events.len();
        if n > len {
            return Err(Error::OutOfRange { requested: n, len });
        }
        log::debug!(
            "foldstore: '{}' replaying {} of {} events",
            self.name(),
            n,
            len
        );
        Ok(self.view.fold(&events[..n]))
    }

    /// Derive the state from only the events stamped at or before `at`.
    ///
    /// Events are still applied in append order; any event with a later
    /// timestamp is skipped, wherever it sits in the sequence.
    pub fn build_state_until(&self, at: SystemTime) -> S {
        let events = self.events.read_recursive();
        self.view
            .fold(events.iter().filter(|event| event.timestamp() <= at))
    }
}
