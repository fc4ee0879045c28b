use crate::event::Event;

/// A pure function that folds an event into state.
///
/// Reducers receive owned state and return owned state. They should be pure
/// (no I/O, no side effects, no captured mutable state). Since the state is
/// owned, mutating it in place and returning it is fine: the store always
/// hands the reducer a clone of its initial state, never the seed itself.
///
/// # Examples
///
/// ```
/// use foldstore::{Event, ReduceFn};
///
/// fn counter(state: u64, _event: &Event<String>) -> u64 {
///     state + 1
/// }
///
/// let reducer: ReduceFn<String, u64> = counter;
/// ```
pub type ReduceFn<P, S> = fn(S, &Event<P>) -> S;

/// A named derivation over an event sequence.
///
/// A view pairs a reducer with the initial state it folds from. Every
/// [`EventStore`](crate::EventStore) owns one for its primary state; extra
/// views can be folded over the same events with
/// [`EventStore::project`](crate::EventStore::project).
///
/// # Examples
///
/// ```
/// use foldstore::{Event, View};
///
/// fn total(state: i64, event: &Event<i64>) -> i64 {
///     state + event.payload()
/// }
///
/// let view = View::new("total", 0, total);
/// let events = vec![Event::new(5), Event::new(-2)];
/// assert_eq!(view.fold(&events), 3);
/// assert_eq!(*view.initial_state(), 0);
/// ```
pub struct View<P, S> {
    name: String,
    reducer: ReduceFn<P, S>,
    initial: S,
}

impl<P, S: std::fmt::Debug> std::fmt::Debug for View<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .finish()
    }
}

impl<P, S: Clone> Clone for View<P, S> {
    fn clone(&self) -> Self {
        View {
            name: self.name.clone(),
            reducer: self.reducer,
            initial: self.initial.clone(),
        }
    }
}

impl<P, S> View<P, S> {
    /// Create a new view.
    ///
    /// `name` identifies the view in log output.
    /// `initial` is the seed every fold starts from.
    /// `reducer` is applied to each event in order.
    pub fn new(name: &str, initial: S, reducer: ReduceFn<P, S>) -> Self {
        View {
            name: name.to_string(),
            reducer,
            initial,
        }
    }

    /// Returns the view name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The seed state. Never modified by folding.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Apply the reducer to a single event.
    pub fn apply(&self, state: S, event: &Event<P>) -> S {
        (self.reducer)(state, event)
    }
}

impl<P, S: Clone> View<P, S> {
    /// Fold events, oldest first, over a fresh clone of the initial state.
    ///
    /// An empty input returns the initial state unchanged. A panicking
    /// reducer aborts the fold; no partial state is returned.
    pub fn fold<'a, I>(&self, events: I) -> S
    where
        I: IntoIterator<Item = &'a Event<P>>,
        P: 'a,
    {
        events
            .into_iter()
            .fold(self.initial.clone(), |state, event| (self.reducer)(state, event))
    }
}
