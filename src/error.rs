/// Errors returned by [`EventStore`](crate::EventStore) operations.
///
/// Reducer failures are not represented here. A reducer that panics aborts
/// the derivation that called it; use
/// [`EventStore::try_fold`](crate::EventStore::try_fold) for reducers that
/// can fail without panicking.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A conditional append found the log at a different length than expected.
    #[error("conditional append rejected: expected {expected} events, store holds {actual}")]
    Conflict { expected: usize, actual: usize },

    /// A replay was asked for more events than the store holds.
    #[error("cannot replay {requested} events, store holds {len}")]
    OutOfRange { requested: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
