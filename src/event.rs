use crate::clock::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// An immutable event record.
///
/// The `payload` is whatever the caller wants it to be. The store never
/// inspects it; reducers give events meaning. The timestamp is captured once,
/// by the constructor, and cannot be changed afterwards: there are no setters
/// and the fields are private.
///
/// Optional metadata (`id`, `actor`) supports audit trails and correlation.
/// When `None`, these fields are omitted from serialized output.
///
/// # Examples
///
/// ```
/// use foldstore::Event;
///
/// // Simple event, no metadata
/// let event = Event::new("user_clicked");
/// assert_eq!(*event.payload(), "user_clicked");
///
/// // With metadata
/// let event = Event::new(99.99)
///     .with_id("ord-001")
///     .with_actor("user_42");
/// assert_eq!(event.id(), Some("ord-001"));
/// assert_eq!(event.actor(), Some("user_42"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<P> {
    payload: P,

    timestamp: SystemTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    actor: Option<String>,
}

impl<P> Event<P> {
    /// Create a new event stamped with the current system time.
    ///
    /// Metadata fields default to `None`. Use the builder methods to set them.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldstore::Event;
    /// use std::time::SystemTime;
    ///
    /// let before = SystemTime::now();
    /// let event = Event::new(42u32);
    /// assert_eq!(*event.payload(), 42);
    /// assert!(event.timestamp() >= before);
    /// assert_eq!(event.id(), None);
    /// ```
    pub fn new(payload: P) -> Self {
        Event::new_at(payload, &SystemClock)
    }

    /// Create a new event stamped by the given clock.
    ///
    /// The clock is read exactly once.
    pub fn new_at(payload: P, clock: &impl Clock) -> Self {
        Event {
            payload,
            timestamp: clock.now(),
            id: None,
            actor: None,
        }
    }

    /// Set the event's unique identifier.
    ///
    /// Not auto-generated. Callers bring their own (uuid, ulid, etc.)
    /// or leave it unset.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the actor that caused this event (user ID, service name, ...).
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The caller-supplied payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// When the event was constructed.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// The caller-supplied identifier, if one was set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The actor that caused this event, if one was set.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Consume the event and return its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}
