//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>`. Listings subscribe to it and
//! re-fetch when a [`SPECIES_REFRESH`] event arrives.

use biohub_core::species::edit::RefreshSignal;
use biohub_core::types::DbId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A species changed and listings should re-fetch.
pub const SPECIES_REFRESH: &str = "species.refresh";

/// A species was added to the catalogue.
pub const SPECIES_CREATED: &str = "species.created";

// ---------------------------------------------------------------------------
// HubEvent
// ---------------------------------------------------------------------------

/// Something that happened to the species catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubEvent {
    /// Dot-separated event name, e.g. `"species.refresh"`.
    pub event_type: String,

    pub species_id: Option<DbId>,

    /// Id of the user whose action triggered the event, when known.
    pub actor_user_id: Option<DbId>,

    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl HubEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            species_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_species(mut self, species_id: DbId) -> Self {
        self.species_id = Some(species_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// ```rust
/// use biohub_events::bus::{EventBus, HubEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(HubEvent::new("species.refresh").with_species(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<HubEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest messages are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: HubEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RefreshSignal for EventBus {
    fn request_refresh(&self, species_id: DbId) {
        self.publish(HubEvent::new(SPECIES_REFRESH).with_species(species_id));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            HubEvent::new(SPECIES_CREATED)
                .with_species(42)
                .with_actor(7)
                .with_payload(serde_json::json!({"scientific_name": "Panthera leo"})),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, SPECIES_CREATED);
        assert_eq!(received.species_id, Some(42));
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.payload["scientific_name"], "Panthera leo");
    }

    #[tokio::test]
    async fn refresh_signal_publishes_one_refresh_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.request_refresh(9);

        let received = rx.recv().await.expect("should receive the refresh");
        assert_eq!(received.event_type, SPECIES_REFRESH);
        assert_eq!(received.species_id, Some(9));
        assert!(rx.try_recv().is_err(), "exactly one event expected");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.request_refresh(1);

        assert_eq!(rx1.recv().await.unwrap().species_id, Some(1));
        assert_eq!(rx2.recv().await.unwrap().species_id, Some(1));
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.request_refresh(3);
    }

    #[test]
    fn new_event_has_empty_optional_fields() {
        let event = HubEvent::new("bare.event");
        assert!(event.species_id.is_none());
        assert!(event.actor_user_id.is_none());
        assert!(event.payload.is_object());
    }
}
