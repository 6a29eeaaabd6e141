//! Background subscriber that writes every hub event to the tracing log.

use tokio::sync::broadcast;

use crate::bus::HubEvent;

/// Drains a bus subscription into structured log lines.
pub struct EventLogger;

impl EventLogger {
    /// Run until the bus is dropped. Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<HubEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        species_id = ?event.species_id,
                        actor_user_id = ?event.actor_user_id,
                        "Hub event"
                    );
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
        logged
    }
}
