//! Biodiversity Hub event bus.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`; also the species [`RefreshSignal`].
//! - [`HubEvent`] -- the event envelope.
//! - [`EventLogger`] -- background subscriber that traces every event.
//!
//! [`RefreshSignal`]: biohub_core::species::edit::RefreshSignal

pub mod bus;
pub mod logger;

pub use bus::{EventBus, HubEvent, SPECIES_CREATED, SPECIES_REFRESH};
pub use logger::EventLogger;
