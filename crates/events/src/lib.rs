//! Reelflow event bus and notification plumbing.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the event envelope carried on the bus.
//! - [`BusNotifier`] -- the workflow engine's notifier, publishing onto the bus.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `workflow_events` table.

pub mod bus;
pub mod notifier;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use notifier::BusNotifier;
pub use persistence::EventPersistence;
