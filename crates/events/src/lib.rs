//! Parish event bus and push notification delivery.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the domain event envelope published by the API.
//! - [`PushGateway`] -- single-attempt HTTP delivery to the push gateway.
//! - [`PushDispatcher`] -- background task turning `notification.created`
//!   events into push deliveries and recording the outcome.

pub mod bus;
pub mod dispatcher;
pub mod push;

pub use bus::{EventBus, PlatformEvent};
pub use dispatcher::PushDispatcher;
pub use push::{PushError, PushGateway, PushMessage};
