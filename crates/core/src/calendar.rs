//! Parish event publication rules.
//!
//! Publishing an event (DRAFT -> PUBLISHED) has a side effect: a notification
//! broadcast is created and pushed. Re-publishing an already published event
//! is rejected so the broadcast is not sent twice.

use crate::define_text_enum;
use crate::error::CoreError;

/// Platform event name emitted when an event is published.
pub const EVENT_PUBLISHED: &str = "event.published";

define_text_enum! {
    /// Publication status of a parish event.
    EventStatus {
        Draft = "DRAFT",
        Published = "PUBLISHED",
    }
}

pub fn validate_publish(current: EventStatus) -> Result<(), CoreError> {
    match current {
        EventStatus::Draft => Ok(()),
        EventStatus::Published => Err(CoreError::Conflict(
            "Event is already published".to_string(),
        )),
    }
}

pub fn validate_unpublish(current: EventStatus) -> Result<(), CoreError> {
    match current {
        EventStatus::Published => Ok(()),
        EventStatus::Draft => Err(CoreError::Conflict("Event is not published".to_string())),
    }
}

/// Notification title/body announcing a newly published event.
pub fn publish_announcement(title: &str, location: Option<&str>) -> (String, String) {
    let body = match location.map(str::trim).filter(|l| !l.is_empty()) {
        Some(location) => format!("{title} at {location}"),
        None => title.to_string(),
    };
    (format!("New event: {title}"), body)
}
