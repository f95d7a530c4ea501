//! Host events and the listener triggers they map to.

use serde::{Deserialize, Serialize};

/// Window events the loader listens to while elements are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Scroll,
    Resize,
    OrientationChange,
}

impl Trigger {
    pub const ALL: [Trigger; 3] = [Trigger::Scroll, Trigger::Resize, Trigger::OrientationChange];

    /// DOM event type name.
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Scroll => "scroll",
            Trigger::Resize => "resize",
            Trigger::OrientationChange => "orientationchange",
        }
    }
}

/// Everything the host forwards to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostEvent {
    /// The document is structurally ready (`DOMContentLoaded`).
    DomContentLoaded,
    /// The window finished loading (`load`).
    Load,
    Scroll,
    Resize,
    OrientationChange,
}

impl HostEvent {
    pub fn trigger(self) -> Option<Trigger> {
        match self {
            HostEvent::Scroll => Some(Trigger::Scroll),
            HostEvent::Resize => Some(Trigger::Resize),
            HostEvent::OrientationChange => Some(Trigger::OrientationChange),
            HostEvent::DomContentLoaded | HostEvent::Load => None,
        }
    }
}

impl From<Trigger> for HostEvent {
    fn from(trigger: Trigger) -> Self {
        match trigger {
            Trigger::Scroll => HostEvent::Scroll,
            Trigger::Resize => HostEvent::Resize,
            Trigger::OrientationChange => HostEvent::OrientationChange,
        }
    }
}
