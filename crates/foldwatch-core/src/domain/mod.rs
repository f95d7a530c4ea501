//! Domain model (marker, options, geometry, bandwidth, pending set, errors, events).

pub mod bandwidth;
pub mod config;
pub mod errors;
pub mod events;
pub mod ids;
pub mod marker;
pub mod pending;
pub mod viewport;

pub use bandwidth::{Bandwidth, ConnectionInfo};
pub use config::{ConfigError, DeferMode, LoaderConfig};
pub use errors::{LoaderError, PopulateError};
pub use events::{HostEvent, Trigger};
pub use ids::LoaderId;
pub use marker::Marker;
pub use pending::PendingSet;
pub use viewport::{LayoutWidths, ViewportState, estimate_viewport_width};
