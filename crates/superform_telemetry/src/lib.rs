pub mod events;
pub mod setup;

pub use events::PublishEvent;
pub use setup::{TelemetryConfig, TelemetryError, init_telemetry};
