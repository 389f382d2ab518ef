pub mod availability;
pub mod config;
pub mod core;
pub mod detect;
pub mod host;
pub mod progress;
pub mod registry;
pub mod runtime;
pub mod session;
pub(crate) mod shapes;
pub mod streaming;
pub mod validation;

#[cfg(test)]
pub(crate) mod mock_host;

pub use config::RuntimeConfig;
pub use crate::core::error::{CapabilityError, ConfigError, HostError, InvalidField};
pub use crate::core::types::*;
pub use host::StaticHost;
pub use progress::SessionObserver;
pub use runtime::{CapabilityRuntime, CapabilityRuntimeBuilder};
pub use session::{PendingSession, Session};
pub use streaming::ChunkStream;
