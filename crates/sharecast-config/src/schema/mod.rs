//! Configuration schema types for the signaling server.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod relay;
mod server;
mod sessions;

pub use logging::*;
pub use relay::*;
pub use server::*;
pub use sessions::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SharecastConfig {
    pub server: ServerConfig,
    pub sessions: SessionsConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}
