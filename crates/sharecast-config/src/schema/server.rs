use serde::{Deserialize, Serialize};

/// Listener settings for the signaling server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port for WebSocket connections.
    pub port: u16,
    /// Per-connection outbound queue depth (valid range: 1-65536).
    pub outbound_buffer: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            outbound_buffer: 256,
        }
    }
}
