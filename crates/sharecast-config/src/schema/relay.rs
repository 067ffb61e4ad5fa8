use serde::{Deserialize, Serialize};

/// Negotiation relay policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Only forward offers, answers and candidates between a host and one of
    /// its joined peers. When false any live connection may be addressed.
    pub enforce_membership: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enforce_membership: true,
        }
    }
}
