use serde::{Deserialize, Serialize};

/// Session code generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Characters per code (valid range: 4-32).
    pub code_length: usize,
    /// Re-rolls allowed on collision before giving up (valid range: 1-1024).
    pub max_code_attempts: u32,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            code_length: 5,
            max_code_attempts: 16,
        }
    }
}
