//! Full configuration validation.
//!
//! Every section is checked and all errors are collected into a single
//! `ConfigError`.

mod helpers;


use crate::schema::SharecastConfig;
use helpers::validate_range;
use sharecast_common::{ConfigError, MAX_CODE_LENGTH};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SharecastConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&mut errors, config);
    validate_sessions(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_server(errors: &mut Vec<String>, config: &SharecastConfig) {
    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".into());
    }
    validate_range(
        errors,
        "server.outbound_buffer",
        config.server.outbound_buffer,
        1,
        65536,
    );
}

fn validate_sessions(errors: &mut Vec<String>, config: &SharecastConfig) {
    validate_range(
        errors,
        "sessions.code_length",
        config.sessions.code_length,
        4,
        MAX_CODE_LENGTH,
    );
    validate_range(
        errors,
        "sessions.max_code_attempts",
        config.sessions.max_code_attempts,
        1,
        1024,
    );
}
