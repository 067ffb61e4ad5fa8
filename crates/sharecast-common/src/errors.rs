use std::path::PathBuf;

use crate::id::ConnectionId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures inside the signaling coordinator.
///
/// None of these are fatal: each one is answered with a targeted failure
/// message or the offending message is dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("unknown target connection: {0}")]
    UnknownTargetConnection(ConnectionId),

    #[error("connection {from} may not address {to}")]
    Forbidden { from: ConnectionId, to: ConnectionId },

    #[error("no free session code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("delivery to {0} failed")]
    DeliveryFailed(ConnectionId),

    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SignalError {
    /// Whether the caller can reasonably try the same request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SignalError::CodeSpaceExhausted { .. } | SignalError::DeliveryFailed(_)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SharecastError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("server.port = 0".into());
        assert_eq!(err.to_string(), "config validation error: server.port = 0");
    }

    #[test]
    fn signal_error_display() {
        let err = SignalError::SessionNotFound("ab3de".into());
        assert_eq!(err.to_string(), "session not found: ab3de");

        let err = SignalError::UnknownTargetConnection(ConnectionId::from("c-1"));
        assert_eq!(err.to_string(), "unknown target connection: c-1");

        let err = SignalError::Forbidden {
            from: ConnectionId::from("a"),
            to: ConnectionId::from("b"),
        };
        assert_eq!(err.to_string(), "connection a may not address b");

        let err = SignalError::CodeSpaceExhausted { attempts: 16 };
        assert_eq!(err.to_string(), "no free session code after 16 attempts");
    }

    #[test]
    fn only_transient_signal_errors_are_retryable() {
        assert!(SignalError::CodeSpaceExhausted { attempts: 3 }.is_retryable());
        assert!(SignalError::DeliveryFailed(ConnectionId::from("x")).is_retryable());
        assert!(!SignalError::SessionNotFound("x".into()).is_retryable());
        assert!(!SignalError::Protocol("bad".into()).is_retryable());
    }

    #[test]
    fn sharecast_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: SharecastError = config_err.into();
        assert!(matches!(err, SharecastError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn sharecast_error_from_signal() {
        let err: SharecastError = SignalError::Protocol("truncated frame".into()).into();
        assert!(matches!(err, SharecastError::Signal(_)));
        assert_eq!(err.to_string(), "protocol error: truncated frame");
    }

    #[test]
    fn sharecast_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: SharecastError = io_err.into();
        assert!(matches!(err, SharecastError::Io(_)));
        assert!(err.to_string().contains("port taken"));
    }
}
