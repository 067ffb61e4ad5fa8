pub mod errors;
pub mod id;

pub use errors::{ConfigError, SharecastError, SignalError};
pub use id::{new_id, new_session_code, ConnectionId, SessionCode, MAX_CODE_LENGTH};

pub type Result<T> = std::result::Result<T, SharecastError>;
