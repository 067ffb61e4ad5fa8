//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Sharecast signaling server configuration
# Only override what you want to change -- missing fields use defaults.

[server]
# host = "0.0.0.0"
# port = 3000
# outbound_buffer = 256      # 1-65536, messages queued per connection

[sessions]
# code_length = 5            # 4-32
# max_code_attempts = 16     # 1-1024, re-rolls on code collision

[relay]
# Only relay offers/answers/candidates between a host and its joined peers.
# enforce_membership = true

[logging]
# RUST_LOG overrides this when set.
# filter = "sharecast_signal=info"
"##
    .to_string()
}
