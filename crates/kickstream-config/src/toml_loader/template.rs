//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# kickstream configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[connection]
server_url = "ws://localhost:8080"
# auto_connect = true
# reconnect_delay_secs = 5     # 0-300
# connect_timeout_secs = 15    # 1-120
# max_reconnect_attempts = 10  # omit for unbounded

[gifts]
# Case-insensitive, substring match. Rose aliases are checked first.
# rose_aliases = ["Rose", "Hoa hồng"]
# perfume_aliases = ["Perfume", "Nước hoa"]

[hearts]
# capacity = 100               # taps per random winner, 1-10000

[dispatch]
# pacing_delay_secs = 3.0      # wait between combo actions, 0-60
# tick_rate_hz = 60            # 1-240

[simulation]
# test_mode = false            # enables direct like/gift simulators
# combo_resolve_secs = 2.5     # 0-60

[logging]
# level = "INFO"               # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
