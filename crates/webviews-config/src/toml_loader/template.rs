//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Webviews Configuration
# Only override what you want to change -- missing fields use defaults.

[window]
# title = ""
# width = 1024            # 1-16384
# height = 768            # 1-16384
# size_hint = "none"      # none | min | max | fixed
# debug = false           # developer tools
# auto_terminate = true   # exit the event loop when the window closes
# user_agent = "MyApp/1.0"

[timers]
# min_interval_ms = 0     # 0-60000

[logging]
# level = "info"          # trace | debug | info | warn | error
# filter = "wry=warn"
"##
    .to_string()
}
