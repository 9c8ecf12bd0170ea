//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Smart Services Portal configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[gemini]
# model = "gemini-2.0-flash"
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# api_key = ""              # GEMINI_API_KEY in the environment takes precedence
# timeout_secs = 120        # 0-600, 0 disables
# connect_timeout_secs = 10 # 0-600, 0 disables

[chat]
# greeting = "Hello! I'm your AI assistant for the Smart Services Portal. How can I help you today?"
# fallback_reply = "I'm sorry, I'm experiencing some technical difficulties. Please try again in a moment."

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
}
