//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Parley Configuration
# Only override what you want to change -- missing fields use defaults.

schema_version = 1

[provider]
name = "claude"          # claude, gemini
# model = "claude-sonnet-4-20250514"
# max_tokens = 1024      # 1-32768
# temperature = 0.7      # 0.0-2.0
# system_prompt = "You are a concise assistant."

[session]
# default_id = "default"
# exit_sentinel = "e"    # typing this (any case) ends the conversation

[generation]
# timeout_secs = 120     # 0-600, 0 disables the timeout
# prompt_template = """
# Conversation History: {history}
# Question: {question}
# """

[logging]
# level = "WARNING"      # DEBUG, INFO, WARNING, ERROR
"##
}
