//! Startup: environment, logging, config, and backend construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parley_ai::{
    AiClient, AiError, ClaudeClient, ClaudeConfig, GeminiClient, GeminiConfig, PromptTemplate,
    PromptedBackend,
};
use parley_common::ConfigError;
use parley_config::schema::{ParleyConfig, ProviderConfig, ProviderKind};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

const DEFAULT_LOG_DIRECTIVE: &str = "parley=warn";

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Looks in the current directory first, then next to the config file.
/// Variables already set in the environment win.
pub fn load_dotenv() {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("parley").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(&key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments and
/// stripping matching quotes around values.
pub(crate) fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Load config from `--config` or the platform default.
///
/// Never fails: on error the defaults are returned together with the error
/// so it can be logged once the subscriber is installed.
pub fn load_config(path: Option<&Path>) -> (ParleyConfig, Option<ConfigError>) {
    let loaded = match path {
        Some(path) => parley_config::load_config_from(path),
        None => parley_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (ParleyConfig::default(), Some(e)),
    }
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut ParleyConfig, args: &Args) {
    if let Some(provider) = args.provider {
        if provider != config.provider.name {
            // A model name only makes sense for the provider it was set for.
            config.provider.model = None;
        }
        config.provider.name = provider;
    }
    if let Some(ref model) = args.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(ref session) = args.session {
        config.session.default_id = session.clone();
    }
}

/// Install the tracing subscriber.
///
/// `--log-level` wins over the config level; `RUST_LOG` directives are
/// layered underneath.
pub fn init_logging(cli_level: Option<&str>, config: &ParleyConfig) {
    let directive = match cli_level {
        Some(level) => format!("parley={level}"),
        None => format!("parley={}", config.logging.level.as_filter()),
    };
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse::<Directive>());

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer the `[provider]` section over credentials-only Claude settings.
pub(crate) fn claude_config(provider: &ProviderConfig, base: ClaudeConfig) -> ClaudeConfig {
    let mut claude = base
        .with_max_tokens(provider.max_tokens)
        .with_temperature(provider.temperature);
    if let Some(ref model) = provider.model {
        claude = claude.with_model(model.clone());
    }
    if let Some(ref system) = provider.system_prompt {
        claude = claude.with_system_prompt(system.clone());
    }
    claude
}

/// Layer the `[provider]` section over credentials-only Gemini settings.
pub(crate) fn gemini_config(provider: &ProviderConfig, base: GeminiConfig) -> GeminiConfig {
    let mut gemini = base
        .with_max_tokens(provider.max_tokens)
        .with_temperature(provider.temperature);
    if let Some(ref model) = provider.model {
        gemini = gemini.with_model(model.clone());
    }
    if let Some(ref system) = provider.system_prompt {
        gemini = gemini.with_system_prompt(system.clone());
    }
    gemini
}

/// Build the configured provider client and wrap it as a generation backend.
pub fn build_backend(config: &ParleyConfig) -> Result<PromptedBackend, AiError> {
    let provider = &config.provider;
    let client: Arc<dyn AiClient> = match provider.name {
        ProviderKind::Claude => {
            let claude = claude_config(provider, ClaudeConfig::from_env()?);
            Arc::new(ClaudeClient::new(claude)?)
        }
        ProviderKind::Gemini => {
            let gemini = gemini_config(provider, GeminiConfig::from_env()?);
            Arc::new(GeminiClient::new(gemini)?)
        }
    };

    let template = config
        .generation
        .prompt_template
        .as_deref()
        .map(PromptTemplate::new)
        .unwrap_or_default();

    Ok(PromptedBackend::new(client).with_template(template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn dotenv_parses_pairs_and_skips_noise() {
        let pairs = parse_dotenv(
            "# comment\n\nANTHROPIC_API_KEY=\"sk-1\"\nexport GEMINI_API_KEY='g-2'\n=novalue\nnot a pair\nEMPTY=\n",
        );
        assert_eq!(
            pairs,
            vec![
                ("ANTHROPIC_API_KEY".to_string(), "sk-1".to_string()),
                ("GEMINI_API_KEY".to_string(), "g-2".to_string()),
                ("EMPTY".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn load_config_falls_back_to_defaults_on_missing_file() {
        let (config, err) = load_config(Some(Path::new("/tmp/parley_no_such_config.toml")));
        assert!(matches!(err, Some(ConfigError::FileNotFound(_))));
        assert_eq!(config.session.default_id, "default");
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut config = ParleyConfig::default();
        config.provider.model = Some("claude-custom".into());
        let args = Args::parse_from(["parley", "--provider", "gemini", "--session", "work"]);

        apply_overrides(&mut config, &args);
        assert_eq!(config.provider.name, ProviderKind::Gemini);
        assert!(config.provider.model.is_none());
        assert_eq!(config.session.default_id, "work");
    }

    #[test]
    fn provider_section_reaches_claude_config() {
        let mut config = ParleyConfig::default();
        config.provider.max_tokens = 256;
        config.provider.model = Some("claude-test".into());
        config.provider.system_prompt = Some("Answer in one word.".into());

        let claude = claude_config(
            &config.provider,
            ClaudeConfig::new("t", parley_ai::claude::AuthMethod::ApiKey),
        );
        assert_eq!(claude.max_tokens, 256);
        assert_eq!(claude.model, "claude-test");
        assert_eq!(claude.system_prompt.as_deref(), Some("Answer in one word."));
    }

    #[test]
    fn provider_section_reaches_gemini_config() {
        let mut config = ParleyConfig::default();
        config.provider.temperature = 0.1;
        config.provider.system_prompt = Some("Answer in one word.".into());

        let gemini = gemini_config(&config.provider, GeminiConfig::new("k"));
        assert!((gemini.temperature - 0.1).abs() < f64::EPSILON);
        assert_eq!(gemini.model, "gemini-2.0-flash");
        assert_eq!(gemini.system_prompt.as_deref(), Some("Answer in one word."));
    }

    #[test]
    fn no_system_prompt_by_default() {
        let config = ParleyConfig::default();
        let gemini = gemini_config(&config.provider, GeminiConfig::new("k"));
        assert!(gemini.system_prompt.is_none());
    }

    #[test]
    fn model_override_applies_after_provider_switch() {
        let mut config = ParleyConfig::default();
        let args = Args::parse_from(["parley", "-p", "gemini", "-m", "gemini-exp"]);

        apply_overrides(&mut config, &args);
        assert_eq!(config.provider.model.as_deref(), Some("gemini-exp"));
    }
}
