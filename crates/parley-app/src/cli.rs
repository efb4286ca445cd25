use std::path::PathBuf;

use clap::Parser;
use parley_config::schema::ProviderKind;

/// Parley — a terminal assistant that remembers each conversation.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Session to start in (defaults to the configured default session).
    #[arg(short = 's', long)]
    pub session: Option<String>,

    /// Generation provider override (claude, gemini).
    #[arg(short = 'p', long)]
    pub provider: Option<ProviderKind>,

    /// Model override for the selected provider.
    #[arg(short = 'm', long)]
    pub model: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_overrides() {
        let args = Args::try_parse_from([
            "parley",
            "--config",
            "/tmp/p.toml",
            "--log-level",
            "debug",
            "-s",
            "work",
            "--provider",
            "gemini",
            "-m",
            "gemini-2.0-pro",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/p.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.session.as_deref(), Some("work"));
        assert_eq!(args.provider, Some(ProviderKind::Gemini));
        assert_eq!(args.model.as_deref(), Some("gemini-2.0-pro"));
    }

    #[test]
    fn no_arguments_is_all_none() {
        let args = Args::try_parse_from(["parley"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.session.is_none());
        assert!(args.provider.is_none());
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(Args::try_parse_from(["parley", "--provider", "llama"]).is_err());
    }
}
