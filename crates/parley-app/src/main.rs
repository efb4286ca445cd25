mod boot;
mod cli;
mod repl;

use std::sync::Arc;

use parley_ai::{HistoryStore, TurnOrchestrator};
use parley_common::{ParleyError, SessionId};
use parley_config::ParleyConfig;

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    boot::load_dotenv();

    let args = cli::parse();

    let (mut config, config_err) = boot::load_config(args.config.as_deref());
    boot::apply_overrides(&mut config, &args);
    boot::init_logging(args.log_level.as_deref(), &config);

    tracing::info!("Parley v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_err {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(config).await {
        tracing::error!("{e}");
        eprintln!("parley: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

async fn run(config: ParleyConfig) -> parley_common::Result<()> {
    let backend = boot::build_backend(&config).map_err(|e| ParleyError::Ai(e.to_string()))?;
    tracing::info!(
        provider = backend.client().provider(),
        model = backend.client().model(),
        "generation backend ready"
    );

    let store = Arc::new(HistoryStore::new());
    let orchestrator = TurnOrchestrator::new(store).with_timeout(config.generation.timeout());
    let mut repl = repl::Repl::new(
        orchestrator,
        Arc::new(backend),
        SessionId::new(config.session.default_id.as_str()),
        config.session.exit_sentinel.as_str(),
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl.run(stdin, &mut stdout).await?;
    Ok(())
}
