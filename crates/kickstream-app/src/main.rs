//! kickstream: connects to a live audience-event feed and turns likes and
//! gifts into paced gameplay actions, printed to the console.

mod cli;
mod console;
mod gameplay;
mod runtime;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use kickstream_common::KickstreamError;
use kickstream_config::CONFIG_SCHEMA_VERSION;
use kickstream_live::{LiveSession, RandomSource, SeededRandom, WsConnector};
use tracing_subscriber::EnvFilter;

use crate::gameplay::ConsoleGameplay;

#[tokio::main]
async fn main() -> Result<(), KickstreamError> {
    let args = cli::parse();

    // The global subscriber depends on the config, so loader warnings go
    // through a temporary one.
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || settings::load(&args))?;

    let directive = settings::log_directive(args.log_level, config.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .init();

    tracing::info!("kickstream v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        schema_version = CONFIG_SCHEMA_VERSION,
        url = %config.connection.server_url,
        test_mode = config.simulation.test_mode,
        heart_capacity = config.hearts.capacity,
        "Config loaded"
    );

    let gameplay = Arc::new(ConsoleGameplay::new(Duration::from_secs_f64(
        config.simulation.combo_resolve_secs,
    )));
    let random: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::seeded(seed)),
        None => Box::new(SeededRandom::from_entropy()),
    };
    let mut session = LiveSession::with_parts(
        settings::session_config(&config),
        gameplay.clone(),
        Arc::new(WsConnector),
        random,
    );

    runtime::run(&mut session, &config).await;

    tracing::info!(
        combos = gameplay.combos(),
        squads = gameplay.squads(),
        "Shutdown complete"
    );
    Ok(())
}
