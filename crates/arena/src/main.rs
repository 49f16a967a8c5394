//! LLM Arena
//!
//! Plays a series of games between a local UCI engine and a text-completion
//! model, adjudicates them and appends every game to a PGN transcript.

use tracing::info;

use arena::completion::CompletionClient;
use arena::config::ArenaConfig;
use arena::engine::UciEngine;
use arena::inputs;
use arena::runner::{self, MatchContext};
use arena::transcript::{IllegalMoveLog, Transcript};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local runs
    let _ = dotenvy::dotenv();

    let config = ArenaConfig::load()?;
    info!(
        engine_path = %config.engine_path,
        nodes = config.engine_nodes,
        model = %config.openai_model,
        "Arena config loaded"
    );

    let openings = inputs::load_openings(&config.openings_path)?;
    let api_key = inputs::read_api_key(&config)?;
    let prompt_header = inputs::read_prompt_header(&config.prompt_header_path)?;
    info!(openings = openings.len(), "Openings loaded");

    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H%M").to_string();
    let transcript = Transcript::open(config.transcript_path(&timestamp))?;
    let illegal_log = IllegalMoveLog::create(config.illegal_log_path(&timestamp))?;
    info!(
        transcript = %transcript.path().display(),
        illegal_moves = %illegal_log.path().display(),
        "Output files ready"
    );

    let mut engine = UciEngine::spawn(&config).await?;
    info!("Engine ready");
    let mut client = CompletionClient::new(&config, api_key)?;

    let ctx = MatchContext {
        config: &config,
        prompt_header: &prompt_header,
        transcript: &transcript,
        illegal_log: &illegal_log,
    };

    let result = runner::run_match(&mut engine, &mut client, &openings, &ctx).await;
    engine.quit().await;
    let tally = result?;

    info!(
        games = tally.games(),
        engine_wins = tally.engine_wins,
        draws = tally.draws,
        model_wins = tally.model_wins,
        "Match complete"
    );

    Ok(())
}
