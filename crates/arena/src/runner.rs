//! The match loop: every opening is played twice, once with the engine on each side.

use std::io::Write;

use chess_core::{Game, GameRecord, Opening};
use shakmaty::Color;
use tracing::info;

use crate::adjudicator::{Adjudicator, GameState};
use crate::completion::Completer;
use crate::config::ArenaConfig;
use crate::engine::MoveEngine;
use crate::error::ArenaError;
use crate::interpreter::{request_model_move, ModelTurn, PromptContext};
use crate::tally::Tally;
use crate::transcript::{IllegalMoveLog, Transcript};

/// Everything a game needs besides the two players
pub struct MatchContext<'a> {
    pub config: &'a ArenaConfig,
    pub prompt_header: &'a str,
    pub transcript: &'a Transcript,
    pub illegal_log: &'a IllegalMoveLog,
}

fn progress(game: &Game) {
    let side = if game.turn() == Color::White { "W" } else { "B" };
    print!("\rMove {} {side}", game.fullmove_number());
    let _ = std::io::stdout().flush();
}

/// Play one game from `opening` and return its record. Nothing is written here.
pub async fn play_game<E, C>(
    engine: &mut E,
    completer: &mut C,
    opening: &Opening,
    engine_color: Color,
    ctx: &MatchContext<'_>,
) -> Result<GameRecord, ArenaError>
where
    E: MoveEngine,
    C: Completer,
{
    let config = ctx.config;
    let prompt_ctx = PromptContext {
        header: ctx.prompt_header,
        illegal_log: ctx.illegal_log,
        config,
    };

    let mut game = Game::from_uci_moves(&opening.uci_moves)?;
    let mut adjudicator = Adjudicator::new(
        engine_color,
        config.advantage_threshold,
        config.advantage_plies,
    );

    let mut state = match game.termination() {
        Some(termination) => GameState::NaturalEnd(termination),
        None => GameState::InProgress,
    };

    let result = loop {
        if let Some(result) = state.result(engine_color) {
            break result;
        }
        progress(&game);

        if game.turn() == engine_color {
            let mv = engine.best_move(game.uci_moves()).await?;
            game.push_uci(&mv)
                .map_err(|e| ArenaError::Engine(format!("Engine played {mv}: {e}")))?;
        } else {
            let turn = request_model_move(completer, &mut game, !engine_color, &prompt_ctx).await?;
            if let ModelTurn::Exhausted { attempts } = turn {
                info!(attempts, ply = game.ply(), "Model exhausted its attempts");
                state = GameState::IllegalEnd;
                continue;
            }
        }

        state = adjudicator.after_ply(&game);
    };

    let (white, black) = match engine_color {
        Color::White => (config.engine_name.clone(), config.model_name.clone()),
        Color::Black => (config.model_name.clone(), config.engine_name.clone()),
    };

    info!(
        white = %white,
        black = %black,
        result = %result,
        termination = %state,
        plies = game.ply(),
        "Game finished"
    );

    Ok(GameRecord {
        white,
        black,
        engine_color,
        result,
        termination: state.to_string(),
        date: chrono::Local::now().date_naive(),
        uci_moves: game.uci_moves().to_vec(),
        san_moves: game.san_moves().to_vec(),
    })
}

/// Play the whole series, appending each game to the transcript as it ends.
pub async fn run_match<E, C>(
    engine: &mut E,
    completer: &mut C,
    openings: &[Opening],
    ctx: &MatchContext<'_>,
) -> Result<Tally, ArenaError>
where
    E: MoveEngine,
    C: Completer,
{
    let mut tally = Tally::default();

    for (i, opening) in openings.iter().enumerate() {
        println!("Game {}: {}", i + 1, opening.text);

        for engine_color in [Color::White, Color::Black] {
            println!();
            let record = play_game(engine, completer, opening, engine_color, ctx).await?;
            ctx.transcript.append(&record)?;
            tally.record(record.outcome());

            println!(
                "\n{}",
                tally.display(&ctx.config.engine_name, &ctx.config.model_name)
            );
        }
    }

    Ok(tally)
}
