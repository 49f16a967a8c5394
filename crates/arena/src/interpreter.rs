//! Turning completion text into the model's move
//!
//! The completion is cleaned up (whitespace, non-ASCII characters, a stray
//! move-number prefix), its first token is parsed as SAN against the current
//! position, and failures are logged and retried up to the configured budget.

use chess_core::opening::strip_move_number;
use chess_core::pgn::{move_cue, prompt_movetext};
use chess_core::{ChessError, Game};
use shakmaty::Color;
use tracing::{debug, warn};

use crate::completion::Completer;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::transcript::IllegalMoveLog;

const NON_ASCII_MARKER: &str = "<NON-ASCII>";
const EMPTY_MARKER: &str = "<EMPTY>";

/// Completion text after clean-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    /// Non-ASCII characters were dropped
    pub had_non_ascii: bool,
    /// Text as it was before a move-number prefix was stripped
    pub prefixed: Option<String>,
}

pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    let ascii: String = trimmed.chars().filter(char::is_ascii).collect();
    let had_non_ascii = ascii.len() != trimmed.len();
    let ascii = ascii.trim();

    let (rest, stripped) = strip_move_number(ascii);
    Normalized {
        text: rest.trim().to_string(),
        had_non_ascii,
        prefixed: stripped.then(|| ascii.to_string()),
    }
}

/// First whitespace-delimited token, or `<EMPTY>`
pub fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or(EMPTY_MARKER)
}

/// Drop trailing `!`/`?` annotations and accept zeros in castling (`0-0`, `0-0-0`).
pub fn san_token(token: &str) -> String {
    let token = token.trim_end_matches(['!', '?']);
    if let Some(rest) = token.strip_prefix("0-0-0") {
        format!("O-O-O{rest}")
    } else if let Some(rest) = token.strip_prefix("0-0") {
        format!("O-O{rest}")
    } else {
        token.to_string()
    }
}

/// Parse the first token of cleaned-up text as a legal move, returned in UCI notation.
pub fn parse_candidate(game: &Game, text: &str) -> Result<String, ChessError> {
    game.san_to_uci(&san_token(first_token(text)))
}

/// Outcome of asking the model for one ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelTurn {
    Played { uci: String, attempts: u32 },
    /// Every attempt failed; the model forfeits the game
    Exhausted { attempts: u32 },
}

/// Shared inputs for building prompts and logging failures
pub struct PromptContext<'a> {
    pub header: &'a str,
    pub illegal_log: &'a IllegalMoveLog,
    pub config: &'a ArenaConfig,
}

/// Position text as sent after the header: movetext plus the move-number cue.
pub fn position_text(game: &Game, model_color: Color) -> String {
    format!(
        "{}{}",
        prompt_movetext(game.san_moves()),
        move_cue(model_color == Color::White, game.fullmove_number())
    )
}

/// Ask for the model's move, retrying on unusable completions.
/// A legal move is played on `game` before returning.
pub async fn request_model_move<C: Completer>(
    completer: &mut C,
    game: &mut Game,
    model_color: Color,
    ctx: &PromptContext<'_>,
) -> Result<ModelTurn, ArenaError> {
    let position = position_text(game, model_color);
    let prompt = format!("{}{}", ctx.header, position);

    let mut temperature = ctx.config.base_temperature;
    let mut attempts = 0;

    loop {
        attempts += 1;
        let raw = completer.complete(&prompt, temperature).await?;
        temperature = ctx.config.retry_temperature;

        let normalized = normalize(&raw);
        if normalized.had_non_ascii {
            ctx.illegal_log.record(&position, NON_ASCII_MARKER)?;
        }
        if let Some(original) = &normalized.prefixed {
            debug!(completion = %original, "Stripped move-number prefix");
            ctx.illegal_log.record(&position, original)?;
        }

        match parse_candidate(game, &normalized.text) {
            Ok(uci) => {
                game.push_uci(&uci)?;
                return Ok(ModelTurn::Played { uci, attempts });
            }
            Err(e) => {
                warn!(
                    attempt = attempts,
                    completion = %normalized.text,
                    error = %e,
                    "Unusable completion"
                );
                ctx.illegal_log.record(&position, &normalized.text)?;
                if attempts >= ctx.config.illegal_move_limit {
                    return Ok(ModelTurn::Exhausted { attempts });
                }
            }
        }
    }
}
