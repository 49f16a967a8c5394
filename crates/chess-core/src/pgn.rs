//! PGN output: transcript records and the movetext fed to the model.

use crate::game_data::GameRecord;

/// Column limit for transcript movetext.
pub const PGN_COLUMNS: usize = 80;

/// Movetext as the model sees it: `1.e4 e5 2.Nf3`, no result token.
pub fn prompt_movetext(san_moves: &[String]) -> String {
    let mut out = String::new();
    for (i, san) in san_moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if i % 2 == 0 {
            out.push_str(&format!("{}.", i / 2 + 1));
        }
        out.push_str(san);
    }
    out
}

/// The move-number cue appended after the movetext when the model plays White.
/// Empty when the model plays Black, since its move follows White's directly.
pub fn move_cue(model_is_white: bool, fullmove_number: u32) -> String {
    if !model_is_white {
        return String::new();
    }
    let prefix = if fullmove_number > 1 { " " } else { "" };
    format!("{prefix}{fullmove_number}.")
}

/// Render a finished game in export format.
pub fn export_pgn(record: &GameRecord) -> String {
    let headers = [
        ("Event", "?".to_string()),
        ("Site", "?".to_string()),
        ("Date", record.date.format("%Y.%m.%d").to_string()),
        ("Round", "?".to_string()),
        ("White", record.white.clone()),
        ("Black", record.black.clone()),
        ("Result", record.result.to_string()),
    ];

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{key} \"{}\"]\n", escape_tag(value)));
    }
    out.push('\n');

    let mut tokens = Vec::with_capacity(record.san_moves.len() * 3 / 2 + 1);
    for (i, san) in record.san_moves.iter().enumerate() {
        if i % 2 == 0 {
            tokens.push(format!("{}.", i / 2 + 1));
        }
        tokens.push(san.clone());
    }
    tokens.push(record.result.to_string());

    out.push_str(&wrap_tokens(&tokens, PGN_COLUMNS));
    out
}

fn escape_tag(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Join tokens with single spaces, breaking lines before `columns` is exceeded.
fn wrap_tokens(tokens: &[String], columns: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for token in tokens {
        if !current.is_empty() && current.len() + 1 + token.len() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(token);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
