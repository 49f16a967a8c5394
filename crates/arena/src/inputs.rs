//! Input files: openings, API key, prompt header template

use std::fs;
use std::path::Path;

use chess_core::opening::parse_openings;
use chess_core::Opening;

use crate::config::ArenaConfig;
use crate::error::ArenaError;

pub fn load_openings(path: &Path) -> Result<Vec<Opening>, ArenaError> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_openings(&contents)?)
}

/// API key from `OPENAI_API_KEY`, else the first line of the key file.
pub fn read_api_key(config: &ArenaConfig) -> Result<String, ArenaError> {
    if let Some(key) = &config.openai_api_key {
        return Ok(key.trim().to_string());
    }
    let contents = fs::read_to_string(&config.api_key_path)?;
    let key = contents.lines().next().unwrap_or("").trim();
    if key.is_empty() {
        return Err(ArenaError::Config("API key file is empty"));
    }
    Ok(key.to_string())
}

/// Header template, used verbatim as the start of every prompt.
pub fn read_prompt_header(path: &Path) -> Result<String, ArenaError> {
    Ok(fs::read_to_string(path)?)
}
