//! UCI engine bridge over a child process (async line I/O)

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::debug;

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Something that picks the engine's move for a game given its moves so far.
#[allow(async_fn_in_trait)]
pub trait MoveEngine {
    /// Best move in UCI notation for the position reached by `moves` from the start position.
    async fn best_move(&mut self, moves: &[String]) -> Result<String, ArenaError>;
}

/// UCI engine speaking over a line reader/writer pair.
pub struct UciEngine<R, W> {
    process: Option<Child>,
    reader: R,
    writer: W,
    nodes: u32,
}

impl UciEngine<BufReader<ChildStdout>, ChildStdin> {
    /// Spawn the configured engine and complete the UCI handshake
    pub async fn spawn(config: &ArenaConfig) -> Result<Self, ArenaError> {
        let mut process = Command::new(&config.engine_path)
            .args(config.engine_command_args())
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| {
                ArenaError::Engine(format!("Failed to spawn {}: {e}", config.engine_path))
            })?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| ArenaError::Engine("Engine stdin not captured".into()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| ArenaError::Engine("Engine stdout not captured".into()))?;

        let mut engine = Self {
            process: Some(process),
            reader: BufReader::new(stdout),
            writer: stdin,
            nodes: config.engine_nodes,
        };
        engine.handshake().await?;

        Ok(engine)
    }
}

impl<R, W> UciEngine<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap an existing reader/writer pair; no handshake is performed.
    pub fn from_io(reader: R, writer: W, nodes: u32) -> Self {
        Self {
            process: None,
            reader,
            writer,
            nodes,
        }
    }

    /// `uci` / `uciok`, then `isready` / `readyok`
    pub async fn handshake(&mut self) -> Result<(), ArenaError> {
        self.send("uci").await?;
        self.wait_for("uciok").await?;
        self.send("isready").await?;
        self.wait_for("readyok").await?;
        Ok(())
    }

    /// Send a command line to the engine
    async fn send(&mut self, cmd: &str) -> Result<(), ArenaError> {
        debug!(cmd, "engine <");
        self.writer
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| ArenaError::Engine(format!("Failed to write to engine: {e}")))?;
        self.writer
            .flush()
            .await
            .map_err(|e| ArenaError::Engine(format!("Failed to flush engine stdin: {e}")))?;
        Ok(())
    }

    /// Read one line; end of stream means the engine is gone
    async fn read_line(&mut self) -> Result<String, ArenaError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| ArenaError::Engine(format!("Failed to read from engine: {e}")))?;
        if read == 0 {
            return Err(ArenaError::EngineClosed);
        }
        let trimmed = line.trim().to_string();
        debug!(line = %trimmed, "engine >");
        Ok(trimmed)
    }

    /// Wait for a line containing `keyword`
    async fn wait_for(&mut self, keyword: &str) -> Result<(), ArenaError> {
        loop {
            let line = self.read_line().await?;
            if line.contains(keyword) {
                return Ok(());
            }
        }
    }

    /// Send `quit` and wait for the process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        if let Some(process) = self.process.as_mut() {
            let _ = process.wait().await;
        }
    }
}

impl<R, W> MoveEngine for UciEngine<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn best_move(&mut self, moves: &[String]) -> Result<String, ArenaError> {
        self.send(&position_command(moves)).await?;
        self.send(&format!("go nodes {}", self.nodes)).await?;

        loop {
            let line = self.read_line().await?;
            if let Some(mv) = parse_bestmove(&line) {
                return Ok(mv.to_string());
            }
        }
    }
}

impl<R, W> Drop for UciEngine<R, W> {
    fn drop(&mut self) {
        if let Some(process) = self.process.as_mut() {
            let _ = process.start_kill();
        }
    }
}

fn position_command(moves: &[String]) -> String {
    if moves.is_empty() {
        "position startpos".to_string()
    } else {
        format!("position startpos moves {}", moves.join(" "))
    }
}

/// Move from a `bestmove <move> [ponder <move>]` line
fn parse_bestmove(line: &str) -> Option<&str> {
    if !line.starts_with("bestmove") {
        return None;
    }
    line.split_whitespace().nth(1)
}
