use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Invalid SAN '{0}'")]
    InvalidSan(String),

    #[error("Illegal move '{mv}' at ply {ply}")]
    IllegalMove { mv: String, ply: usize },

    #[error("Invalid UCI move '{0}'")]
    InvalidUci(String),

    #[error("Opening '{line}': {source}")]
    Opening {
        line: String,
        #[source]
        source: Box<ChessError>,
    },
}
