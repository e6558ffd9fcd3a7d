use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid direction: {0}")]
    InvalidDirection(String),
    #[error("invalid board size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    #[error("invalid board cell: {0}")]
    InvalidCell(String),
    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
