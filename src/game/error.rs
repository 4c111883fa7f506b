use std::path::PathBuf;

use thiserror::Error;

use super::panel::PANEL_COUNT;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("panel index {} is outside the board (0..{})", .index, PANEL_COUNT)]
    PanelOutOfRange { index: usize },

    #[error("cannot read config {}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
