use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("keyboard reader stopped")]
    InputClosed,
    #[error("terminal is too small to play ({width}x{height})")]
    GridTooSmall { width: u16, height: u16 },
}
