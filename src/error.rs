//! Error type shared by every layer of the crate.

use std::error::Error;
use std::fmt;

/// Everything that can go wrong while building, running or rendering a game.
#[derive(Debug)]
pub enum GameError {
    /// Reading an image source failed
    Io(std::io::Error),
    /// The container was recognized but its contents could not be decoded
    Decode(image::ImageError),
    /// Not a supported still-image container
    Format { found: String },
    /// Pixel data is not in a supported channel layout
    ColorModel { layout: String },
    /// Frame index outside the recorded history
    IndexOutOfRange { index: usize, available: usize },
    /// No run registered under this name
    NotFound { name: String },
    /// A worker thread died while computing a generation
    WorkerFailed { worker: usize },
    /// Encoding a PNG or GIF failed
    Encode(image::ImageError),
    /// Invalid or unreadable configuration
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "failed to read image source: {e}"),
            GameError::Decode(e) => write!(f, "failed to decode image: {e}"),
            GameError::Format { found } => {
                write!(f, "unsupported image format '{found}', expected png")
            }
            GameError::ColorModel { layout } => {
                write!(f, "unsupported pixel layout '{layout}', expected 8-bit RGB or RGBA")
            }
            GameError::IndexOutOfRange { index, available } => {
                write!(f, "frame index {index} out of range (0..={available})")
            }
            GameError::NotFound { name } => write!(f, "no run named '{name}'"),
            GameError::WorkerFailed { worker } => {
                write!(f, "worker {worker} failed, generation discarded")
            }
            GameError::Encode(e) => write!(f, "failed to encode image: {e}"),
            GameError::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Decode(e) | GameError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = GameError::IndexOutOfRange { index: 11, available: 10 };
        assert_eq!(err.to_string(), "frame index 11 out of range (0..=10)");

        let err = GameError::NotFound { name: "bart".into() };
        assert!(err.to_string().contains("bart"));
    }

    #[test]
    fn test_io_source_is_forwarded() {
        let err: GameError = std::io::Error::other("boom").into();
        assert!(err.source().is_some());
        assert!(GameError::WorkerFailed { worker: 2 }.source().is_none());
    }
}
