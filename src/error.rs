use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a sprite from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unable to load sprite image {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("sprite image {0:?} not found")]
    Missing(PathBuf),

    #[error("sprite image {0:?} has zero width or height")]
    Empty(PathBuf),
}

/// Anything that can stop the host loop.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
