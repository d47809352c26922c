//! Error types
//!
//! Asset failures abort startup; store failures are logged and absorbed by
//! the caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A texture could not be turned into a sprite by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetError {
    pub texture: String,
}

impl AssetError {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load sprite texture: {}", self.texture)
    }
}

impl std::error::Error for AssetError {}

/// High-score file could not be read or written
#[derive(Debug)]
pub enum StoreError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read high scores from {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write high scores to {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}
