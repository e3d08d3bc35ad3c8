//! Top-level error for the binary.

use crate::core::config::ConfigError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("browser streaming needs a build with the 'web' feature")]
    WebUnavailable,
}
