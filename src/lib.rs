//! Flappy Duck - terminal arcade game library
//!
//! This module exposes the game logic for testing and external use.

pub mod arcade;
pub mod audio;
pub mod build_info;
pub mod core;
pub mod error;
pub mod flappy;
pub mod input;
pub mod level;
pub mod logging;
pub mod ui;
pub mod utils;
pub mod web;

pub use crate::core::config::{CliCommand, ConfigError, GameConfig, GameVariant};
pub use crate::error::AppError;
pub use crate::flappy::{FlappyScene, FrameOutcome, SpawnError};
