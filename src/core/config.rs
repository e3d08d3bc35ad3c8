//! Run configuration: viewport, variant, pipe geometry and CLI overrides.

use super::constants::*;
use crate::flappy::spawner::{OffsetRange, SpawnError};
use crate::utils::paths::{app_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which flavor of the game to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameVariant {
    /// Pipes, score trigger, score text and the ready/paused state.
    Scoring,
    /// Jump and fall with sound only. No pipes, no score.
    Prototype,
}

impl GameVariant {
    pub fn has_pipes(self) -> bool {
        matches!(self, GameVariant::Scoring)
    }

    pub fn name(self) -> &'static str {
        match self {
            GameVariant::Scoring => "Flappy Duck",
            GameVariant::Prototype => "Flappy Duck (prototype)",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("viewport must be at least {min}x{min} units, got {width}x{height}")]
    ViewportTooSmall { width: u32, height: u32, min: u32 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("pipe width must be positive, got {0}")]
    PipeWidth(f64),
    #[error("pipes must scroll left (negative x velocity), got {0}")]
    PipeVelocity(f64),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Everything a scene needs to know before `setup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: GameVariant,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub pipe_width: f64,
    pub pipe_height: f64,
    pub pipe_gap: f64,
    pub pipe_velocity_x: f64,
    /// RNG seed for the pipe stream (None = from entropy)
    pub seed: Option<u64>,
    /// Port for browser streaming, when enabled
    pub serve_port: Option<u16>,
    /// Suppress the terminal bell used for sound effects
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: GameVariant::Scoring,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_gap: PIPE_GAP,
            pipe_velocity_x: PIPE_VELOCITY_X,
            seed: None,
            serve_port: None,
            muted: false,
        }
    }
}

impl GameConfig {
    pub fn width(&self) -> f64 {
        self.viewport_width as f64
    }

    pub fn height(&self) -> f64 {
        self.viewport_height as f64
    }

    /// Duck spawn point: the viewport center.
    pub fn duck_spawn(&self) -> (f64, f64) {
        (self.width() / 2.0, self.height() / 2.0)
    }

    /// Horizontal spawn point for new pipe pairs, one pipe width past the right edge.
    pub fn pipe_spawn_x(&self) -> f64 {
        self.width() + self.pipe_width
    }

    pub fn offset_range(&self) -> Result<OffsetRange, SpawnError> {
        OffsetRange::new(self.height(), self.pipe_height, self.pipe_gap)
    }

    /// Reject viewports the duck does not fit in and pipe geometry whose gap
    /// cannot stay on screen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width < SPRITE_SIZE || self.viewport_height < SPRITE_SIZE {
            return Err(ConfigError::ViewportTooSmall {
                width: self.viewport_width,
                height: self.viewport_height,
                min: SPRITE_SIZE,
            });
        }
        if self.variant.has_pipes() {
            self.validate_pipes()?;
        }
        Ok(())
    }

    fn validate_pipes(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("pipe_gap", self.pipe_gap),
            ("pipe_velocity_x", self.pipe_velocity_x),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        if self.pipe_width <= 0.0 {
            return Err(ConfigError::PipeWidth(self.pipe_width));
        }
        if self.pipe_velocity_x >= 0.0 {
            return Err(ConfigError::PipeVelocity(self.pipe_velocity_x));
        }
        self.offset_range()?;
        Ok(())
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Run(GameConfig),
    /// Write the resolved config to ~/.flappy-duck/config.json and exit.
    SaveConfig(GameConfig),
    Version,
    Help,
}

pub const USAGE: &str = "\
Flappy Duck - terminal arcade game

Usage: flappy-duck [options]

Options:
  --prototype       Jump/fall/sound prototype without pipes or score
  --width N         Viewport width in world units (default 800)
  --height N        Viewport height in world units (default 500)
  --seed N          Seed for the pipe stream
  --mute            Do not ring the terminal bell for sound effects
  --serve[=PORT]    Stream to a web browser (requires the 'web' feature)
  --save-config     Save these options as the defaults and exit
  --version         Show version information
  --help            Show this help message";

/// Parse CLI arguments (without the program name) on top of `base`.
pub fn parse_args(args: &[String], base: GameConfig) -> Result<CliCommand, ConfigError> {
    let mut config = base;
    let mut iter = args.iter();
    let mut save = false;

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--prototype" => config.variant = GameVariant::Prototype,
            "--mute" => config.muted = true,
            "--save-config" => save = true,
            "--width" => config.viewport_width = parse_value("--width", iter.next())?,
            "--height" => config.viewport_height = parse_value("--height", iter.next())?,
            "--seed" => config.seed = Some(parse_value("--seed", iter.next())?),
            "--serve" => config.serve_port = Some(DEFAULT_WEB_PORT),
            other => {
                if let Some(port) = other.strip_prefix("--serve=") {
                    config.serve_port = Some(parse_value("--serve", Some(&port.to_string()))?);
                } else {
                    return Err(ConfigError::UnknownArgument(other.to_string()));
                }
            }
        }
    }

    config.validate()?;
    if save {
        Ok(CliCommand::SaveConfig(config))
    } else {
        Ok(CliCommand::Run(config))
    }
}

/// Persist `config` as the new base config.
pub fn save_config(config: &GameConfig) -> std::io::Result<std::path::PathBuf> {
    let path = app_path(CONFIG_FILE_NAME)?;
    save_json(&path, config)?;
    Ok(path)
}

/// Defaults, overlaid with ~/.flappy-duck/config.json and the seed env var.
/// CLI flags go on top of this.
pub fn base_config() -> GameConfig {
    let mut config = match app_path(CONFIG_FILE_NAME) {
        Ok(path) => load_json_or_default(&path),
        Err(_) => GameConfig::default(),
    };
    apply_seed_env(&mut config, std::env::var(SEED_ENV_VAR).ok());
    config
}

fn apply_seed_env(config: &mut GameConfig, raw: Option<String>) {
    if let Some(seed) = raw.and_then(|r| r.trim().parse().ok()) {
        config.seed = Some(seed);
    }
}

fn parse_value<T: std::str::FromStr>(
    flag: &'static str,
    raw: Option<&String>,
) -> Result<T, ConfigError> {
    let raw = raw.ok_or(ConfigError::InvalidValue {
        flag,
        value: String::new(),
    })?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        flag,
        value: raw.clone(),
    })
}
