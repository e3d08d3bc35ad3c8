// Frame timing
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS redraw/poll cadence
pub const FIXED_DT: f64 = 1.0 / 60.0; // physics step in seconds
pub const MAX_FRAME_STEPS: u32 = 8; // cap on catch-up steps after a stall

// Viewport (world units)
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 800;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 500;

// Background tiles
pub const SPRITE_SIZE: u32 = 32;
pub const BACKGROUND_TILE_INDEX: u16 = 104;

// Duck sprite sheet: frames 12..=13 of the ducky sheet
pub const DUCK_SIZE: f64 = 32.0;
pub const DUCK_FIRST_FRAME: u16 = 12;
pub const DUCK_LAST_FRAME: u16 = 13;
pub const DUCK_FRAME_RATE: f64 = 10.0;
pub const DUCK_ANIMATION_REPEAT: u32 = 1;

// Duck physics
pub const DUCK_GRAVITY_Y: f64 = 1000.0;
pub const DUCK_MAX_VELOCITY_X: f64 = 0.0;
pub const DUCK_MAX_VELOCITY_Y: f64 = 500.0;
pub const JUMP_ACCELERATION_Y: f64 = -5000.0;
pub const JUMP_CANCEL_DELAY_MS: u64 = 100;

// Loop sleep/wake around the ready state
pub const SLEEP_DELAY_MS: u64 = 50;
pub const WAKE_DELAY_MS: u64 = 50;

// Pipes (pipe-green.png is 52x320)
pub const PIPE_WIDTH: f64 = 52.0;
pub const PIPE_HEIGHT: f64 = 320.0;
pub const PIPE_GAP: f64 = 150.0;
pub const PIPE_VELOCITY_X: f64 = -100.0;

// Invisible score trigger
pub const SCORE_TRIGGER_WIDTH: f64 = 5.0;

// Score text anchor (world units)
pub const SCORE_TEXT_X: f64 = 30.0;
pub const SCORE_TEXT_Y: f64 = 30.0;

// Web streaming
pub const DEFAULT_WEB_PORT: u16 = 3000;

// Files under ~/.flappy-duck/
pub const APP_DIR_NAME: &str = ".flappy-duck";
pub const LOG_FILE_NAME: &str = "flappy-duck.log";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const SEED_ENV_VAR: &str = "FLAPPY_DUCK_SEED";
