//! Flappy Duck game logic.
//!
//! A duck falls under gravity and jumps on input. In the scoring variant it
//! has to pass through the gaps of an endless stream of pipe pairs; touching
//! a pipe restarts the round.

pub mod collision;
pub mod scene;
pub mod spawner;
pub mod types;

pub use collision::*;
pub use scene::*;
pub use spawner::*;
pub use types::*;
