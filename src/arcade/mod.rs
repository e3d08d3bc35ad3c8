//! Minimal arcade layer the game logic runs on.
//!
//! Bodies integrate gravity and acceleration, timers fire on the scene clock,
//! and sprite animations pick the frame to draw. Nothing here knows about
//! ducks or pipes.

pub mod animation;
pub mod body;
pub mod timers;

pub use animation::{Animation, AnimationPlayer};
pub use body::{Aabb, Body, WorldBounds};
pub use timers::TimerQueue;
