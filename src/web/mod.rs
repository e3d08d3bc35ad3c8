//! Web streaming for Flappy Duck.
//!
//! The game keeps running in the terminal while every frame is mirrored to
//! browsers over a WebSocket. Browsers send key and pointer presses back.
//!
//! ## Usage
//!
//! Build with web feature:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Run with web server:
//! ```sh
//! ./target/debug/flappy-duck --serve        # Default port 3000
//! ./target/debug/flappy-duck --serve=8080   # Custom port
//! ```
//!
//! Then open http://localhost:3000 in your browser.

pub mod protocol;

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
mod backend;

pub use protocol::{PointerAction, WebInput};

#[cfg(feature = "web")]
pub use backend::TeeWriter;

#[cfg(feature = "web")]
pub use server::{start_web_server, WebServer};
