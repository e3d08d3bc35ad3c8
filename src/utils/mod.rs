//! Utility modules: app directory paths and JSON helpers.

pub mod paths;

pub use paths::*;
