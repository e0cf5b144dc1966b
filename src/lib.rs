//! Ikun Valley library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can drive the player without needing a window or GPU.

pub mod shared;
pub mod config;
pub mod input;
pub mod level;
pub mod player;
