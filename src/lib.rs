//! PhotoCast - current weather for where you are, in the terminal
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod location;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod time;
