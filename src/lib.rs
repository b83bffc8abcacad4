//! packdeck - a terminal control deck for a local Minecraft modpack backend.
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod recipe;
pub mod state;
pub mod store;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod view_state;
