//! # kalshi-tui
//!
//! A terminal client for the Kalshi prediction market API, with a small
//! rendering toolkit of its own.
//!
//! ## Architecture
//!
//! - **Term**: styled blocks, borders, tables, layout and a diffing screen buffer
//! - **API**: signed REST client, rate limiting and payload types
//! - **State**: store and reducer for the browser
//! - **Events**: key bindings and input translation
//! - **UI**: panels composed from term blocks
//! - **App**: event loop and background fetches
//! - **Commands**: one-shot subcommands
//! - **Config**: layered configuration

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod term;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
