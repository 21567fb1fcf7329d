//! Application module
//!
//! This module contains the configuration, UI state and host lifecycle
//! context of the application.

pub mod config;
mod context;
mod state;

pub use config::AppConfig;
pub use context::AppContext;
pub use state::AppState;
