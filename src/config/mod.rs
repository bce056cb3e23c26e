//! Configuration loading and management for the earnings engine.
//!
//! Pay rules and server settings are loaded from YAML files in a single
//! directory.
//!
//! # Example
//!
//! ```no_run
//! use earnings_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Listening on {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, EarningsRules, ServerConfig};
