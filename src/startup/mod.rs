//! Startup: configuration and network debug initialization.
//!
//! # Components
//!
//! - [`config`] - Startup configuration
//! - [`debug`] - Interceptor install and dashboard startup
//!
//! # Usage
//!
//! ```ignore
//! use toolcat::startup::{start_debug_system, default_preferences, StartupConfig};
//!
//! let config = StartupConfig::from_env();
//! let result = start_debug_system(&config, default_preferences(), &client).await;
//! ```

pub mod config;
pub mod debug;

pub use config::{StartupConfig, DEFAULT_BASE_URL, DEFAULT_LOG_CAPACITY};
pub use debug::{default_preferences, install_network_debug, start_debug_system, DebugSystemResult};
