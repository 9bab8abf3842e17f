//! Toolcat - a terminal browser for the internal tools catalog
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod debug;
pub mod logging;
pub mod startup;
pub mod terminal;
pub mod traits;
pub mod ui;
