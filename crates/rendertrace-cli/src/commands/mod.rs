//! Command implementations.
//!
//! - [`analyze`] - gather, analyze and persist one project
//! - [`config`] - print the effective configuration

pub mod analyze;
pub mod config;

pub use analyze::execute as analyze_execute;
pub use config::execute as config_execute;
