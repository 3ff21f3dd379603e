//! The module holding the filter configuration.
pub mod config;
