//! Core module
//!
//! Contains the registry configuration

mod config;

pub use config::{ConfigError, RegistryConfig, ReplacePolicy};
