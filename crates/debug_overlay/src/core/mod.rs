//! Core overlay modules
//!
//! Configuration shared by every overlay subsystem.

pub mod config;

pub use config::{Config, ConfigError, DrawDefaults, OverlayConfig, PoolConfig};
