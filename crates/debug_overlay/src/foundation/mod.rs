//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the overlay:
//! - Math types and space-tagged geometry
//! - Logging utilities

pub mod math;
pub mod logging;
