//! Utility module with helper functions
//!
//! This module provides:
//! - Configuration handling

mod config;

pub use config::{Config, ModelConfig, TrainingConfig};
