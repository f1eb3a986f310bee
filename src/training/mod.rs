//! Training module for DCGAN
//!
//! This module provides:
//! - Loss functions (Binary Cross Entropy, diagnostic MSE)
//! - Optimizer step operations for the alternating training loop
//! - Metrics for tracking training progress

mod losses;
mod metrics;
mod steps;

pub use losses::{discriminator_loss, generator_loss, reconstruction_mse};
pub use metrics::{EpochStats, TrainingMetrics};
pub use steps::{diagnostic_mse, discriminator_step, generator_step, DiscriminatorStepStats};
