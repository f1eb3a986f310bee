//! Data boundary between the external harness and the model
//!
//! This module provides:
//! - Validated array-to-tensor conversion for noise and image batches
//! - Pixel rescaling into the generator's output range

mod batch;

pub use batch::{image_batch, noise_batch, scale_to_unit_range};
