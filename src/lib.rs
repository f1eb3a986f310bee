//! # DCGAN for 64x64 Grayscale Image Synthesis
//!
//! This crate provides a modular implementation of a Deep Convolutional
//! Generative Adversarial Network (DCGAN): a generator mapping latent noise
//! to 64x64 single-channel images, a discriminator mapping images to
//! real/fake logits, and the adversarial loss and optimizer wiring between
//! them. Tensor execution, automatic differentiation, and the Adam optimizer
//! come from libtorch via `tch`.
//!
//! The external training harness owns the epoch loop, data pipeline, and
//! checkpoint persistence; it drives the alternating step operations exposed
//! by [`training`].
//!
//! ## Modules
//!
//! - `data`: validated array-to-tensor input boundary
//! - `model`: DCGAN architecture (Generator, Discriminator, ConvGan context)
//! - `training`: loss functions, step operations, and metrics
//! - `utils`: configuration handling

pub mod data;
pub mod model;
pub mod training;
pub mod utils;

pub use data::{image_batch, noise_batch, scale_to_unit_range};
pub use model::{ConvGan, Discriminator, DiscriminatorConfig, Generator, GeneratorConfig};
pub use training::{
    diagnostic_mse, discriminator_loss, discriminator_step, generator_loss, generator_step,
    reconstruction_mse, DiscriminatorStepStats, EpochStats, TrainingMetrics,
};
pub use utils::Config;
