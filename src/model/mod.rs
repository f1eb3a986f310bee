//! Model module containing GAN architecture components
//!
//! This module provides:
//! - Generator network for synthesizing images from noise
//! - Discriminator network for distinguishing real from fake
//! - ConvGan model context combining both networks

mod dcgan;
mod discriminator;
mod generator;

pub use dcgan::ConvGan;
pub use discriminator::{Discriminator, DiscriminatorConfig};
pub use generator::{Generator, GeneratorConfig};
