//! DCGAN model context combining Generator and Discriminator
//!
//! Owns every layer and parameter of both networks, built once and passed
//! explicitly to the training-step functions.

use anyhow::{bail, Result};
use tch::{nn, nn::VarStore, Device, Tensor};
use tracing::info;

use super::discriminator::{Discriminator, DiscriminatorConfig};
use super::generator::{Generator, GeneratorConfig};

/// Complete DCGAN model
///
/// The generator and discriminator live in separate variable stores, so an
/// optimizer built over one store can only ever update that sub-network.
pub struct ConvGan {
    /// Generator network
    pub generator: Generator,
    /// Discriminator network
    pub discriminator: Discriminator,
    /// Variable store for generator
    pub gen_vs: VarStore,
    /// Variable store for discriminator
    pub disc_vs: VarStore,
    /// Device (CPU/GPU)
    pub device: Device,
}

impl ConvGan {
    /// Create a new DCGAN model
    ///
    /// Fails if the two network configurations describe incompatible image
    /// geometry or dimensions the architecture cannot realize.
    pub fn new(
        gen_config: GeneratorConfig,
        disc_config: DiscriminatorConfig,
        device: Device,
    ) -> Result<Self> {
        validate_architecture(&gen_config, &disc_config)?;

        let gen_vs = VarStore::new(device);
        let disc_vs = VarStore::new(device);

        let generator = Generator::new(&gen_vs.root(), gen_config);
        let discriminator = Discriminator::new(&disc_vs.root(), disc_config);

        let gan = Self {
            generator,
            discriminator,
            gen_vs,
            disc_vs,
            device,
        };

        info!(
            "built DCGAN: generator {} parameters, discriminator {} parameters",
            gan.num_gen_parameters(),
            gan.num_disc_parameters()
        );

        Ok(gan)
    }

    /// Create DCGAN with default 64x64 grayscale configuration
    ///
    /// # Arguments
    ///
    /// * `latent_dim` - Size of latent noise vector
    /// * `device` - Device to create model on
    pub fn with_defaults(latent_dim: i64, device: Device) -> Result<Self> {
        let gen_config = GeneratorConfig {
            latent_dim,
            ..Default::default()
        };
        Self::new(gen_config, DiscriminatorConfig::default(), device)
    }

    /// Generate images from specific noise vectors (inference mode)
    ///
    /// Output is the raw generator tensor of shape
    /// (batch, image_size, image_size, image_channels), unconstrained range.
    pub fn generate(&self, noise: &Tensor) -> Tensor {
        self.generator.generate(noise)
    }

    /// Generate images from internally sampled noise (inference mode)
    pub fn sample(&self, num_samples: i64) -> Tensor {
        let noise = self.sample_noise(num_samples);
        self.generate(&noise)
    }

    /// Draw a standard-normal noise batch on the model device
    pub fn sample_noise(&self, num_samples: i64) -> Tensor {
        let latent_dim = self.generator.config().latent_dim;
        Tensor::randn([num_samples, latent_dim], (tch::Kind::Float, self.device))
    }

    /// Discriminate samples (probability of being real, inference mode)
    pub fn discriminate(&self, samples: &Tensor) -> Tensor {
        self.discriminator.classify(samples)
    }

    /// Get generator optimizer (Adam with DCGAN parameters: beta1 = 0.5)
    pub fn gen_optimizer(&self, lr: f64) -> Result<nn::Optimizer> {
        let opt = nn::Adam {
            beta1: 0.5,
            beta2: 0.999,
            wd: 0.0,
        }
        .build(&self.gen_vs, lr)?;
        Ok(opt)
    }

    /// Get discriminator optimizer (Adam with DCGAN parameters: beta1 = 0.5)
    pub fn disc_optimizer(&self, lr: f64) -> Result<nn::Optimizer> {
        let opt = nn::Adam {
            beta1: 0.5,
            beta2: 0.999,
            wd: 0.0,
        }
        .build(&self.disc_vs, lr)?;
        Ok(opt)
    }

    /// Number of trainable generator parameters
    pub fn num_gen_parameters(&self) -> i64 {
        count_parameters(&self.gen_vs)
    }

    /// Number of trainable discriminator parameters
    pub fn num_disc_parameters(&self) -> i64 {
        count_parameters(&self.disc_vs)
    }

    /// Get latent dimension
    pub fn latent_dim(&self) -> i64 {
        self.generator.config().latent_dim
    }

    /// Get image side length
    pub fn image_size(&self) -> i64 {
        self.generator.config().image_size
    }

    /// Get number of image channels
    pub fn image_channels(&self) -> i64 {
        self.generator.config().image_channels
    }

    /// Interpolate between two points in latent space
    ///
    /// Useful for inspecting smooth transitions between generated images
    ///
    /// # Arguments
    ///
    /// * `z1` - First latent vector, shape (latent_dim,)
    /// * `z2` - Second latent vector, shape (latent_dim,)
    /// * `steps` - Number of interpolation steps
    ///
    /// # Returns
    ///
    /// Tensor of shape (steps, image_size, image_size, image_channels)
    pub fn interpolate(&self, z1: &Tensor, z2: &Tensor, steps: i64) -> Tensor {
        let mut samples = Vec::new();
        let denom = (steps - 1).max(1) as f64;

        for i in 0..steps {
            let alpha = i as f64 / denom;
            let z = z1 * (1.0 - alpha) + z2 * alpha;
            let sample = self.generate(&z.unsqueeze(0));
            samples.push(sample.squeeze_dim(0));
        }

        Tensor::stack(&samples, 0)
    }
}

fn count_parameters(vs: &VarStore) -> i64 {
    vs.trainable_variables()
        .iter()
        .map(|t| t.numel() as i64)
        .sum()
}

/// Check that the generator and discriminator configurations agree and are
/// realizable by the fixed four-stage architecture.
fn validate_architecture(
    gen: &GeneratorConfig,
    disc: &DiscriminatorConfig,
) -> Result<()> {
    if gen.latent_dim <= 0 {
        bail!("latent dimension must be > 0, got {}", gen.latent_dim);
    }
    if gen.image_size <= 0 || gen.image_size % 16 != 0 {
        bail!(
            "image size must be a positive multiple of 16 (four stride-2 stages), got {}",
            gen.image_size
        );
    }
    if gen.image_channels <= 0 {
        bail!("image channels must be > 0, got {}", gen.image_channels);
    }
    if gen.base_channels <= 0 || gen.base_channels % 8 != 0 {
        bail!(
            "generator base channels must be a positive multiple of 8, got {}",
            gen.base_channels
        );
    }
    if disc.base_channels <= 0 {
        bail!(
            "discriminator base channels must be > 0, got {}",
            disc.base_channels
        );
    }
    if gen.image_size != disc.image_size {
        bail!(
            "generator and discriminator disagree on image size: {} vs {}",
            gen.image_size,
            disc.image_size
        );
    }
    if gen.image_channels != disc.image_channels {
        bail!(
            "generator and discriminator disagree on image channels: {} vs {}",
            gen.image_channels,
            disc.image_channels
        );
    }
    Ok(())
}
