//! Configuration management
//!
//! Unified, serializable configuration covering model geometry and
//! optimization settings, loadable from TOML or JSON.

use serde::{Deserialize, Serialize};

use crate::model::{ConvGan, DiscriminatorConfig, GeneratorConfig};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model configuration
    pub model: ModelConfig,
    /// Optimization configuration
    pub training: TrainingConfig,
}

/// Model-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Latent dimension size
    pub latent_dim: i64,
    /// Image side length in pixels
    pub image_size: i64,
    /// Number of image channels (1 for grayscale)
    pub image_channels: i64,
    /// Channel count of the generator's first feature map
    pub gen_base_channels: i64,
    /// Channel count of the discriminator's first convolution
    pub disc_base_channels: i64,
    /// Leaky ReLU negative slope in the discriminator
    pub leak: f64,
}

/// Optimization-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Generator learning rate
    pub gen_lr: f64,
    /// Discriminator learning rate
    pub disc_lr: f64,
    /// Device: "cpu" or "cuda"
    pub device: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                latent_dim: 100,
                image_size: 64,
                image_channels: 1,
                gen_base_channels: 1024,
                disc_base_channels: 128,
                leak: 0.2,
            },
            training: TrainingConfig {
                gen_lr: 2e-4,
                disc_lr: 2e-4,
                device: "cpu".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_toml(&self, path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn save_json(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get device from configuration
    pub fn device(&self) -> tch::Device {
        match self.training.device.to_lowercase().as_str() {
            "cuda" | "gpu" => {
                if tch::Cuda::is_available() {
                    tch::Device::Cuda(0)
                } else {
                    tracing::warn!("CUDA requested but not available, falling back to CPU");
                    tch::Device::Cpu
                }
            }
            _ => tch::Device::Cpu,
        }
    }

    /// Generator configuration derived from the model section
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            latent_dim: self.model.latent_dim,
            image_size: self.model.image_size,
            image_channels: self.model.image_channels,
            base_channels: self.model.gen_base_channels,
        }
    }

    /// Discriminator configuration derived from the model section
    pub fn discriminator_config(&self) -> DiscriminatorConfig {
        DiscriminatorConfig {
            image_size: self.model.image_size,
            image_channels: self.model.image_channels,
            base_channels: self.model.disc_base_channels,
            leak: self.model.leak,
        }
    }

    /// Build the model described by this configuration
    pub fn build_gan(&self) -> anyhow::Result<ConvGan> {
        self.validate()?;
        ConvGan::new(
            self.generator_config(),
            self.discriminator_config(),
            self.device(),
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.model.latent_dim <= 0 {
            anyhow::bail!("Latent dimension must be > 0");
        }
        if self.model.image_size <= 0 || self.model.image_size % 16 != 0 {
            anyhow::bail!("Image size must be a positive multiple of 16");
        }
        if self.model.image_channels <= 0 {
            anyhow::bail!("Image channels must be > 0");
        }
        if self.model.gen_base_channels <= 0 || self.model.disc_base_channels <= 0 {
            anyhow::bail!("Base channel counts must be > 0");
        }
        if self.training.gen_lr <= 0.0 || self.training.disc_lr <= 0.0 {
            anyhow::bail!("Learning rates must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.model.latent_dim, 100);
        assert_eq!(config.model.image_size, 64);
        assert_eq!(config.training.gen_lr, 2e-4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(config.model.latent_dim, loaded.model.latent_dim);
        assert_eq!(config.training.device, loaded.training.device);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        let config = Config::default();
        config.save_toml(path).unwrap();
        let loaded = Config::from_toml(path).unwrap();

        assert_eq!(config.model.gen_base_channels, loaded.model.gen_base_channels);
        assert_eq!(config.training.disc_lr, loaded.training.disc_lr);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.model.image_size = 60;
        assert!(config.validate().is_err());

        config.model.image_size = 64;
        config.training.gen_lr = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_build_gan() {
        let mut config = Config::default();
        config.model.gen_base_channels = 32;
        config.model.disc_base_channels = 8;

        let gan = config.build_gan().unwrap();
        assert_eq!(gan.latent_dim(), 100);
        assert_eq!(gan.image_size(), 64);
    }
}
