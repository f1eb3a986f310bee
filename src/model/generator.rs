//! Generator network for DCGAN
//!
//! The Generator transforms random noise vectors into synthetic images.
//! Architecture uses transposed 2D convolutions to upsample from latent space.

use tch::{nn, nn::Module, nn::ModuleT, Tensor};

/// Generator network configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Size of the latent noise vector
    pub latent_dim: i64,
    /// Output image side length in pixels
    pub image_size: i64,
    /// Number of output image channels (1 for grayscale)
    pub image_channels: i64,
    /// Channel count of the first feature map
    pub base_channels: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            latent_dim: 100,
            image_size: 64,
            image_channels: 1,
            base_channels: 1024,
        }
    }
}

/// Generator network
///
/// Architecture:
/// 1. Dense projection from latent space to the initial 4x4 feature map
/// 2. Series of ConvTranspose2d layers with BatchNorm and ReLU
/// 3. Final ConvTranspose2d with no activation (raw output)
///
/// Each transposed convolution doubles the spatial resolution and halves the
/// channel count. With defaults:
/// (1024, 4, 4) -> (512, 8, 8) -> (256, 16, 16) -> (128, 32, 32) -> (1, 64, 64)
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    /// Initial dense projection
    fc: nn::Linear,
    /// Transposed convolution layers
    conv1: nn::ConvTranspose2D,
    bn1: nn::BatchNorm,
    conv2: nn::ConvTranspose2D,
    bn2: nn::BatchNorm,
    conv3: nn::ConvTranspose2D,
    bn3: nn::BatchNorm,
    conv4: nn::ConvTranspose2D,
}

impl Generator {
    /// Create a new Generator network
    pub fn new(vs: &nn::Path, config: GeneratorConfig) -> Self {
        let base = config.base_channels;

        // Four stride-2 stages, so the dense layer projects to a feature map
        // 16x smaller than the output image on each side.
        let init_size = config.image_size / 16;
        let init_units = base * init_size * init_size;

        let fc = nn::linear(vs / "fc", config.latent_dim, init_units, Default::default());

        // 5x5 kernel, stride 2, SAME padding: doubles height and width.
        let conv_config = nn::ConvTransposeConfig {
            stride: 2,
            padding: 2,
            output_padding: 1,
            ..Default::default()
        };

        let conv1 = nn::conv_transpose2d(vs / "conv1", base, base / 2, 5, conv_config);
        let bn1 = nn::batch_norm2d(vs / "bn1", base / 2, Default::default());

        let conv2 = nn::conv_transpose2d(vs / "conv2", base / 2, base / 4, 5, conv_config);
        let bn2 = nn::batch_norm2d(vs / "bn2", base / 4, Default::default());

        let conv3 = nn::conv_transpose2d(vs / "conv3", base / 4, base / 8, 5, conv_config);
        let bn3 = nn::batch_norm2d(vs / "bn3", base / 8, Default::default());

        // Final layer: no batch norm, no activation
        let conv4 = nn::conv_transpose2d(
            vs / "conv4",
            base / 8,
            config.image_channels,
            5,
            conv_config,
        );

        Self {
            config,
            fc,
            conv1,
            bn1,
            conv2,
            bn2,
            conv3,
            bn3,
            conv4,
        }
    }

    /// Forward pass from noise to image
    ///
    /// # Arguments
    ///
    /// * `noise` - Tensor of shape (batch_size, latent_dim)
    /// * `train` - Whether in training mode (affects batch norm)
    ///
    /// # Returns
    ///
    /// Tensor of shape (batch_size, image_size, image_size, image_channels)
    /// with unconstrained range (no final activation).
    pub fn forward_t(&self, noise: &Tensor, train: bool) -> Tensor {
        let batch_size = noise.size()[0];
        let base = self.config.base_channels;
        let init_size = self.config.image_size / 16;

        // Project and reshape: (batch, latent) -> (batch, channels, h, w)
        let x = self.fc.forward(noise);
        let x = x.view([batch_size, base, init_size, init_size]);

        // Upsample through transposed convolutions
        let x = self.conv1.forward(&x);
        let x = self.bn1.forward_t(&x, train);
        let x = x.relu();

        let x = self.conv2.forward(&x);
        let x = self.bn2.forward_t(&x, train);
        let x = x.relu();

        let x = self.conv3.forward(&x);
        let x = self.bn3.forward_t(&x, train);
        let x = x.relu();

        let x = self.conv4.forward(&x);

        // NCHW -> NHWC for the public tensor layout
        x.permute([0, 2, 3, 1])
    }

    /// Generate images (inference mode)
    pub fn generate(&self, noise: &Tensor) -> Tensor {
        self.forward_t(noise, false)
    }

    /// Get configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl ModuleT for Generator {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Tensor {
        Generator::forward_t(self, xs, train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::{nn::VarStore, Device};

    #[test]
    fn test_generator_output_shape() {
        let vs = VarStore::new(Device::Cpu);
        let config = GeneratorConfig {
            base_channels: 64,
            ..Default::default()
        };
        let gen = Generator::new(&vs.root(), config);

        let noise = Tensor::randn([4, 100], (tch::Kind::Float, Device::Cpu));
        let output = gen.generate(&noise);

        assert_eq!(output.size(), vec![4, 64, 64, 1]);
    }

    #[test]
    fn test_generator_default_widths() {
        let vs = VarStore::new(Device::Cpu);
        let gen = Generator::new(&vs.root(), GeneratorConfig::default());

        let noise = Tensor::randn([1, 100], (tch::Kind::Float, Device::Cpu));
        let output = gen.generate(&noise);

        assert_eq!(output.size(), vec![1, 64, 64, 1]);
    }

    #[test]
    fn test_generator_small_latent() {
        let vs = VarStore::new(Device::Cpu);
        let config = GeneratorConfig {
            latent_dim: 32,
            base_channels: 32,
            ..Default::default()
        };
        let gen = Generator::new(&vs.root(), config);

        let noise = Tensor::randn([2, 32], (tch::Kind::Float, Device::Cpu));
        let output = gen.generate(&noise);

        assert_eq!(output.size(), vec![2, 64, 64, 1]);
    }
}
