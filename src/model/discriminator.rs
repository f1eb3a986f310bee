//! Discriminator network for DCGAN
//!
//! The Discriminator classifies images as real or fake.
//! Architecture uses strided 2D convolutions to downsample and extract features.

use tch::{nn, nn::Module, nn::ModuleT, Tensor};

/// Discriminator network configuration
#[derive(Debug, Clone)]
pub struct DiscriminatorConfig {
    /// Input image side length in pixels
    pub image_size: i64,
    /// Number of input image channels (1 for grayscale)
    pub image_channels: i64,
    /// Channel count of the first convolution stage
    pub base_channels: i64,
    /// Negative slope of the leaky ReLU activations
    pub leak: f64,
}

impl Default for DiscriminatorConfig {
    fn default() -> Self {
        Self {
            image_size: 64,
            image_channels: 1,
            base_channels: 128,
            leak: 0.2,
        }
    }
}

/// Discriminator network
///
/// Architecture:
/// 1. Series of Conv2d layers with BatchNorm and leaky ReLU
/// 2. Flatten and Dense layer producing one logit per sample
///
/// The same instance is invoked on both the fake and the real branch; both
/// calls read the parameters owned by this struct, so weight sharing between
/// the branches holds by construction.
///
/// Each convolution halves the spatial resolution and doubles the channel
/// count. With defaults:
/// (1, 64, 64) -> (128, 32, 32) -> (256, 16, 16) -> (512, 8, 8) -> (1024, 4, 4)
#[derive(Debug)]
pub struct Discriminator {
    config: DiscriminatorConfig,
    /// Convolution layers
    conv1: nn::Conv2D,
    bn1: nn::BatchNorm,
    conv2: nn::Conv2D,
    bn2: nn::BatchNorm,
    conv3: nn::Conv2D,
    bn3: nn::BatchNorm,
    conv4: nn::Conv2D,
    bn4: nn::BatchNorm,
    /// Final classification layer
    fc: nn::Linear,
}

impl Discriminator {
    /// Create a new Discriminator network
    pub fn new(vs: &nn::Path, config: DiscriminatorConfig) -> Self {
        let base = config.base_channels;

        // 5x5 kernel, stride 2, SAME padding: halves height and width.
        let conv_config = nn::ConvConfig {
            stride: 2,
            padding: 2,
            ..Default::default()
        };

        let conv1 = nn::conv2d(vs / "conv1", config.image_channels, base, 5, conv_config);
        let bn1 = nn::batch_norm2d(vs / "bn1", base, Default::default());

        let conv2 = nn::conv2d(vs / "conv2", base, base * 2, 5, conv_config);
        let bn2 = nn::batch_norm2d(vs / "bn2", base * 2, Default::default());

        let conv3 = nn::conv2d(vs / "conv3", base * 2, base * 4, 5, conv_config);
        let bn3 = nn::batch_norm2d(vs / "bn3", base * 4, Default::default());

        let conv4 = nn::conv2d(vs / "conv4", base * 4, base * 8, 5, conv_config);
        let bn4 = nn::batch_norm2d(vs / "bn4", base * 8, Default::default());

        // Spatial size after four stride-2 convolutions
        let final_size = config.image_size / 16;
        let flat_size = base * 8 * final_size * final_size;

        let fc = nn::linear(vs / "out", flat_size, 1, Default::default());

        Self {
            config,
            conv1,
            bn1,
            conv2,
            bn2,
            conv3,
            bn3,
            conv4,
            bn4,
            fc,
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    ///
    /// * `input` - Tensor of shape (batch_size, image_size, image_size, image_channels)
    /// * `train` - Whether in training mode (affects batch norm)
    ///
    /// # Returns
    ///
    /// Tensor of shape (batch_size, 1) with logits (not sigmoid)
    pub fn forward_t(&self, input: &Tensor, train: bool) -> Tensor {
        let leak = self.config.leak;

        // NHWC -> NCHW for Conv2D
        let x = input.permute([0, 3, 1, 2]);

        let x = self.conv1.forward(&x);
        let x = self.bn1.forward_t(&x, train);
        let x = x.maximum(&(&x * leak));

        let x = self.conv2.forward(&x);
        let x = self.bn2.forward_t(&x, train);
        let x = x.maximum(&(&x * leak));

        let x = self.conv3.forward(&x);
        let x = self.bn3.forward_t(&x, train);
        let x = x.maximum(&(&x * leak));

        let x = self.conv4.forward(&x);
        let x = self.bn4.forward_t(&x, train);
        let x = x.maximum(&(&x * leak));

        // Flatten and classify
        let batch_size = x.size()[0];
        let x = x.view([batch_size, -1]);

        self.fc.forward(&x)
    }

    /// Classify samples (inference mode)
    ///
    /// Returns probability of being real (after sigmoid)
    pub fn classify(&self, input: &Tensor) -> Tensor {
        self.forward_t(input, false).sigmoid()
    }

    /// Get configuration
    pub fn config(&self) -> &DiscriminatorConfig {
        &self.config
    }
}

impl ModuleT for Discriminator {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Tensor {
        Discriminator::forward_t(self, xs, train)
    }
}
