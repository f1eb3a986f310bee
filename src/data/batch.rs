//! Input boundary between the training harness and the model
//!
//! The harness hands over plain `ndarray` batches; this module validates
//! their shapes and converts them to device tensors. Shape errors surface
//! here, synchronously, before any graph work happens.

use anyhow::{bail, Result};
use ndarray::{Array2, Array4};
use tch::{Device, Tensor};

/// Convert a noise batch to a device tensor
///
/// # Arguments
///
/// * `noise` - Array of shape (batch, latent_dim)
/// * `latent_dim` - Latent dimension the generator was built with
/// * `device` - Device to place the tensor on
pub fn noise_batch(noise: Array2<f32>, latent_dim: i64, device: Device) -> Result<Tensor> {
    let (batch, dim) = noise.dim();
    if batch == 0 {
        bail!("noise batch is empty");
    }
    if dim as i64 != latent_dim {
        bail!(
            "noise batch has {} columns, generator expects latent dimension {}",
            dim,
            latent_dim
        );
    }

    let tensor = Tensor::try_from(noise)?;
    Ok(tensor.to_device(device))
}

/// Convert an image batch to a device tensor
///
/// # Arguments
///
/// * `images` - Array of shape (batch, image_size, image_size, channels)
/// * `image_size` - Image side length the model was built with
/// * `image_channels` - Channel count the model was built with
/// * `device` - Device to place the tensor on
pub fn image_batch(
    images: Array4<f32>,
    image_size: i64,
    image_channels: i64,
    device: Device,
) -> Result<Tensor> {
    let (batch, height, width, channels) = images.dim();
    if batch == 0 {
        bail!("image batch is empty");
    }
    if height as i64 != image_size || width as i64 != image_size {
        bail!(
            "image batch is {}x{}, model expects {}x{}",
            height,
            width,
            image_size,
            image_size
        );
    }
    if channels as i64 != image_channels {
        bail!(
            "image batch has {} channels, model expects {}",
            channels,
            image_channels
        );
    }

    let tensor = Tensor::try_from(images)?;
    Ok(tensor.to_device(device))
}

/// Rescale pixel values from [0, max_pixel] to [-1, 1]
///
/// Real batches are expected in the same normalized range the generator's
/// tanh-squashed output lives in.
pub fn scale_to_unit_range(images: &Array4<f32>, max_pixel: f32) -> Array4<f32> {
    images.mapv(|v| 2.0 * v / max_pixel - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_batch_shape() {
        let noise = Array2::<f32>::zeros((4, 100));
        let tensor = noise_batch(noise, 100, Device::Cpu).unwrap();

        assert_eq!(tensor.size(), vec![4, 100]);
        assert_eq!(tensor.kind(), tch::Kind::Float);
    }

    #[test]
    fn test_noise_batch_rejects_wrong_latent_dim() {
        let noise = Array2::<f32>::zeros((4, 64));
        assert!(noise_batch(noise, 100, Device::Cpu).is_err());
    }

    #[test]
    fn test_noise_batch_rejects_empty() {
        let noise = Array2::<f32>::zeros((0, 100));
        assert!(noise_batch(noise, 100, Device::Cpu).is_err());
    }

    #[test]
    fn test_image_batch_shape() {
        let images = Array4::<f32>::zeros((2, 64, 64, 1));
        let tensor = image_batch(images, 64, 1, Device::Cpu).unwrap();

        assert_eq!(tensor.size(), vec![2, 64, 64, 1]);
    }

    #[test]
    fn test_image_batch_rejects_wrong_geometry() {
        let images = Array4::<f32>::zeros((2, 32, 32, 1));
        assert!(image_batch(images, 64, 1, Device::Cpu).is_err());

        let images = Array4::<f32>::zeros((2, 64, 64, 3));
        assert!(image_batch(images, 64, 1, Device::Cpu).is_err());
    }

    #[test]
    fn test_scale_to_unit_range() {
        let mut images = Array4::<f32>::zeros((1, 64, 64, 1));
        images[[0, 0, 0, 0]] = 0.0;
        images[[0, 0, 1, 0]] = 127.5;
        images[[0, 0, 2, 0]] = 255.0;

        let scaled = scale_to_unit_range(&images, 255.0);

        assert_eq!(scaled[[0, 0, 0, 0]], -1.0);
        assert_eq!(scaled[[0, 0, 1, 0]], 0.0);
        assert_eq!(scaled[[0, 0, 2, 0]], 1.0);
    }
}
