//! Loss functions for GAN training
//!
//! Implements Binary Cross Entropy losses for generator and discriminator,
//! plus a reconstruction MSE used purely as a monitoring signal.

use tch::Tensor;

/// Generator loss: -log(D(G(z)))
///
/// The generator wants the discriminator to output 1 (real) for fake samples.
/// Mean sigmoid cross-entropy of the fake logits against an all-ones target.
///
/// # Arguments
///
/// * `fake_logits` - Discriminator output on generated samples (logits)
///
/// # Returns
///
/// Scalar loss tensor
pub fn generator_loss(fake_logits: &Tensor) -> Tensor {
    let targets = Tensor::ones_like(fake_logits);
    fake_logits.binary_cross_entropy_with_logits::<Tensor>(
        &targets,
        None,
        None,
        tch::Reduction::Mean,
    )
}

/// Discriminator loss: -log(D(x)) - log(1-D(G(z)))
///
/// The discriminator wants to output 1 for real samples and 0 for fake
/// samples; the two cross-entropy terms are summed.
///
/// # Arguments
///
/// * `real_logits` - Discriminator output on real samples (logits)
/// * `fake_logits` - Discriminator output on generated samples (logits)
///
/// # Returns
///
/// Scalar loss tensor
pub fn discriminator_loss(real_logits: &Tensor, fake_logits: &Tensor) -> Tensor {
    // Loss on real samples (target = 1)
    let real_targets = Tensor::ones_like(real_logits);
    let real_loss = real_logits.binary_cross_entropy_with_logits::<Tensor>(
        &real_targets,
        None,
        None,
        tch::Reduction::Mean,
    );

    // Loss on fake samples (target = 0)
    let fake_targets = Tensor::zeros_like(fake_logits);
    let fake_loss = fake_logits.binary_cross_entropy_with_logits::<Tensor>(
        &fake_targets,
        None,
        None,
        tch::Reduction::Mean,
    );

    real_loss + fake_loss
}

/// Mean squared error between generated and real images
///
/// A diagnostic only: it is never part of either optimization objective,
/// it just tracks how far generator output drifts from the real batch.
pub fn reconstruction_mse(generated: &Tensor, real: &Tensor) -> Tensor {
    generated.mse_loss(real, tch::Reduction::Mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::Device;

    const LN_2: f64 = std::f64::consts::LN_2;

    #[test]
    fn test_generator_loss_at_zero_logits() {
        // Logits of 0 mean "equal probability of real/fake": the cross
        // entropy against either target is ln(2).
        let fake_logits = Tensor::zeros([8, 1], (tch::Kind::Float, Device::Cpu));
        let loss = generator_loss(&fake_logits);

        assert_eq!(loss.size(), Vec::<i64>::new());
        assert!((loss.double_value(&[]) - LN_2).abs() < 1e-6);
    }

    #[test]
    fn test_discriminator_loss_at_zero_logits() {
        let real_logits = Tensor::zeros([8, 1], (tch::Kind::Float, Device::Cpu));
        let fake_logits = Tensor::zeros([8, 1], (tch::Kind::Float, Device::Cpu));
        let loss = discriminator_loss(&real_logits, &fake_logits);

        // Sum of two ln(2) terms
        assert!((loss.double_value(&[]) - 2.0 * LN_2).abs() < 1e-6);
    }

    #[test]
    fn test_discriminator_loss_non_negative() {
        for _ in 0..10 {
            let real_logits = Tensor::randn([4, 1], (tch::Kind::Float, Device::Cpu)) * 5.0;
            let fake_logits = Tensor::randn([4, 1], (tch::Kind::Float, Device::Cpu)) * 5.0;
            let loss = discriminator_loss(&real_logits, &fake_logits);

            assert!(loss.double_value(&[]) >= 0.0);
        }
    }

    #[test]
    fn test_perfect_discriminator() {
        // Perfect discriminator: high confidence on real, low on fake
        let real_logits = Tensor::full([4, 1], 10.0, (tch::Kind::Float, Device::Cpu));
        let fake_logits = Tensor::full([4, 1], -10.0, (tch::Kind::Float, Device::Cpu));
        let loss = discriminator_loss(&real_logits, &fake_logits);

        assert!(loss.double_value(&[]) < 0.1);
    }

    #[test]
    fn test_reconstruction_mse_zero_on_identical_inputs() {
        let images = Tensor::randn([2, 64, 64, 1], (tch::Kind::Float, Device::Cpu));
        let mse = reconstruction_mse(&images, &images.copy());

        assert_eq!(mse.double_value(&[]), 0.0);
    }

    #[test]
    fn test_reconstruction_mse_positive_on_different_inputs() {
        let a = Tensor::zeros([2, 64, 64, 1], (tch::Kind::Float, Device::Cpu));
        let b = Tensor::ones([2, 64, 64, 1], (tch::Kind::Float, Device::Cpu));
        let mse = reconstruction_mse(&a, &b);

        assert!((mse.double_value(&[]) - 1.0).abs() < 1e-6);
    }
}
