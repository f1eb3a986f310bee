//! Optimizer step operations for adversarial training
//!
//! The external training loop alternates the two step functions, each
//! restricted to its own sub-network: the discriminator step only updates
//! parameters in the discriminator store, the generator step only updates
//! parameters in the generator store.
//!
//! Batch-norm running statistics are refreshed by the forward passes in
//! train mode, so they are already current when the gradient step runs.

use tch::{nn, Tensor};
use tracing::debug;

use crate::model::ConvGan;

use super::losses::{discriminator_loss, generator_loss, reconstruction_mse};

/// Result of one discriminator update
#[derive(Debug, Clone, Copy)]
pub struct DiscriminatorStepStats {
    /// Discriminator loss (sum of real and fake cross-entropy terms)
    pub loss: f64,
    /// Fraction of real samples classified as real
    pub real_accuracy: f64,
    /// Fraction of fake samples classified as fake
    pub fake_accuracy: f64,
}

/// One discriminator update
///
/// Runs the generator on `noise`, squashes its raw output with tanh before
/// discriminating it (the fake batch is detached so only discriminator
/// parameters receive gradients), discriminates the real batch with the same
/// shared parameters, and steps the discriminator optimizer on the summed
/// cross-entropy loss.
///
/// # Arguments
///
/// * `gan` - Model context
/// * `noise` - Tensor of shape (batch, latent_dim)
/// * `real_images` - Tensor of shape (batch, image_size, image_size, channels)
/// * `opt` - Optimizer built over the discriminator store
pub fn discriminator_step(
    gan: &ConvGan,
    noise: &Tensor,
    real_images: &Tensor,
    opt: &mut nn::Optimizer,
) -> DiscriminatorStepStats {
    let fake_images = gan.generator.forward_t(noise, true);
    let fake_input = fake_images.tanh().detach();

    let fake_logits = gan.discriminator.forward_t(&fake_input, true);
    let real_logits = gan.discriminator.forward_t(real_images, true);

    let loss = discriminator_loss(&real_logits, &fake_logits);

    opt.zero_grad();
    loss.backward();
    opt.step();

    let real_accuracy = real_logits
        .sigmoid()
        .ge(0.5)
        .to_kind(tch::Kind::Float)
        .mean(tch::Kind::Float)
        .double_value(&[]);
    let fake_accuracy = fake_logits
        .sigmoid()
        .lt(0.5)
        .to_kind(tch::Kind::Float)
        .mean(tch::Kind::Float)
        .double_value(&[]);

    let stats = DiscriminatorStepStats {
        loss: loss.double_value(&[]),
        real_accuracy,
        fake_accuracy,
    };

    debug!(
        "discriminator step: loss={:.4} real_acc={:.2} fake_acc={:.2}",
        stats.loss, stats.real_accuracy, stats.fake_accuracy
    );

    stats
}

/// One generator update
///
/// Runs the generator on `noise`, discriminates the tanh-squashed fake batch
/// with gradients flowing back into the generator, and steps the generator
/// optimizer on the cross-entropy of the fake logits against an all-ones
/// target.
///
/// # Arguments
///
/// * `gan` - Model context
/// * `noise` - Tensor of shape (batch, latent_dim)
/// * `opt` - Optimizer built over the generator store
///
/// # Returns
///
/// Generator loss value
pub fn generator_step(gan: &ConvGan, noise: &Tensor, opt: &mut nn::Optimizer) -> f64 {
    let fake_images = gan.generator.forward_t(noise, true);
    let fake_logits = gan.discriminator.forward_t(&fake_images.tanh(), true);

    let loss = generator_loss(&fake_logits);

    opt.zero_grad();
    loss.backward();
    opt.step();

    let loss = loss.double_value(&[]);
    debug!("generator step: loss={:.4}", loss);
    loss
}

/// Diagnostic mean squared error between a generated batch and a real batch
///
/// Monitoring only; no gradients, no parameter updates.
pub fn diagnostic_mse(gan: &ConvGan, noise: &Tensor, real_images: &Tensor) -> f64 {
    tch::no_grad(|| {
        let generated = gan.generator.forward_t(noise, false);
        reconstruction_mse(&generated, real_images).double_value(&[])
    })
}
