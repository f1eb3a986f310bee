//! Training metrics for monitoring GAN progress
//!
//! Tracks per-epoch losses, the reconstruction MSE diagnostic, and
//! discriminator accuracies, with CSV export for offline inspection.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Aggregated statistics for one training epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number
    pub epoch: usize,
    /// Mean generator loss over the epoch
    pub gen_loss: f64,
    /// Mean discriminator loss over the epoch
    pub disc_loss: f64,
    /// Mean reconstruction MSE diagnostic over the epoch
    pub mse: f64,
    /// Mean discriminator accuracy on real samples
    pub real_accuracy: f64,
    /// Mean discriminator accuracy on fake samples
    pub fake_accuracy: f64,
}

/// History of epoch statistics collected during training
#[derive(Debug, Clone, Default)]
pub struct TrainingMetrics {
    history: Vec<EpochStats>,
}

impl TrainingMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one epoch of statistics
    ///
    /// The epoch number is assigned from the current history length.
    pub fn record_epoch(
        &mut self,
        gen_loss: f64,
        disc_loss: f64,
        mse: f64,
        real_accuracy: f64,
        fake_accuracy: f64,
    ) {
        self.history.push(EpochStats {
            epoch: self.history.len() + 1,
            gen_loss,
            disc_loss,
            mse,
            real_accuracy,
            fake_accuracy,
        });
    }

    /// Get number of recorded epochs
    pub fn num_epochs(&self) -> usize {
        self.history.len()
    }

    /// Full epoch history, oldest first
    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    /// Get latest epoch statistics
    pub fn latest(&self) -> Option<&EpochStats> {
        self.history.last()
    }

    /// Moving average of generator loss over the last `window` epochs
    pub fn gen_loss_ma(&self, window: usize) -> f64 {
        moving_average(self.history.iter().map(|s| s.gen_loss), window)
    }

    /// Moving average of discriminator loss over the last `window` epochs
    pub fn disc_loss_ma(&self, window: usize) -> f64 {
        moving_average(self.history.iter().map(|s| s.disc_loss), window)
    }

    /// Check if training appears to have collapsed
    ///
    /// Mode collapse indicators:
    /// - Discriminator loss very low (can easily distinguish)
    /// - Generator loss very high (can't fool discriminator)
    pub fn check_mode_collapse(&self, window: usize) -> bool {
        if self.num_epochs() < window {
            return false;
        }

        // Heuristic thresholds
        self.disc_loss_ma(window) < 0.1 && self.gen_loss_ma(window) > 5.0
    }

    /// Check if training is balanced
    ///
    /// Good training keeps both discriminator accuracies away from the
    /// extremes.
    pub fn is_balanced(&self, window: usize) -> bool {
        if self.num_epochs() < window {
            return true;
        }

        let real_ma = moving_average(self.history.iter().map(|s| s.real_accuracy), window);
        let fake_ma = moving_average(self.history.iter().map(|s| s.fake_accuracy), window);

        (0.3..0.9).contains(&real_ma) && (0.3..0.9).contains(&fake_ma)
    }

    /// Save metrics to CSV file
    pub fn save_csv(&self, path: &str) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for stats in &self.history {
            writer.serialize(stats)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load metrics from CSV file
    pub fn load_csv(path: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut history = Vec::new();
        for record in reader.deserialize() {
            history.push(record?);
        }
        Ok(Self { history })
    }
}

/// Average of the last `window` values of an iterator
fn moving_average(values: impl DoubleEndedIterator<Item = f64>, window: usize) -> f64 {
    let recent: Vec<f64> = values.rev().take(window.max(1)).collect();
    if recent.is_empty() {
        return 0.0;
    }
    recent.iter().sum::<f64>() / recent.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_latest() {
        let mut metrics = TrainingMetrics::new();

        metrics.record_epoch(1.5, 0.8, 0.4, 0.6, 0.7);
        metrics.record_epoch(1.3, 0.75, 0.35, 0.65, 0.68);

        assert_eq!(metrics.num_epochs(), 2);
        let latest = metrics.latest().unwrap();
        assert_eq!(latest.epoch, 2);
        assert_eq!(latest.gen_loss, 1.3);
        assert_eq!(latest.mse, 0.35);
    }

    #[test]
    fn test_moving_averages() {
        let mut metrics = TrainingMetrics::new();
        metrics.record_epoch(1.0, 2.0, 0.0, 0.5, 0.5);
        metrics.record_epoch(3.0, 4.0, 0.0, 0.5, 0.5);

        assert_eq!(metrics.gen_loss_ma(2), 2.0);
        assert_eq!(metrics.disc_loss_ma(1), 4.0);
        // Window larger than history averages what exists
        assert_eq!(metrics.gen_loss_ma(10), 2.0);
    }

    #[test]
    fn test_mode_collapse_detection() {
        let mut metrics = TrainingMetrics::new();
        for _ in 0..10 {
            metrics.record_epoch(8.0, 0.01, 0.5, 0.99, 0.99);
        }

        assert!(metrics.check_mode_collapse(10));
        assert!(!metrics.is_balanced(10));
    }

    #[test]
    fn test_healthy_training_not_flagged() {
        let mut metrics = TrainingMetrics::new();
        for _ in 0..10 {
            metrics.record_epoch(1.2, 1.1, 0.5, 0.6, 0.55);
        }

        assert!(!metrics.check_mode_collapse(10));
        assert!(metrics.is_balanced(10));
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        let path = path.to_str().unwrap();

        let mut metrics = TrainingMetrics::new();
        metrics.record_epoch(1.5, 0.8, 0.4, 0.6, 0.7);
        metrics.record_epoch(1.3, 0.75, 0.35, 0.65, 0.68);
        metrics.save_csv(path).unwrap();

        let loaded = TrainingMetrics::load_csv(path).unwrap();
        assert_eq!(loaded.history(), metrics.history());
    }
}
