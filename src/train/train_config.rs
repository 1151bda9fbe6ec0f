use std::sync::mpsc;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_on_data` run.
///
/// # Fields
/// - `max_epochs`            : upper bound on full passes over the data
/// - `epochs_between_reports`: report every this many epochs; `0` disables
///                              periodic reports (the final epoch is still reported)
/// - `desired_error`         : stop as soon as an epoch's MSE is at or below this
/// - `progress_tx`           : optional channel sender receiving every report.
///                              If the receiver is dropped the run stops after
///                              the current epoch.
pub struct TrainConfig {
    pub max_epochs: usize,
    pub epochs_between_reports: usize,
    pub desired_error: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(max_epochs: usize, epochs_between_reports: usize, desired_error: f64) -> Self {
        TrainConfig {
            max_epochs,
            epochs_between_reports,
            desired_error,
            progress_tx: None,
        }
    }
}
