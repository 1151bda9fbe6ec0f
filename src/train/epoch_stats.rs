use serde::{Serialize, Deserialize};

/// Statistics reported by `train_on_data`.
///
/// One value is emitted every `epochs_between_reports` epochs and once for
/// the final epoch, to the log and to the optional `progress_tx` channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Maximum epochs requested for this run.
    pub max_epochs: usize,
    /// MSE accumulated while training this epoch.
    pub mse: f64,
    /// Output values that missed their target by at least the bit-fail limit.
    pub bit_fail: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
