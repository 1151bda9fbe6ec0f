use std::time::Instant;

use log::info;

use crate::data::training_data::TrainingData;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{check_dataset, train_epoch};

/// Trains `network` on `data` for up to `config.max_epochs` epochs and
/// returns the MSE of the **last completed epoch**.
///
/// # Early termination
/// The loop stops once an epoch's MSE is at or below `config.desired_error`,
/// or when the `progress_tx` receiver has been dropped.
///
/// # Errors
/// Fails before training starts if the dataset widths do not match the
/// network or the network is unconstructed.
pub fn train_on_data(network: &mut Network, data: &TrainingData, config: &TrainConfig) -> Result<f64> {
    check_dataset(network, data)?;

    let mut last_mse = network.mse();

    for epoch in 1..=config.max_epochs {
        let t_start = Instant::now();
        last_mse = train_epoch(network, data)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let reached = last_mse <= config.desired_error;
        let periodic = config.epochs_between_reports > 0 && epoch % config.epochs_between_reports == 0;
        if !(periodic || reached || epoch == config.max_epochs) {
            continue;
        }

        let stats = EpochStats {
            epoch,
            max_epochs: config.max_epochs,
            mse: last_mse,
            bit_fail: network.bit_fail(),
            elapsed_ms,
        };
        info!(
            "epoch {:>8}. current error: {:.10}. bit fail {}",
            stats.epoch, stats.mse, stats.bit_fail
        );

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }

        if reached {
            break;
        }
    }

    Ok(last_mse)
}
