pub mod epoch_stats;
#[cfg(not(feature = "inference-only"))]
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::EpochStats;
#[cfg(not(feature = "inference-only"))]
pub use loop_fn::train_on_data;
pub use train_config::TrainConfig;
#[cfg(not(feature = "inference-only"))]
pub use trainer::train_epoch;
pub use trainer::test_data;
