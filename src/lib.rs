//! A from-scratch feedforward neural network engine.
//!
//! Networks are built from a layer-size sequence in one of three topologies
//! (standard, sparse, shortcut), run forward on fixed-width inputs and
//! trained one pattern at a time by incremental backpropagation.
//!
//! ```rust
//! use ferrite_ann::{Network, TrainingData, TrainConfig, train_on_data, test_data};
//!
//! # fn main() -> ferrite_ann::Result<()> {
//! let data = TrainingData::from_rows(
//!     &[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
//!     &[vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
//! )?;
//! let mut network = Network::standard(&[2, 3, 1])?;
//! train_on_data(&mut network, &data, &TrainConfig::new(500, 0, 0.001))?;
//! let output = network.run(&[1.0, 0.0])?;
//! assert_eq!(output.len(), 1);
//! assert!(output.is_owned());
//! let _mse = test_data(&mut network, &data)?;
//! # Ok(())
//! # }
//! ```

pub mod math;
pub mod activation;
pub mod buffer;
pub mod data;
pub mod error;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use buffer::handle::Buffer;
pub use data::training_data::TrainingData;
pub use error::{ConstructionError, Error, Result};
pub use layers::dense::Layer;
pub use network::{CascadeParams, Connection, Network, NetworkSpec, Topology, TrainingParams};
pub use loss::{ErrorFunction, MseLoss};
pub use optim::sgd::Sgd;
pub use train::{test_data, EpochStats, TrainConfig};
#[cfg(not(feature = "inference-only"))]
pub use train::{train_epoch, train_on_data};
