use crate::{
    data::training_data::TrainingData,
    error::{Error, Result},
    network::network::Network,
};

/// Checks that `data` fits the network before any example is presented.
pub(crate) fn check_dataset(network: &Network, data: &TrainingData) -> Result<()> {
    let num_input = network.num_input()?;
    let num_output = network.num_output()?;
    if data.is_empty() {
        return Ok(());
    }
    if data.num_input() != num_input {
        return Err(Error::mismatch("dataset input width", num_input, data.num_input()));
    }
    if data.num_output() != num_output {
        return Err(Error::mismatch("dataset output width", num_output, data.num_output()));
    }
    Ok(())
}

/// Presents every example once, in order, with one incremental `train` step
/// each. Returns the MSE accumulated over the epoch.
#[cfg(not(feature = "inference-only"))]
pub fn train_epoch(network: &mut Network, data: &TrainingData) -> Result<f64> {
    check_dataset(network, data)?;
    network.reset_mse();
    for (input, expected) in data.iter() {
        network.train(input, expected)?;
    }
    Ok(network.mse())
}

/// Tests every example and returns the MSE over the whole dataset.
/// Weights are not touched; previous MSE statistics are discarded.
pub fn test_data(network: &mut Network, data: &TrainingData) -> Result<f64> {
    check_dataset(network, data)?;
    network.reset_mse();
    for (input, expected) in data.iter() {
        network.test(input, expected)?;
    }
    Ok(network.mse())
}
