use ferrite_ann::{train_on_data, ActivationFunction, Network, TrainConfig, TrainingData};

fn main() -> ferrite_ann::Result<()> {
    let data = TrainingData::from_rows(
        &[
            vec![-1.0, -1.0],
            vec![-1.0, 1.0],
            vec![1.0, -1.0],
            vec![1.0, 1.0],
        ],
        &[vec![-1.0], vec![1.0], vec![1.0], vec![-1.0]],
    )?;

    let mut network = Network::standard(&[2, 3, 1])?;
    network.set_activation_function_hidden(ActivationFunction::SigmoidSymmetric);
    network.set_activation_function_output(ActivationFunction::SigmoidSymmetric);

    let (tx, rx) = std::sync::mpsc::channel();
    let config = TrainConfig {
        progress_tx: Some(tx),
        ..TrainConfig::new(500_000, 1000, 0.001)
    };
    let mse = train_on_data(&mut network, &data, &config)?;
    drop(config);

    for stats in rx.iter() {
        println!("Epoch {}: mse = {:.6}, bit fail = {}", stats.epoch, stats.mse, stats.bit_fail);
    }
    println!("Final mse: {mse:.6}");

    for (input, expected) in data.iter() {
        let output = network.run(input)?;
        println!("Input: {:?} -> Output: {:.4} (expected {})", input, output[0], expected[0]);
    }

    println!("Connections:");
    for c in network.connections()?.iter() {
        println!("  {} -> {}: {:.4}", c.from_neuron, c.to_neuron, c.weight);
    }
    Ok(())
}
