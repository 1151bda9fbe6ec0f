use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::loss::loss_type::ErrorFunction;
use crate::loss::mse::MseLoss;
use crate::network::cascade::CascadeParams;
use crate::network::connection::Connection;
use crate::network::graph::Graph;
use crate::network::params::TrainingParams;
use crate::network::topology::Topology;
#[cfg(not(feature = "inference-only"))]
use crate::optim::sgd::Sgd;

/// A feedforward network.
///
/// `Network::new()` (or `default()`) is unconstructed: every inference,
/// training and introspection call returns `Error::Unconstructed` until one
/// of the `create_*` constructors succeeds. Training parameters and the
/// cascade parameter set can be configured at any time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    graph: Option<Graph>,
    params: TrainingParams,
    cascade: CascadeParams,
    #[serde(skip)]
    loss: MseLoss,
}

fn constructed(graph: &Option<Graph>) -> Result<&Graph> {
    graph.as_ref().ok_or_else(|| {
        warn!("network used before construction");
        Error::Unconstructed
    })
}

fn constructed_mut(graph: &mut Option<Graph>) -> Result<&mut Graph> {
    graph.as_mut().ok_or_else(|| {
        warn!("network used before construction");
        Error::Unconstructed
    })
}

fn check_width(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        warn!("refusing {what} of length {actual}, network expects {expected}");
        return Err(Error::mismatch(what, expected, actual));
    }
    Ok(())
}

impl Network {
    pub fn new() -> Network {
        Network::default()
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Builds `topology` over `layers` (input width first, output width last)
    /// with weights drawn from `rng`.
    ///
    /// On success any previous topology is replaced and the MSE statistics
    /// are reset. On failure nothing changes.
    pub fn create_with_rng<R: Rng + ?Sized>(
        &mut self,
        topology: Topology,
        layers: &[usize],
        rng: &mut R,
    ) -> Result<()> {
        if let Err(err) = topology.validate(layers) {
            warn!("refusing to construct {topology:?} network {layers:?}: {err}");
            return Err(err.into());
        }
        let graph = Graph::build(topology, layers, &self.params, rng);
        debug!(
            "constructed {:?} network {:?}: {} neurons, {} connections",
            topology,
            layers,
            graph.total_neurons(),
            graph.total_connections()
        );
        self.graph = Some(graph);
        self.loss.reset();
        Ok(())
    }

    /// Fully connected adjacent layers.
    pub fn create_standard(&mut self, layers: &[usize]) -> Result<()> {
        self.create_with_rng(Topology::Standard, layers, &mut rand::thread_rng())
    }

    /// Adjacent layers keeping `connection_rate` (in `(0, 1]`) of the connections.
    pub fn create_sparse(&mut self, connection_rate: f64, layers: &[usize]) -> Result<()> {
        self.create_with_rng(Topology::Sparse { connection_rate }, layers, &mut rand::thread_rng())
    }

    /// Every layer connected to all later layers.
    pub fn create_shortcut(&mut self, layers: &[usize]) -> Result<()> {
        self.create_with_rng(Topology::Shortcut, layers, &mut rand::thread_rng())
    }

    pub fn standard(layers: &[usize]) -> Result<Network> {
        let mut network = Network::new();
        network.create_standard(layers)?;
        Ok(network)
    }

    pub fn sparse(connection_rate: f64, layers: &[usize]) -> Result<Network> {
        let mut network = Network::new();
        network.create_sparse(connection_rate, layers)?;
        Ok(network)
    }

    pub fn shortcut(layers: &[usize]) -> Result<Network> {
        let mut network = Network::new();
        network.create_shortcut(layers)?;
        Ok(network)
    }

    /// Deterministic construction, for reproducible experiments and tests.
    pub fn with_seed(topology: Topology, layers: &[usize], seed: u64) -> Result<Network> {
        let mut network = Network::new();
        network.create_with_rng(topology, layers, &mut StdRng::seed_from_u64(seed))?;
        Ok(network)
    }

    pub fn is_constructed(&self) -> bool {
        self.graph.is_some()
    }

    // ---------------------------------------------------------------------
    // Inference, training, evaluation
    // ---------------------------------------------------------------------

    /// Forward pass. `input` must be exactly `num_input()` long; the result
    /// is `num_output()` long and owned by the caller.
    pub fn run(&mut self, input: &[f64]) -> Result<Buffer<'static, f64>> {
        let graph = constructed_mut(&mut self.graph)?;
        check_width("input", graph.num_input(), input.len())?;
        let mut values = graph.forward(input);
        Ok(Buffer::Owned(values.pop().unwrap_or_default()))
    }

    /// One incremental backpropagation step on a single pattern.
    ///
    /// Deltas for every layer are computed before any weight moves, and a
    /// width mismatch is rejected before anything is computed, so the step
    /// is applied entirely or not at all. Also accumulates the MSE.
    #[cfg(not(feature = "inference-only"))]
    pub fn train(&mut self, input: &[f64], desired_output: &[f64]) -> Result<()> {
        let params = self.params;
        let graph = constructed_mut(&mut self.graph)?;
        check_width("input", graph.num_input(), input.len())?;
        check_width("desired output", graph.num_output(), desired_output.len())?;

        let values = graph.forward(input);
        let output = &values[values.len() - 1];
        let symmetric = graph.layers[graph.layers.len() - 1].activator.is_symmetric();
        let diffs = self.loss.update(output, desired_output, symmetric, params.bit_fail_limit);

        // ∂L/∂a for the output layer; the error function shapes the difference.
        let output_error = diffs.iter()
            .map(|&d| -params.train_error_function.apply(d))
            .collect();
        let gradients = graph.gradients(&values, output_error);
        Sgd::new(params.learning_rate).step(&mut graph.layers, &gradients);
        Ok(())
    }

    /// Forward pass that also accumulates the MSE against `desired_output`.
    /// Weights are not touched.
    pub fn test(&mut self, input: &[f64], desired_output: &[f64]) -> Result<Buffer<'static, f64>> {
        let graph = constructed_mut(&mut self.graph)?;
        check_width("input", graph.num_input(), input.len())?;
        check_width("desired output", graph.num_output(), desired_output.len())?;

        let mut values = graph.forward(input);
        let output = values.pop().unwrap_or_default();
        let symmetric = graph.layers[graph.layers.len() - 1].activator.is_symmetric();
        self.loss.update(&output, desired_output, symmetric, self.params.bit_fail_limit);
        Ok(Buffer::Owned(output))
    }

    /// Mean square error accumulated by `train`/`test` since the last reset.
    pub fn mse(&self) -> f64 {
        self.loss.mse()
    }

    pub fn bit_fail(&self) -> usize {
        self.loss.bit_fail()
    }

    pub fn reset_mse(&mut self) {
        self.loss.reset();
    }

    // ---------------------------------------------------------------------
    // Introspection and weight mutation
    // ---------------------------------------------------------------------

    pub fn num_input(&self) -> Result<usize> {
        Ok(constructed(&self.graph)?.num_input())
    }

    pub fn num_output(&self) -> Result<usize> {
        Ok(constructed(&self.graph)?.num_output())
    }

    pub fn num_layers(&self) -> Result<usize> {
        Ok(constructed(&self.graph)?.num_layers())
    }

    /// Neuron count including bias neurons.
    pub fn total_neurons(&self) -> Result<usize> {
        Ok(constructed(&self.graph)?.total_neurons())
    }

    /// Connection count including bias connections.
    pub fn total_connections(&self) -> Result<usize> {
        Ok(constructed(&self.graph)?.total_connections())
    }

    pub fn network_type(&self) -> Result<Topology> {
        Ok(constructed(&self.graph)?.topology)
    }

    pub fn connection_rate(&self) -> Result<f64> {
        Ok(constructed(&self.graph)?.topology.connection_rate())
    }

    /// Neurons per layer, bias excluded, input layer first.
    pub fn layer_sizes(&self) -> Result<Buffer<'static, usize>> {
        Ok(Buffer::Owned(constructed(&self.graph)?.layer_sizes.clone()))
    }

    /// Bias neurons per layer.
    pub fn bias_counts(&self) -> Result<Buffer<'static, usize>> {
        let graph = constructed(&self.graph)?;
        Ok(Buffer::Owned((0..graph.num_layers()).map(|l| graph.bias_count(l)).collect()))
    }

    /// Every connection (bias connections included) with its current weight.
    pub fn connections(&self) -> Result<Buffer<'static, Connection>> {
        Ok(Buffer::Owned(constructed(&self.graph)?.connections()))
    }

    /// Overwrites the weights of the listed connections that exist in the
    /// network and ignores the rest. Returns how many records were applied.
    pub fn set_weights(&mut self, connections: &[Connection]) -> Result<usize> {
        let graph = constructed_mut(&mut self.graph)?;
        let applied = connections.iter()
            .filter(|c| graph.set_weight(c.from_neuron, c.to_neuron, c.weight))
            .count();
        if applied < connections.len() {
            debug!("ignored {} weights for connections not in the network", connections.len() - applied);
        }
        Ok(applied)
    }

    /// Single-connection form of `set_weights`; false when no such connection exists.
    pub fn set_weight(&mut self, from_neuron: usize, to_neuron: usize, weight: f64) -> Result<bool> {
        Ok(constructed_mut(&mut self.graph)?.set_weight(from_neuron, to_neuron, weight))
    }

    /// Re-draws every existing weight uniformly from `[min, max]`.
    pub fn randomize_weights(&mut self, min: f64, max: f64) -> Result<()> {
        self.randomize_weights_with_rng(min, max, &mut rand::thread_rng())
    }

    pub fn randomize_weights_with_rng<R: Rng + ?Sized>(&mut self, min: f64, max: f64, rng: &mut R) -> Result<()> {
        let graph = constructed_mut(&mut self.graph)?;
        for layer in &mut graph.layers {
            layer.randomize(min, max, rng);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Training parameters
    // ---------------------------------------------------------------------

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    pub fn learning_rate(&self) -> f64 {
        self.params.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.params.learning_rate = learning_rate;
    }

    pub fn set_train_error_function(&mut self, error_function: ErrorFunction) {
        self.params.train_error_function = error_function;
    }

    pub fn set_bit_fail_limit(&mut self, limit: f64) {
        self.params.bit_fail_limit = limit;
    }

    /// Applies to every hidden layer now and to future constructions.
    pub fn set_activation_function_hidden(&mut self, activation: ActivationFunction) {
        self.params.activation_hidden = activation;
        for layer in self.hidden_layers_mut() {
            layer.activator = activation;
        }
    }

    pub fn set_activation_function_output(&mut self, activation: ActivationFunction) {
        self.params.activation_output = activation;
        if let Some(layer) = self.output_layer_mut() {
            layer.activator = activation;
        }
    }

    pub fn set_activation_steepness_hidden(&mut self, steepness: f64) {
        self.params.steepness_hidden = steepness;
        for layer in self.hidden_layers_mut() {
            layer.steepness = steepness;
        }
    }

    pub fn set_activation_steepness_output(&mut self, steepness: f64) {
        self.params.steepness_output = steepness;
        if let Some(layer) = self.output_layer_mut() {
            layer.steepness = steepness;
        }
    }

    /// Replaces all training parameters, re-applying activations and steepnesses.
    pub fn set_params(&mut self, params: TrainingParams) {
        self.params = params;
        self.set_activation_function_hidden(params.activation_hidden);
        self.set_activation_function_output(params.activation_output);
        self.set_activation_steepness_hidden(params.steepness_hidden);
        self.set_activation_steepness_output(params.steepness_output);
    }

    fn hidden_layers_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        let layers: &mut [Layer] = match self.graph.as_mut() {
            Some(graph) => {
                let hidden = graph.layers.len() - 1;
                &mut graph.layers[..hidden]
            }
            None => Default::default(),
        };
        layers.iter_mut()
    }

    fn output_layer_mut(&mut self) -> Option<&mut Layer> {
        self.graph.as_mut().and_then(|graph| graph.layers.last_mut())
    }

    // ---------------------------------------------------------------------
    // Cascade parameter set
    // ---------------------------------------------------------------------

    pub fn cascade(&self) -> &CascadeParams {
        &self.cascade
    }

    /// Swaps the whole cascade parameter set; topology and weights are untouched.
    pub fn set_cascade(&mut self, cascade: CascadeParams) {
        self.cascade = cascade;
    }

    /// Borrowed view; default `[0.25, 0.50, 0.75, 1.00]`.
    pub fn cascade_activation_steepnesses(&self) -> Buffer<'_, f64> {
        Buffer::Borrowed(&self.cascade.activation_steepnesses)
    }

    pub fn set_cascade_activation_steepnesses(&mut self, steepnesses: &[f64]) {
        self.cascade.activation_steepnesses = steepnesses.to_vec();
    }

    pub fn cascade_activation_functions(&self) -> Buffer<'_, ActivationFunction> {
        Buffer::Borrowed(&self.cascade.activation_functions)
    }

    pub fn set_cascade_activation_functions(&mut self, functions: &[ActivationFunction]) {
        self.cascade.activation_functions = functions.to_vec();
    }

    pub fn cascade_num_candidate_groups(&self) -> usize {
        self.cascade.num_candidate_groups
    }

    pub fn set_cascade_num_candidate_groups(&mut self, groups: usize) {
        self.cascade.num_candidate_groups = groups;
    }

    pub fn cascade_num_candidates(&self) -> usize {
        self.cascade.num_candidates()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Serializes the network (topology, weights, parameters) to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    ///
    /// Files whose layer sizes disagree with the stored layers or weight
    /// shapes are rejected.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        if let Some(graph) = &network.graph {
            if let Err(err) = graph.validate() {
                warn!("refusing network from {path}: {err}");
                return Err(err);
            }
        }
        Ok(network)
    }
}
