use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::connection::Connection;
use crate::network::params::TrainingParams;
use crate::network::topology::Topology;
#[cfg(not(feature = "inference-only"))]
use crate::optim::sgd::LayerGradients;

/// Where a neuron id points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NeuronSlot {
    Regular { layer: usize, index: usize },
    Bias { layer: usize },
}

/// A constructed topology: layer sizes plus one `Layer` per non-input layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Graph {
    pub topology: Topology,
    pub layer_sizes: Vec<usize>,
    pub layers: Vec<Layer>,
}

impl Graph {
    /// Assumes `topology.validate(layer_sizes)` already passed.
    pub fn build<R: Rng + ?Sized>(
        topology: Topology,
        layer_sizes: &[usize],
        params: &TrainingParams,
        rng: &mut R,
    ) -> Graph {
        let last = layer_sizes.len() - 1;
        let layers = (1..layer_sizes.len())
            .map(|k| {
                let fan_in: usize = layer_sizes[topology.source_layers(k)].iter().sum();
                let mask = topology.mask(fan_in, layer_sizes[k], rng);
                let (activation, steepness) = if k == last {
                    (params.activation_output, params.steepness_output)
                } else {
                    (params.activation_hidden, params.steepness_hidden)
                };
                Layer::new(layer_sizes[k], mask, activation, steepness, rng)
            })
            .collect();

        Graph {
            topology,
            layer_sizes: layer_sizes.to_vec(),
            layers,
        }
    }

    /// Checks a deserialized graph: one `Layer` per non-input layer, a valid
    /// layer sequence, and weight shapes that match the topology.
    pub fn validate(&self) -> Result<()> {
        if self.layers.len() + 1 != self.layer_sizes.len() {
            return Err(Error::mismatch("layer sizes", self.layers.len() + 1, self.layer_sizes.len()));
        }
        self.topology.validate(&self.layer_sizes)?;

        for k in 1..self.num_layers() {
            let layer = &self.layers[k - 1];
            let fan_in: usize = self.layer_sizes[self.topology.source_layers(k)].iter().sum();
            let size = self.layer_sizes[k];
            if layer.size != size {
                return Err(Error::mismatch("layer size", size, layer.size));
            }
            check_shape("layer weights", &layer.weights, fan_in, size)?;
            check_shape("layer mask", &layer.mask, fan_in, size)?;
            check_shape("layer biases", &layer.biases, 1, size)?;
        }
        Ok(())
    }

    pub fn num_layers(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn num_input(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn num_output(&self) -> usize {
        self.layer_sizes[self.num_layers() - 1]
    }

    pub fn bias_count(&self, layer: usize) -> usize {
        self.topology.bias_count(layer, self.num_layers())
    }

    /// Id of the first neuron of `layer`.
    pub fn first_neuron(&self, layer: usize) -> usize {
        (0..layer).map(|l| self.layer_sizes[l] + self.bias_count(l)).sum()
    }

    pub fn total_neurons(&self) -> usize {
        self.first_neuron(self.num_layers())
    }

    pub fn total_connections(&self) -> usize {
        self.layers.iter().map(Layer::num_connections).sum()
    }

    pub fn locate(&self, neuron: usize) -> Option<NeuronSlot> {
        let mut first = 0;
        for (layer, &size) in self.layer_sizes.iter().enumerate() {
            let bias = self.bias_count(layer);
            if neuron < first + size {
                return Some(NeuronSlot::Regular { layer, index: neuron - first });
            }
            if neuron < first + size + bias {
                return Some(NeuronSlot::Bias { layer });
            }
            first += size + bias;
        }
        None
    }

    /// Values of every source neuron of layer `k`, in weight-row order.
    fn gather(&self, values: &[Vec<f64>], k: usize) -> Vec<f64> {
        self.topology.source_layers(k)
            .flat_map(|s| values[s].iter().copied())
            .collect()
    }

    /// Row of `weights` in layer `k` that holds source neuron `index` of layer `source`.
    fn source_row(&self, k: usize, source: usize, index: usize) -> Option<usize> {
        let range = self.topology.source_layers(k);
        if !range.contains(&source) {
            return None;
        }
        let offset: usize = self.layer_sizes[range.start..source].iter().sum();
        Some(offset + index)
    }

    /// Forward pass; returns the values of every layer, input layer first.
    pub fn forward(&mut self, input: &[f64]) -> Vec<Vec<f64>> {
        let mut values = Vec::with_capacity(self.num_layers());
        values.push(input.to_vec());
        for k in 1..self.num_layers() {
            let x = self.gather(&values, k);
            let out = self.layers[k - 1].feed_from(&x);
            values.push(out);
        }
        values
    }

    /// Gradients of every layer for one pattern, all computed against the
    /// current weights. `output_error` is ∂L/∂a of the output layer and
    /// `values` the result of the matching `forward`.
    #[cfg(not(feature = "inference-only"))]
    pub fn gradients(&self, values: &[Vec<f64>], output_error: Vec<f64>) -> Vec<LayerGradients> {
        let n = self.num_layers();
        let mut errors: Vec<Vec<f64>> = values.iter().map(|v| vec![0.0; v.len()]).collect();
        errors[n - 1] = output_error;

        let mut gradients = Vec::with_capacity(self.layers.len());
        for k in (1..n).rev() {
            let layer = &self.layers[k - 1];
            let inputs = self.gather(values, k);
            let (w_grad, b_grad) = layer.compute_gradients(&errors[k], &inputs);

            let sources = self.topology.source_layers(k);
            if sources.end > 1 {
                // Shortcut layers push error into every earlier layer at once.
                let back = layer.backpropagate(&b_grad);
                let mut offset = 0;
                for s in sources {
                    let width = self.layer_sizes[s];
                    if s > 0 {
                        for (e, b) in errors[s].iter_mut().zip(&back[offset..offset + width]) {
                            *e += b;
                        }
                    }
                    offset += width;
                }
            }
            gradients.push((w_grad, b_grad));
        }
        gradients.reverse();
        gradients
    }

    /// Every connection, ordered by destination id then source id.
    pub fn connections(&self) -> Vec<Connection> {
        let mut all = Vec::with_capacity(self.total_connections());
        for k in 1..self.num_layers() {
            let layer = &self.layers[k - 1];
            let bias_layer = self.topology.bias_source(k);
            let bias_id = self.first_neuron(bias_layer) + self.layer_sizes[bias_layer];
            let first = self.first_neuron(k);

            for j in 0..layer.size {
                let mut incoming = Vec::with_capacity(layer.fan_in() + 1);
                let mut row = 0;
                for s in self.topology.source_layers(k) {
                    let source_first = self.first_neuron(s);
                    for i in 0..self.layer_sizes[s] {
                        if layer.is_connected(row, j) {
                            incoming.push(Connection::new(source_first + i, first + j, layer.weights.data[row][j]));
                        }
                        row += 1;
                    }
                }
                incoming.push(Connection::new(bias_id, first + j, layer.biases.data[0][j]));
                incoming.sort_by_key(|c| c.from_neuron);
                all.extend(incoming);
            }
        }
        all
    }

    /// Overwrites the weight of an existing connection; returns false when
    /// there is no such connection.
    pub fn set_weight(&mut self, from: usize, to: usize, weight: f64) -> bool {
        let (k, j) = match self.locate(to) {
            Some(NeuronSlot::Regular { layer, index }) if layer > 0 => (layer, index),
            _ => return false,
        };
        match self.locate(from) {
            Some(NeuronSlot::Bias { layer }) if layer == self.topology.bias_source(k) => {
                self.layers[k - 1].biases.data[0][j] = weight;
                true
            }
            Some(NeuronSlot::Regular { layer, index }) => match self.source_row(k, layer, index) {
                Some(row) if self.layers[k - 1].is_connected(row, j) => {
                    self.layers[k - 1].weights.data[row][j] = weight;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

fn check_shape(what: &'static str, matrix: &Matrix, rows: usize, cols: usize) -> Result<()> {
    if !matrix.has_shape(rows, cols) {
        let actual = matrix.data.iter().map(Vec::len).sum();
        return Err(Error::mismatch(what, rows * cols, actual));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn graph(topology: Topology, layers: &[usize]) -> Graph {
        Graph::build(topology, layers, &TrainingParams::default(), &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn built_graphs_validate() {
        assert!(graph(Topology::Standard, &[2, 3, 1]).validate().is_ok());
        assert!(graph(Topology::Shortcut, &[2, 3, 1]).validate().is_ok());
        assert!(graph(Topology::Sparse { connection_rate: 0.5 }, &[4, 4, 2]).validate().is_ok());
    }

    #[test]
    fn validate_rejects_inconsistent_graphs() {
        let mut extra_layer = graph(Topology::Standard, &[2, 3, 1]);
        extra_layer.layer_sizes.push(4);
        assert!(matches!(extra_layer.validate(), Err(Error::DimensionMismatch { .. })));

        let mut resized = graph(Topology::Standard, &[2, 3, 1]);
        resized.layer_sizes = vec![2, 4, 1];
        assert!(resized.validate().is_err());

        // Same sizes, but a standard layer has no rows for shortcut sources.
        let mut rewired = graph(Topology::Standard, &[2, 3, 1]);
        rewired.topology = Topology::Shortcut;
        assert!(rewired.validate().is_err());

        let mut empty = graph(Topology::Standard, &[2, 1]);
        empty.layer_sizes = vec![0, 1];
        assert!(matches!(empty.validate(), Err(Error::Construction(_))));
    }
}
