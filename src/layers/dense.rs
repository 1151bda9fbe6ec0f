use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// One non-input layer.
///
/// `weights` has shape `(fan_in, size)`: row `i` holds the weights from the
/// layer's `i`-th source neuron. `mask` has the same shape and is `1.0` where
/// a connection exists; absent connections keep a zero weight forever.
/// Every neuron is connected to exactly one bias neuron, weighted by `biases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub mask: Matrix,
    pub activator: ActivationFunction,
    pub steepness: f64,
    #[serde(skip)]
    pub neurons: Vec<f64>,
    #[serde(skip)]
    sums: Vec<f64>,  // steepness-scaled sums of the last forward pass
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        mask: Matrix,
        activation: ActivationFunction,
        steepness: f64,
        rng: &mut R,
    ) -> Layer {
        let mut layer = Layer {
            size,
            weights: Matrix::zeros(mask.rows, size),
            biases: Matrix::zeros(1, size),
            mask,
            activator: activation,
            steepness,
            neurons: vec![0.0; size],
            sums: vec![0.0; size],
        };
        layer.randomize(-0.1, 0.1, rng);
        layer
    }

    /// Number of source neurons, bias excluded.
    pub fn fan_in(&self) -> usize {
        self.weights.rows
    }

    /// Connections into this layer, bias connections included.
    pub fn num_connections(&self) -> usize {
        self.mask.count_nonzero() + self.size
    }

    pub fn is_connected(&self, source: usize, neuron: usize) -> bool {
        source < self.mask.rows && neuron < self.size && self.mask.data[source][neuron] != 0.0
    }

    /// Re-draws every existing weight uniformly from `[min, max]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, min: f64, max: f64, rng: &mut R) {
        self.weights = Matrix::random(self.mask.rows, self.size, min, max, rng).hadamard(&self.mask);
        self.biases = Matrix::random(1, self.size, min, max, rng);
    }

    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        let steepness = self.steepness;
        self.sums = z.data[0].iter().map(|&s| steepness * s).collect();
        self.neurons = self.sums.iter().map(|&x| self.activator.function(x)).collect();
        self.neurons.clone()
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `error` is ∂L/∂a for this layer and `inputs` the source values it was fed.
    /// The bias gradient doubles as the layer delta δ = error ⊙ σ'(sum).
    pub fn compute_gradients(&self, error: &[f64], inputs: &[f64]) -> (Matrix, Matrix) {
        let delta: Vec<f64> = error.iter().enumerate()
            .map(|(j, e)| e * self.activator.derivative(self.steepness, self.sums[j], self.neurons[j]))
            .collect();
        let layer_delta = Matrix::row(&delta);

        let weights_adjustment = (&Matrix::row(inputs).transpose() * &layer_delta).hadamard(&self.mask);

        (weights_adjustment, layer_delta)
    }

    /// Propagates the layer delta back to its sources: ∂L/∂a for each source neuron.
    pub fn backpropagate(&self, layer_delta: &Matrix) -> Vec<f64> {
        let back = layer_delta * &self.weights.transpose();
        back.data.into_iter().next().unwrap_or_default()
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = &self.weights - &weights_grad.map(|x| x * lr);
        self.biases = &self.biases - &biases_grad.map(|x| x * lr);
    }
}
