use crate::{math::matrix::Matrix, layers::dense::Layer};

/// Plain stochastic gradient descent, applied once per presented pattern.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

/// (weights_grad, biases_grad) for one layer.
pub type LayerGradients = (Matrix, Matrix);

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Updates every layer from gradients computed against the same weights.
    /// `gradients[i]` belongs to `layers[i]`.
    pub fn step(&self, layers: &mut [Layer], gradients: &[LayerGradients]) {
        for (layer, (weights_grad, biases_grad)) in layers.iter_mut().zip(gradients) {
            layer.apply_gradients(weights_grad, biases_grad, self.learning_rate);
        }
    }
}
