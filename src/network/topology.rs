use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::ConstructionError;
use crate::math::matrix::Matrix;

/// How the layers of a network are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// Every neuron connected to every neuron of the previous layer.
    Standard,
    /// Adjacent layers only, keeping `connection_rate` of the possible connections.
    Sparse { connection_rate: f64 },
    /// Every layer connected to all earlier layers, not just the previous one.
    Shortcut,
}

impl Topology {
    /// 1.0 for fully connected topologies.
    pub fn connection_rate(&self) -> f64 {
        match self {
            Topology::Sparse { connection_rate } => *connection_rate,
            _ => 1.0,
        }
    }

    pub fn is_shortcut(&self) -> bool {
        matches!(self, Topology::Shortcut)
    }

    /// Checks a layer-size sequence (and connection rate) before anything is built.
    pub fn validate(&self, layers: &[usize]) -> Result<(), ConstructionError> {
        if layers.len() < 2 {
            return Err(ConstructionError::TooFewLayers(layers.len()));
        }
        if let Some(index) = layers.iter().position(|&size| size == 0) {
            return Err(ConstructionError::EmptyLayer(index));
        }
        if let Topology::Sparse { connection_rate } = self {
            if !(connection_rate.is_finite() && *connection_rate > 0.0 && *connection_rate <= 1.0) {
                return Err(ConstructionError::InvalidConnectionRate(*connection_rate));
            }
        }
        Ok(())
    }

    /// Bias neurons in layer `layer` of a `num_layers`-layer network.
    ///
    /// Layered networks carry one bias in every layer but the output layer;
    /// shortcut networks share the single bias of the input layer.
    pub fn bias_count(&self, layer: usize, num_layers: usize) -> usize {
        let has_bias = match self {
            Topology::Shortcut => layer == 0,
            _ => layer + 1 < num_layers,
        };
        usize::from(has_bias)
    }

    /// Layers whose neurons feed layer `layer` (which must be > 0).
    pub fn source_layers(&self, layer: usize) -> std::ops::Range<usize> {
        match self {
            Topology::Shortcut => 0..layer,
            _ => layer - 1..layer,
        }
    }

    /// The layer whose bias neuron feeds layer `layer`.
    pub fn bias_source(&self, layer: usize) -> usize {
        match self {
            Topology::Shortcut => 0,
            _ => layer - 1,
        }
    }

    /// Connectivity mask of shape `(fan_in, size)` for one layer.
    pub fn mask<R: Rng + ?Sized>(&self, fan_in: usize, size: usize, rng: &mut R) -> Matrix {
        match self {
            Topology::Sparse { connection_rate } if *connection_rate < 1.0 => {
                sparse_mask(fan_in, size, *connection_rate, rng)
            }
            _ => Matrix::filled(fan_in, size, 1.0),
        }
    }
}

/// Keeps `round(rate * n_in * n_out)` connections, but never fewer than
/// `max(n_in, n_out)` so every source and every destination stays connected.
fn sparse_mask<R: Rng + ?Sized>(n_in: usize, n_out: usize, rate: f64, rng: &mut R) -> Matrix {
    let max_connections = n_in * n_out;
    let min_connections = n_in.max(n_out);
    let wanted = ((rate * max_connections as f64).round() as usize).clamp(min_connections, max_connections);

    let mut mask = Matrix::zeros(n_in, n_out);

    // Pair shuffled sources with shuffled destinations; the pairs are distinct
    // because one of the two indices never wraps.
    let mut sources: Vec<usize> = (0..n_in).collect();
    let mut destinations: Vec<usize> = (0..n_out).collect();
    sources.shuffle(rng);
    destinations.shuffle(rng);
    for t in 0..min_connections {
        mask.data[sources[t % n_in]][destinations[t % n_out]] = 1.0;
    }

    let mut free: Vec<(usize, usize)> = (0..n_in)
        .flat_map(|i| (0..n_out).map(move |j| (i, j)))
        .filter(|&(i, j)| mask.data[i][j] == 0.0)
        .collect();
    free.shuffle(rng);
    for &(i, j) in free.iter().take(wanted - min_connections) {
        mask.data[i][j] = 1.0;
    }

    mask
}
