use serde::{Serialize, Deserialize};

/// One weighted edge of the network, addressed by neuron ids.
///
/// Neuron ids count every neuron layer by layer, with a layer's bias neuron
/// (if it has one) numbered right after its last regular neuron.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from_neuron: usize,
    pub to_neuron: usize,
    pub weight: f64,
}

impl Connection {
    pub fn new(from_neuron: usize, to_neuron: usize, weight: f64) -> Connection {
        Connection { from_neuron, to_neuron, weight }
    }
}
