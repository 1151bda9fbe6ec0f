use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::cascade::CascadeParams;
use crate::network::network::Network;
use crate::network::params::TrainingParams;
use crate::network::topology::Topology;

/// A fully serializable description of a network: topology, layer sizes,
/// training parameters and cascade candidates.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// trained weights, so an architecture can be stored before training starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    pub topology: Topology,
    /// Neurons per layer, input layer first, bias excluded.
    pub layers: Vec<usize>,
    #[serde(default)]
    pub params: TrainingParams,
    #[serde(default)]
    pub cascade: CascadeParams,
}

impl NetworkSpec {
    pub fn new(name: &str, topology: Topology, layers: Vec<usize>) -> NetworkSpec {
        NetworkSpec {
            name: name.to_string(),
            topology,
            layers,
            params: TrainingParams::default(),
            cascade: CascadeParams::default(),
        }
    }

    /// Constructs a network with freshly randomized weights.
    pub fn build(&self) -> Result<Network> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        let mut network = Network::new();
        network.set_params(self.params);
        network.set_cascade(self.cascade.clone());
        network.create_with_rng(self.topology, &self.layers, rng)?;
        Ok(network)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
