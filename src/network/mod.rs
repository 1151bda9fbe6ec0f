pub mod cascade;
pub mod connection;
pub(crate) mod graph;
pub mod network;
pub mod params;
pub mod spec;
pub mod topology;

pub use cascade::CascadeParams;
pub use connection::Connection;
pub use network::Network;
pub use params::TrainingParams;
pub use spec::NetworkSpec;
pub use topology::Topology;
