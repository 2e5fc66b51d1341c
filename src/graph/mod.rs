mod adjacency;
mod coarsen;
mod graph;
mod partition;

pub use graph::{Graph, Node};
pub use partition::PartitionOutcome;
