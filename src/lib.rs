#![doc = "Precinct adjacency graphs and balanced district partitioning"]
pub mod cli;
pub mod commands;
mod geometry;
mod graph;
mod ingest;
mod io;
mod pipeline;
mod types;

#[doc(inline)]
pub use graph::{Graph, Node, PartitionOutcome};

#[doc(inline)]
pub use ingest::{Geometry, Record, load_records};

#[doc(inline)]
pub use io::cache::{read_cache, write_cache};

#[doc(inline)]
pub use io::export::{GraphView, NodeView};

#[doc(inline)]
pub use pipeline::{Diagnostics, PipelineConfig, build};

#[doc(inline)]
pub use types::{BBox, NodeId};
