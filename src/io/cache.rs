use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::Graph;

/// Write the full graph (every node attribute, including any assigned
/// district, plus the complete edge set) to `path`.
pub fn write_cache(path: &Path, graph: &Graph) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create cache file: {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), graph)?;
    Ok(())
}

/// Load a previously cached graph. A cache that loads is an exact
/// substitute for re-running ingest and adjacency.
pub fn read_cache(path: &Path) -> Result<Graph> {
    let file = File::open(path)
        .with_context(|| format!("Failed to read cache file: {}", path.display()))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
