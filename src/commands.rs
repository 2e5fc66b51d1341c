use std::fs::File;
use std::io::{BufReader, BufWriter};

use anyhow::{Context, Result};

use crate::cli::{BuildArgs, Cli, ExportArgs};
use crate::ingest::Record;
use crate::io::cache;
use crate::io::export::GraphView;
use crate::pipeline::{self, PipelineConfig};

pub fn build(cli: &Cli, args: &BuildArgs) -> Result<()> {
    // An existing cache substitutes for the ingest and adjacency
    // stages entirely.
    if args.output.is_file() && !args.no_cache {
        if cli.verbose > 0 {
            eprintln!("[build] using cached graph at {}", args.output.display());
        }
        let graph = cache::read_cache(&args.output)?;
        if cli.verbose > 0 {
            eprintln!("[build] cache holds {} nodes / {} edges", graph.node_count(), graph.edge_count());
        }
        return Ok(());
    }

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open records file: {}", args.input.display()))?;
    let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))?;

    let config = PipelineConfig {
        pieces: args.pieces,
        districts: args.districts,
        seed: args.seed.unwrap_or_else(rand::random),
    };

    let (graph, diag) = pipeline::build(&records, &config, cli.verbose)?;
    cache::write_cache(&args.output, &graph)?;

    if cli.verbose > 0 {
        eprintln!(
            "[build] wrote {} nodes / {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            args.output.display()
        );
    }
    // A partial partition still "succeeds"; always surface the counts.
    println!(
        "repaired={} dropped={} unmergeable={} unreachable={}",
        diag.repaired_polygons, diag.dropped_records, diag.unmergeable_skipped, diag.unreachable_removed
    );
    Ok(())
}

pub fn export(cli: &Cli, args: &ExportArgs) -> Result<()> {
    let graph = cache::read_cache(&args.graph)?;
    let view = GraphView::from_graph(&graph);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create output file: {}", args.output.display()))?;
    serde_json::to_writer(BufWriter::new(file), &view)?;

    if cli.verbose > 0 {
        eprintln!(
            "[export] {} nodes, {} edges -> {}",
            view.nodes.len(),
            view.edges.len(),
            args.output.display()
        );
    }
    Ok(())
}
