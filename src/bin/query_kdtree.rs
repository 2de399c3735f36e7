//! Query a persisted k-d tree with points from a CSV.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use kd_index::{persist, KdTree, Point};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Query a persisted k-d tree with points from a CSV")]
struct Args {
    /// Input file holding a persisted k-d tree
    tree: PathBuf,
    /// Input CSV file with the query points
    queries: PathBuf,
    /// Output file receiving one `index, distance` line per query
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // clap exits with 2 on usage errors; this tool reports every failure as 1
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let file =
        File::open(&args.tree).with_context(|| format!("cannot open {}", args.tree.display()))?;
    let tree: KdTree<f64> = persist::decode(BufReader::new(file))
        .with_context(|| format!("cannot decode tree from {}", args.tree.display()))?;
    info!(points = tree.len(), depth = tree.depth(), "loaded k-d tree");

    let queries = read_points(&args.queries)?;

    let mut out = BufWriter::new(
        File::create(&args.output)
            .with_context(|| format!("cannot create {}", args.output.display()))?,
    );
    for query in &queries {
        let nearest = tree.nearest(query)?;
        writeln!(out, "{}, {}", nearest.original_index, nearest.sq_dist.sqrt())?;
    }
    out.flush()?;
    Ok(())
}

fn read_points(path: &Path) -> anyhow::Result<Vec<Point<f64>>> {
    let file =
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    let mut points = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let coords = line
            .split(',')
            .map(|item| item.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("{}:{}: malformed number", path.display(), line_no + 1))?;
        points.push(Point::new(coords));
    }
    Ok(points)
}
