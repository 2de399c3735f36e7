//! Build a k-d tree from a CSV of points and persist it.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use kd_index::{persist, KdTree, Point, PointStorage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Build a k-d tree from a CSV of points")]
struct Args {
    /// Input CSV file, one comma-separated point per row; the first row's
    /// column count fixes the dimension
    input: PathBuf,
    /// Output file for the persisted tree
    output: PathBuf,
    /// Maximum number of points per leaf
    #[arg(long, default_value = "1")]
    leaf_size: NonZeroUsize,
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
    let points = read_points(&args.input)?;
    if points.is_empty() {
        bail!("there are no valid points in {}", args.input.display());
    }

    let k = points[0].dim();
    let storage = PointStorage::new(points, k)?;
    let tree = KdTree::build(storage, args.leaf_size.get());
    info!(
        points = tree.len(),
        k,
        depth = tree.depth(),
        leaf_size = args.leaf_size.get(),
        "built k-d tree"
    );

    let file = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    persist::encode(&tree, BufWriter::new(file))
        .with_context(|| format!("cannot write tree to {}", args.output.display()))?;
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
