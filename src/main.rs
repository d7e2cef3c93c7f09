//! Benchmark session CLI.
//!
//! Configuration arrives either as positional arguments (scripted runs)
//! or through the same two stdin prompts the sibling language
//! implementations use, so one driver script can feed every binary
//! identically.

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use matbench::clock::MonotonicClock;
use matbench::config::{self, BenchConfig};
use matbench::memory::PeakRssSampler;
use matbench::report::{self, ResultRow, DEFAULT_RESULTS_PATH};
use matbench::runner::Runner;
use matbench::workload::dense::DenseMatMul;
use matbench::workload::sparse::{CsrSpmv, MtxSpmv};
use matbench::workload::Workload;
use matbench::Error;

#[derive(Debug)]
enum WorkloadChoice {
    Dense,
    Spmv,
    Mtx(PathBuf),
}

impl WorkloadChoice {
    fn from_value(value: &str) -> matbench::Result<Self> {
        match value {
            "dense" => Ok(Self::Dense),
            "spmv" => Ok(Self::Spmv),
            _ if value.ends_with(".mtx") => Ok(Self::Mtx(PathBuf::from(value))),
            _ => Err(Error::InvalidConfig(format!(
                "unknown workload '{value}' (expected dense, spmv, or a .mtx path)"
            ))),
        }
    }
}

#[derive(Debug)]
struct CliArgs {
    size: Option<usize>,
    runs: Option<usize>,
    workload: WorkloadChoice,
    results: PathBuf,
    help: bool,
}

impl CliArgs {
    fn parse(args: impl Iterator<Item = String>) -> matbench::Result<Self> {
        let mut parsed = Self {
            size: None,
            runs: None,
            workload: WorkloadChoice::Dense,
            results: PathBuf::from(DEFAULT_RESULTS_PATH),
            help: false,
        };

        let mut args = args;
        let mut positionals = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    parsed.help = true;
                    return Ok(parsed);
                }
                "-w" | "--workload" => {
                    let value = args.next().ok_or_else(|| {
                        Error::InvalidConfig("--workload requires a value".to_string())
                    })?;
                    parsed.workload = WorkloadChoice::from_value(&value)?;
                }
                "--results" => {
                    let value = args.next().ok_or_else(|| {
                        Error::InvalidConfig("--results requires a path".to_string())
                    })?;
                    parsed.results = PathBuf::from(value);
                }
                other if other.starts_with('-') => {
                    return Err(Error::InvalidConfig(format!("unknown option '{other}'")));
                }
                other => positionals.push(other.to_string()),
            }
        }

        match positionals.as_slice() {
            [] => {}
            [size, runs] => {
                parsed.size = Some(config::parse_positive("matrix size", size)?);
                parsed.runs = Some(config::parse_positive("run count", runs)?);
            }
            _ => {
                return Err(Error::InvalidConfig(
                    "expected either no positional arguments or SIZE RUNS".to_string(),
                ));
            }
        }
        Ok(parsed)
    }
}

fn print_usage() {
    println!("USAGE:");
    println!("  matbench [OPTIONS] [SIZE RUNS]");
    println!();
    println!("Without SIZE and RUNS the session prompts for them on stdin.");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help             Show this help message");
    println!("  -w, --workload <W>     Timed kernel: dense (default), spmv,");
    println!("                         or a path to a Matrix Market .mtx file");
    println!("  --results <PATH>       Results table (default: {DEFAULT_RESULTS_PATH})");
    println!();
    println!("EXAMPLES:");
    println!("  matbench                       # interactive");
    println!("  matbench 512 10                # 512x512, 10 runs");
    println!("  matbench -w spmv 100000 5      # banded sparse kernel");
    println!("  matbench -w data/mc2depi.mtx    # size comes from the file");
}

/// Resolve the timed workload and session configuration from CLI
/// arguments, prompting on stdin for whatever is missing.
fn resolve_session(args: &CliArgs) -> anyhow::Result<(Box<dyn Workload>, BenchConfig)> {
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    match &args.workload {
        WorkloadChoice::Mtx(path) => {
            let workload = MtxSpmv::load(path)
                .with_context(|| format!("loading matrix from {}", path.display()))?;
            let rows = workload.matrix().rows();
            if let Some(requested) = args.size {
                tracing::info!(requested, actual = rows, "matrix size taken from .mtx file");
            }
            let runs = match args.runs {
                Some(runs) => runs,
                None => config::prompt_positive(&mut input, &mut output, "Enter number of runs: ")?,
            };
            Ok((Box::new(workload), BenchConfig::new(rows, runs)?))
        }
        choice => {
            let config = match (args.size, args.runs) {
                (Some(size), Some(runs)) => BenchConfig::new(size, runs)?,
                _ => BenchConfig::from_interactive(&mut input, &mut output)?,
            };
            let workload: Box<dyn Workload> = match choice {
                WorkloadChoice::Spmv => Box::new(CsrSpmv::default()),
                _ => Box::new(DenseMatMul),
            };
            Ok((workload, config))
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse(env::args().skip(1))?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let (workload, config) = resolve_session(&args)?;
    tracing::info!(
        workload = workload.label(),
        size = config.size,
        runs = config.runs,
        "starting session"
    );

    let runner = Runner::new(MonotonicClock, PeakRssSampler);
    let summary = runner.run(workload.as_ref(), &config);
    print!("{summary}");

    let row = ResultRow::from_summary(workload.label(), &summary);
    report::append(&args.results, &row)
        .with_context(|| format!("appending results to {}", args.results.display()))?;
    tracing::info!(path = %args.results.display(), "results appended");

    Ok(())
}
