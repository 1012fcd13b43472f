//! Benchmark sweep matrix generator
//!
//! Reads one or more catalog files and a runner registry, validates them, and
//! prints the generated matrix as a JSON array on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Every single-node run in the catalog
//! benchmatrix full-sweep --config-files nvidia.yaml amd.yaml \
//!     --runner-config runners.yaml --single-node
//!
//! # Narrow the sweep
//! benchmatrix full-sweep --config-files nvidia.yaml --runner-config runners.yaml \
//!     --single-node --model-prefix dsr1 --seq-lens 1k1k --max-conc 64
//!
//! # Smoke-test every h200 node with every h200 config
//! benchmatrix runner-model-sweep --config-files nvidia.yaml \
//!     --runner-config runners.yaml --runner-type h200
//! ```

use anyhow::{Context, Result};
use benchmatrix_cli::loader::{load_config_files, load_runner_file};
use benchmatrix_schema::{validate_master_config, validate_runner_config};
use benchmatrix_sweep::{
    NodeMode, SeqLen, SmokeTestRequest, StepSize, SweepFilters, generate_full_sweep,
    generate_runner_model_sweep,
};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};

/// Generate benchmark sweep matrices from YAML catalogs
#[derive(Parser)]
#[command(name = "benchmatrix")]
#[command(about = "Generate benchmark configurations from YAML config files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand the catalog into every run that survives the filters
    FullSweep(FullSweepArgs),

    /// Run every config of a runner type once on each of its nodes
    RunnerModelSweep(RunnerModelSweepArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// One or more catalog files (YAML)
    #[arg(long, value_name = "PATH", num_args = 1.., required = true)]
    config_files: Vec<PathBuf>,

    /// Runner registry file (YAML)
    #[arg(long, value_name = "PATH")]
    runner_config: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("node-mode").required(true).args(["single_node", "multi_node"])))]
struct FullSweepArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Keep configs whose key starts with any of these prefixes
    #[arg(long, value_name = "PREFIX", num_args = 1..)]
    model_prefix: Vec<String>,

    /// Keep configs with any of these precisions (e.g. fp4, fp8)
    #[arg(long, value_name = "PRECISION", num_args = 1..)]
    precision: Vec<String>,

    /// Keep configs with any of these frameworks (e.g. vllm, trt, sglang)
    #[arg(long, value_name = "FRAMEWORK", num_args = 1..)]
    framework: Vec<String>,

    /// Keep configs targeting any of these runner types
    #[arg(long, value_name = "RUNNER", num_args = 1..)]
    runner_type: Vec<String>,

    /// Sequence lengths to include: 1k1k, 1k8k, 8k1k, or <isl>_<osl>
    #[arg(long, value_name = "SEQ_LEN", num_args = 1..)]
    seq_lens: Vec<SeqLen>,

    /// Multiplier between successive concurrency values
    #[arg(long, value_name = "N", default_value_t = StepSize::DEFAULT)]
    step_size: StepSize,

    /// Drop concurrency values above this ceiling
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_conc: Option<u32>,

    /// Drop points with a higher tensor parallelism (single-node only)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_tp: Option<u32>,

    /// Drop points with a higher expert parallelism (single-node only)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_ep: Option<u32>,

    /// Only generate single-node configurations
    #[arg(long)]
    single_node: bool,

    /// Only generate multi-node configurations
    #[arg(long)]
    multi_node: bool,
}

impl FullSweepArgs {
    fn filters(&self) -> SweepFilters {
        let mode = if self.multi_node { NodeMode::MultiNode } else { NodeMode::SingleNode };
        SweepFilters {
            model_prefixes: self.model_prefix.clone(),
            precisions: self.precision.clone(),
            frameworks: self.framework.clone(),
            runner_types: self.runner_type.clone(),
            seq_lens: self.seq_lens.clone(),
            mode,
            step_size: self.step_size,
            max_conc: self.max_conc,
            max_tp: self.max_tp,
            max_ep: self.max_ep,
        }
    }
}

#[derive(Args, Debug)]
struct RunnerModelSweepArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Runner type whose nodes are exercised (e.g. h200)
    #[arg(long, value_name = "RUNNER")]
    runner_type: String,

    /// Keep only nodes whose name contains this substring
    #[arg(long, value_name = "SUBSTRING")]
    runner_node_filter: Option<String>,
}

impl RunnerModelSweepArgs {
    fn request(&self) -> SmokeTestRequest {
        let request = SmokeTestRequest::new(self.runner_type.as_str());
        match &self.runner_node_filter {
            Some(filter) => request.with_node_filter(filter.as_str()),
            None => request,
        }
    }
}

impl Commands {
    fn common(&self) -> &CommonArgs {
        match self {
            Self::FullSweep(args) => &args.common,
            Self::RunnerModelSweep(args) => &args.common,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.command.common().log_level);

    if let Err(e) = run(&cli.command) {
        error!("Command failed: {e}");
        for cause in e.chain().skip(1) {
            error!("  Caused by: {cause}");
        }
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<()> {
    let common = command.common();

    let catalog_doc = load_config_files(&common.config_files)?;
    let runner_doc = load_runner_file(&common.runner_config)?;
    let catalog = validate_master_config(&catalog_doc)?;
    let registry = validate_runner_config(&runner_doc)?;
    info!(configs = catalog.len(), runner_types = registry.len(), "validated inputs");

    let matrix = match command {
        Commands::FullSweep(args) => generate_full_sweep(&catalog, &registry, &args.filters())?,
        Commands::RunnerModelSweep(args) => {
            generate_runner_model_sweep(&catalog, &registry, &args.request())?
        }
    };

    let json = if common.pretty {
        serde_json::to_string_pretty(&matrix)
    } else {
        serde_json::to_string(&matrix)
    }
    .context("Failed to encode matrix")?;
    println!("{json}");

    Ok(())
}

fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}
