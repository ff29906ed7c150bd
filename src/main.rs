use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use qpcr_ddct::Result;
use qpcr_ddct::input::snapshot::{Snapshot, load_snapshot, save_snapshot};
use qpcr_ddct::input::{load_plate, parse_exclusions};
use qpcr_ddct::logging::init_logging;
use qpcr_ddct::model::AssayProfile;
use qpcr_ddct::pipeline::stage6_report::{Stage6Input, write_reports};
use qpcr_ddct::pipeline::{PipelineOutput, replay, run_pipeline};
use qpcr_ddct::plate::ColorMapping;

/// Delta-delta-Ct normalization of qPCR plates into fold-change tables.
#[derive(Parser, Debug)]
#[command(name = "qpcr-ddct", version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a plate and write the result tables
    Run(RunArgs),
    /// Recompute the result tables from a saved snapshot
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Plate JSON (ct_grid, genes, layout), optionally gzipped
    #[arg(long)]
    plate: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Wells to exclude, e.g. "9A, B12"
    #[arg(long, default_value = "")]
    exclude: String,

    /// Save the validated data here for a later replay
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(flatten)]
    profile: ProfileArgs,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long)]
    snapshot: PathBuf,

    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    profile: ProfileArgs,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Gene type marking housekeeping genes
    #[arg(long, default_value = "HK")]
    housekeeping_type: String,

    /// Sample identifier of the reference condition
    #[arg(long, default_value = "pluri")]
    reference: String,

    /// Blank control sample, its housekeeping norm is 0
    #[arg(long, default_value = "water")]
    blank: String,

    /// Ct substituted for wells without amplification
    #[arg(long, default_value_t = qpcr_ddct::model::profile::NO_AMPLIFICATION_CT)]
    ct_ceiling: f64,
}

impl ProfileArgs {
    fn to_profile(&self) -> AssayProfile {
        AssayProfile {
            housekeeping_type: self.housekeeping_type.clone(),
            reference_identifier: self.reference.clone(),
            blank_identifier: self.blank.clone(),
            no_amplification_ct: self.ct_ceiling,
            ..AssayProfile::default_v1()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run_plate(&args),
        Command::Replay(args) => run_replay(&args),
    }
}

fn run_plate(args: &RunArgs) -> Result<()> {
    let profile = args.profile.to_profile();
    let plate = load_plate(&args.plate)?;
    let exclusions = parse_exclusions(&args.exclude)?;
    if !exclusions.is_empty() {
        info!("excluding {} wells", exclusions.len());
    }

    let output = run_pipeline(&plate, &exclusions, &profile)?;

    if let Some(path) = &args.snapshot {
        let snapshot = Snapshot::new(
            plate.genes.clone(),
            plate.layout.clone(),
            output.validated.measurements().to_vec(),
        );
        save_snapshot(&snapshot, path)?;
        info!("snapshot saved to {}", path.display());
    }

    emit(&output, &plate.genes, &profile, Some(exclusions.len()), &args.out)
}

fn run_replay(args: &ReplayArgs) -> Result<()> {
    let profile = args.profile.to_profile();
    let snapshot = load_snapshot(&args.snapshot)?;
    let output = replay(&snapshot, &profile)?;
    emit(&output, &snapshot.color_mapping, &profile, None, &args.out)
}

fn emit(
    output: &PipelineOutput,
    colors: &ColorMapping,
    profile: &AssayProfile,
    excluded_wells: Option<usize>,
    out_dir: &Path,
) -> Result<()> {
    let input = Stage6Input {
        colors,
        profile,
        excluded_wells,
        validated: &output.validated,
        housekeeping: &output.housekeeping,
        delta: &output.delta,
        reference: &output.reference,
        delta_delta: &output.delta_delta,
        results: &output.results,
        summaries: &output.summaries,
        diagnostics: &output.diagnostics,
    };
    write_reports(&input, out_dir)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
