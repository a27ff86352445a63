use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vf_app::{AppResult, ReconcileConfig, ReconcileTiming, query};
use vf_model::ReferenceTrajectory;

#[derive(Parser)]
#[command(name = "vf-cli")]
#[command(about = "VesselFill CLI - compare vessel fill runs against the adiabatic limit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and print the derived gas constants
    Validate {
        /// Path to the config YAML file
        config_path: PathBuf,
    },
    /// Compute the adiabatic reference trajectory of the primary run
    Reference {
        /// Path to the config YAML file
        config_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Align both runs with the reference and build the plot bundle
    Reconcile {
        /// Path to the config YAML file
        config_path: PathBuf,
        /// Override the primary log path
        #[arg(long)]
        primary: Option<PathBuf>,
        /// Override the secondary log path
        #[arg(long)]
        secondary: Option<PathBuf>,
        /// Output JSON file path for the bundle
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export one series of the bundle
    ExportSeries {
        /// Path to the config YAML file
        config_path: PathBuf,
        /// Display label of the series
        label: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Reference {
            config_path,
            output,
        } => cmd_reference(&config_path, output.as_deref()),
        Commands::Reconcile {
            config_path,
            primary,
            secondary,
            output,
        } => cmd_reconcile(&config_path, primary, secondary, output.as_deref()),
        Commands::ExportSeries {
            config_path,
            label,
            output,
        } => cmd_export_series(&config_path, &label, output.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = vf_app::load_config(config_path)?;
    let constants = config.constants()?;
    println!("✓ Config is valid");
    println!("  Cp:    {:.3} J/(kg K)", constants.cp());
    println!("  Cv:    {:.3} J/(kg K)", constants.cv());
    println!("  Gamma: {:.5}", constants.gamma());
    println!(
        "  Adiabatic limit: {:.2} K",
        constants.gamma() * constants.inlet_temperature_k()
    );
    Ok(())
}

fn cmd_reference(config_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let config = vf_app::load_config(config_path)?;
    let reference = vf_app::reference_for_config(&config)?;

    if let Some(path) = output {
        let file = std::fs::File::create(path)?;
        vf_app::write_reference_csv(file, &reference)?;
        println!(
            "✓ Exported {} reference points to {}",
            reference.len(),
            path.display()
        );
        print_reference_summary(&reference);
    } else {
        vf_app::write_reference_csv(std::io::stdout(), &reference)?;
    }
    Ok(())
}

fn print_reference_summary(reference: &ReferenceTrajectory) {
    if let Some(last) = reference.final_temperature() {
        println!("  Final temperature: {:.2} K", last);
    }
    println!("  Adiabatic limit:   {:.2} K", reference.asymptote_k());
}

fn cmd_reconcile(
    config_path: &Path,
    primary: Option<PathBuf>,
    secondary: Option<PathBuf>,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut config = vf_app::load_config(config_path)?;
    apply_overrides(&mut config, primary, secondary);

    println!(
        "Reconciling {} against {}",
        config.sources.primary.path.display(),
        config.sources.secondary.path.display()
    );
    let response = vf_app::reconcile_config(&config)?;
    let bundle = &response.bundle;

    println!("\nSeries:");
    for summary in query::series_summaries(bundle) {
        match (summary.time_range_min, summary.final_temperature_k) {
            (Some((start, end)), Some(last)) => println!(
                "  {} - {} points, {:.2} - {:.2} min, final {:.2} K",
                summary.label, summary.sample_count, start, end, last
            ),
            _ => println!("  {} - no points", summary.label),
        }
    }

    if let Ok(deviation) = query::reference_deviation(bundle) {
        println!(
            "\nPrimary vs reference: max |dT| = {:.2} K at {:.2} min, rms = {:.2} K",
            deviation.max_abs_k, deviation.at_time_min, deviation.rms_k
        );
    }

    print_timing_summary(&response.timing);

    if let Some(path) = output {
        vf_app::write_bundle_json(path, bundle)?;
        println!("✓ Bundle written to {}", path.display());
    }
    Ok(())
}

fn apply_overrides(
    config: &mut ReconcileConfig,
    primary: Option<PathBuf>,
    secondary: Option<PathBuf>,
) {
    if let Some(path) = primary {
        config.sources.primary.path = path;
    }
    if let Some(path) = secondary {
        config.sources.secondary.path = path;
    }
}

fn print_timing_summary(timing: &ReconcileTiming) {
    let total = timing.total_time_s.max(1.0e-12);
    let load_pct = 100.0 * timing.load_time_s / total;
    let model_pct = 100.0 * timing.model_time_s / total;
    let assemble_pct = 100.0 * timing.assemble_time_s / total;

    println!("\nTiming summary:");
    println!("  Load:     {:.3}s ({:.1}%)", timing.load_time_s, load_pct);
    println!("  Model:    {:.3}s ({:.1}%)", timing.model_time_s, model_pct);
    println!(
        "  Assemble: {:.3}s ({:.1}%)",
        timing.assemble_time_s, assemble_pct
    );
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn cmd_export_series(config_path: &Path, label: &str, output: Option<&Path>) -> AppResult<()> {
    let config = vf_app::load_config(config_path)?;
    let response = vf_app::reconcile_config(&config)?;
    let series = query::find_series(&response.bundle, label)?;

    if let Some(path) = output {
        let file = std::fs::File::create(path)?;
        vf_app::write_series_csv(file, series)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        vf_app::write_series_csv(std::io::stdout(), series)?;
    }
    Ok(())
}
