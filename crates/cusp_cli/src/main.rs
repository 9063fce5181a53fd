use anyhow::Context;
use clap::Parser;
use cusp_core::CuspConfig;
use cusp_observer::{run_profile, FeedbackObserver, StimulusProfile, TrajectorySummary};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "cusp.toml")]
    config: PathBuf,

    /// Override the time step
    #[arg(long)]
    dt: Option<f64>,

    /// Override the run length (time units)
    #[arg(long)]
    t_max: Option<f64>,

    /// Override the stress pulse amplitude
    #[arg(long)]
    amplitude: Option<f64>,

    /// Override the damping factor of the regulation stage
    #[arg(long)]
    damping: Option<f64>,

    /// What to write to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut config = CuspConfig::load_or_default(&args.config);
    if let Some(dt) = args.dt {
        config.simulation.dt = dt;
    }
    if let Some(t_max) = args.t_max {
        config.simulation.t_max = t_max;
    }
    if let Some(amplitude) = args.amplitude {
        config.simulation.pulse_amplitude = amplitude;
    }
    if let Some(damping) = args.damping {
        config.observer.damping_factor = damping;
    }
    config.validate().context("Invalid simulation config")?;

    let profile = StimulusProfile::pulse(&config.simulation);
    info!(
        "Running {} steps at dt={} (pulse {} from t={} to t={})",
        profile.len(),
        profile.dt,
        config.simulation.pulse_amplitude,
        config.simulation.pulse_start,
        config.simulation.pulse_end
    );

    let mut observer = FeedbackObserver::with_config(&config.observer);
    let snapshots = run_profile(&mut observer, &profile);
    let summary = TrajectorySummary::from_snapshots(&snapshots);

    if let Err(e) = observer.check_finite() {
        tracing::warn!("{}", e);
    }
    info!(
        "Done: final x={:.4}, trapped for {} of {} steps",
        summary.final_state, summary.trapped_steps, summary.steps
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write(&mut out, args.format, &profile, &snapshots, &summary)?;
    out.flush()?;
    Ok(())
}
