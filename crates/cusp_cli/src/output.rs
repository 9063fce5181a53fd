//! Stdout renderings of a run

use clap::ValueEnum;
use cusp_observer::{StepSnapshot, StimulusProfile, TrajectorySummary};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON summary object
    Summary,
    /// One JSON snapshot per line
    Jsonl,
    /// Comma-separated table with a time column
    Csv,
}

const CSV_HEADER: &str = "t,stimulus,reaction,regulation,net_stress_a,splitting_b,state_x,is_trapped";

pub fn write<W: Write>(
    out: &mut W,
    format: OutputFormat,
    profile: &StimulusProfile,
    snapshots: &[StepSnapshot],
    summary: &TrajectorySummary,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Summary => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for snap in snapshots {
                writeln!(out, "{}", snap.to_json()?)?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "{}", CSV_HEADER)?;
            for (t, s) in profile.times.iter().zip(snapshots) {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{}",
                    t,
                    s.stimulus,
                    s.reaction,
                    s.regulation,
                    s.net_stress_a,
                    s.splitting_b,
                    s.state_x,
                    s.is_trapped
                )?;
            }
        }
    }
    Ok(())
}
