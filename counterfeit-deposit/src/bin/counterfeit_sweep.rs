extern crate counterfeit_deposit;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use counterfeit_deposit::logging::{init_logging, profile_enabled, report_profile};
use counterfeit_deposit::{argmax, sweep, SweepConfig};

#[derive(Parser, Debug)]
#[command(about = "Find how many counterfeit notes to mix into a deposit to maximize its expected value")]
struct Args {
    /// JSON file with sweep parameters; flags below override it
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[arg(long = "genuine")]
    genuine_count: Option<u64>,

    /// Share of the deposit the bank inspects, rounded up to whole notes
    #[arg(long = "review-fraction")]
    review_fraction: Option<f64>,

    /// Chance the bank recognises an inspected fake
    #[arg(long = "detect-prob")]
    detection_probability: Option<f64>,

    #[arg(long = "unit-value")]
    unit_value: Option<f64>,

    #[arg(long = "min-fakes")]
    marked_min: Option<u64>,

    #[arg(long = "max-fakes")]
    marked_max: Option<u64>,

    #[arg(long = "tolerance")]
    tie_tolerance: Option<f64>,

    /// Refuse deposits whose inspection sample exceeds this
    #[arg(long = "max-sample")]
    max_sample_size: Option<u64>,

    /// Print the whole curve as JSON instead of the summary
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    #[arg(long = "log-level", default_value_t = Level::WARN)]
    log_level: Level,
}

impl Args {
    fn resolve_config(&self) -> Result<SweepConfig> {
        let mut cfg = match &self.config {
            Some(path) => SweepConfig::load(path)?,
            None => SweepConfig::default(),
        };

        if let Some(v) = self.genuine_count {
            cfg.genuine_count = v;
        }
        if let Some(v) = self.review_fraction {
            cfg.review_fraction = v;
        }
        if let Some(v) = self.detection_probability {
            cfg.detection_probability = v;
        }
        if let Some(v) = self.unit_value {
            cfg.unit_value = v;
        }
        if let Some(v) = self.marked_min {
            cfg.marked_min = v;
        }
        if let Some(v) = self.marked_max {
            cfg.marked_max = v;
        }
        if let Some(v) = self.tie_tolerance {
            cfg.tie_tolerance = v;
        }
        if let Some(v) = self.max_sample_size {
            cfg.max_sample_size = v;
        }

        cfg.validate().context("invalid sweep parameters")?;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);
    let profile = profile_enabled();

    let cfg = args.resolve_config()?;
    info!(?cfg, "sweep parameters");

    let t_sweep = Instant::now();
    let curve = sweep(&cfg).context("sweep failed")?;
    let best = argmax(&curve, cfg.tie_tolerance);
    report_profile(profile, "sweep", t_sweep.elapsed());

    if args.json {
        let out = serde_json::json!({ "curve": curve, "argmax": best });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Evaluated {} deposits ({}..={} fakes on top of {} genuine notes)",
        curve.len(),
        cfg.marked_min,
        cfg.marked_max,
        cfg.genuine_count
    );
    for p in &best {
        println!(
            "{} fakes: {} notes, {} inspected, expected value ${:.2} (free money ${:.2})",
            p.marked_count,
            p.total_count,
            p.sample_size,
            p.expected_payoff,
            p.expected_payoff - cfg.genuine_value(),
        );
    }

    Ok(())
}
