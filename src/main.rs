//! Squat form analyzer CLI.
//!
//! Reads a keypoint dump written by the pose-estimation stage, runs the
//! scoring pipeline, and prints the report as JSON on stdout.

use anyhow::{bail, Result};

use squat_scorer::analysis;
use squat_scorer::config::Config;
use squat_scorer::pose::read_sequence;
use squat_scorer::snapshot;

const CONFIG_PATH: &str = "config.toml";

fn usage() -> ! {
    eprintln!("Usage: squat-scorer <keypoints.json>");
    eprintln!();
    eprintln!("  <keypoints.json>  keypoint dump from the pose estimator");
    eprintln!("                    (JSON array of landmark-name → [x, y] | null maps)");
    std::process::exit(2);
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        usage();
    }
    let input_path = &args[1];

    eprintln!("Squat Scorer ({})", env!("GIT_VERSION"));

    let config = Config::load_or_default(CONFIG_PATH);
    let weights = config.rating.weights;
    weights.validate()?;

    let frames = read_sequence(input_path)?;
    if config.verbose {
        eprintln!("{}: {} frames", input_path, frames.len());
    }

    let report = analysis::analyze(&frames, &weights);

    if config.verbose {
        if let Some(view) = &report.video_angle {
            eprintln!(
                "view: {} (orientation: {}, ideal: {})",
                view.view_angle.as_str(),
                view.orientation.map_or("-", |o| o.as_str()),
                view.is_ideal
            );
        }
        if let (Some(bottom), Some(total)) = (report.bottom_frame_idx, report.total_frames) {
            for (point, index) in snapshot::plan(bottom, total) {
                eprintln!("snapshot {}: frame {}", point.as_str(), index);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.breakdown.is_none() && report.overall_score == 0 && !report.feedback.is_empty() {
        // Empty-input short circuit: surface a non-zero exit for scripts.
        bail!("{}", report.feedback);
    }
    Ok(())
}
