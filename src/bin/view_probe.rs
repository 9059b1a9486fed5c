//! View-classification probe.
//!
//! Classifies the camera angle of a keypoint dump without scoring anything.
//! Handy for checking why a clip was flagged as non-ideal before re-recording.

use anyhow::Result;

use squat_scorer::analysis::view::{classify, sample_prefix};
use squat_scorer::pose::read_sequence;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: view_probe <keypoints.json>");
        std::process::exit(2);
    }

    let frames = read_sequence(&args[1])?;
    println!("frames: {}", frames.len());

    if frames.is_empty() {
        println!("view: unknown (no frames)");
        return Ok(());
    }

    let sample = sample_prefix(&frames);
    let view = classify(sample);

    println!("sample frames: {}", sample.len());
    println!("view angle: {}", view.angle.as_str());
    println!("orientation: {}", view.orientation.as_str());
    println!("ideal: {}", view.is_ideal());
    println!(
        "ankle visibility: left {:.0}% / right {:.0}%",
        view.ankle_visibility.left * 100.0,
        view.ankle_visibility.right * 100.0
    );
    if let Some(warning) = view.warning() {
        println!("warning: {}", warning);
    }

    Ok(())
}
