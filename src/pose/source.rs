//! Keypoint-dump input boundary (pose-estimator ↔ analyzer).
//!
//! The pose-estimation collaborator writes one JSON document per video: an
//! array of frames, each an object mapping landmark names to `[x, y]` or
//! `null`. Confidence filtering happens on the estimator side (anything
//! below its visibility threshold arrives as `null`), so no confidence
//! values cross this boundary.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::keypoint::{Frame, Landmark, Point};

/// Wire form of a single frame, as emitted by the estimator.
type RawFrame = BTreeMap<String, Option<(f32, f32)>>;

/// Parse a keypoint dump from its JSON text.
///
/// Unknown landmark names are fatal (they indicate a mismatched estimator),
/// while omitted names are treated as not detected.
pub fn parse_sequence(json: &str) -> Result<Vec<Frame>> {
    let raw: Vec<RawFrame> = serde_json::from_str(json).context("invalid keypoint JSON")?;
    raw.iter()
        .enumerate()
        .map(|(i, raw_frame)| {
            frame_from_raw(raw_frame).with_context(|| format!("frame {}", i))
        })
        .collect()
}

/// Read and parse a keypoint dump file.
///
/// An unreadable or undecodable source is fatal and propagated unmodified;
/// there is nothing to retry once the estimator output is gone.
pub fn read_sequence<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("could not read keypoint dump: {}", path.display()))?;
    parse_sequence(&json).with_context(|| format!("could not parse keypoint dump: {}", path.display()))
}

fn frame_from_raw(raw: &RawFrame) -> Result<Frame> {
    let mut frame = Frame::empty();
    for (name, value) in raw {
        let Some(landmark) = Landmark::from_name(name) else {
            bail!("unknown landmark name: {:?}", name);
        };
        frame.set(landmark, value.map(|(x, y)| Point::new(x, y)));
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_sequence() {
        let frames = parse_sequence("[]").unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_parse_frame_with_points_and_nulls() {
        let json = r#"[{"nose": [0.5, 0.2], "left_hip": null, "right_hip": [0.52, 0.6]}]"#;
        let frames = parse_sequence(json).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].get(Landmark::Nose), Some(Point::new(0.5, 0.2)));
        assert_eq!(frames[0].get(Landmark::LeftHip), None);
        assert_eq!(frames[0].get(Landmark::RightHip), Some(Point::new(0.52, 0.6)));
        // 省略されたランドマークは未検出扱い
        assert_eq!(frames[0].get(Landmark::LeftAnkle), None);
    }

    #[test]
    fn test_parse_rejects_unknown_landmark() {
        let json = r#"[{"left_eye": [0.5, 0.2]}]"#;
        let err = parse_sequence(json).unwrap_err();
        assert!(format!("{:#}", err).contains("left_eye"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_sequence("not json").is_err());
        assert!(parse_sequence(r#"[{"nose": [0.5]}]"#).is_err());
    }

    #[test]
    fn test_read_sequence_missing_file() {
        let err = read_sequence("does/not/exist.json").unwrap_err();
        assert!(format!("{:#}", err).contains("exist.json"));
    }
}
