//! 膝トラッキング指標（膝とつま先の水平ずれ）

use crate::pose::{Frame, Landmark};

use super::{bottom_frame, MetricScore};

/// 帯域境界（正規化x座標での偏差）
const DEV_EXCELLENT_MAX: f32 = 0.05;
const DEV_GOOD_MAX: f32 = 0.10;
const DEV_MODERATE_MAX: f32 = 0.15;
/// 帯域内の線形減点係数
const DEV_SLOPE: f32 = 400.0;

/// 最下点での膝・足首の水平偏差を評価する
///
/// 偏差 |knee.x - ankle.x| を検出できた側で平均し、
/// 閾値を昇順に評価して最初に一致した帯域で採点する。
pub fn score(frames: &[Frame], bottom_index: usize) -> MetricScore {
    let Some(frame) = bottom_frame(frames, bottom_index) else {
        return MetricScore::no_bottom();
    };

    let mut deviations = Vec::new();
    for (knee, ankle) in [
        (Landmark::LeftKnee, Landmark::LeftAnkle),
        (Landmark::RightKnee, Landmark::RightAnkle),
    ] {
        if let (Some(k), Some(a)) = (frame.get(knee), frame.get(ankle)) {
            deviations.push((k.x - a.x).abs());
        }
    }

    if deviations.is_empty() {
        return MetricScore::new(0.0, "Could not detect knee/ankle positions");
    }

    let deviation = deviations.iter().sum::<f32>() / deviations.len() as f32;
    let percent = deviation * 100.0;

    let (score, feedback) = if deviation < DEV_EXCELLENT_MAX {
        (
            100.0,
            "Excellent knee tracking - knees stay aligned over toes".to_string(),
        )
    } else if deviation < DEV_GOOD_MAX {
        (
            100.0 - (deviation - DEV_EXCELLENT_MAX) * DEV_SLOPE,
            format!("Good knee tracking with minor deviation ({:.1}%)", percent),
        )
    } else if deviation < DEV_MODERATE_MAX {
        (
            80.0 - (deviation - DEV_GOOD_MAX) * DEV_SLOPE,
            format!(
                "Moderate knee tracking issues - knees deviate {:.1}% from toes",
                percent
            ),
        )
    } else {
        (
            (60.0 - (deviation - DEV_MODERATE_MAX) * DEV_SLOPE).max(0.0),
            format!(
                "Poor knee tracking - significant deviation ({:.1}%) detected. Focus on keeping knees over toes.",
                percent
            ),
        )
    };

    MetricScore::new(score.clamp(0.0, 100.0), feedback)
}
