//! 背中角度指標（体幹の鉛直からの傾き）

use crate::pose::{Frame, Landmark};

use super::{bottom_frame, pair_midpoint, MetricScore};

/// 体幹が水平に近すぎて角度計算が退化する dy の下限
const MIN_TORSO_DY: f32 = 0.01;
/// 過伸展帯域の減点係数（1°あたり）
const OVER_LEAN_SLOPE: f32 = 2.5;

/// 角度帯域テーブル（度）: (下限, 上限, スコア)
///
/// 理想帯から順に評価し、最初に一致した帯を採用する。
/// 帯は入れ子なので 2行目は実質 [10,15)∪(30,35]、3行目は [5,10)∪(35,40]。
const ANGLE_BANDS: &[(f32, f32, f32)] = &[
    (15.0, 30.0, 100.0),
    (10.0, 35.0, 85.0),
    (5.0, 40.0, 70.0),
];

/// 最下点での体幹角度を評価する
///
/// 肩・腰それぞれ左右の代表点（中点、片側フォールバック）を取り、
/// 腰→肩ベクトルの鉛直からの角度 atan2(|dx|, |dy|) で採点する。
/// 理想はスクワット最下点で 15〜30°の前傾。
pub fn score(frames: &[Frame], bottom_index: usize) -> MetricScore {
    let Some(frame) = bottom_frame(frames, bottom_index) else {
        return MetricScore::no_bottom();
    };

    let shoulder = pair_midpoint(
        frame.get(Landmark::LeftShoulder),
        frame.get(Landmark::RightShoulder),
    );
    let hip = pair_midpoint(frame.get(Landmark::LeftHip), frame.get(Landmark::RightHip));

    let (Some(shoulder), Some(hip)) = (shoulder, hip) else {
        return MetricScore::new(0.0, "Could not detect shoulder/hip positions");
    };

    let dx = shoulder.x - hip.x;
    let dy = shoulder.y - hip.y;

    if dy.abs() < MIN_TORSO_DY {
        return MetricScore::new(50.0, "Could not calculate back angle accurately");
    }

    let angle = dx.abs().atan2(dy.abs()).to_degrees();
    grade_angle(angle)
}

/// 角度（度）を帯域テーブルで採点する
fn grade_angle(angle: f32) -> MetricScore {
    for (band, &(lo, hi, band_score)) in ANGLE_BANDS.iter().enumerate() {
        if angle >= lo && angle <= hi {
            let feedback = match band {
                0 => format!("Excellent back angle ({:.1}°) - maintains good posture", angle),
                1 => format!("Good back angle ({:.1}°) - slightly outside ideal range", angle),
                _ => format!(
                    "Moderate back angle issue ({:.1}°) - consider adjusting torso position",
                    angle
                ),
            };
            return MetricScore::new(band_score, feedback);
        }
    }

    if angle < 5.0 {
        MetricScore::new(
            50.0,
            format!("Too upright ({:.1}°) - lean forward slightly to maintain balance", angle),
        )
    } else {
        // angle > 40
        let score = (50.0 - (angle - 40.0) * OVER_LEAN_SLOPE).max(0.0);
        MetricScore::new(
            score.clamp(0.0, 100.0),
            format!(
                "Excessive forward lean ({:.1}°) - focus on keeping chest up and back straight",
                angle
            ),
        )
    }
}
