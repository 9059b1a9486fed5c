//! アライメント指標（腰-膝-足首の膝角度）

use crate::pose::{Frame, Landmark, Point};

use super::{bottom_frame, MetricScore};

/// 膝角度帯域テーブル（度）: (下限, 上限, スコア)
///
/// 最下点の理想は膝角度 90〜100°前後。入れ子の帯を上から順に評価する。
const KNEE_ANGLE_BANDS: &[(f32, f32, f32)] = &[
    (85.0, 105.0, 100.0),
    (75.0, 115.0, 85.0),
    (65.0, 125.0, 70.0),
];

/// 帯域外のスコア
const OUT_OF_BAND_SCORE: f32 = 50.0;

/// 最下点での左右下肢アライメントを評価する
///
/// 腰・膝・足首が揃った側ごとに膝頂点の内角を計算して採点し、
/// 検出できた側の平均を総合スコアとする。フィードバックは側ごとの
/// メッセージを " | " で連結する。
pub fn score(frames: &[Frame], bottom_index: usize) -> MetricScore {
    let Some(frame) = bottom_frame(frames, bottom_index) else {
        return MetricScore::no_bottom();
    };

    let sides = [
        ("Left side", Landmark::LeftHip, Landmark::LeftKnee, Landmark::LeftAnkle),
        ("Right side", Landmark::RightHip, Landmark::RightKnee, Landmark::RightAnkle),
    ];

    let mut scores = Vec::new();
    let mut feedbacks = Vec::new();

    for (label, hip, knee, ankle) in sides {
        let (Some(hip), Some(knee), Some(ankle)) =
            (frame.get(hip), frame.get(knee), frame.get(ankle))
        else {
            continue;
        };
        // ベクトルが退化している側はスキップ
        let Some(angle) = angle_at_vertex(hip, knee, ankle) else {
            continue;
        };

        let (side_score, feedback) = grade_side(label, angle);
        scores.push(side_score);
        feedbacks.push(feedback);
    }

    if scores.is_empty() {
        return MetricScore::new(0.0, "Could not calculate alignment");
    }

    let average = scores.iter().sum::<f32>() / scores.len() as f32;
    MetricScore::new(average, feedbacks.join(" | "))
}

/// 1側分の膝角度を帯域テーブルで採点する
fn grade_side(label: &str, angle: f32) -> (f32, String) {
    for (band, &(lo, hi, band_score)) in KNEE_ANGLE_BANDS.iter().enumerate() {
        if angle >= lo && angle <= hi {
            let feedback = match band {
                0 => format!("{}: Excellent alignment", label),
                1 => format!("{}: Good alignment", label),
                _ => format!("{}: Moderate alignment issues", label),
            };
            return (band_score, feedback);
        }
    }
    (
        OUT_OF_BAND_SCORE,
        format!("{}: Poor alignment (angle: {:.1}°)", label, angle),
    )
}

/// 頂点での内角（度）
///
/// 頂点から両端点へのベクトルの正規化内積から求める。
/// 数値誤差対策で cos は [-1, 1] に切り詰める。
/// どちらかのベクトルが零長なら None。
fn angle_at_vertex(point1: Point, vertex: Point, point2: Point) -> Option<f32> {
    let v1 = (point1.x - vertex.x, point1.y - vertex.y);
    let v2 = (point2.x - vertex.x, point2.y - vertex.y);

    let norm1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let norm2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if norm1 == 0.0 || norm2 == 0.0 {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos = (dot / (norm1 * norm2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
