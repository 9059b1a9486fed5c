//! 深さ指標（最下点で腰が膝より下がっているか）

use crate::pose::{Frame, Landmark};

use super::{bottom_frame, pair_midpoint, MetricScore};

/// 腰が膝を下回る割合（%）の帯域境界
const BELOW_EXCELLENT_MIN: f32 = 5.0;
const BELOW_GOOD_MIN: f32 = 2.0;
/// 腰が膝に届かない割合（%）の帯域境界
const SHORT_NEAR_MAX: f32 = 2.0;
const SHORT_MODERATE_MAX: f32 = 5.0;

/// 最下点での腰と膝の上下関係を評価する
///
/// 画像座標は y が下向きに増えるため、hip.y > knee.y が「腰が膝より下」。
/// 下回り・不足の割合は膝の y を基準にした百分率で表す。
pub fn score(frames: &[Frame], bottom_index: usize) -> MetricScore {
    let Some(frame) = bottom_frame(frames, bottom_index) else {
        return MetricScore::no_bottom();
    };

    let hip = pair_midpoint(frame.get(Landmark::LeftHip), frame.get(Landmark::RightHip));
    let knee = pair_midpoint(frame.get(Landmark::LeftKnee), frame.get(Landmark::RightKnee));

    let (Some(hip), Some(knee)) = (hip, knee) else {
        return MetricScore::new(0.0, "Could not detect hip/knee positions");
    };

    let (score, feedback) = if hip.y > knee.y {
        // 並行以下に達している
        let below = (hip.y - knee.y) / knee.y * 100.0;
        if below > BELOW_EXCELLENT_MIN {
            (
                100.0f32,
                format!("Excellent depth - hips well below knees ({:.1}% below)", below),
            )
        } else if below > BELOW_GOOD_MIN {
            (
                90.0,
                format!("Good depth - hips below knees ({:.1}% below)", below),
            )
        } else {
            (
                80.0,
                format!("Adequate depth - hips just below knees ({:.1}% below)", below),
            )
        }
    } else {
        // 腰が膝の高さに届いていない
        let shortage = (knee.y - hip.y) / knee.y * 100.0;
        if shortage < SHORT_NEAR_MAX {
            (
                60.0,
                "Shallow squat - hips at knee level. Go deeper for full range of motion."
                    .to_string(),
            )
        } else if shortage < SHORT_MODERATE_MAX {
            (
                40.0,
                format!(
                    "Shallow squat - hips {:.1}% above knees. Focus on achieving parallel or below.",
                    shortage
                ),
            )
        } else {
            (
                20.0,
                format!(
                    "Very shallow squat - hips {:.1}% above knees. Need significant improvement in depth.",
                    shortage
                ),
            )
        }
    };

    MetricScore::new(score.clamp(0.0, 100.0), feedback)
}
