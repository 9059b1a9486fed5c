//! フォーム評価指標
//!
//! 4指標（膝トラッキング・背中角度・深さ・アライメント）は全て
//! 正規化済みシーケンスと最下点インデックスの純関数で、
//! 最下点フレーム1枚だけを参照する（時間方向の平滑化はしない）。

pub mod alignment;
pub mod back_angle;
pub mod depth;
pub mod knee_tracking;

use crate::pose::{Frame, Point};

/// 指標1件の評価結果
///
/// スコアは [0, 100]。フィードバック文は必ず付随し、
/// スコアだけ返す経路は存在しない。
#[derive(Debug, Clone, PartialEq)]
pub struct MetricScore {
    pub score: f32,
    pub feedback: String,
}

impl MetricScore {
    pub fn new(score: f32, feedback: impl Into<String>) -> Self {
        Self {
            score,
            feedback: feedback.into(),
        }
    }

    /// 最下点インデックスが範囲外のときの共通結果
    pub(crate) fn no_bottom() -> Self {
        Self::new(0.0, "Could not detect squat bottom position")
    }
}

/// 範囲内なら最下点フレームを返す
pub(crate) fn bottom_frame(frames: &[Frame], bottom_index: usize) -> Option<&Frame> {
    frames.get(bottom_index)
}

/// 左右ペアの代表点
///
/// 両方検出なら中点、片側のみならその点、両方未検出なら None。
pub(crate) fn pair_midpoint(left: Option<Point>, right: Option<Point>) -> Option<Point> {
    match (left, right) {
        (Some(l), Some(r)) => Some(Point::new((l.x + r.x) / 2.0, (l.y + r.y) / 2.0)),
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}
