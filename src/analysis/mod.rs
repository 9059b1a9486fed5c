//! スクワット解析パイプライン
//!
//! 正規化 → 最下点特定 → 4指標評価 → 総合評価 の一方向フロー。
//! 全段が入力シーケンスの長さとフレーム順を保存する。

pub mod bottom;
pub mod metrics;
pub mod rating;
pub mod view;

use crate::pose::Frame;
use crate::report::AnalysisReport;

use self::rating::{MetricSet, Weights};

/// フレームが1枚も届かなかったときのエラー文
pub const EMPTY_INPUT_ERROR: &str = "No frames detected in video";

/// キーポイントシーケンスを解析してレポートを作る
///
/// 空入力はパイプライン全体の短絡（0点・F・エラー文のみ）。
/// それ以外の欠損は各指標が個別に診断メッセージで報告し、
/// 他の指標や集計を妨げない。
pub fn analyze(frames: &[Frame], weights: &Weights) -> AnalysisReport {
    if frames.is_empty() {
        return AnalysisReport::error(rating::error_rating(EMPTY_INPUT_ERROR));
    }

    // 視点分類は先頭サンプルから一度だけ導出し、以降は固定
    let view = view::classify(view::sample_prefix(frames));
    let canonical = view::canonicalize(frames, &view);

    let bottom_index = bottom::locate_bottom(&canonical);

    let metrics = MetricSet {
        knee_tracking: metrics::knee_tracking::score(&canonical, bottom_index),
        back_angle: metrics::back_angle::score(&canonical, bottom_index),
        depth: metrics::depth::score(&canonical, bottom_index),
        alignment: metrics::alignment::score(&canonical, bottom_index),
    };

    let rating = rating::rate(&metrics, weights);

    AnalysisReport::from_analysis(rating, &metrics, weights, &view, bottom_index, canonical.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, Point};

    /// 13ランドマーク全てが揃った横向き（左向き）立ち姿勢フレーム
    fn full_frame(hip_y: f32) -> Frame {
        let mut frame = Frame::empty();
        frame.set(Landmark::Nose, Some(Point::new(0.45, 0.15)));
        frame.set(Landmark::LeftShoulder, Some(Point::new(0.50, 0.30)));
        frame.set(Landmark::RightShoulder, Some(Point::new(0.52, 0.31)));
        frame.set(Landmark::LeftElbow, Some(Point::new(0.49, 0.42)));
        frame.set(Landmark::RightElbow, Some(Point::new(0.51, 0.43)));
        frame.set(Landmark::LeftWrist, Some(Point::new(0.48, 0.52)));
        frame.set(Landmark::RightWrist, Some(Point::new(0.50, 0.53)));
        frame.set(Landmark::LeftHip, Some(Point::new(0.44, hip_y)));
        frame.set(Landmark::RightHip, Some(Point::new(0.46, hip_y)));
        frame.set(Landmark::LeftKnee, Some(Point::new(0.46, 0.72)));
        frame.set(Landmark::RightKnee, Some(Point::new(0.48, 0.73)));
        frame.set(Landmark::LeftAnkle, Some(Point::new(0.45, 0.92)));
        frame.set(Landmark::RightAnkle, Some(Point::new(0.47, 0.93)));
        frame
    }

    #[test]
    fn test_analyze_empty_sequence() {
        let report = analyze(&[], &Weights::default());
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.rating.as_str(), "F");
        assert_eq!(report.feedback, EMPTY_INPUT_ERROR);
        assert!(report.breakdown.is_none());
        assert!(report.video_angle.is_none());
    }

    #[test]
    fn test_analyze_full_sequence_bottom_at_ten() {
        // 20フレーム全てに13ランドマーク、index 10 だけ腰が厳密に最も低い
        let mut frames: Vec<Frame> = (0..20).map(|_| full_frame(0.55)).collect();
        frames[10] = full_frame(0.78);

        let report = analyze(&frames, &Weights::default());
        assert_eq!(report.bottom_frame_idx, Some(10));
        assert_eq!(report.total_frames, Some(20));

        let breakdown = report.breakdown.as_ref().unwrap();
        // 全指標にフィードバックが付く
        assert!(!breakdown.knee_tracking.feedback.is_empty());
        assert!(!breakdown.back_angle.feedback.is_empty());
        assert!(!breakdown.depth.feedback.is_empty());
        assert!(!breakdown.alignment.feedback.is_empty());

        let view = report.video_angle.as_ref().unwrap();
        assert_eq!(view.view_angle.as_str(), "side_view");
        assert!(view.is_ideal);
        assert!(report.angle_warning.is_none());
    }

    #[test]
    fn test_analyze_preserves_input() {
        let frames = vec![full_frame(0.55); 5];
        let before = frames.clone();
        let _ = analyze(&frames, &Weights::default());
        assert_eq!(frames, before);
    }

    #[test]
    fn test_analyze_front_view_carries_warning() {
        // 幅広の肩と鼻 = 正面
        let mut frame = Frame::empty();
        frame.set(Landmark::Nose, Some(Point::new(0.5, 0.15)));
        frame.set(Landmark::LeftShoulder, Some(Point::new(0.35, 0.30)));
        frame.set(Landmark::RightShoulder, Some(Point::new(0.65, 0.30)));
        let frames = vec![frame; 6];

        let report = analyze(&frames, &Weights::default());
        let view = report.video_angle.as_ref().unwrap();
        assert_eq!(view.view_angle.as_str(), "front_view");
        assert!(!view.is_ideal);
        assert!(report.angle_warning.is_some());
        // 腰が全フレーム未検出 → 最下点は中央フレーム
        assert_eq!(report.bottom_frame_idx, Some(3));
    }
}
