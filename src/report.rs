//! Analysis report types (output contract to the presentation layer).
//!
//! Serialized as JSON for whatever front end renders the results. Fields
//! that do not apply are omitted entirely (`skip_serializing_if`), not
//! serialized as null: an empty-input report carries only the zero score,
//! the F grade and the error feedback.

use serde::Serialize;

use crate::analysis::rating::{Grade, Metric, MetricSet, Rating, Weights};
use crate::analysis::view::{Orientation, ViewAngle, ViewClassification};

/// One metric's slice of the breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    pub score: u32,
    pub weight: f32,
    pub feedback: String,
}

/// Per-metric breakdown, metric feedback retained verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    pub knee_tracking: MetricReport,
    pub back_angle: MetricReport,
    pub depth: MetricReport,
    pub alignment: MetricReport,
}

/// Camera-view diagnostics attached to every successful report.
#[derive(Debug, Clone, Serialize)]
pub struct ViewInfo {
    pub view_angle: ViewAngle,
    /// Facing direction; only derived for side views.
    pub orientation: Option<Orientation>,
    pub is_ideal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Top-level analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub overall_score: u32,
    pub rating: Grade,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_frame_idx: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_angle: Option<ViewInfo>,
    /// Duplicated from `video_angle.warning` for front ends that only
    /// surface the top-level field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_warning: Option<String>,
}

impl AnalysisReport {
    /// Pipeline-level failure: scoring fields are absent, not zeroed.
    pub fn error(rating: Rating) -> Self {
        Self {
            overall_score: rating.overall_score,
            rating: rating.grade,
            feedback: rating.feedback,
            breakdown: None,
            bottom_frame_idx: None,
            total_frames: None,
            video_angle: None,
            angle_warning: None,
        }
    }

    /// Assemble the full report for a completed analysis.
    pub fn from_analysis(
        rating: Rating,
        metrics: &MetricSet,
        weights: &Weights,
        view: &ViewClassification,
        bottom_index: usize,
        total_frames: usize,
    ) -> Self {
        let metric_report = |metric: Metric| {
            let result = metrics.get(metric);
            MetricReport {
                score: result.score.round() as u32,
                weight: weights.get(metric),
                feedback: result.feedback.clone(),
            }
        };

        let warning = view.warning().map(str::to_string);
        let orientation = if view.angle == ViewAngle::SideView {
            Some(view.orientation)
        } else {
            None
        };

        Self {
            overall_score: rating.overall_score,
            rating: rating.grade,
            feedback: rating.feedback,
            breakdown: Some(Breakdown {
                knee_tracking: metric_report(Metric::KneeTracking),
                back_angle: metric_report(Metric::BackAngle),
                depth: metric_report(Metric::Depth),
                alignment: metric_report(Metric::Alignment),
            }),
            bottom_frame_idx: Some(bottom_index),
            total_frames: Some(total_frames),
            video_angle: Some(ViewInfo {
                view_angle: view.angle,
                orientation,
                is_ideal: view.is_ideal(),
                warning: warning.clone(),
            }),
            angle_warning: warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics::MetricScore;
    use crate::analysis::rating::{error_rating, rate};
    use crate::analysis::view::AnkleVisibility;

    fn sample_metrics() -> MetricSet {
        MetricSet {
            knee_tracking: MetricScore::new(100.0, "knee ok"),
            back_angle: MetricScore::new(85.0, "back ok"),
            depth: MetricScore::new(90.0, "depth ok"),
            alignment: MetricScore::new(70.0, "alignment meh"),
        }
    }

    fn side_view() -> ViewClassification {
        ViewClassification {
            angle: ViewAngle::SideView,
            orientation: Orientation::FacingLeft,
            ankle_visibility: AnkleVisibility { left: 1.0, right: 1.0 },
        }
    }

    #[test]
    fn test_error_report_serialization_shape() {
        let report = AnalysisReport::error(error_rating("No frames detected in video"));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["overall_score"], 0);
        assert_eq!(json["rating"], "F");
        assert_eq!(json["feedback"], "No frames detected in video");
        // 省略フィールドはnullではなくキーごと消える
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("breakdown"));
        assert!(!object.contains_key("bottom_frame_idx"));
        assert!(!object.contains_key("video_angle"));
        assert!(!object.contains_key("angle_warning"));
    }

    #[test]
    fn test_full_report_serialization() {
        let metrics = sample_metrics();
        let weights = Weights::default();
        let rating = rate(&metrics, &weights);
        let report =
            AnalysisReport::from_analysis(rating, &metrics, &weights, &side_view(), 10, 20);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["overall_score"], 87);
        assert_eq!(json["rating"], "B");
        assert_eq!(json["bottom_frame_idx"], 10);
        assert_eq!(json["total_frames"], 20);
        assert_eq!(json["breakdown"]["depth"]["score"], 90);
        assert!((json["breakdown"]["depth"]["weight"].as_f64().unwrap() - 0.30).abs() < 1e-6);
        assert_eq!(json["breakdown"]["alignment"]["feedback"], "alignment meh");
        assert_eq!(json["video_angle"]["view_angle"], "side_view");
        assert_eq!(json["video_angle"]["orientation"], "facing_left");
        assert_eq!(json["video_angle"]["is_ideal"], true);
        // 横向きでは警告なし
        let view_object = json["video_angle"].as_object().unwrap();
        assert!(!view_object.contains_key("warning"));
        assert!(!json.as_object().unwrap().contains_key("angle_warning"));
    }

    #[test]
    fn test_non_ideal_view_carries_warning() {
        let metrics = sample_metrics();
        let weights = Weights::default();
        let rating = rate(&metrics, &weights);
        let view = ViewClassification {
            angle: ViewAngle::AngledView,
            orientation: Orientation::Unknown,
            ankle_visibility: AnkleVisibility { left: 0.5, right: 0.5 },
        };
        let report = AnalysisReport::from_analysis(rating, &metrics, &weights, &view, 4, 9);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["video_angle"]["view_angle"], "angled_view");
        // 横向き以外では向きは導出しない
        assert_eq!(json["video_angle"]["orientation"], serde_json::Value::Null);
        assert_eq!(json["video_angle"]["is_ideal"], false);
        assert!(json["angle_warning"].as_str().unwrap().contains("Angled view"));
        assert_eq!(json["video_angle"]["warning"], json["angle_warning"]);
    }
}
