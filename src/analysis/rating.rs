//! 総合評価（重み付きスコア・レター評価・フィードバック合成）

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::metrics::MetricScore;

/// 指標の固定列挙順
///
/// 最弱指標の同点タイブレークはこの順で決まるため、順序を変えない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    KneeTracking,
    BackAngle,
    Depth,
    Alignment,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Self::KneeTracking,
        Self::BackAngle,
        Self::Depth,
        Self::Alignment,
    ];

    /// フィードバック文中の表示名
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::KneeTracking => "Knee Tracking",
            Self::BackAngle => "Back Angle",
            Self::Depth => "Depth",
            Self::Alignment => "Alignment",
        }
    }
}

/// 4指標の評価結果一式
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    pub knee_tracking: MetricScore,
    pub back_angle: MetricScore,
    pub depth: MetricScore,
    pub alignment: MetricScore,
}

impl MetricSet {
    pub fn get(&self, metric: Metric) -> &MetricScore {
        match metric {
            Metric::KneeTracking => &self.knee_tracking,
            Metric::BackAngle => &self.back_angle,
            Metric::Depth => &self.depth,
            Metric::Alignment => &self.alignment,
        }
    }
}

/// 指標の重み
///
/// 合計がちょうど1.0であることが総合スコアの前提。
/// 設定で上書きする場合も validate で必ず検証する。
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Weights {
    #[serde(default = "default_knee_tracking_weight")]
    pub knee_tracking: f32,
    #[serde(default = "default_back_angle_weight")]
    pub back_angle: f32,
    #[serde(default = "default_depth_weight")]
    pub depth: f32,
    #[serde(default = "default_alignment_weight")]
    pub alignment: f32,
}

fn default_knee_tracking_weight() -> f32 { 0.25 }
fn default_back_angle_weight() -> f32 { 0.25 }
fn default_depth_weight() -> f32 { 0.30 }
fn default_alignment_weight() -> f32 { 0.20 }

impl Default for Weights {
    fn default() -> Self {
        Self {
            knee_tracking: default_knee_tracking_weight(),
            back_angle: default_back_angle_weight(),
            depth: default_depth_weight(),
            alignment: default_alignment_weight(),
        }
    }
}

impl Weights {
    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::KneeTracking => self.knee_tracking,
            Metric::BackAngle => self.back_angle,
            Metric::Depth => self.depth,
            Metric::Alignment => self.alignment,
        }
    }

    /// 合計1.0の不変条件を検証する
    pub fn validate(&self) -> Result<()> {
        let sum: f32 = Metric::ALL.iter().map(|&m| self.get(m)).sum();
        if (sum - 1.0).abs() > 1e-6 {
            bail!("metric weights must sum to 1.0 (got {})", sum);
        }
        Ok(())
    }
}

/// レター評価（5段階）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// 整数スコアからの固定帯域
    pub fn for_score(score: u32) -> Self {
        if score >= 90 {
            Self::A
        } else if score >= 80 {
            Self::B
        } else if score >= 70 {
            Self::C
        } else if score >= 60 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// 総合評価結果
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub overall_score: u32,
    pub grade: Grade,
    pub feedback: String,
}

/// 4指標を重み付き合計して総合評価を作る
pub fn rate(metrics: &MetricSet, weights: &Weights) -> Rating {
    let weighted: f32 = Metric::ALL
        .iter()
        .map(|&m| metrics.get(m).score * weights.get(m))
        .sum();
    let overall_score = weighted.round() as u32;

    Rating {
        overall_score,
        grade: Grade::for_score(overall_score),
        feedback: compose_feedback(overall_score, metrics),
    }
}

/// パイプライン全体が失敗したときの短絡評価
///
/// 重み付けを通さず 0点・F とし、フィードバックに上流のエラー文を載せる。
pub fn error_rating(message: impl Into<String>) -> Rating {
    Rating {
        overall_score: 0,
        grade: Grade::F,
        feedback: message.into(),
    }
}

/// 総合帯域の所感 + 最弱指標の重点 + 最強指標の強みを合成する
fn compose_feedback(overall_score: u32, metrics: &MetricSet) -> String {
    let mut parts: Vec<String> = Vec::new();

    let summary = if overall_score >= 90 {
        "Excellent squat form! Your technique is very solid."
    } else if overall_score >= 80 {
        "Good squat form with minor areas for improvement."
    } else if overall_score >= 70 {
        "Decent squat form, but there are several areas to work on."
    } else if overall_score >= 60 {
        "Your squat form needs improvement. Focus on the key areas below."
    } else {
        "Your squat form requires significant attention. Consider working with a trainer or reviewing proper technique."
    };
    parts.push(summary.to_string());

    // 最弱: 同点なら列挙順で先の指標（厳密な < で先勝ち）
    let mut weakest = Metric::KneeTracking;
    for m in Metric::ALL {
        if metrics.get(m).score < metrics.get(weakest).score {
            weakest = m;
        }
    }
    let weakest_score = metrics.get(weakest).score;
    if weakest_score < 70.0 {
        parts.push(format!(
            "\nPriority Focus: {} is your weakest area (score: {:.0}/100).",
            weakest.display_name(),
            weakest_score
        ));
        parts.push(format!("  → {}", metrics.get(weakest).feedback));
    }

    // 最強: 同点なら列挙順で後の指標（>= で後勝ち）
    let mut strongest = Metric::KneeTracking;
    for m in Metric::ALL {
        if metrics.get(m).score >= metrics.get(strongest).score {
            strongest = m;
        }
    }
    let strongest_score = metrics.get(strongest).score;
    if strongest_score >= 85.0 {
        parts.push(format!(
            "\nStrength: {} is performing well (score: {:.0}/100).",
            strongest.display_name(),
            strongest_score
        ));
    }

    parts.join("\n")
}
