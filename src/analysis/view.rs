//! カメラ視点の分類と左右正規化

use serde::Serialize;

use crate::pose::{Frame, Landmark};

/// 視点分類に使う先頭フレーム数（立ち姿勢想定）
pub const SAMPLE_FRAMES: usize = 10;

/// 横向き判定: 肩の水平距離の上限
const SIDE_WIDTH_MAX: f32 = 0.05;
/// 斜め判定: 肩の水平距離の上限
const ANGLED_WIDTH_MAX: f32 = 0.15;
/// 正面/背面判定: 幅/奥行き比の下限
const FRONTAL_RATIO_MIN: f32 = 10.0;
/// 正面判定: 鼻の検出率の下限
const NOSE_VISIBLE_MIN: f32 = 0.5;
/// 比計算のゼロ除算回避
const DEPTH_EPS: f32 = 1e-3;
/// 向き判定: 鼻と肩中心のxオフセット閾値
const ORIENTATION_MARGIN: f32 = 0.02;

/// カメラ視点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAngle {
    /// 真横 (90°)、唯一の理想視点
    SideView,
    /// 正面 (0°)
    FrontView,
    /// 背面 (180°)
    BackView,
    /// 斜め (30〜60° / 120〜150°)
    AngledView,
    Unknown,
}

impl ViewAngle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SideView => "side_view",
            Self::FrontView => "front_view",
            Self::BackView => "back_view",
            Self::AngledView => "angled_view",
            Self::Unknown => "unknown",
        }
    }
}

/// 横向き時の被写体の向き
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    FacingLeft,
    FacingRight,
    Unknown,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FacingLeft => "facing_left",
            Self::FacingRight => "facing_right",
            Self::Unknown => "unknown",
        }
    }
}

/// 足首の検出率（サンプル内）
///
/// 分類の入力にはせず、診断情報としてのみ保持する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnkleVisibility {
    pub left: f32,
    pub right: f32,
}

/// サンプルから一度だけ導出する視点分類
///
/// 以降の全フレーム処理はこの値を参照し、フレーム毎の再判定は行わない。
#[derive(Debug, Clone, PartialEq)]
pub struct ViewClassification {
    pub angle: ViewAngle,
    /// SideView のときのみ意味を持つ（それ以外は Unknown）
    pub orientation: Orientation,
    pub ankle_visibility: AnkleVisibility,
}

impl ViewClassification {
    /// 横向きが唯一の理想視点
    pub fn is_ideal(&self) -> bool {
        self.angle == ViewAngle::SideView
    }

    /// 理想視点でない場合の注意文
    pub fn warning(&self) -> Option<&'static str> {
        match self.angle {
            ViewAngle::SideView => None,
            ViewAngle::FrontView => {
                Some("Front view detected. Side view recommended for accurate analysis.")
            }
            ViewAngle::BackView => {
                Some("Back view detected. Side view recommended for accurate analysis.")
            }
            ViewAngle::AngledView => {
                Some("Angled view detected. Side view (90°) recommended for best results.")
            }
            ViewAngle::Unknown => {
                Some("Could not determine video angle. Side view recommended.")
            }
        }
    }
}

/// シーケンス先頭の分類用サンプルを切り出す
pub fn sample_prefix(frames: &[Frame]) -> &[Frame] {
    &frames[..frames.len().min(SAMPLE_FRAMES)]
}

/// サンプルから視点と向きを分類する
pub fn classify(sample: &[Frame]) -> ViewClassification {
    let angle = classify_angle(sample);
    // 向きは横向きのときだけ判定する
    let orientation = if angle == ViewAngle::SideView {
        classify_orientation(sample)
    } else {
        Orientation::Unknown
    };

    ViewClassification {
        angle,
        orientation,
        ankle_visibility: ankle_visibility(sample),
    }
}

/// 肩の幅と奥行きの関係から視点を判定
///
/// 横向き: 両肩が重なり幅が極小。正面/背面: 幅が大きく奥行きが小さい。
/// 斜め: 幅が中間。判定は上から順に評価し最初に一致したものを採用する。
fn classify_angle(sample: &[Frame]) -> ViewAngle {
    let mut widths = Vec::new();
    let mut depths = Vec::new();

    for frame in sample {
        if let (Some(left), Some(right)) = (
            frame.get(Landmark::LeftShoulder),
            frame.get(Landmark::RightShoulder),
        ) {
            widths.push((right.x - left.x).abs());
            depths.push((right.y - left.y).abs());
        }
    }

    if widths.is_empty() {
        return ViewAngle::Unknown;
    }

    let avg_width = mean(&widths);
    let avg_depth = mean(&depths);
    let ratio = avg_width / (avg_depth + DEPTH_EPS);

    if avg_width < SIDE_WIDTH_MAX {
        ViewAngle::SideView
    } else if ratio > FRONTAL_RATIO_MIN {
        // 正面と背面は鼻の見え方で区別する
        if nose_visible_fraction(sample) > NOSE_VISIBLE_MIN {
            ViewAngle::FrontView
        } else {
            ViewAngle::BackView
        }
    } else if avg_width <= ANGLED_WIDTH_MAX {
        ViewAngle::AngledView
    } else {
        ViewAngle::Unknown
    }
}

/// 鼻と肩中心の位置関係から向きを判定（横向き専用）
fn classify_orientation(sample: &[Frame]) -> Orientation {
    let mut nose_xs = Vec::new();
    let mut center_xs = Vec::new();

    for frame in sample {
        if let (Some(nose), Some(left), Some(right)) = (
            frame.get(Landmark::Nose),
            frame.get(Landmark::LeftShoulder),
            frame.get(Landmark::RightShoulder),
        ) {
            nose_xs.push(nose.x);
            center_xs.push((left.x + right.x) / 2.0);
        }
    }

    if nose_xs.is_empty() {
        return Orientation::Unknown;
    }

    let avg_nose_x = mean(&nose_xs);
    let avg_center_x = mean(&center_xs);

    if avg_nose_x < avg_center_x - ORIENTATION_MARGIN {
        Orientation::FacingLeft
    } else if avg_nose_x > avg_center_x + ORIENTATION_MARGIN {
        Orientation::FacingRight
    } else {
        Orientation::Unknown
    }
}

fn ankle_visibility(sample: &[Frame]) -> AnkleVisibility {
    if sample.is_empty() {
        return AnkleVisibility { left: 0.0, right: 0.0 };
    }
    let count = |landmark: Landmark| {
        sample.iter().filter(|f| f.get(landmark).is_some()).count() as f32 / sample.len() as f32
    };
    AnkleVisibility {
        left: count(Landmark::LeftAnkle),
        right: count(Landmark::RightAnkle),
    }
}

fn nose_visible_fraction(sample: &[Frame]) -> f32 {
    if sample.is_empty() {
        return 0.0;
    }
    let visible = sample
        .iter()
        .filter(|f| f.get(Landmark::Nose).is_some())
        .count();
    visible as f32 / sample.len() as f32
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

/// 分類に基づいてシーケンス全体を正規化する
///
/// 横向き・右向きのみ鏡像化して常に左向き表現に揃える。
/// 斜め視点の透視補正は行わない（分類のみ成功し変換は恒等）。
/// 長さとフレーム順は必ず保存する。
pub fn canonicalize(frames: &[Frame], view: &ViewClassification) -> Vec<Frame> {
    let mirror = view.angle == ViewAngle::SideView && view.orientation == Orientation::FacingRight;
    if mirror {
        frames.iter().map(Frame::mirrored).collect()
    } else {
        frames.to_vec()
    }
}
