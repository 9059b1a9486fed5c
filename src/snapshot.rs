//! スナップショット用フレーム選定
//!
//! プレビュー画像の描画自体は外部のプレゼンテーション層の仕事。
//! ここでは動作サイクルの5地点に対応するフレームインデックスだけを
//! 決める（最下点と総フレーム数に対する固定比率の純関数）。
//! 採点ロジックには一切影響しない。

use serde::Serialize;

/// 動作サイクル上の5地点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPoint {
    Start,
    MidDescent,
    Bottom,
    MidAscent,
    End,
}

impl SnapshotPoint {
    pub const ALL: [SnapshotPoint; 5] = [
        Self::Start,
        Self::MidDescent,
        Self::Bottom,
        Self::MidAscent,
        Self::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::MidDescent => "mid_descent",
            Self::Bottom => "bottom",
            Self::MidAscent => "mid_ascent",
            Self::End => "end",
        }
    }
}

/// 5地点のフレームインデックスを決める
///
/// start=0、mid_descent=最下点の中間、bottom=最下点、
/// mid_ascent=最下点と最終フレームの中間、end=最終フレーム。
/// 整数演算のみで、返るインデックスは常に範囲内。
/// 短い動画では複数地点が同じフレームを指すことがある。
pub fn plan(bottom_index: usize, total_frames: usize) -> Vec<(SnapshotPoint, usize)> {
    if total_frames == 0 {
        return Vec::new();
    }

    let last = total_frames - 1;
    let bottom = bottom_index.min(last);

    vec![
        (SnapshotPoint::Start, 0),
        (SnapshotPoint::MidDescent, bottom / 2),
        (SnapshotPoint::Bottom, bottom),
        (SnapshotPoint::MidAscent, bottom + (last - bottom) / 2),
        (SnapshotPoint::End, last),
    ]
}
