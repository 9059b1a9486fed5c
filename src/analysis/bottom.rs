//! スクワット最下点フレームの特定

use crate::pose::{Frame, Landmark};

/// 最下点（腰が最も低い）フレームのインデックスを返す
///
/// 腰の高さは左右ヒップyの平均、片側のみ検出ならその側のy、
/// 両方未検出なら +∞ とする。画像座標はyが下向きに増えるため
/// 最大値のフレームが視覚的に最も低い。同値は先のフレームを採用。
/// 全フレームで腰が未検出の場合は中央フレーム (len / 2) に固定する。
pub fn locate_bottom(frames: &[Frame]) -> usize {
    let mut best_index = 0;
    let mut best_height = f32::NEG_INFINITY;
    let mut any_hip = false;

    for (index, frame) in frames.iter().enumerate() {
        let height = hip_height(frame);
        if height.is_finite() {
            any_hip = true;
        }
        if height > best_height {
            best_height = height;
            best_index = index;
        }
    }

    if !any_hip {
        return frames.len() / 2;
    }
    best_index
}

/// フレームの腰高さプロキシ
fn hip_height(frame: &Frame) -> f32 {
    let left = frame.get(Landmark::LeftHip);
    let right = frame.get(Landmark::RightHip);
    match (left, right) {
        (Some(l), Some(r)) => (l.y + r.y) / 2.0,
        (Some(l), None) => l.y,
        (None, Some(r)) => r.y,
        (None, None) => f32::INFINITY,
    }
}
