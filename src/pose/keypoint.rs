/// 解析対象の13ランドマーク
///
/// MediaPipe Pose の33点のうち、スクワット解析に使う頭・体幹・腕・下肢のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Landmark {
    Nose = 0,
    LeftShoulder = 1,
    RightShoulder = 2,
    LeftElbow = 3,
    RightElbow = 4,
    LeftWrist = 5,
    RightWrist = 6,
    LeftHip = 7,
    RightHip = 8,
    LeftKnee = 9,
    RightKnee = 10,
    LeftAnkle = 11,
    RightAnkle = 12,
}

impl Landmark {
    pub const COUNT: usize = 13;

    /// 全ランドマーク（インデックス順）
    pub const ALL: [Landmark; Self::COUNT] = [
        Self::Nose,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// シリアライズ用の名前 (snake_case)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.name() == name)
    }

    /// 左右反転時の対応ランドマーク（鼻は自分自身）
    pub fn mirror(&self) -> Self {
        match self {
            Self::Nose => Self::Nose,
            Self::LeftShoulder => Self::RightShoulder,
            Self::RightShoulder => Self::LeftShoulder,
            Self::LeftElbow => Self::RightElbow,
            Self::RightElbow => Self::LeftElbow,
            Self::LeftWrist => Self::RightWrist,
            Self::RightWrist => Self::LeftWrist,
            Self::LeftHip => Self::RightHip,
            Self::RightHip => Self::LeftHip,
            Self::LeftKnee => Self::RightKnee,
            Self::RightKnee => Self::LeftKnee,
            Self::LeftAnkle => Self::RightAnkle,
            Self::RightAnkle => Self::LeftAnkle,
        }
    }
}

/// 単一ランドマークの座標
///
/// 画像フレームに対する正規化座標 (概ね0.0〜1.0)。yは下向きが正。
/// フレーム端の外挿で範囲を僅かに超えることがあり、切り詰めは行わない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 1フレーム分のランドマーク集合
///
/// 13ランドマーク全てにエントリを持ち、未検出は None。
/// 検出器側で可視性0.5未満は除外済みのため、信頼度は保持しない。
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    points: [Option<Point>; Landmark::COUNT],
}

impl Frame {
    /// 全ランドマーク未検出のフレーム
    pub fn empty() -> Self {
        Self {
            points: [None; Landmark::COUNT],
        }
    }

    pub fn get(&self, landmark: Landmark) -> Option<Point> {
        self.points[landmark as usize]
    }

    pub fn set(&mut self, landmark: Landmark, point: Option<Point>) {
        self.points[landmark as usize] = point;
    }

    /// 検出済みランドマーク数
    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// 水平反転した新しいフレームを返す
    ///
    /// 検出済みの点は x' = 1 - x、その後に左右ペアの値を入れ替える。
    /// 鼻は対応点がないため入れ替え対象外。2回適用すると元に戻る。
    pub fn mirrored(&self) -> Self {
        let mut mirrored = Self::empty();
        for landmark in Landmark::ALL {
            let flipped = self.get(landmark).map(|p| Point::new(1.0 - p.x, p.y));
            mirrored.set(landmark.mirror(), flipped);
        }
        mirrored
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::empty()
    }
}
