//! Landmarks - per-frame body joints from the pose estimator
//!
//! The estimator hands over a fixed, ordered set of 33 landmarks each frame.
//! A landmark is immutable once read; the frame is the unit of processing.

use serde::{Deserialize, Serialize};

use crate::{RepTrackError, RepTrackResult};

/// Body part, indexed by the pose estimator's landmark layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodyPart {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyPart {
    /// Number of landmarks in a full frame
    pub const COUNT: usize = 33;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEyeInner => "left_eye_inner",
            BodyPart::LeftEye => "left_eye",
            BodyPart::LeftEyeOuter => "left_eye_outer",
            BodyPart::RightEyeInner => "right_eye_inner",
            BodyPart::RightEye => "right_eye",
            BodyPart::RightEyeOuter => "right_eye_outer",
            BodyPart::LeftEar => "left_ear",
            BodyPart::RightEar => "right_ear",
            BodyPart::MouthLeft => "mouth_left",
            BodyPart::MouthRight => "mouth_right",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftElbow => "left_elbow",
            BodyPart::RightElbow => "right_elbow",
            BodyPart::LeftWrist => "left_wrist",
            BodyPart::RightWrist => "right_wrist",
            BodyPart::LeftPinky => "left_pinky",
            BodyPart::RightPinky => "right_pinky",
            BodyPart::LeftIndex => "left_index",
            BodyPart::RightIndex => "right_index",
            BodyPart::LeftThumb => "left_thumb",
            BodyPart::RightThumb => "right_thumb",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
            BodyPart::LeftKnee => "left_knee",
            BodyPart::RightKnee => "right_knee",
            BodyPart::LeftAnkle => "left_ankle",
            BodyPart::RightAnkle => "right_ankle",
            BodyPart::LeftHeel => "left_heel",
            BodyPart::RightHeel => "right_heel",
            BodyPart::LeftFootIndex => "left_foot_index",
            BodyPart::RightFootIndex => "right_foot_index",
        }
    }
}

/// Body side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn shoulder(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftShoulder,
            Side::Right => BodyPart::RightShoulder,
        }
    }

    pub fn elbow(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftElbow,
            Side::Right => BodyPart::RightElbow,
        }
    }

    pub fn wrist(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftWrist,
            Side::Right => BodyPart::RightWrist,
        }
    }

    pub fn hip(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftHip,
            Side::Right => BodyPart::RightHip,
        }
    }

    pub fn knee(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftKnee,
            Side::Right => BodyPart::RightKnee,
        }
    }

    pub fn ankle(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftAnkle,
            Side::Right => BodyPart::RightAnkle,
        }
    }

    pub fn ear(self) -> BodyPart {
        match self {
            Side::Left => BodyPart::LeftEar,
            Side::Right => BodyPart::RightEar,
        }
    }
}

/// Position in normalized image coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Point { x, y, z }
    }

    #[inline]
    pub fn planar(x: f32, y: f32) -> Self {
        Point { x, y, z: 0.0 }
    }

    #[inline]
    pub fn translate(self, dx: f32, dy: f32, dz: f32) -> Self {
        Point {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// A tracked joint: position plus visibility in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth, when the estimator provides one
    pub z: Option<f32>,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Landmark {
            x,
            y,
            z: None,
            visibility,
        }
    }

    pub fn with_depth(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Landmark {
            x,
            y,
            z: Some(z),
            visibility,
        }
    }

    /// Image-plane position; angle math runs in 2D
    #[inline]
    pub fn point(&self) -> Point {
        Point::planar(self.x, self.y)
    }

    /// Visibility gate (strictly above the threshold)
    #[inline]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility > threshold
    }
}

/// One frame of landmarks, in body-part order
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    landmarks: [Landmark; BodyPart::COUNT],
}

impl LandmarkFrame {
    /// Values per landmark in the flat layout: x, y, z, visibility
    pub const STRIDE: usize = 4;

    pub fn new(landmarks: [Landmark; BodyPart::COUNT]) -> Self {
        LandmarkFrame { landmarks }
    }

    /// A frame where nothing is visible
    pub fn empty() -> Self {
        LandmarkFrame {
            landmarks: [Landmark::default(); BodyPart::COUNT],
        }
    }

    pub fn from_slice(landmarks: &[Landmark]) -> RepTrackResult<Self> {
        let landmarks: [Landmark; BodyPart::COUNT] =
            landmarks
                .try_into()
                .map_err(|_| RepTrackError::InvalidFrameLength {
                    expected: BodyPart::COUNT,
                    actual: landmarks.len(),
                })?;
        Ok(LandmarkFrame { landmarks })
    }

    /// Parse the flat `[x, y, z, visibility] * 33` layout
    pub fn from_flat(data: &[f32]) -> RepTrackResult<Self> {
        let expected = BodyPart::COUNT * Self::STRIDE;
        if data.len() != expected {
            return Err(RepTrackError::InvalidFrameLength {
                expected,
                actual: data.len(),
            });
        }

        let mut frame = Self::empty();
        for (slot, chunk) in frame
            .landmarks
            .iter_mut()
            .zip(data.chunks_exact(Self::STRIDE))
        {
            *slot = Landmark::with_depth(chunk[0], chunk[1], chunk[2], chunk[3]);
        }
        Ok(frame)
    }

    #[inline]
    pub fn get(&self, part: BodyPart) -> &Landmark {
        &self.landmarks[part.index()]
    }

    pub fn set(&mut self, part: BodyPart, landmark: Landmark) {
        self.landmarks[part.index()] = landmark;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Landmark> {
        self.landmarks.iter_mut()
    }

    /// Inverse of [`LandmarkFrame::from_flat`]; missing depth is written as 0
    pub fn to_flat(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(BodyPart::COUNT * Self::STRIDE);
        for landmark in &self.landmarks {
            data.extend_from_slice(&[
                landmark.x,
                landmark.y,
                landmark.z.unwrap_or(0.0),
                landmark.visibility,
            ]);
        }
        data
    }
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::empty()
    }
}
