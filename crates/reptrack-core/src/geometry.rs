//! Geometry kernel - angles and distances between joints
//!
//! Pure functions, no state. Degenerate input (coincident points) yields
//! `None` instead of a made-up angle; floating-point drift is clamped away.

use crate::{Landmark, Point, Side};

/// Below this vector length two points are treated as coincident
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Angle at `vertex` between the rays vertex→a and vertex→b, in degrees [0, 180]
///
/// Uses the dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|), with the
/// cosine clamped to [-1, 1] before `acos`.
pub fn angle_at_vertex(a: Point, vertex: Point, b: Point) -> Option<f32> {
    let v1 = (a.x - vertex.x, a.y - vertex.y, a.z - vertex.z);
    let v2 = (b.x - vertex.x, b.y - vertex.y, b.z - vertex.z);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1 + v1.2 * v1.2).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1 + v2.2 * v2.2).sqrt();
    if !(mag1 > DEGENERATE_EPSILON && mag2 > DEGENERATE_EPSILON) {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees().min(180.0))
}

/// Inclination of the segment a→b away from vertical, in degrees [0, 180]
///
/// Image coordinates: y grows downward, so a segment pointing straight up
/// the screen has inclination 0.
pub fn vertical_angle(a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx.atan2(-dy).to_degrees().abs()
}

/// Euclidean distance
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Three landmarks forming an angle at the middle one
#[derive(Debug, Clone, Copy)]
pub struct JointTriple {
    pub a: Landmark,
    pub vertex: Landmark,
    pub b: Landmark,
}

impl JointTriple {
    pub fn new(a: Landmark, vertex: Landmark, b: Landmark) -> Self {
        JointTriple { a, vertex, b }
    }

    /// All three points pass the visibility gate
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.a.is_visible(threshold)
            && self.vertex.is_visible(threshold)
            && self.b.is_visible(threshold)
    }

    pub fn angle(&self) -> Option<f32> {
        angle_at_vertex(self.a.point(), self.vertex.point(), self.b.point())
    }

    /// Angle only if every point is visible
    pub fn gated_angle(&self, threshold: f32) -> Option<f32> {
        if self.is_visible(threshold) {
            self.angle()
        } else {
            None
        }
    }
}

/// Which way the camera sees the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTag {
    Front,
    LeftSide,
    RightSide,
    Unclear,
}

impl ViewTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewTag::Front => "front",
            ViewTag::LeftSide => "left_side",
            ViewTag::RightSide => "right_side",
            ViewTag::Unclear => "unclear",
        }
    }
}

/// A left/right angle pair merged through the visibility gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BilateralAngle {
    /// Both sides visible
    Front { left: f32, right: f32 },
    /// Only one side visible
    Side { side: Side, angle: f32 },
    /// Neither side usable
    Unclear,
}

impl BilateralAngle {
    pub fn left(&self) -> Option<f32> {
        match *self {
            BilateralAngle::Front { left, .. } => Some(left),
            BilateralAngle::Side { side: Side::Left, angle } => Some(angle),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<f32> {
        match *self {
            BilateralAngle::Front { right, .. } => Some(right),
            BilateralAngle::Side { side: Side::Right, angle } => Some(angle),
            _ => None,
        }
    }

    pub fn side(&self, side: Side) -> Option<f32> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// Mean of both sides, or the single visible side
    pub fn averaged(&self) -> Option<f32> {
        match *self {
            BilateralAngle::Front { left, right } => Some((left + right) / 2.0),
            BilateralAngle::Side { angle, .. } => Some(angle),
            BilateralAngle::Unclear => None,
        }
    }

    pub fn view(&self) -> ViewTag {
        match self {
            BilateralAngle::Front { .. } => ViewTag::Front,
            BilateralAngle::Side { side: Side::Left, .. } => ViewTag::LeftSide,
            BilateralAngle::Side { side: Side::Right, .. } => ViewTag::RightSide,
            BilateralAngle::Unclear => ViewTag::Unclear,
        }
    }
}

/// Evaluate each side independently and merge by visibility
pub fn bilateral_angle(left: &JointTriple, right: &JointTriple, threshold: f32) -> BilateralAngle {
    match (left.gated_angle(threshold), right.gated_angle(threshold)) {
        (Some(left), Some(right)) => BilateralAngle::Front { left, right },
        (Some(angle), None) => BilateralAngle::Side {
            side: Side::Left,
            angle,
        },
        (None, Some(angle)) => BilateralAngle::Side {
            side: Side::Right,
            angle,
        },
        (None, None) => BilateralAngle::Unclear,
    }
}
