//! Neck and torso inclination from a landmark frame

use reptrack_core::{distance, vertical_angle, Landmark, LandmarkFrame, Side};

/// Per-side inclinations in degrees; `None` where the joints are not visible
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PostureAngles {
    pub neck_left: Option<f32>,
    pub neck_right: Option<f32>,
    pub torso_left: Option<f32>,
    pub torso_right: Option<f32>,
    /// Distance between the shoulders; small when the body is side-on
    pub shoulder_offset: Option<f32>,
}

fn gated(a: &Landmark, b: &Landmark, visibility: f32) -> Option<(Landmark, Landmark)> {
    (a.is_visible(visibility) && b.is_visible(visibility)).then_some((*a, *b))
}

fn inclination(from: &Landmark, to: &Landmark, visibility: f32) -> Option<f32> {
    gated(from, to, visibility).map(|(a, b)| vertical_angle(a.point(), b.point()))
}

fn worse(left: Option<f32>, right: Option<f32>) -> Option<f32> {
    match (left, right) {
        (Some(l), Some(r)) => Some(l.max(r)),
        (one, None) | (None, one) => one,
    }
}

impl PostureAngles {
    pub fn from_frame(frame: &LandmarkFrame, visibility: f32) -> Self {
        let side = |s: Side| {
            let shoulder = frame.get(s.shoulder());
            (
                inclination(shoulder, frame.get(s.ear()), visibility),
                inclination(frame.get(s.hip()), shoulder, visibility),
            )
        };
        let (neck_left, torso_left) = side(Side::Left);
        let (neck_right, torso_right) = side(Side::Right);

        let shoulder_offset = gated(
            frame.get(Side::Left.shoulder()),
            frame.get(Side::Right.shoulder()),
            visibility,
        )
        .map(|(l, r)| distance(l.point(), r.point()));

        PostureAngles {
            neck_left,
            neck_right,
            torso_left,
            torso_right,
            shoulder_offset,
        }
    }

    /// Larger of the two neck inclinations
    pub fn neck(&self) -> Option<f32> {
        worse(self.neck_left, self.neck_right)
    }

    /// Larger of the two torso inclinations
    pub fn torso(&self) -> Option<f32> {
        worse(self.torso_left, self.torso_right)
    }
}
