//! Derived frame signals - every angle the trackers and the monitor read

use reptrack_core::{
    bilateral_angle, BilateralAngle, BodyPart, JointTriple, Landmark, LandmarkFrame, Side,
    ViewTag,
};
use reptrack_posture::PostureAngles;

/// Angles derived from one landmark frame
#[derive(Clone, Copy, Debug)]
pub struct FrameSignals {
    /// Shoulder-elbow-wrist, per arm
    pub bicep: BilateralAngle,
    /// Hip-knee-ankle, per leg
    pub knee: BilateralAngle,
    /// Forward lean at the shoulder, per side
    pub back: BilateralAngle,
    /// Hip-shoulder-elbow, per side
    pub elbow_torso: BilateralAngle,
    /// Torso inclination: left side if visible, else right
    pub hip_shoulder: Option<f32>,
    pub posture: PostureAngles,
}

type PartOf = fn(Side) -> BodyPart;

fn bilateral(frame: &LandmarkFrame, a: PartOf, vertex: PartOf, b: PartOf, visibility: f32) -> BilateralAngle {
    let side = |s: Side| JointTriple::new(*frame.get(a(s)), *frame.get(vertex(s)), *frame.get(b(s)));
    bilateral_angle(&side(Side::Left), &side(Side::Right), visibility)
}

/// Hip, shoulder and the point straight below the shoulder at hip height
fn back_triple(frame: &LandmarkFrame, side: Side) -> JointTriple {
    let hip = *frame.get(side.hip());
    let shoulder = *frame.get(side.shoulder());
    let plumb = Landmark::new(shoulder.x, hip.y, shoulder.visibility.min(hip.visibility));
    JointTriple::new(hip, shoulder, plumb)
}

impl FrameSignals {
    pub fn derive(frame: &LandmarkFrame, visibility: f32) -> Self {
        let bicep = bilateral(frame, Side::shoulder, Side::elbow, Side::wrist, visibility);
        let knee = bilateral(frame, Side::hip, Side::knee, Side::ankle, visibility);
        let elbow_torso = bilateral(frame, Side::hip, Side::shoulder, Side::elbow, visibility);
        let back = bilateral_angle(
            &back_triple(frame, Side::Left),
            &back_triple(frame, Side::Right),
            visibility,
        );

        let posture = PostureAngles::from_frame(frame, visibility);
        let hip_shoulder = posture.torso_left.or(posture.torso_right);

        FrameSignals {
            bicep,
            knee,
            back,
            elbow_torso,
            hip_shoulder,
            posture,
        }
    }

    /// Knee angle driving the squat machine
    pub fn knee_angle(&self) -> Option<f32> {
        self.knee.averaged()
    }

    pub fn back_angle(&self) -> Option<f32> {
        self.back.averaged()
    }

    /// The more contracted visible arm
    pub fn active_arm(&self) -> Option<(Side, f32)> {
        match self.bicep {
            BilateralAngle::Front { left, right } if left < right => Some((Side::Left, left)),
            BilateralAngle::Front { right, .. } => Some((Side::Right, right)),
            BilateralAngle::Side { side, angle } => Some((side, angle)),
            BilateralAngle::Unclear => None,
        }
    }

    pub fn view(&self) -> ViewTag {
        self.bicep.view()
    }
}
