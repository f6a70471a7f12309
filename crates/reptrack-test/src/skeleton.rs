//! Skeleton builder - joint angles in, a full landmark frame out
//!
//! Segment lengths are fixed in normalized image units. Every angle the
//! pipeline measures is reproduced exactly by the generated geometry:
//! knee = hip-knee-ankle, elbow = shoulder-elbow-wrist,
//! upper arm = hip-shoulder-elbow, lean = torso inclination from vertical.

use reptrack_core::{BodyPart, Landmark, LandmarkFrame, Side};

/// Shin and thigh length
pub const LEG_SEGMENT: f32 = 0.15;
/// Upper arm and forearm length
pub const ARM_SEGMENT: f32 = 0.15;
/// Hip to shoulder
pub const TORSO_LENGTH: f32 = 0.3;
/// Shoulder to ear
pub const NECK_LENGTH: f32 = 0.1;

const HALF_WIDTH: f32 = 0.08;
const ANKLE_Y: f32 = 0.9;
const HIDDEN_VISIBILITY: f32 = 0.1;

/// Joint configuration of one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    /// Hip-knee-ankle, both legs
    pub knee: f32,
    /// Torso inclination from vertical
    pub lean: f32,
    /// Head tilt on top of the lean
    pub neck: f32,
    pub left_elbow: f32,
    pub right_elbow: f32,
    /// Hip-shoulder-elbow, both arms
    pub upper_arm: f32,
    /// Vertical offset of everything above the hips
    pub shoulder_shift: f32,
    pub visibility: f32,
    /// Parts reported with low visibility
    pub hidden: Vec<BodyPart>,
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            knee: 178.0,
            lean: 0.0,
            neck: 5.0,
            left_elbow: 178.0,
            right_elbow: 178.0,
            upper_arm: 0.0,
            shoulder_shift: 0.0,
            visibility: 0.95,
            hidden: Vec::new(),
        }
    }
}

/// Point `length` away from `origin`, rotated `degrees` from the direction of `reference`
fn rotate_from(origin: (f32, f32), reference: (f32, f32), degrees: f32, length: f32) -> (f32, f32) {
    let base = (reference.1 - origin.1).atan2(reference.0 - origin.0);
    let theta = base + degrees.to_radians();
    (origin.0 + length * theta.cos(), origin.1 + length * theta.sin())
}

/// Point `length` away from `origin` at `degrees` off straight up
fn incline(origin: (f32, f32), degrees: f32, length: f32) -> (f32, f32) {
    let theta = degrees.to_radians();
    (origin.0 + length * theta.sin(), origin.1 - length * theta.cos())
}

impl Pose {
    pub fn standing() -> Self {
        Self::default()
    }

    /// Mark every landmark of one side as not visible
    pub fn hide_side(mut self, side: Side) -> Self {
        self.hidden.extend([
            side.ear(),
            side.shoulder(),
            side.elbow(),
            side.wrist(),
            side.hip(),
            side.knee(),
            side.ankle(),
        ]);
        self
    }

    pub fn hide(mut self, part: BodyPart) -> Self {
        self.hidden.push(part);
        self
    }

    pub fn frame(&self) -> LandmarkFrame {
        let mut frame = LandmarkFrame::empty();
        let mut put = |part: BodyPart, (x, y): (f32, f32)| {
            frame.set(part, Landmark::new(x, y, self.visibility));
        };

        let mut ears = [(0.0, 0.0); 2];
        for (i, side) in [Side::Left, Side::Right].into_iter().enumerate() {
            // Limbs bend outward from the midline
            let (x0, outward) = match side {
                Side::Left => (0.5 - HALF_WIDTH, 1.0),
                Side::Right => (0.5 + HALF_WIDTH, -1.0),
            };
            let elbow_angle = match side {
                Side::Left => self.left_elbow,
                Side::Right => self.right_elbow,
            };

            let ankle = (x0, ANKLE_Y);
            let knee = (x0, ANKLE_Y - LEG_SEGMENT);
            let hip = rotate_from(knee, ankle, outward * self.knee, LEG_SEGMENT);

            let (sx, sy) = incline(hip, self.lean, TORSO_LENGTH);
            let shoulder = (sx, sy + self.shoulder_shift);
            let ear = incline(shoulder, self.lean + self.neck, NECK_LENGTH);

            let down = (hip.1 - shoulder.1).atan2(hip.0 - shoulder.0);
            let theta = down + outward * self.upper_arm.to_radians();
            let elbow = (
                shoulder.0 + ARM_SEGMENT * theta.cos(),
                shoulder.1 + ARM_SEGMENT * theta.sin(),
            );
            let wrist = rotate_from(elbow, shoulder, -outward * elbow_angle, ARM_SEGMENT);

            put(side.ankle(), ankle);
            put(side.knee(), knee);
            put(side.hip(), hip);
            put(side.shoulder(), shoulder);
            put(side.ear(), ear);
            put(side.elbow(), elbow);
            put(side.wrist(), wrist);
            for (part, dx, dy) in hand_and_foot(side) {
                let origin = if is_hand(part) { wrist } else { ankle };
                put(part, (origin.0 + dx, origin.1 + dy));
            }
            ears[i] = ear;
        }

        let [left, right] = ears;
        let mid = ((left.0 + right.0) / 2.0, (left.1 + right.1) / 2.0);
        put(BodyPart::Nose, (mid.0, mid.1 + 0.01));
        for (part, dx) in [
            (BodyPart::LeftEyeInner, -0.01),
            (BodyPart::LeftEye, -0.02),
            (BodyPart::LeftEyeOuter, -0.03),
            (BodyPart::RightEyeInner, 0.01),
            (BodyPart::RightEye, 0.02),
            (BodyPart::RightEyeOuter, 0.03),
        ] {
            put(part, (mid.0 + dx, mid.1 - 0.01));
        }
        put(BodyPart::MouthLeft, (mid.0 - 0.015, mid.1 + 0.03));
        put(BodyPart::MouthRight, (mid.0 + 0.015, mid.1 + 0.03));

        for part in &self.hidden {
            let lm = *frame.get(*part);
            frame.set(*part, Landmark::new(lm.x, lm.y, HIDDEN_VISIBILITY));
        }
        frame
    }
}

fn is_hand(part: BodyPart) -> bool {
    matches!(
        part,
        BodyPart::LeftPinky
            | BodyPart::RightPinky
            | BodyPart::LeftIndex
            | BodyPart::RightIndex
            | BodyPart::LeftThumb
            | BodyPart::RightThumb
    )
}

fn hand_and_foot(side: Side) -> [(BodyPart, f32, f32); 5] {
    match side {
        Side::Left => [
            (BodyPart::LeftPinky, -0.01, 0.02),
            (BodyPart::LeftIndex, 0.0, 0.025),
            (BodyPart::LeftThumb, 0.01, 0.015),
            (BodyPart::LeftHeel, 0.0, 0.02),
            (BodyPart::LeftFootIndex, -0.04, 0.03),
        ],
        Side::Right => [
            (BodyPart::RightPinky, 0.01, 0.02),
            (BodyPart::RightIndex, 0.0, 0.025),
            (BodyPart::RightThumb, -0.01, 0.015),
            (BodyPart::RightHeel, 0.0, 0.02),
            (BodyPart::RightFootIndex, 0.04, 0.03),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_core::{JointTriple, ViewTag};
    use reptrack_runtime::FrameSignals;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.05
    }

    #[test]
    fn test_every_landmark_placed() {
        let frame = Pose::standing().frame();
        assert!(frame.iter().all(|lm| lm.is_visible(0.6)));
    }

    #[test]
    fn test_angles_reproduced() {
        let pose = Pose {
            knee: 75.0,
            lean: 30.0,
            right_elbow: 60.0,
            upper_arm: 20.0,
            ..Pose::default()
        };
        let signals = FrameSignals::derive(&pose.frame(), 0.6);

        assert!(close(signals.knee_angle().unwrap(), 75.0));
        assert!(close(signals.back_angle().unwrap(), 30.0));
        assert!(close(signals.hip_shoulder.unwrap(), 30.0));
        assert!(close(signals.posture.neck().unwrap(), 35.0));
        assert!(close(signals.elbow_torso.right().unwrap(), 20.0));

        let (side, angle) = signals.active_arm().unwrap();
        assert_eq!(side, Side::Right);
        assert!(close(angle, 60.0));
    }

    #[test]
    fn test_hidden_side() {
        let frame = Pose::standing().hide_side(Side::Right).frame();
        let signals = FrameSignals::derive(&frame, 0.6);
        assert_eq!(signals.knee.view(), ViewTag::LeftSide);
        assert!(!frame.get(BodyPart::RightKnee).is_visible(0.6));
    }

    #[test]
    fn test_shoulder_shift_moves_upper_body() {
        let still = Pose::standing().frame();
        let raised = Pose {
            shoulder_shift: -0.05,
            ..Pose::default()
        }
        .frame();

        let before = still.get(BodyPart::LeftShoulder);
        let after = raised.get(BodyPart::LeftShoulder);
        assert!(close(before.y - after.y, 0.05));
        assert_eq!(still.get(BodyPart::LeftHip), raised.get(BodyPart::LeftHip));

        // Arm geometry travels with the shoulder
        let bicep = |f: &LandmarkFrame| {
            JointTriple::new(
                *f.get(BodyPart::LeftShoulder),
                *f.get(BodyPart::LeftElbow),
                *f.get(BodyPart::LeftWrist),
            )
            .angle()
            .unwrap()
        };
        assert!(close(bicep(&still), bicep(&raised)));
    }
}
