//! Hand-built poses for unit tests

use reptrack_core::{BodyPart, Landmark, LandmarkFrame, Side};

fn put(frame: &mut LandmarkFrame, part: BodyPart, x: f32, y: f32) {
    frame.set(part, Landmark::new(x, y, 0.95));
}

/// Point at `length` from `origin`, rotated `angle` degrees away from `reference`
fn bend(origin: (f32, f32), reference: (f32, f32), angle: f32, length: f32) -> (f32, f32) {
    let base = (reference.1 - origin.1).atan2(reference.0 - origin.0);
    let theta = base + angle.to_radians();
    (origin.0 + length * theta.cos(), origin.1 + length * theta.sin())
}

/// Upright body seen from the front, arms hanging
pub fn standing() -> LandmarkFrame {
    let mut frame = LandmarkFrame::empty();
    for (side, dx) in [(Side::Left, -0.08), (Side::Right, 0.08)] {
        let x = 0.5 + dx;
        put(&mut frame, side.ear(), x * 0.5 + 0.25, 0.2);
        put(&mut frame, side.shoulder(), x, 0.3);
        put(&mut frame, side.elbow(), x, 0.45);
        put(&mut frame, side.wrist(), x, 0.6);
        put(&mut frame, side.hip(), x, 0.6);
        put(&mut frame, side.knee(), x, 0.75);
        put(&mut frame, side.ankle(), x, 0.9);
    }
    frame
}

/// Both knees at `knee` degrees, torso leaning `back` degrees forward
pub fn squat_pose(knee: f32, back: f32) -> LandmarkFrame {
    let mut frame = standing();
    for side in [Side::Left, Side::Right] {
        let hip = frame.get(side.hip()).point();
        let knee_at = frame.get(side.knee()).point();
        let (ax, ay) = bend((knee_at.x, knee_at.y), (hip.x, hip.y), knee, 0.15);
        put(&mut frame, side.ankle(), ax, ay);

        let lean = back.to_radians();
        put(&mut frame, side.shoulder(), hip.x + 0.3 * lean.sin(), hip.y - 0.3 * lean.cos());
    }
    frame
}

/// Right elbow at `elbow` degrees, left arm a little straighter
pub fn curl_pose(elbow: f32) -> LandmarkFrame {
    let mut frame = standing();
    for (side, elbow) in [(Side::Left, (elbow + 10.0).min(180.0)), (Side::Right, elbow)] {
        let shoulder = frame.get(side.shoulder()).point();
        let elbow_at = frame.get(side.elbow()).point();
        let (wx, wy) = bend((elbow_at.x, elbow_at.y), (shoulder.x, shoulder.y), elbow, 0.15);
        put(&mut frame, side.wrist(), wx, wy);
    }
    frame
}
