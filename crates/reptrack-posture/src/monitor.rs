//! Posture monitor - good/bad streaks over the whole session

use serde::{Deserialize, Serialize};
use tracing::debug;

use reptrack_core::{FrameRate, ThresholdKey, Thresholds};

use crate::PostureAngles;

/// Current good/bad frame streaks; exactly one is non-zero once judged
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureTally {
    pub good_frames: u64,
    pub bad_frames: u64,
}

/// Frame-by-frame posture judgment
#[derive(Clone, Debug)]
pub struct PostureMonitor {
    tally: PostureTally,
    frame_rate: FrameRate,
    good: bool,
    judged_frames: u64,
    good_total: u64,
}

impl PostureMonitor {
    pub fn new(frame_rate: FrameRate) -> Self {
        PostureMonitor {
            tally: PostureTally::default(),
            frame_rate,
            good: false,
            judged_frames: 0,
            good_total: 0,
        }
    }

    /// Judge one frame from the worse side of each pair
    ///
    /// Good iff neck and torso are both below their cutoffs. A good frame
    /// extends the good streak and zeroes the bad one, and vice versa.
    pub fn evaluate(
        &mut self,
        neck_left: f32,
        neck_right: f32,
        torso_left: f32,
        torso_right: f32,
        thresholds: &Thresholds,
    ) -> bool {
        self.judge(neck_left.max(neck_right), torso_left.max(torso_right), thresholds)
    }

    /// Judge one frame of extracted angles
    ///
    /// Returns `None` and leaves the streaks alone when neither side of the
    /// neck or of the torso could be measured.
    pub fn observe(&mut self, angles: &PostureAngles, thresholds: &Thresholds) -> Option<bool> {
        let (neck, torso) = (angles.neck()?, angles.torso()?);
        Some(self.judge(neck, torso, thresholds))
    }

    fn judge(&mut self, neck: f32, torso: f32, thresholds: &Thresholds) -> bool {
        let good = neck < thresholds.get(ThresholdKey::PostureNeckMax)
            && torso < thresholds.get(ThresholdKey::PostureTorsoMax);

        if good {
            self.tally.good_frames += 1;
            self.tally.bad_frames = 0;
            self.good_total += 1;
        } else {
            self.tally.bad_frames += 1;
            self.tally.good_frames = 0;
        }
        if good != self.good && self.judged_frames > 0 {
            debug!(good, neck, torso, "posture changed");
        }
        self.good = good;
        self.judged_frames += 1;
        good
    }

    /// Last judgment; false before any frame was judged
    pub fn is_good(&self) -> bool {
        self.good
    }

    pub fn tally(&self) -> PostureTally {
        self.tally
    }

    /// Length of the current good streak in seconds
    pub fn good_seconds(&self) -> f32 {
        self.frame_rate.seconds(self.tally.good_frames)
    }

    /// Length of the current bad streak in seconds
    pub fn bad_seconds(&self) -> f32 {
        self.frame_rate.seconds(self.tally.bad_frames)
    }

    /// Seconds of good posture over the whole session
    pub fn total_good_seconds(&self) -> f32 {
        self.frame_rate.seconds(self.good_total)
    }

    /// Seconds of bad posture over the whole session
    pub fn total_bad_seconds(&self) -> f32 {
        self.frame_rate.seconds(self.judged_frames - self.good_total)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.frame_rate);
    }
}

impl Default for PostureMonitor {
    fn default() -> Self {
        Self::new(FrameRate::default())
    }
}
