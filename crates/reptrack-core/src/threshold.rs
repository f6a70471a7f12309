//! Thresholds - named, runtime-tunable cutoffs
//!
//! An external collaborator (a settings chat, a config file) may change any
//! threshold between frames. Updates never mutate a published set in place:
//! a new `Thresholds` is built and swapped in, so a reader holding a snapshot
//! sees one consistent version for the whole frame.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{RepTrackError, RepTrackResult};

/// Threshold identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThresholdKey {
    /// Landmark visibility gate
    Visibility,

    // Squat
    SquatStart,
    SquatBottom,
    SquatForwardBendTooLittle,
    SquatForwardBendTooMuch,
    SquatKneeLowerLimit,
    SquatKneeUpperLimit,

    // Bicep curl
    CurlStart,
    CurlTop,
    CurlDown,
    CurlShoulderMovement,
    CurlElbowMovement,
    CurlBodySwing,
    CurlSwingSeverity,
    CurlElbowTorsoMax,
    CurlElbowConfidence,
    CurlCompletionAmplitude,

    // Posture
    PostureNeckMax,
    PostureTorsoMax,
}

impl ThresholdKey {
    pub const COUNT: usize = 19;

    /// All keys in declaration order
    pub fn all() -> &'static [ThresholdKey] {
        &[
            ThresholdKey::Visibility,
            ThresholdKey::SquatStart,
            ThresholdKey::SquatBottom,
            ThresholdKey::SquatForwardBendTooLittle,
            ThresholdKey::SquatForwardBendTooMuch,
            ThresholdKey::SquatKneeLowerLimit,
            ThresholdKey::SquatKneeUpperLimit,
            ThresholdKey::CurlStart,
            ThresholdKey::CurlTop,
            ThresholdKey::CurlDown,
            ThresholdKey::CurlShoulderMovement,
            ThresholdKey::CurlElbowMovement,
            ThresholdKey::CurlBodySwing,
            ThresholdKey::CurlSwingSeverity,
            ThresholdKey::CurlElbowTorsoMax,
            ThresholdKey::CurlElbowConfidence,
            ThresholdKey::CurlCompletionAmplitude,
            ThresholdKey::PostureNeckMax,
            ThresholdKey::PostureTorsoMax,
        ]
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Stable external name
    pub fn name(self) -> &'static str {
        match self {
            ThresholdKey::Visibility => "visibility",
            ThresholdKey::SquatStart => "squat_start",
            ThresholdKey::SquatBottom => "squat_bottom",
            ThresholdKey::SquatForwardBendTooLittle => "squat_forward_bend_too_little",
            ThresholdKey::SquatForwardBendTooMuch => "squat_forward_bend_too_much",
            ThresholdKey::SquatKneeLowerLimit => "squat_knee_lower_limit",
            ThresholdKey::SquatKneeUpperLimit => "squat_knee_upper_limit",
            ThresholdKey::CurlStart => "curl_start",
            ThresholdKey::CurlTop => "curl_top",
            ThresholdKey::CurlDown => "curl_down",
            ThresholdKey::CurlShoulderMovement => "curl_shoulder_movement",
            ThresholdKey::CurlElbowMovement => "curl_elbow_movement",
            ThresholdKey::CurlBodySwing => "curl_body_swing",
            ThresholdKey::CurlSwingSeverity => "curl_swing_severity",
            ThresholdKey::CurlElbowTorsoMax => "curl_elbow_torso_max",
            ThresholdKey::CurlElbowConfidence => "curl_elbow_confidence",
            ThresholdKey::CurlCompletionAmplitude => "curl_completion_amplitude",
            ThresholdKey::PostureNeckMax => "posture_neck_max",
            ThresholdKey::PostureTorsoMax => "posture_torso_max",
        }
    }

    pub fn default_value(self) -> f32 {
        match self {
            ThresholdKey::Visibility => 0.6,
            ThresholdKey::SquatStart => 160.0,
            ThresholdKey::SquatBottom => 80.0,
            ThresholdKey::SquatForwardBendTooLittle => 19.0,
            ThresholdKey::SquatForwardBendTooMuch => 50.0,
            ThresholdKey::SquatKneeLowerLimit => 68.0,
            ThresholdKey::SquatKneeUpperLimit => 91.0,
            ThresholdKey::CurlStart => 160.0,
            ThresholdKey::CurlTop => 90.0,
            ThresholdKey::CurlDown => 150.0,
            ThresholdKey::CurlShoulderMovement => 0.5,
            ThresholdKey::CurlElbowMovement => 0.5,
            ThresholdKey::CurlBodySwing => 18.0,
            ThresholdKey::CurlSwingSeverity => 20.0,
            ThresholdKey::CurlElbowTorsoMax => 35.0,
            ThresholdKey::CurlElbowConfidence => 0.7,
            ThresholdKey::CurlCompletionAmplitude => 65.0,
            ThresholdKey::PostureNeckMax => 40.0,
            ThresholdKey::PostureTorsoMax => 10.0,
        }
    }
}

impl fmt::Display for ThresholdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdKey {
    type Err = RepTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThresholdKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| RepTrackError::UnknownThreshold(s.to_string()))
    }
}

/// One consistent version of every threshold
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    values: [f32; ThresholdKey::COUNT],
    version: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        let mut values = [0.0; ThresholdKey::COUNT];
        for key in ThresholdKey::all() {
            values[key.index()] = key.default_value();
        }
        Thresholds { values, version: 0 }
    }
}

impl Thresholds {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: ThresholdKey) -> f32 {
        self.values[key.index()]
    }

    /// Set a value, rejecting NaN and infinities. Returns the old value.
    pub fn set(&mut self, key: ThresholdKey, value: f32) -> RepTrackResult<f32> {
        if !value.is_finite() {
            return Err(RepTrackError::InvalidThresholdValue {
                key: key.name().to_string(),
                value,
            });
        }
        Ok(std::mem::replace(&mut self.values[key.index()], value))
    }

    /// Builder-style set for tests and presets
    pub fn with(mut self, key: ThresholdKey, value: f32) -> RepTrackResult<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Version this set was published under
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Flat name → value map
    pub fn to_map(&self) -> BTreeMap<String, f32> {
        ThresholdKey::all()
            .iter()
            .map(|key| (key.name().to_string(), self.get(*key)))
            .collect()
    }

    /// Merge a partial name → value map; unknown names are rejected
    pub fn merge_map(&mut self, map: &BTreeMap<String, f32>) -> RepTrackResult<()> {
        // Validate everything before touching any value
        let parsed = map
            .iter()
            .map(|(name, value)| Ok((name.parse::<ThresholdKey>()?, *value)))
            .collect::<RepTrackResult<Vec<_>>>()?;

        let mut next = self.clone();
        for (key, value) in parsed {
            next.set(key, value)?;
        }
        *self = next;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThresholdKey, f32)> + '_ {
        ThresholdKey::all().iter().map(move |key| (*key, self.get(*key)))
    }
}

/// Shared, versioned handle to the current thresholds
///
/// Cloning the handle shares the same underlying set.
#[derive(Clone, Debug, Default)]
pub struct SharedThresholds {
    current: Arc<RwLock<Arc<Thresholds>>>,
}

impl SharedThresholds {
    pub fn new(initial: Thresholds) -> Self {
        SharedThresholds {
            current: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// The latest published set
    pub fn snapshot(&self) -> Arc<Thresholds> {
        Arc::clone(&self.current.read())
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    pub fn get(&self, key: ThresholdKey) -> f32 {
        self.current.read().get(key)
    }

    /// Copy, modify and swap in a new version. Returns the new version.
    pub fn update<F>(&self, f: F) -> RepTrackResult<u64>
    where
        F: FnOnce(&mut Thresholds) -> RepTrackResult<()>,
    {
        let mut guard = self.current.write();
        let mut next = Thresholds::clone(&guard);
        f(&mut next)?;
        next.version = guard.version + 1;
        let version = next.version;
        *guard = Arc::new(next);
        Ok(version)
    }

    /// Set one threshold. Returns the previous value.
    pub fn set(&self, key: ThresholdKey, value: f32) -> RepTrackResult<f32> {
        let mut old = 0.0;
        self.update(|t| {
            old = t.set(key, value)?;
            Ok(())
        })?;
        Ok(old)
    }

    /// Set one threshold by its external name
    pub fn set_by_name(&self, name: &str, value: f32) -> RepTrackResult<f32> {
        self.set(name.parse()?, value)
    }

    /// Replace every value at once
    pub fn replace(&self, thresholds: Thresholds) -> u64 {
        let mut guard = self.current.write();
        let version = guard.version + 1;
        *guard = Arc::new(Thresholds {
            version,
            ..thresholds
        });
        version
    }
}
