//! Engine configuration - JSON file with partial threshold overrides

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use reptrack_core::{FrameRate, RepTrackError, RepTrackResult, Thresholds};
use reptrack_form::{MovingAverage, DEFAULT_FEEDBACK_WINDOW, DEFAULT_LOW_CONFIDENCE_FRAMES};

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Capture rate, frames per second
    pub frame_rate: f32,
    /// Diagnostics kept per exercise for feedback selection
    pub feedback_window: usize,
    /// Untracked-elbow frames before the low-confidence notice
    pub low_confidence_frames: u32,
    /// Moving-average length for the elbow-torso angle
    pub elbow_smoothing: usize,
    /// Overrides merged over the default thresholds
    pub thresholds: BTreeMap<String, f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            frame_rate: FrameRate::DEFAULT_FPS,
            feedback_window: DEFAULT_FEEDBACK_WINDOW,
            low_confidence_frames: DEFAULT_LOW_CONFIDENCE_FRAMES,
            elbow_smoothing: MovingAverage::DEFAULT_CAPACITY,
            thresholds: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> RepTrackResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> RepTrackResult<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RepTrackResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> RepTrackResult<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(RepTrackError::InvalidConfig(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if self.feedback_window == 0 {
            return Err(RepTrackError::InvalidConfig(
                "feedback_window must be at least 1".to_string(),
            ));
        }
        if self.elbow_smoothing == 0 || self.low_confidence_frames == 0 {
            return Err(RepTrackError::InvalidConfig(
                "elbow_smoothing and low_confidence_frames must be at least 1".to_string(),
            ));
        }
        self.thresholds().map(|_| ())
    }

    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::new(self.frame_rate)
    }

    /// Defaults with this config's overrides applied
    pub fn thresholds(&self) -> RepTrackResult<Thresholds> {
        let mut thresholds = Thresholds::default();
        thresholds.merge_map(&self.thresholds)?;
        Ok(thresholds)
    }
}

/// Write every threshold as a flat name → value JSON object
pub fn save_thresholds(thresholds: &Thresholds, path: impl AsRef<Path>) -> RepTrackResult<()> {
    fs::write(path, serde_json::to_string_pretty(&thresholds.to_map())?)?;
    Ok(())
}

/// Read a flat name → value JSON object, merged over the defaults
pub fn load_thresholds(path: impl AsRef<Path>) -> RepTrackResult<Thresholds> {
    let map: BTreeMap<String, f32> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let mut thresholds = Thresholds::default();
    thresholds.merge_map(&map)?;
    Ok(thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_core::ThresholdKey;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("reptrack-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.frame_rate().fps(), 30.0);
        assert_eq!(config.feedback_window, 5);
        assert_eq!(config.low_confidence_frames, 8);
    }

    #[test]
    fn test_threshold_overrides() {
        let config =
            EngineConfig::from_json(r#"{"thresholds": {"squat_bottom": 75.0}}"#).unwrap();
        let thresholds = config.thresholds().unwrap();
        assert_eq!(thresholds.get(ThresholdKey::SquatBottom), 75.0);
        assert_eq!(thresholds.get(ThresholdKey::SquatStart), 160.0);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"thresholds": {"squat_depth": 75.0}}"#),
            Err(RepTrackError::UnknownThreshold(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"frame_rate": 0}"#),
            Err(RepTrackError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"fps": 30}"#),
            Err(RepTrackError::Format(_))
        ));
    }

    #[test]
    fn test_config_file_round_trip() {
        let path = scratch("config.json");
        let mut config = EngineConfig::default();
        config.feedback_window = 7;
        config.thresholds.insert("curl_top".to_string(), 85.0);

        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_threshold_file() {
        let path = scratch("thresholds.json");
        let thresholds = Thresholds::default()
            .with(ThresholdKey::CurlBodySwing, 25.0)
            .unwrap();

        save_thresholds(&thresholds, &path).unwrap();
        let loaded = load_thresholds(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.get(ThresholdKey::CurlBodySwing), 25.0);
        assert_eq!(loaded.to_map(), thresholds.to_map());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::load(scratch("missing.json")),
            Err(RepTrackError::Io(_))
        ));
    }
}
