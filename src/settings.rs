//! Toy settings and tuning
//!
//! Read once at startup from an optional JSON file; never written back.
//! Every field has a default, so a file only needs the values it changes.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{AppError, AppResult};
use crate::sim::PhysicsParams;

/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "rainbow-drop.json";

/// Render quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Triangle fan segments per ball
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    pub quality: QualityPreset,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH as u32,
            height: SCREEN_HEIGHT as u32,
            title: WINDOW_TITLE.to_string(),
            tick_rate_hz: TICK_RATE_HZ,
            quality: QualityPreset::Medium,
        }
    }
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Impact sound volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Impact speed mapped to full volume
    pub speed_scale: f32,
    /// Raise pitch with impact speed
    pub pitch_by_speed: bool,
    /// Extra playback speed at full volume
    pub pitch_range: f32,
    /// Impacts quieter than this (before master/sfx gain) are not queued
    pub min_volume: f32,
    /// Cues buffered before new ones are dropped
    pub queue_depth: usize,
    /// Sound file to use instead of the built-in thump
    pub sample_path: Option<PathBuf>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            speed_scale: AUDIO_SPEED_SCALE,
            pitch_by_speed: true,
            pitch_range: AUDIO_PITCH_RANGE,
            min_volume: AUDIO_MIN_VOLUME,
            queue_depth: AUDIO_QUEUE_DEPTH,
            sample_path: None,
        }
    }
}

/// Toy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub physics: PhysicsParams,
    pub audio: AudioSettings,
}

impl Settings {
    /// Parse settings JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> AppResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> AppResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(AppError::SettingsIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reject values the simulation or audio path cannot work with
    pub fn validate(&self) -> AppResult<()> {
        let p = &self.physics;
        let w = &self.window;
        let a = &self.audio;

        check(w.width > 0 && w.height > 0, "window size must be positive")?;
        check(w.tick_rate_hz > 0, "tick_rate_hz must be positive")?;
        check(
            p.ball_radius > 0.0 && p.ball_radius.is_finite(),
            "ball_radius must be positive",
        )?;
        check(
            (0.0..=1.0).contains(&p.bounciness),
            "bounciness must be within 0..=1",
        )?;
        check(p.gravity.is_finite(), "gravity must be finite")?;
        check(
            p.min_size_factor > 0.0
                && p.min_size_factor <= 1.0
                && p.max_size_factor >= 1.0
                && p.max_size_factor.is_finite(),
            "size factors must satisfy 0 < min <= 1 <= max",
        )?;
        check(
            p.size_growth >= 0.0 && p.size_growth.is_finite(),
            "size_growth must be finite and not negative",
        )?;
        // Random ranges need a finite span as well as finite ends
        check(
            symmetric_range_ok(p.spawn_speed),
            "spawn_speed must be finite and not negative",
        )?;
        check(
            symmetric_range_ok(p.bounce_jitter),
            "bounce_jitter must be finite and not negative",
        )?;
        check(
            symmetric_range_ok(p.launch_vx),
            "launch_vx must be finite and not negative",
        )?;
        check(
            p.launch_vy_min <= p.launch_vy_max
                && (p.launch_vy_max - p.launch_vy_min).is_finite(),
            "launch_vy_min..=launch_vy_max must be a finite range",
        )?;
        check(
            (0.0..=1.0).contains(&a.master_volume) && (0.0..=1.0).contains(&a.sfx_volume),
            "volumes must be within 0..=1",
        )?;
        check(
            (0.0..=1.0).contains(&a.min_volume),
            "audio min_volume must be within 0..=1",
        )?;
        check(
            a.speed_scale > 0.0 && a.speed_scale.is_finite(),
            "audio speed_scale must be positive",
        )?;
        check(
            a.pitch_range >= 0.0 && a.pitch_range.is_finite(),
            "pitch_range must be finite and not negative",
        )?;
        check(a.queue_depth > 0, "audio queue_depth must be positive")?;
        Ok(())
    }

    /// Simulation bounds in pixels
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.window.width as f32, self.window.height as f32)
    }

    /// Effective impact gain (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.audio.muted {
            0.0
        } else {
            self.audio.master_volume * self.audio.sfx_volume
        }
    }
}

/// `-v..=v` can be sampled
fn symmetric_range_ok(v: f32) -> bool {
    v >= 0.0 && (v * 2.0).is_finite()
}

fn check(ok: bool, msg: &str) -> AppResult<()> {
    if ok {
        Ok(())
    } else {
        Err(AppError::InvalidSettings(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{InputEvent, Key, SimState, tick};

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.bounds(), Vec2::new(800.0, 600.0));
        assert_eq!(settings.window.title, "Physics Simulation");
        assert_eq!(settings.window.tick_rate_hz, 120);
        assert_eq!(settings.physics.bounciness, 0.8);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "physics": { "gravity": 0.25 }, "audio": { "muted": true } }"#)
                .unwrap();
        assert_eq!(settings.physics.gravity, 0.25);
        assert_eq!(settings.physics.bounciness, BOUNCINESS);
        assert_eq!(settings.window.width, 800);
        assert!(settings.audio.muted);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_bounciness_rejected() {
        let err = Settings::from_json(r#"{ "physics": { "bounciness": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidSettings(_)));
    }

    #[test]
    fn test_invalid_size_factors_rejected() {
        let err = Settings::from_json(r#"{ "physics": { "max_size_factor": 0.5 } }"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidSettings(_)));
    }

    #[test]
    fn test_unsampleable_ranges_rejected() {
        for json in [
            r#"{ "physics": { "spawn_speed": 3e38 } }"#,
            r#"{ "physics": { "launch_vy_min": -1e40 } }"#,
            r#"{ "physics": { "launch_vx": 2e38 } }"#,
            r#"{ "physics": { "bounce_jitter": 1e39 } }"#,
            r#"{ "physics": { "launch_vy_min": -3e38, "launch_vy_max": 3e38 } }"#,
            r#"{ "physics": { "size_growth": 1e39 } }"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, AppError::InvalidSettings(_)), "{json}");
        }
    }

    #[test]
    fn test_large_but_finite_ranges_simulate() {
        let settings = Settings::from_json(
            r#"{ "physics": { "spawn_speed": 1e30, "launch_vy_min": -1e30, "launch_vy_max": 1e30 } }"#,
        )
        .unwrap();
        let mut state = SimState::with_params(settings.bounds(), settings.physics, 1);
        state.spawn_ball(Vec2::new(400.0, 300.0));
        tick(&mut state, &[InputEvent::KeyDown { key: Key::Launch }]);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Settings::from_json("{ physics: ").unwrap_err();
        assert!(matches!(err, AppError::SettingsParse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("rainbow-drop-does-not-exist.json");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "rainbow-drop-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "window": { "quality": "high" } }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.window.quality, QualityPreset::High);
    }

    #[test]
    fn test_effective_volume() {
        let settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_quality_presets() {
        assert_eq!(QualityPreset::High.as_str(), "High");
        assert!(QualityPreset::High.circle_segments() > QualityPreset::Low.circle_segments());
    }
}
