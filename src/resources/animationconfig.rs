//! Animation configuration resource.
//!
//! Manages playback settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [playback]
//! time_scale = 1.0
//! catch_up = false
//!
//! [demo]
//! frame_count = 4
//! fps = 8.0
//! looped = true
//! ticks = 60
//! tick_seconds = 0.016
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::animation::AdvanceMode;

/// Default safe values for startup
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CATCH_UP: bool = false;
const DEFAULT_DEMO_FRAME_COUNT: usize = 4;
const DEFAULT_DEMO_FPS: f32 = 8.0;
const DEFAULT_DEMO_LOOPED: bool = true;
const DEFAULT_DEMO_TICKS: u32 = 60;
const DEFAULT_DEMO_TICK_SECONDS: f32 = 0.016;
const DEFAULT_CONFIG_PATH: &str = "./animation.ini";

/// Animation configuration resource.
///
/// The `[playback]` values are applied to the world by
/// [`apply_animation_config`](crate::systems::animationconfig::apply_animation_config);
/// the `[demo]` values only drive the headless binary.
#[derive(Resource, Debug, Clone)]
pub struct AnimationConfig {
    /// Multiplier applied to every tick delta.
    pub time_scale: f32,
    /// Advance several frames per tick when the delta covers them.
    pub catch_up: bool,
    /// Number of cells in the demo strip.
    pub demo_frame_count: usize,
    /// Playback speed of the demo strip.
    pub demo_fps: f32,
    /// Whether the demo strip loops.
    pub demo_looped: bool,
    /// How many ticks the demo runs.
    pub demo_ticks: u32,
    /// Fixed delta fed to each demo tick.
    pub demo_tick_seconds: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            catch_up: DEFAULT_CATCH_UP,
            demo_frame_count: DEFAULT_DEMO_FRAME_COUNT,
            demo_fps: DEFAULT_DEMO_FPS,
            demo_looped: DEFAULT_DEMO_LOOPED,
            demo_ticks: DEFAULT_DEMO_TICKS,
            demo_tick_seconds: DEFAULT_DEMO_TICK_SECONDS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Advance mode matching the `catch_up` flag.
    pub fn advance_mode(&self) -> AdvanceMode {
        if self.catch_up {
            AdvanceMode::CatchUp
        } else {
            AdvanceMode::SingleStep
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [playback] section
        if let Some(scale) = config.getfloat("playback", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(catch_up) = config.getbool("playback", "catch_up").ok().flatten() {
            self.catch_up = catch_up;
        }

        // [demo] section
        if let Some(count) = config.getuint("demo", "frame_count").ok().flatten() {
            self.demo_frame_count = count as usize;
        }
        if let Some(fps) = config.getfloat("demo", "fps").ok().flatten() {
            self.demo_fps = fps as f32;
        }
        if let Some(looped) = config.getbool("demo", "looped").ok().flatten() {
            self.demo_looped = looped;
        }
        if let Some(ticks) = config.getuint("demo", "ticks").ok().flatten() {
            self.demo_ticks = ticks as u32;
        }
        if let Some(seconds) = config.getfloat("demo", "tick_seconds").ok().flatten() {
            self.demo_tick_seconds = seconds as f32;
        }

        info!(
            "Loaded config: time_scale={}, catch_up={}, demo {} frames @ {} fps (looped={}), {} ticks of {}s",
            self.time_scale,
            self.catch_up,
            self.demo_frame_count,
            self.demo_fps,
            self.demo_looped,
            self.demo_ticks,
            self.demo_tick_seconds
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [playback] section
        config.set("playback", "time_scale", Some(self.time_scale.to_string()));
        config.set("playback", "catch_up", Some(self.catch_up.to_string()));

        // [demo] section
        config.set("demo", "frame_count", Some(self.demo_frame_count.to_string()));
        config.set("demo", "fps", Some(self.demo_fps.to_string()));
        config.set("demo", "looped", Some(self.demo_looped.to_string()));
        config.set("demo", "ticks", Some(self.demo_ticks.to_string()));
        config.set("demo", "tick_seconds", Some(self.demo_tick_seconds.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flipbook_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::new();
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.advance_mode(), AdvanceMode::SingleStep);
        assert_eq!(config.config_path, PathBuf::from("./animation.ini"));
    }

    #[test]
    fn test_missing_file_is_an_error_and_keeps_defaults() {
        let mut config = AnimationConfig::with_path(temp_path("missing"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.demo_frame_count, 4);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut saved = AnimationConfig::with_path(&path);
        saved.time_scale = 0.5;
        saved.catch_up = true;
        saved.demo_ticks = 12;
        saved.save_to_file().unwrap();

        let mut loaded = AnimationConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.time_scale, 0.5);
        assert!(loaded.catch_up);
        assert_eq!(loaded.advance_mode(), AdvanceMode::CatchUp);
        assert_eq!(loaded.demo_ticks, 12);
        assert_eq!(loaded.demo_fps, 8.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, "[playback]\ncatch_up = true\n").unwrap();
        let mut config = AnimationConfig::with_path(&path);
        config.load_from_file().unwrap();
        std::fs::remove_file(&path).ok();

        assert!(config.catch_up);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.demo_ticks, 60);
    }
}
