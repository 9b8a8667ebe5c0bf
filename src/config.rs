//! Runtime configuration for the evaluation loop.
//!
//! Defaults reproduce the webcam demo: 640×480 mirrored capture at 60 fps, a
//! nine-frame smoothing window for the gesture estimator, persistent arming,
//! and the six-gesture glyph table. With the `serde` feature every field is
//! optional in the serialised form and falls back to its default.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::time::Duration;

use thiserror::Error;

use crate::catalog::names;
use crate::matcher::ArmingPolicy;

/// A configuration value that cannot drive the loop.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Frame rate of zero.
    #[error("frame rate must be at least 1 fps")]
    ZeroFps,
    /// Zero-sized capture.
    #[error("video size {width}x{height} is empty")]
    EmptyVideo {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Smoothing window of zero frames.
    #[error("smoothing window must cover at least one frame")]
    ZeroSmoothingWindow,
}

// ─── VideoConfig ─────────────────────────────────────────────────────────────

/// Capture parameters. Passed through to the camera and pose estimator; the
/// loop itself only uses `fps`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VideoConfig {
    /// Capture width in pixels.
    pub width: u32,
    /// Capture height in pixels.
    pub height: u32,
    /// Target evaluation rate.
    pub fps: u32,
    /// Mirror the frame horizontally before detection (selfie view).
    pub mirror: bool,
}

impl VideoConfig {
    /// Delay between the starts of consecutive cycles: `1000 / fps` ms.
    pub fn frame_interval(&self) -> Result<Duration, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(Duration::from_nanos(1_000_000_000 / u64::from(self.fps)))
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 60,
            mirror: true,
        }
    }
}

// ─── GlyphTable ──────────────────────────────────────────────────────────────

/// Display glyph per gesture name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GlyphTable(BTreeMap<String, String>);

impl GlyphTable {
    /// Empty table.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace the glyph for `gesture`.
    pub fn insert(&mut self, gesture: &str, glyph: &str) {
        self.0.insert(gesture.to_string(), glyph.to_string());
    }

    /// Glyph for `gesture`, if any.
    pub fn get(&self, gesture: &str) -> Option<&str> {
        self.0.get(gesture).map(String::as_str)
    }

    /// Glyph for `gesture`, or the gesture name itself when unmapped.
    pub fn glyph_or_name<'a>(&'a self, gesture: &'a str) -> &'a str {
        self.get(gesture).unwrap_or(gesture)
    }

    /// Number of mapped gestures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        let mut t = Self::new();
        t.insert(names::THUMBS_UP, "👍");
        t.insert(names::VICTORY, "✌🏻");
        t.insert(names::ROCK, "✊🏻");
        t.insert(names::PAPER, "🖐");
        t.insert(names::SCISSORS, "✌🏻");
        t.insert(names::CANCEL, "👎");
        t
    }
}

// ─── DemoConfig ──────────────────────────────────────────────────────────────

/// Everything the evaluation loop needs besides its collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DemoConfig {
    /// Capture parameters.
    pub video: VideoConfig,
    /// Frames the gesture estimator may smooth over.
    pub smoothing_window: usize,
    /// Lifetime of a lone armed side in the two-handed matcher.
    pub arming: ArmingPolicy,
    /// Glyph shown for each gesture.
    pub glyphs: GlyphTable,
    /// Consecutive pose-estimator failures the scheduler tolerates before
    /// giving up. Zero stops on the first failure.
    pub max_consecutive_failures: u32,
}

impl DemoConfig {
    /// Construct the demo defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.video.width == 0 || self.video.height == 0 {
            return Err(ConfigError::EmptyVideo {
                width: self.video.width,
                height: self.video.height,
            });
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::ZeroSmoothingWindow);
        }
        self.video.frame_interval().map(|_| ())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            video: VideoConfig::default(),
            smoothing_window: 9,
            arming: ArmingPolicy::Persistent,
            glyphs: GlyphTable::default(),
            max_consecutive_failures: 3,
        }
    }
}
