//! Display outputs: per-side glyph slots, finger debug fields, overlay colours.
//!
//! The UI layer reads these after each cycle. Slots are cleared at the start
//! of every cycle; debug fields keep the last reported pose for each side.

use alloc::string::String;

use crate::estimator::PoseData;
use crate::hand::{CurlState, Direction, Finger, HandSide};

// ─── Glyph slots ─────────────────────────────────────────────────────────────

/// One glyph slot per hand side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplaySlots {
    left: Option<String>,
    right: Option<String>,
}

impl DisplaySlots {
    /// Both slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `glyph` to the slot for `side`.
    pub fn set(&mut self, side: HandSide, glyph: &str) {
        *self.slot_mut(side) = Some(glyph.into());
    }

    /// Write the same glyph to both slots (two-handed match).
    pub fn set_both(&mut self, glyph: &str) {
        self.left = Some(glyph.into());
        self.right = Some(glyph.into());
    }

    /// Current glyph for `side`.
    pub fn get(&self, side: HandSide) -> Option<&str> {
        match side {
            HandSide::Left => self.left.as_deref(),
            HandSide::Right => self.right.as_deref(),
        }
    }

    /// Empty both slots.
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }

    fn slot_mut(&mut self, side: HandSide) -> &mut Option<String> {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }
}

// ─── Debug panel ─────────────────────────────────────────────────────────────

/// Last reported curl and direction of one finger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FingerDebug {
    /// Curl, `None` until first reported.
    pub curl: Option<CurlState>,
    /// Direction, `None` until first reported.
    pub direction: Option<Direction>,
}

impl FingerDebug {
    /// Curl label, or `"-"` if unknown.
    pub fn curl_label(&self) -> &'static str {
        self.curl.map_or("-", CurlState::as_str)
    }

    /// Direction label, or `"-"` if unknown.
    pub fn direction_label(&self) -> &'static str {
        self.direction.map_or("-", Direction::as_str)
    }
}

/// Per-side, per-finger diagnostic table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugPanel {
    left: [FingerDebug; 5],
    right: [FingerDebug; 5],
}

impl DebugPanel {
    /// All fields unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the fields for every finger present in `pose`.
    pub fn update(&mut self, side: HandSide, pose: &PoseData) {
        let row = match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        };
        for p in pose.fingers() {
            row[p.finger.index()] = FingerDebug {
                curl: Some(p.curl),
                direction: Some(p.direction),
            };
        }
    }

    /// Fields for one finger.
    pub fn get(&self, side: HandSide, finger: Finger) -> FingerDebug {
        self.row(side)[finger.index()]
    }

    /// All five fingers for `side`, thumb first.
    pub fn row(&self, side: HandSide) -> &[FingerDebug; 5] {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }
}

// ─── Overlay ─────────────────────────────────────────────────────────────────

/// Radius, in pixels, of each landmark dot.
pub const OVERLAY_POINT_RADIUS: f32 = 3.0;

/// A landmark dot for the debug overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OverlayPoint {
    /// Pixel x.
    pub x: f32,
    /// Pixel y.
    pub y: f32,
    /// Dot radius in pixels.
    pub radius: f32,
    /// CSS colour name.
    pub color: &'static str,
}

/// Finger a MediaPipe landmark index belongs to. `None` for the wrist (0)
/// and for indices past the last landmark.
pub fn landmark_finger(index: usize) -> Option<Finger> {
    match index {
        1..=4 => Some(Finger::Thumb),
        5..=8 => Some(Finger::Index),
        9..=12 => Some(Finger::Middle),
        13..=16 => Some(Finger::Ring),
        17..=20 => Some(Finger::Pinky),
        _ => None,
    }
}

/// Overlay colour for a landmark index.
pub fn landmark_color(index: usize) -> &'static str {
    match landmark_finger(index) {
        Some(Finger::Thumb) => "red",
        Some(Finger::Index) => "blue",
        Some(Finger::Middle) => "yellow",
        Some(Finger::Ring) => "green",
        Some(Finger::Pinky) => "pink",
        None => "white",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_set_and_clear() {
        let mut s = DisplaySlots::new();
        s.set(HandSide::Right, "✊🏻");
        assert_eq!(s.get(HandSide::Right), Some("✊🏻"));
        assert_eq!(s.get(HandSide::Left), None);
        s.set_both("👎");
        assert_eq!(s.get(HandSide::Left), Some("👎"));
        assert_eq!(s.get(HandSide::Right), Some("👎"));
        s.clear();
        assert_eq!(s, DisplaySlots::default());
    }

    #[test]
    fn test_debug_panel_update_is_per_side() {
        let mut panel = DebugPanel::new();
        panel.update(
            HandSide::Left,
            &PoseData::uniform(CurlState::HalfCurl, Direction::VerticalUp),
        );
        let thumb = panel.get(HandSide::Left, Finger::Thumb);
        assert_eq!(thumb.curl_label(), "Half Curl");
        assert_eq!(thumb.direction_label(), "Vertical Up");
        assert_eq!(panel.get(HandSide::Right, Finger::Thumb).curl_label(), "-");
    }

    #[test]
    fn test_landmark_colors() {
        assert_eq!(landmark_color(0), "white");
        assert_eq!(landmark_color(4), "red");
        assert_eq!(landmark_color(8), "blue");
        assert_eq!(landmark_color(12), "yellow");
        assert_eq!(landmark_color(16), "green");
        assert_eq!(landmark_color(20), "pink");
        assert_eq!(landmark_finger(21), None);
    }
}
