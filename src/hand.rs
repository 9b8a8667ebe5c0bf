//! Hand vocabulary: fingers, curl states, pointing directions and hand sides.
//!
//! These are the discrete values the external gesture estimator reports per
//! finger, and the values catalog rules are written against. Every enum
//! round-trips through the estimator's human-readable label (`"Half Curl"`,
//! `"Diagonal Up Right"`, …) so that pose data arriving as text can be
//! parsed strictly at the boundary.
//!
//! # Invariants
//! - Label parsing is exact for fingers, curls and directions; an unknown label
//!   is a [`ParseLabelError`], never a silent default.
//! - `CurlState` ordering follows flexion: `NoCurl < HalfCurl < FullCurl`.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// A label that did not name any value of the expected vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} label {label:?}")]
pub struct ParseLabelError {
    /// Which vocabulary was being parsed (`"finger"`, `"curl"`, …).
    pub kind: &'static str,
    /// The offending input.
    pub label: alloc::string::String,
}

impl ParseLabelError {
    fn new(kind: &'static str, label: &str) -> Self {
        Self { kind, label: label.into() }
    }
}

// ─── Finger ──────────────────────────────────────────────────────────────────

/// One of the five fingers of a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Finger {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Little finger.
    Pinky,
}

impl Finger {
    /// All fingers, thumb first.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Position of this finger in [`Finger::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Estimator label.
    pub fn as_str(self) -> &'static str {
        match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Pinky => "Pinky",
        }
    }
}

impl FromStr for Finger {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Finger::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseLabelError::new("finger", s))
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── CurlState ───────────────────────────────────────────────────────────────

/// How far a finger is bent, ordered by flexion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurlState {
    /// Finger stretched out.
    NoCurl,
    /// Finger partly bent.
    HalfCurl,
    /// Finger folded into the palm.
    FullCurl,
}

impl CurlState {
    /// All curl states, least flexed first.
    pub const ALL: [CurlState; 3] = [CurlState::NoCurl, CurlState::HalfCurl, CurlState::FullCurl];

    /// Estimator label.
    pub fn as_str(self) -> &'static str {
        match self {
            CurlState::NoCurl => "No Curl",
            CurlState::HalfCurl => "Half Curl",
            CurlState::FullCurl => "Full Curl",
        }
    }
}

impl FromStr for CurlState {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurlState::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseLabelError::new("curl", s))
    }
}

impl fmt::Display for CurlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// Pointing direction of a finger, as seen by the camera.
///
/// Left/right are in the mirrored (selfie) frame the estimator reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Straight up.
    VerticalUp,
    /// Straight down.
    VerticalDown,
    /// Sideways, to the left.
    HorizontalLeft,
    /// Sideways, to the right.
    HorizontalRight,
    /// Up and to the right.
    DiagonalUpRight,
    /// Up and to the left.
    DiagonalUpLeft,
    /// Down and to the right.
    DiagonalDownRight,
    /// Down and to the left.
    DiagonalDownLeft,
    /// No dominant direction (finger foreshortened toward the camera).
    Neutral,
}

impl Direction {
    /// All directions, neutral last.
    pub const ALL: [Direction; 9] = [
        Direction::VerticalUp,
        Direction::VerticalDown,
        Direction::HorizontalLeft,
        Direction::HorizontalRight,
        Direction::DiagonalUpRight,
        Direction::DiagonalUpLeft,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
        Direction::Neutral,
    ];

    /// Estimator label.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::VerticalUp => "Vertical Up",
            Direction::VerticalDown => "Vertical Down",
            Direction::HorizontalLeft => "Horizontal Left",
            Direction::HorizontalRight => "Horizontal Right",
            Direction::DiagonalUpRight => "Diagonal Up Right",
            Direction::DiagonalUpLeft => "Diagonal Up Left",
            Direction::DiagonalDownRight => "Diagonal Down Right",
            Direction::DiagonalDownLeft => "Diagonal Down Left",
            Direction::Neutral => "Neutral",
        }
    }

    /// Horizontal mirror image (left ↔ right). Vertical and neutral map to themselves.
    pub fn mirrored(self) -> Self {
        match self {
            Direction::HorizontalLeft => Direction::HorizontalRight,
            Direction::HorizontalRight => Direction::HorizontalLeft,
            Direction::DiagonalUpRight => Direction::DiagonalUpLeft,
            Direction::DiagonalUpLeft => Direction::DiagonalUpRight,
            Direction::DiagonalDownRight => Direction::DiagonalDownLeft,
            Direction::DiagonalDownLeft => Direction::DiagonalDownRight,
            other => other,
        }
    }
}

impl FromStr for Direction {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseLabelError::new("direction", s))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── HandSide ────────────────────────────────────────────────────────────────

/// Which hand an observation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HandSide {
    /// Left hand.
    Left,
    /// Right hand.
    Right,
}

impl HandSide {
    /// Both sides, left first.
    pub const BOTH: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    /// Lowercase label (`"left"` / `"right"`).
    pub fn as_str(self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

impl FromStr for HandSide {
    type Err = ParseLabelError;

    /// Accepts the estimator's handedness in any case (`"Left"`, `"right"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("left") {
            Ok(HandSide::Left)
        } else if s.eq_ignore_ascii_case("right") {
            Ok(HandSide::Right)
        } else {
            Err(ParseLabelError::new("hand side", s))
        }
    }
}

impl fmt::Display for HandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
