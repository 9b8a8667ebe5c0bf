//! Gesture catalog: weighted per-finger curl and direction rules.
//!
//! A gesture is a bag of weighted constraints. Each constraint ties one finger
//! to either a [`CurlState`] or a [`Direction`] with a confidence weight in
//! (0, 1]. A finger may carry several constraints of the same kind: "mostly
//! `FullCurl`, partly `HalfCurl`" tolerates the jitter of a real hand sitting
//! between two discrete poses. The external gesture estimator scores observed
//! keypoints against these rules; scoring itself is not implemented here.
//!
//! The stock gestures are plain data tables ([`ROCK_RULES`], [`PAPER_RULES`],
//! …) turned into a [`GestureCatalog`] once at start-up. The builder API
//! ([`GestureCatalog::define_gesture`], [`GestureCatalog::add_curl`],
//! [`GestureCatalog::add_direction`]) remains for user-defined gestures.
//!
//! # Invariants
//! - Every stored weight is in (0, 1]; `NaN` is rejected.
//! - Gesture names are unique within a catalog.
//! - Rules keep insertion order, so [`GestureCatalog::iter`] is deterministic.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use thiserror::Error;

use crate::hand::{CurlState, Direction, Finger, ParseLabelError};

/// Canonical gesture names used by the stock catalog.
pub mod names {
    /// Closed fist.
    pub const ROCK: &str = "rock";
    /// Open flat hand.
    pub const PAPER: &str = "paper";
    /// Index and middle stretched, ring and pinky folded.
    pub const SCISSORS: &str = "scissors";
    /// Open hand pointed sideways or diagonally up; half of the two-handed cancel.
    pub const CANCEL: &str = "cancel";
    /// Estimator stock gesture: thumb up, fist closed.
    pub const THUMBS_UP: &str = "thumbs_up";
    /// Estimator stock gesture: V sign.
    pub const VICTORY: &str = "victory";
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Setup-time failures while building a catalog.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CatalogError {
    /// Weight outside (0, 1], including `NaN`.
    #[error("weight {weight} for {finger} in gesture {gesture:?} is outside (0, 1]")]
    InvalidWeight {
        /// Gesture being extended.
        gesture: String,
        /// Finger the constraint was for.
        finger: Finger,
        /// Rejected weight.
        weight: f32,
    },
    /// A gesture with this name already exists.
    #[error("gesture {0:?} is already defined")]
    DuplicateGesture(String),
    /// The handle does not belong to this catalog.
    #[error("no gesture behind handle {0}")]
    UnknownHandle(usize),
    /// A finger, curl or direction label did not parse.
    #[error(transparent)]
    Label(#[from] ParseLabelError),
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// What a single constraint pins a finger to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Finger should be in this curl state.
    Curl(CurlState),
    /// Finger should point this way.
    Direction(Direction),
}

/// One weighted constraint of a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedConstraint {
    /// Constrained finger.
    pub finger: Finger,
    /// Curl or direction it is matched against.
    pub constraint: Constraint,
    /// Confidence weight in (0, 1].
    pub weight: f32,
}

/// A row of a static rule table: `(finger, constraint, weight)`.
pub type RuleRow = (Finger, Constraint, f32);

/// A named gesture and its weighted constraints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureRule {
    name: String,
    constraints: Vec<WeightedConstraint>,
}

impl GestureRule {
    /// Gesture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All constraints in insertion order.
    pub fn constraints(&self) -> &[WeightedConstraint] {
        &self.constraints
    }

    /// Curl constraints for `finger` as `(curl, weight)` pairs.
    pub fn curl_weights(&self, finger: Finger) -> impl Iterator<Item = (CurlState, f32)> + '_ {
        self.constraints.iter().filter_map(move |c| match c.constraint {
            Constraint::Curl(curl) if c.finger == finger => Some((curl, c.weight)),
            _ => None,
        })
    }

    /// Direction constraints for `finger` as `(direction, weight)` pairs.
    pub fn direction_weights(
        &self,
        finger: Finger,
    ) -> impl Iterator<Item = (Direction, f32)> + '_ {
        self.constraints.iter().filter_map(move |c| match c.constraint {
            Constraint::Direction(dir) if c.finger == finger => Some((dir, c.weight)),
            _ => None,
        })
    }

    /// Summed weight of the curl constraints matching `curl` on `finger`.
    ///
    /// Returns 0.0 if the finger carries no such constraint.
    pub fn curl_weight(&self, finger: Finger, curl: CurlState) -> f32 {
        self.curl_weights(finger)
            .filter(|&(c, _)| c == curl)
            .map(|(_, w)| w)
            .sum()
    }

    /// `true` if any constraint mentions `finger`.
    pub fn constrains(&self, finger: Finger) -> bool {
        self.constraints.iter().any(|c| c.finger == finger)
    }

    /// `true` if the gesture has at least one direction constraint.
    pub fn has_direction_constraints(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.constraint, Constraint::Direction(_)))
    }
}

/// Opaque reference to a gesture defined in a [`GestureCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GestureHandle(usize);

// ─── Stock rule tables ───────────────────────────────────────────────────────

use Constraint::Curl;
use Constraint::Direction as Dir;
use CurlState::{FullCurl, HalfCurl, NoCurl};
use Direction::{
    DiagonalUpLeft, DiagonalUpRight, HorizontalLeft, HorizontalRight, VerticalUp,
};
use Finger::{Index, Middle, Pinky, Ring, Thumb};

/// Closed fist: thumb tucked (half curled), every other finger folded.
pub const ROCK_RULES: &[RuleRow] = &[
    (Thumb, Curl(HalfCurl), 1.0),
    (Thumb, Curl(NoCurl), 0.5),
    (Index, Curl(FullCurl), 1.0),
    (Index, Curl(HalfCurl), 0.9),
    (Middle, Curl(FullCurl), 1.0),
    (Middle, Curl(HalfCurl), 0.9),
    (Ring, Curl(FullCurl), 1.0),
    (Ring, Curl(HalfCurl), 0.9),
    (Pinky, Curl(FullCurl), 1.0),
    (Pinky, Curl(HalfCurl), 0.9),
];

/// Open hand: no finger curled, direction unconstrained.
pub const PAPER_RULES: &[RuleRow] = &[
    (Thumb, Curl(NoCurl), 1.0),
    (Index, Curl(NoCurl), 1.0),
    (Middle, Curl(NoCurl), 1.0),
    (Ring, Curl(NoCurl), 1.0),
    (Pinky, Curl(NoCurl), 1.0),
];

/// Index and middle stretched, ring and pinky folded. Thumb is free.
pub const SCISSORS_RULES: &[RuleRow] = &[
    (Index, Curl(NoCurl), 1.0),
    (Middle, Curl(NoCurl), 1.0),
    (Ring, Curl(FullCurl), 1.0),
    (Ring, Curl(HalfCurl), 0.9),
    (Pinky, Curl(FullCurl), 1.0),
    (Pinky, Curl(HalfCurl), 0.9),
];

/// Open hand held sideways or diagonally up. What separates it from paper is
/// the direction constraints.
pub const CANCEL_RULES: &[RuleRow] = &[
    (Thumb, Curl(NoCurl), 1.0),
    (Thumb, Dir(DiagonalUpRight), 1.0),
    (Thumb, Dir(DiagonalUpLeft), 1.0),
    (Thumb, Dir(HorizontalRight), 1.0),
    (Thumb, Dir(HorizontalLeft), 1.0),
    (Index, Curl(NoCurl), 1.0),
    (Index, Dir(DiagonalUpRight), 1.0),
    (Index, Dir(DiagonalUpLeft), 1.0),
    (Index, Dir(HorizontalRight), 1.0),
    (Index, Dir(HorizontalLeft), 1.0),
    (Middle, Curl(NoCurl), 1.0),
    (Middle, Dir(DiagonalUpRight), 1.0),
    (Middle, Dir(DiagonalUpLeft), 1.0),
    (Middle, Dir(HorizontalRight), 1.0),
    (Middle, Dir(HorizontalLeft), 1.0),
    (Ring, Curl(NoCurl), 1.0),
    (Ring, Dir(DiagonalUpRight), 1.0),
    (Ring, Dir(DiagonalUpLeft), 1.0),
    (Ring, Dir(HorizontalRight), 1.0),
    (Ring, Dir(HorizontalLeft), 1.0),
    (Pinky, Curl(NoCurl), 1.0),
    (Pinky, Dir(DiagonalUpRight), 1.0),
    (Pinky, Dir(DiagonalUpLeft), 1.0),
    (Pinky, Dir(HorizontalRight), 1.0),
    (Pinky, Dir(HorizontalLeft), 1.0),
];

/// Thumbs up, as shipped with the estimator library.
pub const THUMBS_UP_RULES: &[RuleRow] = &[
    (Thumb, Curl(NoCurl), 1.0),
    (Thumb, Dir(VerticalUp), 1.0),
    (Thumb, Dir(DiagonalUpLeft), 0.9),
    (Thumb, Dir(DiagonalUpRight), 0.9),
    (Index, Curl(FullCurl), 1.0),
    (Index, Curl(HalfCurl), 0.9),
    (Index, Dir(HorizontalLeft), 1.0),
    (Index, Dir(HorizontalRight), 1.0),
    (Middle, Curl(FullCurl), 1.0),
    (Middle, Curl(HalfCurl), 0.9),
    (Middle, Dir(HorizontalLeft), 1.0),
    (Middle, Dir(HorizontalRight), 1.0),
    (Ring, Curl(FullCurl), 1.0),
    (Ring, Curl(HalfCurl), 0.9),
    (Ring, Dir(HorizontalLeft), 1.0),
    (Ring, Dir(HorizontalRight), 1.0),
    (Pinky, Curl(FullCurl), 1.0),
    (Pinky, Curl(HalfCurl), 0.9),
    (Pinky, Dir(HorizontalLeft), 1.0),
    (Pinky, Dir(HorizontalRight), 1.0),
];

/// Victory (V sign), as shipped with the estimator library.
pub const VICTORY_RULES: &[RuleRow] = &[
    (Thumb, Curl(HalfCurl), 0.5),
    (Thumb, Curl(NoCurl), 0.5),
    (Thumb, Dir(VerticalUp), 1.0),
    (Thumb, Dir(DiagonalUpLeft), 1.0),
    (Index, Curl(NoCurl), 1.0),
    (Index, Dir(VerticalUp), 0.75),
    (Index, Dir(DiagonalUpLeft), 1.0),
    (Middle, Curl(NoCurl), 1.0),
    (Middle, Dir(VerticalUp), 1.0),
    (Middle, Dir(DiagonalUpLeft), 0.75),
    (Ring, Curl(FullCurl), 1.0),
    (Ring, Dir(VerticalUp), 0.2),
    (Ring, Dir(DiagonalUpLeft), 1.0),
    (Ring, Dir(HorizontalLeft), 0.2),
    (Pinky, Curl(FullCurl), 1.0),
    (Pinky, Dir(VerticalUp), 0.2),
    (Pinky, Dir(DiagonalUpLeft), 1.0),
    (Pinky, Dir(HorizontalLeft), 0.2),
];

/// The four custom gestures, in registration order.
pub const STANDARD_TABLE: &[(&str, &[RuleRow])] = &[
    (names::ROCK, ROCK_RULES),
    (names::PAPER, PAPER_RULES),
    (names::SCISSORS, SCISSORS_RULES),
    (names::CANCEL, CANCEL_RULES),
];

/// The full six-gesture list the demo hands to the estimator: the two stock
/// gestures first, then the custom ones.
pub const DEMO_TABLE: &[(&str, &[RuleRow])] = &[
    (names::VICTORY, VICTORY_RULES),
    (names::THUMBS_UP, THUMBS_UP_RULES),
    (names::ROCK, ROCK_RULES),
    (names::PAPER, PAPER_RULES),
    (names::SCISSORS, SCISSORS_RULES),
    (names::CANCEL, CANCEL_RULES),
];

// ─── Catalog ─────────────────────────────────────────────────────────────────

fn valid_weight(weight: f32) -> bool {
    weight > 0.0 && weight <= 1.0
}

/// An ordered set of gesture rules, looked up by name.
#[derive(Clone, Debug, Default)]
pub struct GestureCatalog {
    rules: Vec<GestureRule>,
    by_name: HashMap<String, usize>,
}

impl GestureCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// rock, paper, scissors and cancel.
    pub fn standard() -> Self {
        Self::from_stock(STANDARD_TABLE)
    }

    /// The six gestures recognised by the webcam demo (stock + custom).
    pub fn demo() -> Self {
        Self::from_stock(DEMO_TABLE)
    }

    // Stock tables are covered by `test_stock_tables_have_valid_weights`.
    fn from_stock(tables: &[(&str, &[RuleRow])]) -> Self {
        let mut catalog = Self::new();
        for &(name, rows) in tables {
            catalog.by_name.insert(name.to_string(), catalog.rules.len());
            catalog.rules.push(GestureRule {
                name: name.to_string(),
                constraints: rows
                    .iter()
                    .map(|&(finger, constraint, weight)| WeightedConstraint {
                        finger,
                        constraint,
                        weight,
                    })
                    .collect(),
            });
        }
        catalog
    }

    /// Build a catalog from static rule tables, validating every row.
    pub fn from_tables(tables: &[(&str, &[RuleRow])]) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for &(name, rows) in tables {
            let handle = catalog.define_gesture(name)?;
            for &(finger, constraint, weight) in rows {
                catalog.push(handle, finger, constraint, weight)?;
            }
        }
        Ok(catalog)
    }

    /// Create a named, empty gesture.
    pub fn define_gesture(&mut self, name: &str) -> Result<GestureHandle, CatalogError> {
        if self.by_name.contains_key(name) {
            return Err(CatalogError::DuplicateGesture(name.to_string()));
        }
        let idx = self.rules.len();
        self.rules.push(GestureRule {
            name: name.to_string(),
            constraints: Vec::new(),
        });
        self.by_name.insert(name.to_string(), idx);
        Ok(GestureHandle(idx))
    }

    /// Append a weighted curl constraint.
    pub fn add_curl(
        &mut self,
        handle: GestureHandle,
        finger: Finger,
        curl: CurlState,
        weight: f32,
    ) -> Result<(), CatalogError> {
        self.push(handle, finger, Constraint::Curl(curl), weight)
    }

    /// Append a weighted direction constraint.
    pub fn add_direction(
        &mut self,
        handle: GestureHandle,
        finger: Finger,
        direction: Direction,
        weight: f32,
    ) -> Result<(), CatalogError> {
        self.push(handle, finger, Constraint::Direction(direction), weight)
    }

    /// [`add_curl`](Self::add_curl) from estimator labels, e.g. `("Ring", "Half Curl")`.
    pub fn add_curl_label(
        &mut self,
        handle: GestureHandle,
        finger: &str,
        curl: &str,
        weight: f32,
    ) -> Result<(), CatalogError> {
        self.add_curl(handle, finger.parse()?, curl.parse()?, weight)
    }

    /// [`add_direction`](Self::add_direction) from estimator labels.
    pub fn add_direction_label(
        &mut self,
        handle: GestureHandle,
        finger: &str,
        direction: &str,
        weight: f32,
    ) -> Result<(), CatalogError> {
        self.add_direction(handle, finger.parse()?, direction.parse()?, weight)
    }

    fn push(
        &mut self,
        handle: GestureHandle,
        finger: Finger,
        constraint: Constraint,
        weight: f32,
    ) -> Result<(), CatalogError> {
        let rule = self
            .rules
            .get_mut(handle.0)
            .ok_or(CatalogError::UnknownHandle(handle.0))?;
        if !valid_weight(weight) {
            return Err(CatalogError::InvalidWeight {
                gesture: rule.name.clone(),
                finger,
                weight,
            });
        }
        rule.constraints.push(WeightedConstraint { finger, constraint, weight });
        Ok(())
    }

    /// Look up a gesture by name.
    pub fn get(&self, name: &str) -> Option<&GestureRule> {
        self.by_name.get(name).map(|&idx| &self.rules[idx])
    }

    /// Look up a gesture by handle.
    pub fn rule(&self, handle: GestureHandle) -> Option<&GestureRule> {
        self.rules.get(handle.0)
    }

    /// `true` if a gesture named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Rules in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &GestureRule> {
        self.rules.iter()
    }

    /// Gesture names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Number of gestures.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` if no gesture is defined.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
