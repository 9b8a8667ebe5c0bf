//! Two-handed gesture matcher.
//!
//! Each detected hand is classified on its own. A two-handed gesture such as
//! *cancel* is recognised when both hands have performed their half, each
//! pointing in a direction required for its side. The matcher collects the
//! qualifying sides per gesture and emits one [`CombinedSignal`] when both are
//! present, then resets.
//!
//! ```text
//!   observe(left, …)          observe(right, …)
//! Idle ───────────────▶ Armed(left) ───────────────▶ Fired ──▶ Idle
//!   ▲  non-qualifying / unknown gesture: no change        (emit once, clear)
//! ```
//!
//! # Invariants
//! - A side is recorded only if at least one of its fingers points in a
//!   direction from that side's required set.
//! - Pending sides never exceed two and are cleared in the same call that emits.
//! - Pending state is kept per two-handed gesture; gestures never share it.
//! - Unknown gesture names are a silent no-op.
//! - Under [`ArmingPolicy::Persistent`] a lone armed side never expires.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::catalog::names;
use crate::estimator::PoseData;
use crate::hand::{Direction, HandSide};

// ─── Arming policy ───────────────────────────────────────────────────────────

/// How long a lone armed side stays armed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArmingPolicy {
    /// Armed sides persist until the other side qualifies, across any number
    /// of cycles.
    #[default]
    Persistent,
    /// Armed sides are discarded when the next evaluation cycle begins, so
    /// both hands must qualify in the same frame.
    SameCycle,
}

// ─── Two-hand table ──────────────────────────────────────────────────────────

/// Required finger directions for each side of a two-handed gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideDirections {
    /// Directions that qualify the left hand.
    pub left: Vec<Direction>,
    /// Directions that qualify the right hand.
    pub right: Vec<Direction>,
}

impl SideDirections {
    /// Required directions for `side`.
    pub fn for_side(&self, side: HandSide) -> &[Direction] {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    /// Build from one side's set, mirroring it for the other hand.
    pub fn mirrored_from_left(left: &[Direction]) -> Self {
        Self {
            left: left.to_vec(),
            right: left.iter().map(|d| d.mirrored()).collect(),
        }
    }
}

/// Left-hand half of *cancel*: fingers angled to the right.
pub const CANCEL_LEFT: [Direction; 2] = [Direction::HorizontalRight, Direction::DiagonalUpRight];

/// Right-hand half of *cancel*: fingers angled to the left.
pub const CANCEL_RIGHT: [Direction; 2] = [Direction::HorizontalLeft, Direction::DiagonalUpLeft];

/// The set of gestures that need both hands, keyed by gesture name.
#[derive(Clone, Debug, Default)]
pub struct TwoHandTable {
    entries: HashMap<String, SideDirections>,
}

impl TwoHandTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo's table: only *cancel*.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert(
            names::CANCEL,
            SideDirections {
                left: CANCEL_LEFT.to_vec(),
                right: CANCEL_RIGHT.to_vec(),
            },
        );
        table
    }

    /// Add or replace a two-handed gesture.
    pub fn insert(&mut self, gesture: &str, directions: SideDirections) {
        self.entries.insert(gesture.to_string(), directions);
    }

    /// Directions for `gesture`, if it is two-handed.
    pub fn get(&self, gesture: &str) -> Option<&SideDirections> {
        self.entries.get(gesture)
    }

    /// `true` if `gesture` needs both hands.
    pub fn contains(&self, gesture: &str) -> bool {
        self.entries.contains_key(gesture)
    }

    /// Number of two-handed gestures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no two-handed gesture is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Pending sides ───────────────────────────────────────────────────────────

/// The hands that have performed their half of one two-handed gesture.
///
/// A two-element set: inserting a side twice keeps a single entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingHands {
    left: bool,
    right: bool,
}

impl PendingHands {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `side`. Returns `true` if it was not already present.
    pub fn insert(&mut self, side: HandSide) -> bool {
        let slot = match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        };
        let fresh = !*slot;
        *slot = true;
        fresh
    }

    /// `true` if `side` is recorded.
    pub fn contains(&self, side: HandSide) -> bool {
        match side {
            HandSide::Left => self.left,
            HandSide::Right => self.right,
        }
    }

    /// Number of recorded sides (0–2).
    pub fn len(&self) -> usize {
        self.left as usize + self.right as usize
    }

    /// `true` if no side is recorded.
    pub fn is_empty(&self) -> bool {
        !self.left && !self.right
    }

    /// `true` once both sides are recorded.
    pub fn is_complete(&self) -> bool {
        self.left && self.right
    }

    /// Forget both sides.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Recorded sides, left first.
    pub fn sides(&self) -> impl Iterator<Item = HandSide> + '_ {
        HandSide::BOTH.into_iter().filter(|&s| self.contains(s))
    }
}

// ─── Matcher ─────────────────────────────────────────────────────────────────

/// Observable state of one two-handed gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    /// No side pending.
    Idle,
    /// One side has qualified; waiting for the other.
    Armed(HandSide),
}

/// One hand's classification for one frame. Discarded after the cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameObservation {
    /// Hand the observation belongs to.
    pub side: HandSide,
    /// Best-matched gesture name.
    pub gesture: String,
    /// Per-finger curl and direction.
    pub pose: PoseData,
}

/// Emitted when both hands have performed a two-handed gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedSignal {
    /// The completed gesture.
    pub gesture: String,
}

/// Reconciles per-hand observations into combined two-handed signals.
///
/// Owns all of its state; nothing is shared between matcher instances.
#[derive(Clone, Debug)]
pub struct TwoHandGestureMatcher {
    table: TwoHandTable,
    pending: HashMap<String, PendingHands>,
    policy: ArmingPolicy,
    fired: u64,
}

impl TwoHandGestureMatcher {
    /// Matcher over `table` with the given arming policy.
    pub fn new(table: TwoHandTable, policy: ArmingPolicy) -> Self {
        Self {
            table,
            pending: HashMap::new(),
            policy,
            fired: 0,
        }
    }

    /// The demo's matcher: *cancel* only, persistent arming.
    pub fn standard() -> Self {
        Self::new(TwoHandTable::standard(), ArmingPolicy::Persistent)
    }

    /// Feed one hand's classification for the current frame.
    ///
    /// Returns the combined signal if this observation completed a
    /// two-handed gesture. Unknown gestures and non-qualifying poses leave the
    /// state untouched.
    pub fn observe(
        &mut self,
        side: HandSide,
        pose: &PoseData,
        gesture: &str,
    ) -> Option<CombinedSignal> {
        let Some(directions) = self.table.get(gesture) else {
            trace!(gesture, "not a two-handed gesture");
            return None;
        };
        if !pose.any_direction_in(directions.for_side(side)) {
            trace!(gesture, side = %side, "no finger in a required direction");
            return None;
        }

        let pending = self.pending.entry_ref(gesture).or_default();
        if pending.insert(side) {
            debug!(gesture, side = %side, pending = pending.len(), "hand armed");
        }
        if !pending.is_complete() {
            return None;
        }

        pending.clear();
        self.fired += 1;
        debug!(gesture, fired = self.fired, "two-handed gesture fired");
        Some(CombinedSignal {
            gesture: gesture.to_string(),
        })
    }

    /// [`observe`](Self::observe) taking a bundled observation.
    pub fn observe_frame(&mut self, obs: &FrameObservation) -> Option<CombinedSignal> {
        self.observe(obs.side, &obs.pose, &obs.gesture)
    }

    /// Mark the start of an evaluation cycle.
    ///
    /// Under [`ArmingPolicy::SameCycle`] this discards any side armed in the
    /// previous cycle. Under [`ArmingPolicy::Persistent`] it does nothing.
    pub fn begin_cycle(&mut self) {
        if self.policy == ArmingPolicy::SameCycle {
            for (gesture, pending) in self.pending.iter_mut() {
                if !pending.is_empty() {
                    trace!(gesture = gesture.as_str(), "stale arming dropped");
                    pending.clear();
                }
            }
        }
    }

    /// Pending sides for `gesture`. Empty for unknown or idle gestures.
    pub fn pending(&self, gesture: &str) -> PendingHands {
        self.pending.get(gesture).copied().unwrap_or_default()
    }

    /// Current state of `gesture`.
    pub fn state(&self, gesture: &str) -> MatchState {
        let pending = self.pending(gesture);
        let first = pending.sides().next();
        match first {
            Some(side) => MatchState::Armed(side),
            None => MatchState::Idle,
        }
    }

    /// `true` if `gesture` is handled by this matcher rather than shown per hand.
    pub fn is_two_handed(&self, gesture: &str) -> bool {
        self.table.contains(gesture)
    }

    /// Number of combined signals emitted so far.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    /// Arming policy in use.
    pub fn policy(&self) -> ArmingPolicy {
        self.policy
    }

    /// Drop every pending side.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}

impl Default for TwoHandGestureMatcher {
    fn default() -> Self {
        Self::standard()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::CurlState;

    fn pointing(direction: Direction) -> PoseData {
        PoseData::uniform(CurlState::NoCurl, direction)
    }

    #[test]
    fn test_pending_insert_is_idempotent() {
        let mut p = PendingHands::new();
        assert!(p.insert(HandSide::Left));
        assert!(!p.insert(HandSide::Left));
        assert_eq!(p.len(), 1);
        assert!(p.insert(HandSide::Right));
        assert!(p.is_complete());
        p.clear();
        assert!(p.is_empty());
    }

    #[test]
    fn test_cancel_directions_are_mirror_images() {
        let mirrored = SideDirections::mirrored_from_left(&CANCEL_LEFT);
        assert_eq!(mirrored.right, CANCEL_RIGHT.to_vec());
    }

    #[test]
    fn test_pending_scoped_per_gesture() {
        let mut table = TwoHandTable::standard();
        table.insert(
            "frame",
            SideDirections::mirrored_from_left(&[Direction::VerticalUp]),
        );
        let mut m = TwoHandGestureMatcher::new(table, ArmingPolicy::Persistent);

        assert!(m.observe(HandSide::Left, &pointing(Direction::HorizontalRight), "cancel").is_none());
        // Right half of a different gesture must not complete cancel.
        assert!(m.observe(HandSide::Right, &pointing(Direction::VerticalUp), "frame").is_none());
        assert_eq!(m.state("cancel"), MatchState::Armed(HandSide::Left));
        assert_eq!(m.state("frame"), MatchState::Armed(HandSide::Right));
        assert_eq!(m.fired_count(), 0);
    }

    #[test]
    fn test_same_cycle_policy_drops_stale_arming() {
        let mut m = TwoHandGestureMatcher::new(TwoHandTable::standard(), ArmingPolicy::SameCycle);
        m.begin_cycle();
        m.observe(HandSide::Left, &pointing(Direction::DiagonalUpRight), "cancel");
        assert_eq!(m.state("cancel"), MatchState::Armed(HandSide::Left));

        m.begin_cycle();
        assert_eq!(m.state("cancel"), MatchState::Idle);
        assert!(m.observe(HandSide::Right, &pointing(Direction::HorizontalLeft), "cancel").is_none());
        assert_eq!(m.state("cancel"), MatchState::Armed(HandSide::Right));
    }

    #[test]
    fn test_persistent_policy_keeps_arming_across_cycles() {
        let mut m = TwoHandGestureMatcher::standard();
        m.observe(HandSide::Left, &pointing(Direction::HorizontalRight), "cancel");
        for _ in 0..100 {
            m.begin_cycle();
        }
        let signal = m.observe(HandSide::Right, &pointing(Direction::DiagonalUpLeft), "cancel");
        assert_eq!(signal, Some(CombinedSignal { gesture: "cancel".into() }));
    }

    #[test]
    fn test_wrong_side_direction_does_not_arm() {
        let mut m = TwoHandGestureMatcher::standard();
        // HorizontalLeft qualifies the right hand only.
        m.observe(HandSide::Left, &pointing(Direction::HorizontalLeft), "cancel");
        assert!(m.pending("cancel").is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut m = TwoHandGestureMatcher::standard();
        m.observe(HandSide::Left, &pointing(Direction::HorizontalRight), "cancel");
        m.reset();
        assert_eq!(m.state("cancel"), MatchState::Idle);
    }
}
