//! One evaluation cycle: poll hands, classify each, update the display.
//!
//! ```text
//! PoseEstimator ──hands──▶ for each hand:
//!                            GestureEstimator(catalog, keypoints, window)
//!                              │ best gesture + pose data
//!                              ├─▶ DebugPanel[side]
//!                              ├─ one-handed ─▶ DisplaySlots[side] = glyph
//!                              └─ two-handed ─▶ TwoHandGestureMatcher
//!                                                 └─ fired ─▶ DisplaySlots[both] = glyph
//! ```
//!
//! A cycle runs to completion before the next one starts. The pose estimator
//! is the only call that can fail; its error is returned unchanged, after the
//! slots have already been cleared for the new cycle.

use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::catalog::GestureCatalog;
use crate::config::{ConfigError, DemoConfig};
use crate::display::{landmark_color, DebugPanel, DisplaySlots, OverlayPoint, OVERLAY_POINT_RADIUS};
use crate::estimator::{DetectedHand, GestureEstimator, PoseEstimator};
use crate::hand::HandSide;
use crate::matcher::{CombinedSignal, FrameObservation, TwoHandGestureMatcher, TwoHandTable};

/// What one hand contributed to a cycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HandReport {
    /// Side the hand was attributed to.
    pub side: HandSide,
    /// Best-scoring gesture, `None` when the estimator matched nothing.
    pub gesture: Option<String>,
    /// Score of `gesture` (0.0 when none).
    pub score: f32,
}

/// Outcome of one evaluation cycle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleReport {
    /// Zero-based cycle number.
    pub cycle: u64,
    /// One entry per hand with a recognised side, in detection order.
    pub hands: Vec<HandReport>,
    /// Two-handed gestures completed during this cycle.
    pub combined: Vec<CombinedSignal>,
    /// Landmark dots for every detected hand.
    pub overlay: Vec<OverlayPoint>,
}

/// The frame-driven recognizer: owns the catalog, matcher, display state and
/// both collaborators.
pub struct FrameLoop<P, G> {
    config: DemoConfig,
    catalog: GestureCatalog,
    matcher: TwoHandGestureMatcher,
    slots: DisplaySlots,
    debug: DebugPanel,
    pose: P,
    gestures: G,
    cycle: u64,
}

impl<P, G> FrameLoop<P, G>
where
    P: PoseEstimator,
    G: GestureEstimator,
{
    /// Loop over `catalog` with the standard two-handed table.
    pub fn new(
        config: DemoConfig,
        catalog: GestureCatalog,
        pose: P,
        gestures: G,
    ) -> Result<Self, ConfigError> {
        Self::with_two_hand_table(config, catalog, TwoHandTable::standard(), pose, gestures)
    }

    /// Loop with a caller-supplied two-handed table.
    pub fn with_two_hand_table(
        config: DemoConfig,
        catalog: GestureCatalog,
        table: TwoHandTable,
        pose: P,
        gestures: G,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let matcher = TwoHandGestureMatcher::new(table, config.arming);
        Ok(Self {
            config,
            catalog,
            matcher,
            slots: DisplaySlots::new(),
            debug: DebugPanel::new(),
            pose,
            gestures,
            cycle: 0,
        })
    }

    /// Run one cycle to completion.
    pub fn run_cycle(&mut self) -> Result<CycleReport, P::Error> {
        let cycle = self.cycle;
        self.cycle += 1;

        self.slots.clear();
        self.matcher.begin_cycle();

        let hands = self.pose.estimate_hands()?;
        let mut report = CycleReport {
            cycle,
            ..CycleReport::default()
        };

        for hand in &hands {
            push_overlay(&mut report.overlay, hand);

            let side = match hand.side() {
                Ok(side) => side,
                Err(err) => {
                    trace!(%err, "hand skipped");
                    continue;
                }
            };
            self.evaluate_hand(side, hand, &mut report);
        }

        Ok(report)
    }

    fn evaluate_hand(&mut self, side: HandSide, hand: &DetectedHand, report: &mut CycleReport) {
        let estimation = self.gestures.estimate(
            &self.catalog,
            &hand.keypoints_3d,
            self.config.smoothing_window,
        );
        let Some(best) = estimation.best() else {
            report.hands.push(HandReport { side, gesture: None, score: 0.0 });
            return;
        };
        debug!(side = %side, gesture = best.name.as_str(), score = best.score, "hand classified");
        report.hands.push(HandReport {
            side,
            gesture: Some(best.name.clone()),
            score: best.score,
        });

        let obs = FrameObservation {
            side,
            gesture: best.name.clone(),
            pose: estimation.pose_data,
        };
        self.debug.update(side, &obs.pose);

        if !self.matcher.is_two_handed(&obs.gesture) {
            self.slots.set(side, self.config.glyphs.glyph_or_name(&obs.gesture));
            return;
        }

        if let Some(signal) = self.matcher.observe_frame(&obs) {
            self.slots.set_both(self.config.glyphs.glyph_or_name(&signal.gesture));
            report.combined.push(signal);
        }
    }

    /// Glyph slots as of the last cycle.
    pub fn slots(&self) -> &DisplaySlots {
        &self.slots
    }

    /// Per-finger debug fields as of the last cycle.
    pub fn debug_panel(&self) -> &DebugPanel {
        &self.debug
    }

    /// The two-handed matcher.
    pub fn matcher(&self) -> &TwoHandGestureMatcher {
        &self.matcher
    }

    /// The gesture catalog handed to the estimator.
    pub fn catalog(&self) -> &GestureCatalog {
        &self.catalog
    }

    /// Active configuration.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// The pose estimator.
    pub fn pose_estimator(&self) -> &P {
        &self.pose
    }

    /// The gesture estimator.
    pub fn gesture_estimator(&self) -> &G {
        &self.gestures
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycle
    }
}

fn push_overlay(overlay: &mut Vec<OverlayPoint>, hand: &DetectedHand) {
    overlay.extend(hand.keypoints.iter().enumerate().map(|(i, k)| OverlayPoint {
        x: k.x,
        y: k.y,
        radius: OVERLAY_POINT_RADIUS,
        color: landmark_color(i),
    }));
}
