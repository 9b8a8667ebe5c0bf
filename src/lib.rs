//! # handsign-core
//!
//! Hand-gesture recognition logic for a webcam rock/paper/scissors demo.
//!
//! The hard parts, hand landmark detection and curl/direction scoring, belong
//! to external estimators. What lives here is the part with decisions in it:
//! the weighted gesture rules the estimator scores against, the matcher that
//! turns two independent per-hand *cancel* halves into one two-handed event,
//! and the frame cycle that routes each hand's result to its display slot.
//!
//! ## The pipeline
//!
//! ```text
//! PoseEstimator → DetectedHand → GestureEstimator → (side, pose, gesture)
//!                                      ↑                     │
//!                               GestureCatalog               ├─▶ DisplaySlots
//!                                                            └─▶ TwoHandGestureMatcher
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`hand`] | [`Finger`], [`CurlState`], [`Direction`], [`HandSide`] | Discrete hand vocabulary and estimator labels |
//! | [`catalog`] | [`GestureCatalog`], [`GestureRule`] | Weighted curl/direction rules for rock, paper, scissors, cancel, … |
//! | [`matcher`] | [`TwoHandGestureMatcher`], [`PendingHands`] | Two-handed gesture reconciliation |
//! | [`estimator`] | [`PoseEstimator`], [`GestureEstimator`], [`PoseData`] | Collaborator seams and their data |
//! | [`display`] | [`DisplaySlots`], [`DebugPanel`] | Per-side glyphs, finger debug fields, overlay colours |
//! | [`config`] | [`DemoConfig`], [`VideoConfig`] | Frame rate, smoothing window, arming policy, glyphs |
//! | [`frame`] | [`FrameLoop`], [`CycleReport`] | One evaluation cycle |
//! | `scheduler` | `Scheduler` | Fixed-rate loop (requires `std`) |
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` + `alloc` by default. Enable `std` for the
//! scheduler and `serde` for serialisable configuration and reports.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod hand;
pub mod catalog;
pub mod matcher;
pub mod estimator;
pub mod display;
pub mod config;
pub mod frame;
#[cfg(feature = "std")]
pub mod scheduler;

pub use catalog::{CatalogError, GestureCatalog, GestureHandle, GestureRule};
pub use config::{ConfigError, DemoConfig, GlyphTable, VideoConfig};
pub use display::{DebugPanel, DisplaySlots};
pub use estimator::{DetectedHand, Estimation, GestureEstimator, PoseData, PoseEstimator};
pub use frame::{CycleReport, FrameLoop};
pub use hand::{CurlState, Direction, Finger, HandSide, ParseLabelError};
pub use matcher::{ArmingPolicy, CombinedSignal, FrameObservation, PendingHands, TwoHandGestureMatcher};
#[cfg(feature = "std")]
pub use scheduler::Scheduler;
