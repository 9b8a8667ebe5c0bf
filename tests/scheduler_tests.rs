//! Integration tests for the fixed-rate scheduler.
//!
//! Run with: `cargo test --features std`

#![cfg(feature = "std")]

mod common;

use std::time::Duration;

use common::{estimation, hand, NotReady, ScriptedGestures, ScriptedPose};
use handsign_core::{DemoConfig, Direction, FrameLoop, GestureCatalog, HandSide, Scheduler};

fn frame_loop(pose: ScriptedPose, gestures: ScriptedGestures) -> FrameLoop<ScriptedPose, ScriptedGestures> {
    FrameLoop::new(DemoConfig::default(), GestureCatalog::demo(), pose, gestures).unwrap()
}

#[test]
fn test_interval_follows_config() {
    let fl = frame_loop(ScriptedPose::new(), ScriptedGestures::new());
    let s = Scheduler::for_loop(&fl).unwrap();
    assert_eq!(s.interval(), Duration::from_nanos(16_666_666));
}

#[test]
fn test_runs_until_callback_stops() {
    let pose = ScriptedPose::new()
        .frame(vec![hand("Left")])
        .frame(vec![hand("Left"), hand("Right")]);
    let gestures = ScriptedGestures::new()
        .then(estimation("cancel", Direction::HorizontalRight))
        .then(estimation("rock", Direction::VerticalUp))
        .then(estimation("cancel", Direction::DiagonalUpLeft));
    let mut fl = frame_loop(pose, gestures);

    let mut seen = Vec::new();
    let cycles = Scheduler::with_interval(Duration::ZERO, 0)
        .run(&mut fl, |report, fl| {
            seen.push((
                report.combined.len(),
                fl.slots().get(HandSide::Left).map(str::to_string),
            ));
            report.cycle < 2
        })
        .unwrap();

    assert_eq!(cycles, 3);
    assert_eq!(seen[0], (0, None));
    // Left showed rock, then the right half completed the armed cancel.
    assert_eq!(seen[1], (1, Some("👎".to_string())));
    assert_eq!(seen[2], (0, None));
}

#[test]
fn test_tolerates_isolated_failures() {
    let pose = ScriptedPose::new()
        .failure()
        .frame(vec![hand("Right")])
        .failure();
    let gestures = ScriptedGestures::new().then(estimation("paper", Direction::VerticalUp));
    let mut fl = frame_loop(pose, gestures);

    let mut glyphs = Vec::new();
    let cycles = Scheduler::with_interval(Duration::ZERO, 1)
        .run(&mut fl, |_, fl| {
            glyphs.push(fl.slots().get(HandSide::Right).map(str::to_string));
            glyphs.len() < 2
        })
        .unwrap();
    assert_eq!(cycles, 2);
    assert_eq!(glyphs, [Some("🖐".to_string()), None]);
}

#[test]
fn test_gives_up_after_consecutive_failures() {
    let pose = ScriptedPose::new().failure().failure().failure();
    let mut fl = frame_loop(pose, ScriptedGestures::new());
    let result = Scheduler::with_interval(Duration::ZERO, 2).run(&mut fl, |_, _| true);
    assert_eq!(result, Err(NotReady));
    assert_eq!(fl.cycles(), 3);
}
