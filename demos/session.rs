//! # Scripted webcam session
//!
//! Replays a short two-hand session through the full frame loop: rock against
//! paper, scissors against thumbs-up, then the two-handed cancel performed one hand at a
//! time. Prints both glyph slots and the right hand's debug table per cycle.
//!
//! ```text
//! RUST_LOG=handsign_core=debug cargo run --example session --features std
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::Duration;

use handsign_core::estimator::{
    DetectedHand, Estimation, GestureEstimator, GestureScore, Keypoint2, Keypoint3, PoseData,
    PoseEstimator, LANDMARK_COUNT,
};
use handsign_core::{
    CurlState, DemoConfig, Direction, Finger, FrameLoop, GestureCatalog, HandSide, Scheduler,
};
use tracing_subscriber::EnvFilter;

// ── Scripted collaborators ───────────────────────────────────────────────────

struct Camera {
    frames: VecDeque<Vec<&'static str>>,
}

impl PoseEstimator for Camera {
    type Error = Infallible;

    fn estimate_hands(&mut self) -> Result<Vec<DetectedHand>, Infallible> {
        let sides = self.frames.pop_front().unwrap_or_default();
        Ok(sides
            .into_iter()
            .map(|side| DetectedHand {
                handedness: side.to_string(),
                keypoints: vec![Keypoint2::default(); LANDMARK_COUNT],
                keypoints_3d: vec![Keypoint3::default(); LANDMARK_COUNT],
            })
            .collect())
    }
}

struct Scorer {
    answers: VecDeque<(&'static str, CurlState, Direction)>,
}

impl GestureEstimator for Scorer {
    fn estimate(&mut self, catalog: &GestureCatalog, _: &[Keypoint3], _: usize) -> Estimation {
        let Some((name, curl, direction)) = self.answers.pop_front() else {
            return Estimation::default();
        };
        // Everything in the catalog gets a token score; the scripted answer wins.
        let gestures = catalog
            .names()
            .map(|n| GestureScore {
                name: n.to_string(),
                score: if n == name { 9.0 } else { 1.0 },
            })
            .collect();
        Estimation {
            gestures,
            pose_data: PoseData::uniform(curl, direction),
        }
    }
}

// ── Display helpers ──────────────────────────────────────────────────────────

fn slot(fl: &FrameLoop<Camera, Scorer>, side: HandSide) -> &str {
    fl.slots().get(side).unwrap_or("  ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let camera = Camera {
        frames: VecDeque::from(vec![
            vec!["Left", "Right"],
            vec!["Left", "Right"],
            vec!["Left"],
            vec!["Right"],
            vec![],
        ]),
    };
    let scorer = Scorer {
        answers: VecDeque::from(vec![
            ("paper", CurlState::NoCurl, Direction::VerticalUp),
            ("rock", CurlState::FullCurl, Direction::DiagonalUpLeft),
            ("scissors", CurlState::HalfCurl, Direction::VerticalUp),
            ("thumbs_up", CurlState::FullCurl, Direction::HorizontalLeft),
            ("cancel", CurlState::NoCurl, Direction::HorizontalRight),
            ("cancel", CurlState::NoCurl, Direction::DiagonalUpLeft),
        ]),
    };

    let config = DemoConfig::default();
    let mut fl = match FrameLoop::new(config, GestureCatalog::demo(), camera, scorer) {
        Ok(fl) => fl,
        Err(e) => {
            eprintln!("bad configuration: {e}");
            return;
        }
    };

    println!("cycle │ left │ right │ right hand debug");
    println!("──────┼──────┼───────┼──────────────────────────────────");
    let scheduler = Scheduler::with_interval(Duration::from_millis(250), 0);
    let result = scheduler.run(&mut fl, |report, fl| {
        let debug: Vec<String> = Finger::ALL
            .iter()
            .map(|&f| {
                let d = fl.debug_panel().get(HandSide::Right, f);
                format!("{}:{}/{}", f, d.curl_label(), d.direction_label())
            })
            .collect();
        println!(
            "{:>5} │ {:<4} │ {:<5} │ {}",
            report.cycle,
            slot(fl, HandSide::Left),
            slot(fl, HandSide::Right),
            debug.join(" "),
        );
        for signal in &report.combined {
            println!("      └─ two-handed {} recognised", signal.gesture);
        }
        report.cycle < 4
    });

    match result {
        Ok(cycles) => println!("\n{} cycles, {} two-handed matches", cycles, fl.matcher().fired_count()),
        Err(never) => match never {},
    }
}
