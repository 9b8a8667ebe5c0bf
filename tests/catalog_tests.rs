//! Integration tests for the stock gesture catalog and the rule builder.

use handsign_core::catalog::{names, CatalogError, Constraint, GestureCatalog};
use handsign_core::{CurlState, Direction, Finger};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

fn curls(cat: &GestureCatalog, gesture: &str, finger: Finger) -> Vec<(CurlState, f32)> {
    let mut v: Vec<_> = cat.get(gesture).unwrap().curl_weights(finger).collect();
    v.sort_by(|a, b| a.0.cmp(&b.0));
    v
}

// ─── stock gestures ──────────────────────────────────────────────────────────

#[test]
fn test_standard_catalog_contents() {
    let cat = GestureCatalog::standard();
    let names: Vec<_> = cat.names().collect();
    assert_eq!(names, ["rock", "paper", "scissors", "cancel"]);
}

#[test]
fn test_demo_catalog_adds_stock_estimator_gestures() {
    let cat = GestureCatalog::demo();
    assert_eq!(cat.len(), 6);
    assert!(cat.contains(names::THUMBS_UP));
    assert!(cat.contains(names::VICTORY));
    let thumbs = cat.get(names::THUMBS_UP).unwrap();
    assert!(thumbs
        .direction_weights(Finger::Thumb)
        .any(|(d, w)| d == Direction::VerticalUp && approx(w, 1.0)));
}

#[test]
fn test_paper_is_all_open_and_undirected() {
    let cat = GestureCatalog::standard();
    let paper = cat.get("paper").unwrap();
    for finger in Finger::ALL {
        assert_eq!(curls(&cat, "paper", finger), vec![(CurlState::NoCurl, 1.0)], "{}", finger);
        assert_eq!(paper.direction_weights(finger).count(), 0);
    }
    assert!(!paper.has_direction_constraints());
}

#[test]
fn test_rock_weights() {
    let cat = GestureCatalog::standard();
    assert_eq!(
        curls(&cat, "rock", Finger::Thumb),
        vec![(CurlState::NoCurl, 0.5), (CurlState::HalfCurl, 1.0)]
    );
    for finger in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky] {
        assert_eq!(
            curls(&cat, "rock", finger),
            vec![(CurlState::HalfCurl, 0.9), (CurlState::FullCurl, 1.0)],
            "{}",
            finger
        );
    }
    assert!(!cat.get("rock").unwrap().has_direction_constraints());
}

#[test]
fn test_scissors_leaves_thumb_free() {
    let cat = GestureCatalog::standard();
    let scissors = cat.get("scissors").unwrap();
    assert!(!scissors.constrains(Finger::Thumb));
    assert_eq!(curls(&cat, "scissors", Finger::Index), vec![(CurlState::NoCurl, 1.0)]);
    assert_eq!(curls(&cat, "scissors", Finger::Middle), vec![(CurlState::NoCurl, 1.0)]);
    for finger in [Finger::Ring, Finger::Pinky] {
        assert_eq!(
            curls(&cat, "scissors", finger),
            vec![(CurlState::HalfCurl, 0.9), (CurlState::FullCurl, 1.0)]
        );
    }
}

#[test]
fn test_cancel_is_open_and_sideways() {
    let cat = GestureCatalog::standard();
    let cancel = cat.get("cancel").unwrap();
    for finger in Finger::ALL {
        assert_eq!(curls(&cat, "cancel", finger), vec![(CurlState::NoCurl, 1.0)]);
        let dirs: Vec<_> = cancel.direction_weights(finger).collect();
        assert_eq!(dirs.len(), 4, "{}", finger);
        for expected in [
            Direction::DiagonalUpRight,
            Direction::DiagonalUpLeft,
            Direction::HorizontalRight,
            Direction::HorizontalLeft,
        ] {
            assert!(
                dirs.iter().any(|&(d, w)| d == expected && approx(w, 1.0)),
                "{} missing {}",
                finger,
                expected
            );
        }
    }
}

// ─── builder ─────────────────────────────────────────────────────────────────

#[test]
fn test_builder_allows_graded_duplicates() {
    let mut cat = GestureCatalog::new();
    let h = cat.define_gesture("point").unwrap();
    cat.add_curl(h, Finger::Index, CurlState::NoCurl, 1.0).unwrap();
    cat.add_curl(h, Finger::Middle, CurlState::FullCurl, 1.0).unwrap();
    cat.add_curl(h, Finger::Middle, CurlState::HalfCurl, 0.9).unwrap();
    cat.add_direction(h, Finger::Index, Direction::VerticalUp, 1.0).unwrap();
    cat.add_direction(h, Finger::Index, Direction::DiagonalUpLeft, 0.25).unwrap();

    let rule = cat.rule(h).unwrap();
    assert_eq!(rule.name(), "point");
    assert_eq!(rule.constraints().len(), 5);
    assert_eq!(rule.direction_weights(Finger::Index).count(), 2);
    assert_eq!(rule.constraints()[3].constraint, Constraint::Direction(Direction::VerticalUp));
}

#[test]
fn test_builder_rejects_out_of_range_weights() {
    let mut cat = GestureCatalog::new();
    let h = cat.define_gesture("g").unwrap();
    for bad in [0.0_f32, -1.0, 1.5, f32::NAN, f32::INFINITY] {
        assert!(
            matches!(
                cat.add_curl(h, Finger::Thumb, CurlState::NoCurl, bad),
                Err(CatalogError::InvalidWeight { .. })
            ),
            "weight {} accepted",
            bad
        );
    }
    assert!(cat.add_curl(h, Finger::Thumb, CurlState::NoCurl, 1.0).is_ok());
    assert!(cat.add_curl(h, Finger::Thumb, CurlState::HalfCurl, 0.01).is_ok());
}

#[test]
fn test_builder_rejects_duplicate_names() {
    let mut cat = GestureCatalog::standard();
    assert_eq!(
        cat.define_gesture("rock"),
        Err(CatalogError::DuplicateGesture("rock".to_string()))
    );
}

#[test]
fn test_label_builder_fails_fast_on_unknown_labels() {
    let mut cat = GestureCatalog::new();
    let h = cat.define_gesture("g").unwrap();
    cat.add_curl_label(h, "Ring", "Half Curl", 0.9).unwrap();
    cat.add_direction_label(h, "Pinky", "Diagonal Down Left", 0.4).unwrap();

    let err = cat.add_curl_label(h, "Toe", "No Curl", 1.0).unwrap_err();
    assert!(matches!(err, CatalogError::Label(ref e) if e.kind == "finger"));
    assert_eq!(err.to_string(), "unknown finger label \"Toe\"");

    let err = cat.add_direction_label(h, "Index", "Backwards", 1.0).unwrap_err();
    assert!(matches!(err, CatalogError::Label(ref e) if e.kind == "direction"));

    assert_eq!(cat.get("g").unwrap().constraints().len(), 2);
}
