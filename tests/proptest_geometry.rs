//! Property tests for bounding box validation.

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use uicapture::capture::{validate_bbox, BBox, Bounds, GeometryError};

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config
}

/// Bounds with room for interesting boxes on both axes.
fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (1u32..=4096, 1u32..=4096).prop_map(|(width, height)| Bounds::new(width, height))
}

/// A bbox satisfying 0 <= x1 <= x2 <= width and 0 <= y1 <= y2 <= height.
fn contained_bbox(bounds: Bounds) -> impl Strategy<Value = BBox> {
    let w = i64::from(bounds.width);
    let h = i64::from(bounds.height);
    (0..=w, 0..=h)
        .prop_flat_map(move |(x1, y1)| (Just(x1), Just(y1), x1..=w, y1..=h))
        .prop_map(|(x1, y1, x2, y2)| BBox::new(x1, y1, x2, y2))
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn contained_boxes_always_validate(
        (bounds, bbox) in bounds_strategy().prop_flat_map(|b| (Just(b), contained_bbox(b)))
    ) {
        prop_assert_eq!(validate_bbox(&bbox, bounds), Ok(()));
    }

    #[test]
    fn inverted_x_always_fails(
        bounds in bounds_strategy(),
        (x2, x1) in (0i64..10_000, 1i64..10_000).prop_map(|(lo, delta)| (lo, lo + delta)),
        y in 0i64..10_000,
    ) {
        // x1 > x2 by construction; Inverted wins regardless of bounds
        let bbox = BBox::new(x1, y, x2, y);
        prop_assert!(matches!(
            validate_bbox(&bbox, bounds),
            Err(GeometryError::Inverted { .. })
        ), "unexpected validate_bbox result");
    }

    #[test]
    fn inverted_y_always_fails(
        bounds in bounds_strategy(),
        (y2, y1) in (0i64..10_000, 1i64..10_000).prop_map(|(lo, delta)| (lo, lo + delta)),
        x in 0i64..10_000,
    ) {
        let bbox = BBox::new(x, y1, x, y2);
        prop_assert!(matches!(
            validate_bbox(&bbox, bounds),
            Err(GeometryError::Inverted { .. })
        ), "unexpected validate_bbox result");
    }

    #[test]
    fn negative_coordinate_always_fails(
        bounds in bounds_strategy(),
        x1 in -10_000i64..0,
        (y1, x2, y2) in (0i64..100, 0i64..100, 0i64..100),
    ) {
        // Keep the box ordered so Negative is the first violated rule
        let bbox = BBox::new(x1, y1, x1.max(x2), y1.max(y2));
        prop_assert!(matches!(
            validate_bbox(&bbox, bounds),
            Err(GeometryError::Negative { .. })
        ), "unexpected validate_bbox result");
    }

    #[test]
    fn exceeding_width_always_fails(
        bounds in bounds_strategy(),
        overshoot in 1i64..10_000,
    ) {
        let w = i64::from(bounds.width);
        let bbox = BBox::new(0, 0, w + overshoot, 0);
        prop_assert!(matches!(
            validate_bbox(&bbox, bounds),
            Err(GeometryError::OutOfBounds { .. })
        ), "unexpected validate_bbox result");
    }

    #[test]
    fn exceeding_height_always_fails(
        bounds in bounds_strategy(),
        overshoot in 1i64..10_000,
    ) {
        let h = i64::from(bounds.height);
        let bbox = BBox::new(0, 0, i64::from(bounds.width), h + overshoot);
        prop_assert!(matches!(
            validate_bbox(&bbox, bounds),
            Err(GeometryError::OutOfBounds { .. })
        ), "unexpected validate_bbox result");
    }
}
