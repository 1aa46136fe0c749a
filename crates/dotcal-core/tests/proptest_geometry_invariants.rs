//! Property-based tests for the geometry primitives.
//!
//! 1. **Lerp endpoints**: progress 0 and 1 land on the two endpoints.
//! 2. **Lerp clamps**: any progress, in range or not, stays between them.
//! 3. **Fitting boxes**: a box placed inside the viewport is contained.
//! 4. **Containment shrinks**: a contained box stays contained when shrunk.
//! 5. **Corner visibility**: `is_out_of_view` is the negation of containing a
//!    zero-sized box at the rect's corner.

use dotcal_core::geometry::{Coordinate, DomRect, Size, Viewport};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (-5000.0..5000.0f64, -5000.0..5000.0f64).prop_map(|(x, y)| Coordinate::new(x, y))
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (1u32..3000, 1u32..2000).prop_map(|(w, h)| Viewport::new(f64::from(w), f64::from(h)))
}

/// A viewport plus an origin and size chosen so the box fits inside it.
/// Whole pixels keep the edge sums exact.
fn fitting_box_strategy() -> impl Strategy<Value = (Viewport, Coordinate, Size)> {
    (1u32..3000, 1u32..2000)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), 0..=w, 0..=h))
        .prop_flat_map(|(w, h, bw, bh)| (Just((w, h, bw, bh)), 0..=w - bw, 0..=h - bh))
        .prop_map(|((w, h, bw, bh), x, y)| {
            (
                Viewport::new(f64::from(w), f64::from(h)),
                Coordinate::new(f64::from(x), f64::from(y)),
                Size::new(f64::from(bw), f64::from(bh)),
            )
        })
}

fn between(value: f64, a: f64, b: f64) -> bool {
    value >= a.min(b) - EPS && value <= a.max(b) + EPS
}

proptest! {
    #[test]
    fn lerp_hits_endpoints(a in coordinate_strategy(), b in coordinate_strategy()) {
        let start = a.lerp(b, 0.0);
        let end = a.lerp(b, 1.0);
        prop_assert_eq!(start, a);
        prop_assert!((end.x - b.x).abs() < EPS && (end.y - b.y).abs() < EPS,
            "lerp(1) = {:?}, expected {:?}", end, b);
    }

    #[test]
    fn lerp_stays_between_endpoints(
        a in coordinate_strategy(),
        b in coordinate_strategy(),
        t in -2.0..3.0f64,
    ) {
        let point = a.lerp(b, t);
        prop_assert!(between(point.x, a.x, b.x), "x {} outside [{}, {}]", point.x, a.x, b.x);
        prop_assert!(between(point.y, a.y, b.y), "y {} outside [{}, {}]", point.y, a.y, b.y);
    }

    #[test]
    fn fitting_box_is_contained((viewport, origin, size) in fitting_box_strategy()) {
        prop_assert!(viewport.contains_box(origin, size));
        let rect = DomRect::from_origin(origin, size);
        prop_assert!(rect.right() <= viewport.width);
        prop_assert!(rect.bottom() <= viewport.height);
        prop_assert!(!viewport.is_out_of_view(&rect));
    }

    #[test]
    fn contained_box_stays_contained_when_shrunk(
        (viewport, origin, size) in fitting_box_strategy(),
        sx in 0.0..=1.0f64,
        sy in 0.0..=1.0f64,
    ) {
        let smaller = Size::new(size.width * sx, size.height * sy);
        prop_assert!(viewport.contains_box(origin, smaller));
    }

    #[test]
    fn out_of_view_matches_corner_containment(
        viewport in viewport_strategy(),
        corner in coordinate_strategy(),
        width in 0.0..400.0f64,
        height in 0.0..200.0f64,
    ) {
        let rect = DomRect::new(corner.y, corner.x, width, height);
        prop_assert_eq!(
            viewport.is_out_of_view(&rect),
            !viewport.contains_box(corner, Size::new(0.0, 0.0))
        );
    }
}
