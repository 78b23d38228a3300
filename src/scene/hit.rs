//! Pointer hit testing
//!
//! Matching is first-in-insertion-order inside a rectangular window, not
//! nearest-neighbor.

use glam::Vec2;

use super::candles::{Candle, CandleId};
use crate::consts::{HIT_HALF_HEIGHT, HIT_HALF_WIDTH, POINTER_Y_OFFSET};

/// Half-extents of the hit rectangle around a candle anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for HitWindow {
    fn default() -> Self {
        Self {
            half_width: HIT_HALF_WIDTH,
            half_height: HIT_HALF_HEIGHT,
        }
    }
}

impl HitWindow {
    /// Strict containment: points on the boundary do not match
    #[inline]
    pub fn contains(&self, candle: &Candle, point: Vec2) -> bool {
        (candle.x - point.x).abs() < self.half_width
            && (candle.y - point.y).abs() < self.half_height
    }
}

/// First candle whose window contains (x, y)
pub fn find_nearest(candles: &[Candle], x: f32, y: f32, window: &HitWindow) -> Option<CandleId> {
    let point = Vec2::new(x, y);
    candles
        .iter()
        .position(|c| window.contains(c, point))
        .map(CandleId)
}

/// Viewport (client) coordinates to canvas-local, with the anchor offset applied
#[inline]
pub fn to_canvas(client: Vec2, rect_origin: Vec2) -> Vec2 {
    to_canvas_with_offset(client, rect_origin, POINTER_Y_OFFSET)
}

pub fn to_canvas_with_offset(client: Vec2, rect_origin: Vec2, y_offset: f32) -> Vec2 {
    client - rect_origin + Vec2::new(0.0, y_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candles(points: &[(f32, f32)]) -> Vec<Candle> {
        points.iter().map(|&(x, y)| Candle::new(x, y)).collect()
    }

    #[test]
    fn test_empty_has_no_match() {
        assert_eq!(find_nearest(&[], 0.0, 0.0, &HitWindow::default()), None);
    }

    #[test]
    fn test_first_match_wins() {
        // Second candle is closer, but the first one is still inside the window
        let list = candles(&[(100.0, 100.0), (110.0, 100.0)]);
        let hit = find_nearest(&list, 109.0, 100.0, &HitWindow::default());
        assert_eq!(hit, Some(CandleId(0)));
    }

    #[test]
    fn test_window_bounds_are_strict() {
        let list = candles(&[(100.0, 100.0)]);
        let w = HitWindow::default();
        assert_eq!(find_nearest(&list, 114.9, 139.9, &w), Some(CandleId(0)));
        assert_eq!(find_nearest(&list, 115.0, 100.0, &w), None);
        assert_eq!(find_nearest(&list, 100.0, 60.0, &w), None);
    }

    #[test]
    fn test_to_canvas() {
        let p = to_canvas(Vec2::new(150.0, 120.0), Vec2::new(30.0, 40.0));
        assert_eq!(p, Vec2::new(120.0, 50.0));
    }

    proptest! {
        #[test]
        fn prop_match_implies_inside_window(
            cx in -500.0f32..500.0, cy in -500.0f32..500.0,
            px in -500.0f32..500.0, py in -500.0f32..500.0,
        ) {
            let list = candles(&[(cx, cy)]);
            let hit = find_nearest(&list, px, py, &HitWindow::default());
            let inside = (cx - px).abs() < HIT_HALF_WIDTH && (cy - py).abs() < HIT_HALF_HEIGHT;
            prop_assert_eq!(hit.is_some(), inside);
        }
    }
}
