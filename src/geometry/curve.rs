//! Drooping cable curves.
//!
//! A cable hangs like a real patch cord: both control points sit straight
//! below their endpoints, lowered by an amount proportional to the distance
//! between the endpoints and capped so long cables do not sag off screen.

use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Default droop per unit of endpoint distance.
pub const DEFAULT_DROOP_FACTOR: f32 = 0.5;

/// Default maximum droop in canvas units.
pub const DEFAULT_DROOP_CAP: f32 = 200.0;

/// Parameters of the droop computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroopStyle {
    /// Droop per unit of distance.
    pub factor: f32,
    /// Maximum droop.
    pub cap: f32,
}

impl DroopStyle {
    /// Droop for a given endpoint distance.
    pub fn droop_for(&self, distance: f32) -> f32 {
        (distance * self.factor).min(self.cap)
    }
}

impl Default for DroopStyle {
    fn default() -> Self {
        Self {
            factor: DEFAULT_DROOP_FACTOR,
            cap: DEFAULT_DROOP_CAP,
        }
    }
}

/// A cubic Bézier path between two anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePath {
    /// First endpoint.
    pub start: Pos2,
    /// Control point below the first endpoint.
    pub ctrl1: Pos2,
    /// Control point below the second endpoint.
    pub ctrl2: Pos2,
    /// Second endpoint.
    pub end: Pos2,
}

impl CurvePath {
    /// Builds the drooping curve between two points.
    ///
    /// This is a pure function of its inputs: the same endpoints and style
    /// always produce the same path.
    pub fn droop(start: Pos2, end: Pos2, style: DroopStyle) -> Self {
        let droop = style.droop_for(start.distance(end));
        Self {
            start,
            ctrl1: Pos2::new(start.x, start.y + droop),
            ctrl2: Pos2::new(end.x, end.y + droop),
            end,
        }
    }

    /// The vertical sag applied to the control points.
    pub fn droop_amount(&self) -> f32 {
        self.ctrl1.y - self.start.y
    }

    /// The four Bézier points in drawing order.
    pub fn points(&self) -> [Pos2; 4] {
        [self.start, self.ctrl1, self.ctrl2, self.end]
    }

    /// SVG path description (`M x1 y1 C cx1 cy1, cx2 cy2, x2 y2`).
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.ctrl1.x,
            self.ctrl1.y,
            self.ctrl2.x,
            self.ctrl2.y,
            self.end.x,
            self.end.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_cable_droop_is_half_distance() {
        let path = CurvePath::droop(Pos2::new(0.0, 0.0), Pos2::new(30.0, 40.0), DroopStyle::default());
        assert!((path.droop_amount() - 25.0).abs() < 1e-4);
        assert_eq!(path.ctrl1, Pos2::new(0.0, 25.0));
        assert_eq!(path.ctrl2, Pos2::new(30.0, 65.0));
    }

    #[test]
    fn test_long_cable_droop_is_capped() {
        let path = CurvePath::droop(Pos2::new(0.0, 0.0), Pos2::new(1000.0, 0.0), DroopStyle::default());
        assert_eq!(path.droop_amount(), 200.0);
    }

    #[test]
    fn test_droop_ignores_orientation() {
        let style = DroopStyle::default();
        let horizontal = CurvePath::droop(Pos2::new(10.0, 10.0), Pos2::new(110.0, 10.0), style);
        let vertical = CurvePath::droop(Pos2::new(10.0, 10.0), Pos2::new(10.0, 110.0), style);
        let reversed = CurvePath::droop(Pos2::new(110.0, 10.0), Pos2::new(10.0, 10.0), style);
        assert_eq!(horizontal.droop_amount(), 50.0);
        assert_eq!(vertical.droop_amount(), 50.0);
        assert_eq!(reversed.droop_amount(), 50.0);
    }

    #[test]
    fn test_droop_formula_across_distances() {
        let style = DroopStyle::default();
        for i in 0..60 {
            let dx = i as f32 * 13.7;
            let dy = (i as f32 * 7.3) - 120.0;
            let start = Pos2::new(-40.0, 15.0);
            let end = Pos2::new(start.x + dx, start.y + dy);
            let path = CurvePath::droop(start, end, style);
            let expected = (0.5 * start.distance(end)).min(200.0);
            assert!((path.droop_amount() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_curve_is_pure() {
        let a = CurvePath::droop(Pos2::new(3.5, 7.25), Pos2::new(120.0, 80.0), DroopStyle::default());
        let b = CurvePath::droop(Pos2::new(3.5, 7.25), Pos2::new(120.0, 80.0), DroopStyle::default());
        assert_eq!(a, b);
        assert_eq!(a.to_svg(), b.to_svg());
    }

    #[test]
    fn test_svg_format() {
        let path = CurvePath::droop(Pos2::new(0.0, 0.0), Pos2::new(0.0, 10.0), DroopStyle::default());
        assert_eq!(path.to_svg(), "M 0 0 C 0 5, 0 15, 0 10");
    }
}
