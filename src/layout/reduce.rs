//! Reduction of reference coordinates to a single value
//!
//! Extremal reductions are seeded with the first point and only replaced on a
//! strict improvement, so among tied values the first one seen wins.

use super::types::Point;

/// A non-empty, ordered list of reference points
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    points: Vec<Point>,
}

impl Coordinates {
    /// Returns `None` for an empty list
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn single(point: Point) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn extremal(&self, axis: fn(&Point) -> f64, better: fn(f64, f64) -> bool) -> f64 {
        let first = axis(&self.points[0]);
        self.points[1..].iter().fold(first, |best, p| {
            let value = axis(p);
            if better(value, best) {
                value
            } else {
                best
            }
        })
    }

    fn average(&self, axis: fn(&Point) -> f64) -> f64 {
        let sum: f64 = self.points.iter().map(axis).sum();
        sum / self.points.len() as f64
    }

    /// Smallest y
    pub fn topmost(&self) -> f64 {
        self.extremal(|p| p.y, |v, best| v < best)
    }

    /// Largest y
    pub fn bottommost(&self) -> f64 {
        self.extremal(|p| p.y, |v, best| v > best)
    }

    /// Smallest x
    pub fn leftmost(&self) -> f64 {
        self.extremal(|p| p.x, |v, best| v < best)
    }

    /// Largest x
    pub fn rightmost(&self) -> f64 {
        self.extremal(|p| p.x, |v, best| v > best)
    }

    /// Mean x, used for horizontal centering
    pub fn average_x(&self) -> f64 {
        self.average(|p| p.x)
    }

    /// Mean y, used for vertical centering
    pub fn average_y(&self) -> f64 {
        self.average(|p| p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: &[(f64, f64)]) -> Coordinates {
        Coordinates::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(Coordinates::new(vec![]).is_none());
    }

    #[test]
    fn test_single_point_returns_itself() {
        let c = Coordinates::single(Point::new(3.0, 7.0));
        assert_eq!(c.topmost(), 7.0);
        assert_eq!(c.bottommost(), 7.0);
        assert_eq!(c.leftmost(), 3.0);
        assert_eq!(c.rightmost(), 3.0);
        assert_eq!(c.average_x(), 3.0);
        assert_eq!(c.average_y(), 7.0);
    }

    #[test]
    fn test_extremes() {
        let c = coords(&[(0.0, 30.0), (15.0, 10.0), (-4.0, 20.0)]);
        assert_eq!(c.topmost(), 10.0);
        assert_eq!(c.bottommost(), 30.0);
        assert_eq!(c.leftmost(), -4.0);
        assert_eq!(c.rightmost(), 15.0);
    }

    #[test]
    fn test_averages() {
        let c = coords(&[(0.0, 10.0), (10.0, 20.0), (20.0, 60.0)]);
        assert_eq!(c.average_x(), 10.0);
        assert_eq!(c.average_y(), 30.0);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        // -0.0 == 0.0 numerically, so the sign shows which element won
        let c = coords(&[(-0.0, -0.0), (0.0, 0.0)]);
        assert!(c.leftmost().is_sign_negative());
        assert!(c.rightmost().is_sign_negative());
        assert!(c.topmost().is_sign_negative());
        assert!(c.bottommost().is_sign_negative());

        let c = coords(&[(0.0, 0.0), (-0.0, -0.0)]);
        assert!(c.leftmost().is_sign_positive());
        assert!(c.bottommost().is_sign_positive());
    }

    #[test]
    fn test_matches_min_max_over_many_points() {
        let raw: Vec<(f64, f64)> = (0..25)
            .map(|i| {
                let i = i as f64;
                ((i * 7.0) % 13.0 - 6.0, (i * 5.0) % 11.0 + 1.5)
            })
            .collect();
        let c = coords(&raw);
        let min_x = raw.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = raw.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = raw.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = raw.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(c.leftmost(), min_x);
        assert_eq!(c.rightmost(), max_x);
        assert_eq!(c.topmost(), min_y);
        assert_eq!(c.bottommost(), max_y);
    }
}
