//! Pointer-driven visual state for the dashboard lamp

use crate::types::Point;

/// How visible something at `center` is under a lamp at `pointer`:
/// 1 directly under the lamp, fading linearly to 0 at `radius`
pub fn lamp_visibility(pointer: Point, center: Point, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - pointer.distance(center) / radius).max(0.0)
}

pub fn within_radius(pointer: Point, center: Point, radius: f64) -> bool {
    pointer.distance(center) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_falloff() {
        let center = Point::new(50.0, 50.0);
        assert!((lamp_visibility(center, center, 20.0) - 1.0).abs() < 1e-9);
        assert!((lamp_visibility(Point::new(60.0, 50.0), center, 20.0) - 0.5).abs() < 1e-9);
        assert_eq!(lamp_visibility(Point::new(90.0, 50.0), center, 20.0), 0.0);
        assert_eq!(lamp_visibility(center, center, 0.0), 0.0);
    }

    #[test]
    fn test_within_radius() {
        let center = Point::new(0.0, 0.0);
        assert!(within_radius(Point::new(3.0, 4.0), center, 5.1));
        assert!(!within_radius(Point::new(3.0, 4.0), center, 5.0));
    }
}
