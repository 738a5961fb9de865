// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value into `[-limit, limit]`
pub fn clamp_abs(value: f32, limit: f32) -> f32 {
    value.clamp(-limit.abs(), limit.abs())
}

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Treat an input axis as released when it sits inside the dead zone
pub fn axis_active(axis: f32) -> bool {
    axis.abs() > f32::EPSILON
}

/// Check whether `point` lies inside (or on) the circle at `center`
pub fn within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_abs() {
        assert_eq!(clamp_abs(5.0, 3.0), 3.0);
        assert_eq!(clamp_abs(-5.0, 3.0), -3.0);
        assert_eq!(clamp_abs(1.5, 3.0), 1.5);
        // Negative limits behave like their magnitude
        assert_eq!(clamp_abs(5.0, -3.0), 3.0);
    }

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.0, 1.00001, 0.0001));
        assert!(!approx_equal(1.0, 1.1, 0.01));
    }

    #[test]
    fn test_axis_active() {
        assert!(!axis_active(0.0));
        assert!(axis_active(0.5));
        assert!(axis_active(-1.0));
    }

    #[test]
    fn test_within_radius() {
        let center = Vec2::new(1.0, 1.0);
        assert!(within_radius(Vec2::new(1.5, 1.0), center, 0.5));
        assert!(!within_radius(Vec2::new(2.0, 2.0), center, 1.0));
    }
}
