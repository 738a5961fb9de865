// Horizontal acceleration model

use glam::Vec2;

use super::stats::{AccelerationMode, MovementStats};
use crate::core::math::clamp_abs;

/// Produce the next velocity from the previous one and the horizontal axis.
///
/// Running doubles the acceleration and raises the cap. Only the horizontal
/// component is clamped; vertical velocity passes through untouched.
pub fn accelerate(previous: Vec2, axis: f32, running: bool, dt: f32, stats: &MovementStats) -> Vec2 {
    let mut accel = axis * stats.acceleration;
    if running {
        accel *= 2.0;
    }

    let step = match stats.acceleration_mode {
        AccelerationMode::PerTick => accel,
        AccelerationMode::TimeScaled => accel * dt,
    };

    Vec2::new(
        clamp_abs(previous.x + step, stats.speed_cap(running)),
        previous.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats(mode: AccelerationMode) -> MovementStats {
        MovementStats {
            acceleration_mode: mode,
            ..MovementStats::default()
        }
    }

    #[test]
    fn test_per_tick_adds_raw_acceleration() {
        let stats = stats(AccelerationMode::PerTick);
        let v = accelerate(Vec2::ZERO, 1.0, false, 1.0 / 60.0, &stats);
        assert_relative_eq!(v.x, 0.2);
    }

    #[test]
    fn test_time_scaled_multiplies_by_dt() {
        let stats = stats(AccelerationMode::TimeScaled);
        let v = accelerate(Vec2::ZERO, 1.0, false, 0.5, &stats);
        assert_relative_eq!(v.x, 0.1);
    }

    #[test]
    fn test_modes_differ_for_same_input() {
        let per_tick = accelerate(Vec2::ZERO, 1.0, false, 1.0 / 60.0, &stats(AccelerationMode::PerTick));
        let scaled = accelerate(Vec2::ZERO, 1.0, false, 1.0 / 60.0, &stats(AccelerationMode::TimeScaled));
        assert!(per_tick.x > scaled.x);
    }

    #[test]
    fn test_running_doubles_acceleration() {
        let stats = stats(AccelerationMode::PerTick);
        let v = accelerate(Vec2::ZERO, -1.0, true, 1.0 / 60.0, &stats);
        assert_relative_eq!(v.x, -0.4);
    }

    #[test]
    fn test_walk_cap_never_exceeded() {
        for mode in [AccelerationMode::PerTick, AccelerationMode::TimeScaled] {
            let stats = MovementStats {
                acceleration: 50.0,
                ..stats(mode)
            };
            let mut v = Vec2::ZERO;
            for _ in 0..200 {
                v = accelerate(v, 1.0, false, 1.0 / 60.0, &stats);
                assert!(v.x.abs() <= stats.walk_speed_max);
            }
            assert_relative_eq!(v.x, stats.walk_speed_max);
        }
    }

    #[test]
    fn test_run_cap_never_exceeded() {
        let stats = stats(AccelerationMode::PerTick);
        let mut v = Vec2::new(-10.0, 0.0);
        for _ in 0..100 {
            v = accelerate(v, -1.0, true, 1.0 / 60.0, &stats);
            assert!(v.x.abs() <= stats.run_speed_max);
        }
    }

    #[test]
    fn test_dropping_run_clamps_to_walk() {
        let stats = stats(AccelerationMode::PerTick);
        let v = accelerate(Vec2::new(6.0, 0.0), 0.0, false, 1.0 / 60.0, &stats);
        assert_relative_eq!(v.x, 3.0);
    }

    #[test]
    fn test_vertical_passthrough() {
        let stats = stats(AccelerationMode::PerTick);
        let v = accelerate(Vec2::new(0.0, -4.5), 1.0, false, 1.0 / 60.0, &stats);
        assert_relative_eq!(v.y, -4.5);
    }
}
