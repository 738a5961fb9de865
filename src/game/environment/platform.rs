// Moving platform cycling through waypoints

use glam::Vec2;

use crate::core::ConfigError;

/// Identifies an actor standing on a platform
pub type RiderId = u32;

/// Default platform travel speed (units/second)
pub const PLATFORM_SPEED: f32 = 3.0;

/// A platform moving at constant speed through a closed loop of waypoints
///
/// Riders are carried by the platform's displacement each tick; the caller
/// attaches them on contact and detaches them when the contact ends.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    waypoints: Vec<Vec2>,
    speed: f32,
    /// Waypoint currently travelled to
    target: usize,
    position: Vec2,
    riders: Vec<RiderId>,
}

impl MovingPlatform {
    /// Create a platform at `position` heading for `waypoints[start_index]`
    pub fn new(
        position: Vec2,
        waypoints: Vec<Vec2>,
        speed: f32,
        start_index: usize,
    ) -> Result<Self, ConfigError> {
        if waypoints.is_empty() {
            return Err(ConfigError::invalid("waypoints", "need at least one waypoint"));
        }
        if start_index >= waypoints.len() {
            return Err(ConfigError::invalid(
                "start_index",
                format!("{start_index} is out of range for {} waypoints", waypoints.len()),
            ));
        }
        if !(speed > 0.0) {
            return Err(ConfigError::invalid("speed", "must be positive"));
        }

        Ok(Self {
            waypoints,
            speed,
            target: start_index,
            position,
            riders: Vec::new(),
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target_index(&self) -> usize {
        self.target
    }

    /// Current velocity toward the target waypoint
    pub fn velocity(&self) -> Vec2 {
        (self.waypoints[self.target] - self.position).normalize_or_zero() * self.speed
    }

    pub fn riders(&self) -> &[RiderId] {
        &self.riders
    }

    /// Start carrying a rider (ignored if already attached)
    pub fn attach(&mut self, rider: RiderId) {
        if !self.riders.contains(&rider) {
            log::debug!("Rider {rider} attached to platform");
            self.riders.push(rider);
        }
    }

    /// Stop carrying a rider
    pub fn detach(&mut self, rider: RiderId) {
        self.riders.retain(|r| *r != rider);
    }

    pub fn carries(&self, rider: RiderId) -> bool {
        self.riders.contains(&rider)
    }

    /// Move for one tick and return the displacement riders must receive
    pub fn update(&mut self, dt: f32) -> Vec2 {
        let start = self.position;
        let mut travel = self.speed * dt;

        // A single waypoint is a resting platform
        if self.waypoints.len() == 1 {
            let target = self.waypoints[0];
            let to_target = target - self.position;
            self.position += to_target.clamp_length_max(travel);
            return self.position - start;
        }

        // Spend the whole step, turning at every waypoint reached on the way
        for _ in 0..self.waypoints.len() {
            let target = self.waypoints[self.target];
            let distance = self.position.distance(target);
            if distance > travel {
                self.position += (target - self.position) / distance * travel;
                break;
            }
            self.position = target;
            travel -= distance;
            self.target = (self.target + 1) % self.waypoints.len();
            log::trace!("Platform heading for waypoint {}", self.target);
            if travel <= 0.0 {
                break;
            }
        }

        self.position - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_loop() -> Vec<Vec2> {
        vec![Vec2::new(3.0, 0.0), Vec2::new(3.0, 3.0), Vec2::new(0.0, 0.0)]
    }

    #[test]
    fn test_rejects_bad_setup() {
        assert!(MovingPlatform::new(Vec2::ZERO, vec![], 3.0, 0).is_err());
        assert!(MovingPlatform::new(Vec2::ZERO, square_loop(), 3.0, 3).is_err());
        assert!(MovingPlatform::new(Vec2::ZERO, square_loop(), 0.0, 0).is_err());
    }

    #[test]
    fn test_moves_at_constant_speed() {
        let mut platform = MovingPlatform::new(Vec2::ZERO, square_loop(), 3.0, 0).unwrap();
        let moved = platform.update(0.5);
        assert_relative_eq!(moved.x, 1.5);
        assert_relative_eq!(moved.y, 0.0);
        assert_relative_eq!(platform.velocity().length(), 3.0);
    }

    #[test]
    fn test_turns_at_waypoint() {
        let mut platform = MovingPlatform::new(Vec2::ZERO, square_loop(), 3.0, 0).unwrap();
        let moved = platform.update(1.5);
        assert_eq!(platform.target_index(), 1);
        assert_relative_eq!(platform.position().x, 3.0);
        assert_relative_eq!(platform.position().y, 1.5);
        assert_relative_eq!(moved.length(), (9.0f32 + 2.25).sqrt());
    }

    #[test]
    fn test_wraps_to_first_waypoint() {
        let mut platform = MovingPlatform::new(Vec2::ZERO, square_loop(), 3.0, 2).unwrap();
        // Already standing on waypoint 2, so it turns straight to waypoint 0
        platform.update(0.1);
        assert_eq!(platform.target_index(), 0);
        assert_relative_eq!(platform.position().x, 0.3);
    }

    #[test]
    fn test_start_index() {
        let platform = MovingPlatform::new(Vec2::ZERO, square_loop(), 3.0, 1).unwrap();
        assert_eq!(platform.target_index(), 1);
        let v = platform.velocity();
        assert_relative_eq!(v.x, v.y);
    }

    #[test]
    fn test_riders() {
        let mut platform = MovingPlatform::new(Vec2::ZERO, square_loop(), 3.0, 0).unwrap();
        platform.attach(7);
        platform.attach(7);
        assert_eq!(platform.riders(), &[7]);
        assert!(platform.carries(7));
        platform.detach(7);
        assert!(!platform.carries(7));
    }

    #[test]
    fn test_single_waypoint_parks() {
        let mut platform =
            MovingPlatform::new(Vec2::ZERO, vec![Vec2::new(1.0, 0.0)], 3.0, 0).unwrap();
        platform.update(1.0);
        assert_relative_eq!(platform.position().x, 1.0);
        assert_eq!(platform.update(1.0), Vec2::ZERO);
    }
}
