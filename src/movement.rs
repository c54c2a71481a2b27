use crate::config::player::{ROTATION_SMOOTHING, SPEED};
use crate::engine::Point;
use crate::world::Player;
use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI, TAU};

/// Bound actions for one step
/// - directions are level state, `interact` is a fresh press
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub interact: bool,
}

/// Velocity for the held direction keys
/// - opposite keys cancel
/// - diagonals are scaled by 1/√2 so every direction moves at SPEED
pub fn velocity_for(controls: &Controls) -> Point {
    let mut velocity = Point::ZERO;
    if controls.up {
        velocity.y -= SPEED;
    }
    if controls.down {
        velocity.y += SPEED;
    }
    if controls.left {
        velocity.x -= SPEED;
    }
    if controls.right {
        velocity.x += SPEED;
    }

    if velocity.x != 0.0 && velocity.y != 0.0 {
        velocity = velocity * FRAC_1_SQRT_2;
    }
    velocity
}

/// Fold an angle difference into [-π, π], exactly ±π is left alone
pub fn normalize_angle(mut diff: f32) -> f32 {
    while diff > PI {
        diff -= TAU;
    }
    while diff < -PI {
        diff += TAU;
    }
    diff
}

/// Facing for a velocity, 0 is "up" on screen
pub fn facing(velocity: Point) -> f32 {
    velocity.y.atan2(velocity.x) + FRAC_PI_2
}

/// One step of the low-pass filter pulling `current` toward `target`
/// along the shorter way round
pub fn smooth_rotation(current: f32, target: f32) -> f32 {
    current + normalize_angle(target - current) * ROTATION_SMOOTHING
}

/// Apply this step's keys to the player, facing only changes while moving
pub fn steer(player: &mut Player, controls: &Controls) {
    player.velocity = velocity_for(controls);
    if !player.velocity.is_zero() {
        player.rotation = smooth_rotation(player.rotation, facing(player.velocity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controls(up: bool, down: bool, left: bool, right: bool) -> Controls {
        Controls {
            up,
            down,
            left,
            right,
            interact: false,
        }
    }

    #[test]
    fn speed_is_never_above_limit_for_any_combination() {
        for mask in 0u8..16 {
            let held = controls(mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0);
            let speed = velocity_for(&held).length();
            assert!(
                speed == 0.0 || (speed - SPEED).abs() < 1e-3,
                "mask {:04b} gave speed {}",
                mask,
                speed
            );
        }
    }

    #[test]
    fn diagonal_is_scaled_evenly() {
        let velocity = velocity_for(&controls(true, false, false, true));
        assert_relative_eq!(velocity.x, SPEED * FRAC_1_SQRT_2);
        assert_relative_eq!(velocity.y, -SPEED * FRAC_1_SQRT_2);
    }

    #[test]
    fn opposite_keys_cancel() {
        assert!(velocity_for(&controls(true, true, true, true)).is_zero());
        let velocity = velocity_for(&controls(true, true, false, true));
        assert_eq!(velocity, Point::new(SPEED, 0.0));
    }

    #[test]
    fn normalize_keeps_the_pi_boundary() {
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(-PI), -PI);
        assert_relative_eq!(normalize_angle(3.0 * FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(-FRAC_PI_2 - TAU), -FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn half_turn_from_zero_goes_positive() {
        // moving down from a fresh spawn is exactly half a turn away
        let target = facing(Point::new(0.0, SPEED));
        assert_relative_eq!(target, PI);
        assert_relative_eq!(smooth_rotation(0.0, target), PI * ROTATION_SMOOTHING);
    }

    #[test]
    fn facing_points_along_movement() {
        assert_relative_eq!(facing(Point::new(0.0, -SPEED)), 0.0);
        assert_relative_eq!(facing(Point::new(SPEED, 0.0)), FRAC_PI_2);
        assert_relative_eq!(facing(Point::new(-SPEED, 0.0)), PI + FRAC_PI_2);
    }

    #[test]
    fn rotation_takes_the_short_way_round() {
        // current just left of "up", target just right: wrap instead of spinning
        let current = -0.1;
        let target = TAU - 0.1 + 0.2;
        let next = smooth_rotation(current, target);
        assert_relative_eq!(next, current + 0.2 * ROTATION_SMOOTHING, epsilon = 1e-5);
    }

    #[test]
    fn steer_keeps_rotation_when_idle() {
        let mut player = Player::new(Point::new(0.0, 0.0));
        player.rotation = 1.0;
        steer(&mut player, &Controls::default());
        assert!(player.velocity.is_zero());
        assert_eq!(player.rotation, 1.0);
    }

    #[test]
    fn steer_converges_on_target() {
        let mut player = Player::new(Point::new(0.0, 0.0));
        let right = controls(false, false, false, true);
        for _ in 0..120 {
            steer(&mut player, &right);
        }
        assert_relative_eq!(player.rotation, FRAC_PI_2, epsilon = 1e-4);
    }
}
