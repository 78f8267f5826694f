//! Camera basis on the floor plane.
//!
//! Planar vectors are `Vec2(x, z)`. Yaw 0 faces world -Z and positive yaw
//! turns toward +X.

use glam::{Vec2, Vec3};

/// Unit forward vector on the floor plane for a yaw angle.
#[inline]
pub fn forward_vector(yaw: f32) -> Vec2 {
    let (sin, cos) = yaw.sin_cos();
    Vec2::new(sin, -cos)
}

/// Unit right vector for a forward vector.
#[inline]
pub fn right_vector(forward: Vec2) -> Vec2 {
    Vec2::new(-forward.y, forward.x)
}

/// Yaw that makes [`forward_vector`] point along `direction`.
#[inline]
pub fn yaw_from_direction(direction: Vec2) -> f32 {
    direction.x.atan2(-direction.y)
}

/// Unit aim direction for yaw and pitch.
pub fn aim_direction(yaw: f32, pitch: f32) -> Vec3 {
    let forward = forward_vector(yaw);
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(forward.x * cos_pitch, sin_pitch, forward.y * cos_pitch)
}

/// Horizontal velocity for input axes at a given yaw.
///
/// Axes with a combined length above one are normalized so diagonals are
/// not faster than straight movement.
pub fn wish_velocity(yaw: f32, strafe: f32, forward: f32, speed: f32) -> Vec2 {
    let mut axes = Vec2::new(strafe, forward);
    let length_sq = axes.length_squared();
    if length_sq == 0.0 || !length_sq.is_finite() {
        return Vec2::ZERO;
    }
    if length_sq > 1.0 {
        axes /= length_sq.sqrt();
    }

    let fwd = forward_vector(yaw);
    let right = right_vector(fwd);
    (fwd * axes.y + right * axes.x) * speed
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_forward_at_zero_yaw_is_negative_z() {
        let v = wish_velocity(0.0, 0.0, 1.0, 7.5);
        assert!(approx(v, Vec2::new(0.0, -7.5)));
    }

    #[test]
    fn test_forward_at_quarter_turn_is_positive_x() {
        let v = wish_velocity(FRAC_PI_2, 0.0, 1.0, 7.5);
        assert!(approx(v, Vec2::new(7.5, 0.0)));
    }

    #[test]
    fn test_strafe_right_at_zero_yaw_is_positive_x() {
        let v = wish_velocity(0.0, 1.0, 0.0, 2.0);
        assert!(approx(v, Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let v = wish_velocity(0.3, 1.0, 1.0, 5.0);
        assert!((v.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_axis_keeps_magnitude() {
        let v = wish_velocity(0.0, 0.0, 0.5, 4.0);
        assert!(approx(v, Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn test_zero_input() {
        assert_eq!(wish_velocity(1.0, 0.0, 0.0, 7.5), Vec2::ZERO);
    }

    #[test]
    fn test_yaw_from_direction_roundtrips() {
        for yaw in [0.0, 0.5, FRAC_PI_2, 2.0, -1.0, PI - 0.01] {
            let dir = forward_vector(yaw);
            assert!(approx(forward_vector(yaw_from_direction(dir)), dir));
        }
    }

    #[test]
    fn test_aim_direction_pitch() {
        let up = aim_direction(0.0, FRAC_PI_2);
        assert!((up - Vec3::Y).length() < 1e-5);
        let level = aim_direction(FRAC_PI_2, 0.0);
        assert!((level - Vec3::X).length() < 1e-5);
    }
}
