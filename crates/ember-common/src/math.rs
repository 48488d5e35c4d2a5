//! Transform math: positions, Euler rotations, and yaw interpolation.
//!
//! Rotations are stored in degrees as pitch/yaw/roll, matching the layout
//! used by the save format.

pub use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Euler rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    /// Rotation around the right axis.
    pub pitch: f32,
    /// Rotation around the up axis.
    pub yaw: f32,
    /// Rotation around the forward axis.
    pub roll: f32,
}

impl Rotator {
    /// Zero rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a rotator from pitch, yaw and roll in degrees.
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Returns `(pitch, yaw, roll)`.
    #[must_use]
    pub const fn to_tuple(self) -> (f32, f32, f32) {
        (self.pitch, self.yaw, self.roll)
    }

    /// Creates a rotator from `(pitch, yaw, roll)`.
    #[must_use]
    pub const fn from_tuple(value: (f32, f32, f32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// Wraps an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn normalize_axis(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Yaw in degrees that makes something at `from` face `to`.
///
/// Only the horizontal plane matters; height differences are ignored.
#[must_use]
pub fn look_at_yaw(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

/// Moves a single angle toward `target` along the shortest arc.
///
/// Each call covers `speed * dt` of the remaining distance (clamped to the
/// full distance), so higher speeds converge faster. A non-positive speed
/// snaps straight to the target.
#[must_use]
pub fn interp_angle(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    if speed <= 0.0 {
        return normalize_axis(target);
    }

    let delta = normalize_axis(target - current);
    if delta.abs() <= 1.0e-4 {
        return normalize_axis(target);
    }

    let alpha = (speed * dt).clamp(0.0, 1.0);
    normalize_axis(current + delta * alpha)
}

/// Position plus rotation of a simulated actor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Facing.
    pub rotation: Rotator,
}

impl Transform {
    /// Creates a transform.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Rotator) -> Self {
        Self { position, rotation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(190.0), -170.0);
        assert_eq!(normalize_axis(-190.0), 170.0);
        assert_eq!(normalize_axis(180.0), 180.0);
        assert_eq!(normalize_axis(720.0), 0.0);
    }

    #[test]
    fn test_look_at_yaw() {
        let origin = Vec3::ZERO;
        assert!((look_at_yaw(origin, Vec3::new(10.0, 0.0, 0.0)) - 0.0).abs() < 1e-4);
        assert!((look_at_yaw(origin, Vec3::new(0.0, 10.0, 5.0)) - 90.0).abs() < 1e-4);
        assert!((look_at_yaw(origin, Vec3::new(-10.0, 0.0, 0.0)).abs() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_interp_takes_shortest_arc() {
        // 170 -> -170 is 20 degrees through 180, not 340 the other way.
        let next = interp_angle(170.0, -170.0, 0.25, 2.0);
        assert!((next - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_interp_zero_dt_keeps_current() {
        assert_eq!(interp_angle(30.0, 90.0, 0.0, 15.0), 30.0);
    }

    #[test]
    fn test_interp_large_step_lands_on_target() {
        assert!((interp_angle(0.0, 90.0, 1.0, 15.0) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotator_tuple_round_trip() {
        let rot = Rotator::new(1.0, 2.0, 3.0);
        assert_eq!(Rotator::from_tuple(rot.to_tuple()), rot);
    }

    proptest! {
        #[test]
        fn prop_interp_never_overshoots(
            current in -180.0f32..180.0,
            target in -180.0f32..180.0,
            dt in 0.001f32..0.1,
        ) {
            let before = normalize_axis(target - current).abs();
            let next = interp_angle(current, target, dt, 15.0);
            let after = normalize_axis(target - next).abs();
            prop_assert!(after <= before + 1e-3);
        }
    }
}
