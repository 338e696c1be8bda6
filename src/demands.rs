//! The demand vector passed from the receiver through the PID pipeline to the mixer.

use nalgebra::Vector4;

/// Throttle, roll-rate, pitch-rate and yaw-rate demands.
///
/// Throttle is in `[0, 1]`; the rate axes are signed.
/// Index with [`THROTTLE`], [`ROLL`], [`PITCH`] and [`YAW`].
pub type Demands = Vector4<f32>;

pub const THROTTLE: usize = 0;
pub const ROLL: usize = 1;
pub const PITCH: usize = 2;
pub const YAW: usize = 3;

/// Create a demand vector from each axis.
pub fn demands(throttle: f32, roll: f32, pitch: f32, yaw: f32) -> Demands {
    Vector4::new(throttle, roll, pitch, yaw)
}
