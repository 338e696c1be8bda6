use num_traits::Float;

/// The vehicle state shared by every stage of the control loop.
///
/// Linear quantities are in the world frame (meters and meters/second),
/// angles are in radians and angular rates in radians/second.
/// Heading (`psi`) is kept in `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct State {
    pub x: f32,
    pub dx: f32,
    pub y: f32,
    pub dy: f32,
    pub z: f32,
    pub dz: f32,
    pub phi: f32,
    pub dphi: f32,
    pub theta: f32,
    pub dtheta: f32,
    pub psi: f32,
    pub dpsi: f32,

    /// Motors respond to mixed demands.
    pub armed: bool,

    /// Latched after losing the receiver signal while armed.
    pub failsafe: bool,

    /// Latched after a sensor reports a hardware fault.
    pub sensor_fault: bool,
}

impl State {
    /// Largest roll or pitch (in degrees) at which arming is allowed.
    pub const MAX_ARMING_ANGLE_DEGREES: f32 = 25.;

    /// Returns `true` if the vehicle is level enough and its sensors are healthy.
    pub fn safe_to_arm(&self) -> bool {
        let max_angle = Self::MAX_ARMING_ANGLE_DEGREES.to_radians();

        !self.sensor_fault && self.phi.abs() < max_angle && self.theta.abs() < max_angle
    }

    /// The twelve state values in wire order:
    /// `x, dx, y, dy, z, dz, phi, dphi, theta, dtheta, psi, dpsi`.
    pub fn values(&self) -> [f32; 12] {
        [
            self.x,
            self.dx,
            self.y,
            self.dy,
            self.z,
            self.dz,
            self.phi,
            self.dphi,
            self.theta,
            self.dtheta,
            self.psi,
            self.dpsi,
        ]
    }
}
