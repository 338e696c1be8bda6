use super::Sensor;
use crate::{SensorFault, State};
use core::f32::consts::TAU;
use nalgebra::{UnitQuaternion, Vector3};

/// A fused attitude sensor driver that computes its own orientation.
pub trait AttitudeSource {
    type Error;

    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Poll the device for new events.
    fn poll(&mut self) -> Result<(), Self::Error>;

    /// The latest angular rates (in degrees/second) if new since the last call.
    fn gyro(&mut self) -> Option<Vector3<f32>>;

    /// The latest orientation if new since the last call.
    fn quaternion(&mut self) -> Option<UnitQuaternion<f32>>;
}

/// Attitude and angular rate sensor.
///
/// Owns `phi`, `theta`, `psi` and their rates.
/// Pitch is inverted so that nose-up is positive and heading is folded into `[0, 2π)`.
pub struct Imu<D> {
    driver: D,
}

impl<D> Imu<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: AttitudeSource> Sensor for Imu<D> {
    fn begin(&mut self) -> Result<(), SensorFault> {
        self.driver.begin().map_err(|_| SensorFault::Begin)
    }

    fn modify_state(&mut self, state: &mut State, _time: f32) -> Result<(), SensorFault> {
        self.driver.poll().map_err(|_| SensorFault::Read)?;

        if let Some(gyro) = self.driver.gyro() {
            state.dphi = gyro.x.to_radians();
            state.dtheta = gyro.y.to_radians();
            state.dpsi = gyro.z.to_radians();
        }

        if let Some(quaternion) = self.driver.quaternion() {
            let (phi, theta, psi) = quaternion.euler_angles();
            state.phi = phi;
            state.theta = -theta;
            state.psi = fold_heading(psi);
        }

        Ok(())
    }
}

/// Fold a heading in `[-π, π]` into `[0, 2π)`.
fn fold_heading(psi: f32) -> f32 {
    let psi = if psi < 0. { psi + TAU } else { psi };

    // Tiny negative headings round up to a full turn
    if psi >= TAU {
        0.
    } else {
        psi
    }
}
