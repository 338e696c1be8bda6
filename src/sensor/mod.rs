//! Sensor fusion contract.
//!
//! Each sensor owns a subset of the [`State`] fields and writes only those.
//! Sensors run in their registration order, but because their fields are disjoint
//! the result does not depend on that order.

use crate::{SensorFault, State};

mod imu;
pub use imu::{AttitudeSource, Imu};

mod rangefinder;
pub use rangefinder::{RangeSource, Rangefinder};

pub trait Sensor {
    /// One-time hardware initialization.
    fn begin(&mut self) -> Result<(), SensorFault>;

    /// Returns `true` if the sensor has a sample to apply at `time` (in seconds).
    fn ready(&mut self, _time: f32) -> bool {
        true
    }

    /// Write this sensor's fields of `state`.
    fn modify_state(&mut self, state: &mut State, time: f32) -> Result<(), SensorFault>;
}

impl<T> Sensor for &mut T
where
    T: Sensor + ?Sized,
{
    fn begin(&mut self) -> Result<(), SensorFault> {
        (**self).begin()
    }

    fn ready(&mut self, time: f32) -> bool {
        (**self).ready(time)
    }

    fn modify_state(&mut self, state: &mut State, time: f32) -> Result<(), SensorFault> {
        (**self).modify_state(state, time)
    }
}
