//! Pilot input contract.
//!
//! Raw channel values are normalized to `[-1, 1]`.
//! The provided methods shape those values into [`Demands`] and implement
//! the default arm-switch and throttle-down checks; receivers with other
//! conventions can override them.

use crate::demands::{demands, Demands};

/// Channel indices.
pub mod channel {
    pub const THROTTLE: usize = 0;
    pub const ROLL: usize = 1;
    pub const PITCH: usize = 2;
    pub const YAW: usize = 3;
    pub const AUX1: usize = 4;
    pub const AUX2: usize = 5;

    /// Number of raw channels reported over the serial link.
    pub const COUNT: usize = 6;
}

/// Throttle stick values below `-1 + THROTTLE_MARGIN` count as throttle down.
pub const THROTTLE_MARGIN: f32 = 0.1;

pub const THROTTLE_MID: f32 = 0.5;
pub const THROTTLE_EXPO: f32 = 0.2;
pub const CYCLIC_EXPO: f32 = 0.65;
pub const CYCLIC_RATE: f32 = 0.9;

pub trait Receiver {
    /// One-time hardware initialization.
    fn begin(&mut self) {}

    /// The raw value of a channel in `[-1, 1]`.
    fn raw_channel(&self, index: usize) -> f32;

    /// Returns `true` if the radio link has been lost.
    fn lost_signal(&self) -> bool;

    /// Returns `true` if the arm switch is in the armed position.
    fn in_armed_state(&self) -> bool {
        self.raw_channel(channel::AUX1) > 0.
    }

    /// Returns `true` if the pilot is not commanding throttle.
    fn inactive(&self) -> bool {
        self.raw_channel(channel::THROTTLE) < -1. + THROTTLE_MARGIN
    }

    /// The pilot's demands shaped by the throttle and cyclic curves.
    fn demands(&self) -> Demands {
        demands(
            throttle_curve(self.raw_channel(channel::THROTTLE)),
            cyclic_curve(self.raw_channel(channel::ROLL)),
            cyclic_curve(self.raw_channel(channel::PITCH)),
            cyclic_curve(self.raw_channel(channel::YAW)),
        )
    }
}

impl<T> Receiver for &mut T
where
    T: Receiver + ?Sized,
{
    fn begin(&mut self) {
        (**self).begin()
    }

    fn raw_channel(&self, index: usize) -> f32 {
        (**self).raw_channel(index)
    }

    fn lost_signal(&self) -> bool {
        (**self).lost_signal()
    }

    fn in_armed_state(&self) -> bool {
        (**self).in_armed_state()
    }

    fn inactive(&self) -> bool {
        (**self).inactive()
    }

    fn demands(&self) -> Demands {
        (**self).demands()
    }
}

/// Map a throttle stick in `[-1, 1]` to a throttle demand in `[0, 1]`,
/// softened around [`THROTTLE_MID`].
pub fn throttle_curve(stick: f32) -> f32 {
    let offset = (stick + 1.) / 2. - THROTTLE_MID;
    let span = if offset > 0. {
        1. - THROTTLE_MID
    } else if offset < 0. {
        THROTTLE_MID
    } else {
        1.
    };

    THROTTLE_MID
        + offset * (1. - THROTTLE_EXPO + THROTTLE_EXPO * (offset * offset) / (span * span))
}

/// Expo curve for roll, pitch and yaw sticks.
pub fn cyclic_curve(stick: f32) -> f32 {
    (1. + CYCLIC_EXPO * (stick * stick - 1.)) * stick * CYCLIC_RATE
}
