//! Motor mixing.
//!
//! Each motor has a direction row with one signed weight per demand axis
//! (throttle, roll, pitch, yaw). A motor's raw command is the dot product
//! of its row with the demand vector. Frames differ only in these rows.

use crate::{filter::constrain, Demands, ESC};
use nalgebra::Vector4;

mod quad;
pub use quad::{QUAD_XAP, QUAD_XMW};

/// Command that stops a motor.
pub const MOTOR_STOP: f32 = 0.;

/// Motor geometry and numbering convention, reported over the serial link as a byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    Custom = 0,
    /// X-configuration quad, ArduPilot motor numbering.
    QuadXap = 1,
    /// X-configuration quad, MultiWii motor numbering.
    QuadXmw = 2,
}

pub struct Motor<E> {
    pub esc: E,

    /// Signed weight of each demand axis: throttle, roll, pitch, yaw.
    pub factor: Vector4<f32>,

    /// Command applied while disarmed, set from the ground station for bench tests.
    disarmed: f32,

    /// Last command sent to the ESC.
    output: f32,
}

impl<E> Motor<E> {
    pub fn new(esc: E, directions: [i8; 4]) -> Self {
        Self {
            esc,
            factor: Vector4::from(directions.map(f32::from)),
            disarmed: MOTOR_STOP,
            output: MOTOR_STOP,
        }
    }
}

impl<E: ESC> Motor<E> {
    fn write(&mut self, output: f32) {
        self.output = output;
        self.esc.output(output);
    }
}

pub struct Mixer<E, const N: usize> {
    pub motors: [Motor<E>; N],
    frame: Frame,

    /// Lowest command sent to a motor while armed.
    idle: f32,

    /// Set by the last call to `run`.
    is_armed: bool,
}

impl<E, const N: usize> Mixer<E, N>
where
    E: ESC,
{
    pub fn from_motors(frame: Frame, motors: [Motor<E>; N]) -> Self {
        Self {
            motors,
            frame,
            idle: MOTOR_STOP,
            is_armed: false,
        }
    }

    /// Builder method to set the minimum armed motor command and return `self`
    pub fn with_idle(mut self, idle: f32) -> Self {
        self.idle = constrain(idle, MOTOR_STOP, 1.);
        self
    }

    /// Arm every ESC and stop its motor.
    pub fn begin(&mut self) {
        for motor in &mut self.motors {
            motor.esc.arm();
        }
        self.cut();
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// The frame code sent in actuator type responses.
    pub fn actuator_type(&self) -> u8 {
        self.frame as u8
    }

    /// The last command sent to each motor.
    pub fn motor_values(&self) -> [f32; N] {
        let mut values = [MOTOR_STOP; N];
        for (value, motor) in values.iter_mut().zip(&self.motors) {
            *value = motor.output;
        }
        values
    }

    /// The bench test command of each motor.
    pub fn disarmed_values(&self) -> [f32; N] {
        let mut values = [MOTOR_STOP; N];
        for (value, motor) in values.iter_mut().zip(&self.motors) {
            *value = motor.disarmed;
        }
        values
    }

    /// Mix `demands` into a command per motor in [0, 1].
    ///
    /// If any motor would exceed full power every motor is lowered by the excess,
    /// keeping the differential between motors for attitude corrections.
    pub fn mix(&self, demands: &Demands) -> [f32; N] {
        let mut values = [MOTOR_STOP; N];
        for (value, motor) in values.iter_mut().zip(&self.motors) {
            *value = motor.factor.dot(demands);
        }

        let max = values.iter().copied().fold(f32::MIN, f32::max);
        let excess = if max > 1. { max - 1. } else { 0. };

        for value in &mut values {
            *value = constrain(*value - excess, MOTOR_STOP, 1.);
        }
        values
    }

    /// Output mixed demands while armed, or the bench test commands while disarmed.
    pub fn run(&mut self, demands: &Demands, armed: bool) {
        self.set_armed(armed);

        if !armed {
            self.run_disarmed();
            return;
        }

        let values = self.mix(demands);
        for (motor, value) in self.motors.iter_mut().zip(values) {
            motor.write(value.max(self.idle));
        }
    }

    /// Track the vehicle's armed flag. Arming clears the bench test commands.
    pub fn set_armed(&mut self, armed: bool) {
        if armed {
            for motor in &mut self.motors {
                motor.disarmed = MOTOR_STOP;
            }
        }
        self.is_armed = armed;
    }

    pub fn is_armed(&self) -> bool {
        self.is_armed
    }

    /// Stop every motor regardless of demands.
    pub fn cut(&mut self) {
        for motor in &mut self.motors {
            motor.write(MOTOR_STOP);
        }
    }

    /// Output the bench test commands.
    pub fn run_disarmed(&mut self) {
        for motor in &mut self.motors {
            let value = motor.disarmed;
            motor.write(constrain(value, MOTOR_STOP, 1.));
        }
    }

    /// Set the bench test command for one motor.
    /// Ignored while armed or if `index` is out of range.
    pub fn set_motor_disarmed(&mut self, index: usize, value: f32) {
        if self.is_armed {
            return;
        }

        if let Some(motor) = self.motors.get_mut(index) {
            motor.disarmed = value;
        }
    }
}
