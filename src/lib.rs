//! # embedded-flight-kernel
//! A `#![no_std]` multi-rotor flight control kernel for embedded rust.
//!
//! Each call to [`Copter::update`] runs one tick of the control loop:
//! sensors fold their readings into the shared [`State`], the [`Safety`] state machine
//! arms, disarms or cuts the motors, the pilot's [`Demands`] pass through every
//! [`PidController`] and the [`Mixer`] turns them into motor commands.
//! [`SerialTask`]s answer ground station requests over MSP.
//!
//! ```ignore
//! use embedded_flight_kernel::{Copter, HalBoard, Mixer, Port, SerialTask, YawPid};
//!
//! // Create a quad-copter mixer from 4 ESCs
//! let mixer = Mixer::quad_xap(esc0, esc1, esc2, esc3).with_idle(0.05);
//!
//! let board = HalBoard::new(clock, led, uart);
//! let mut yaw = YawPid::new(1., 0.1);
//!
//! let mut copter = Copter::new(board, receiver, mixer);
//! copter.add_pid_controller(&mut yaw)?;
//! copter.add_serial_task(SerialTask::new(Port::Primary))?;
//!
//! copter.begin();
//! loop {
//!     copter.update()?;
//! }
//! ```

#![no_std]

#[macro_use]
mod fmt;

pub mod board;
pub use board::{Board, HalBoard, Port};

pub mod copter;
pub use copter::Copter;

pub mod demands;
pub use demands::Demands;

mod error;
pub use error::{Error, SensorFault};

pub mod esc;
pub use esc::ESC;

pub mod filter;

pub mod mixer;
pub use mixer::{Frame, Mixer, Motor, MOTOR_STOP};

pub mod pid;
pub use pid::{PidController, YawPid};

pub mod protocol;
pub use protocol::{Command, SerialTask};

pub mod receiver;
pub use receiver::Receiver;

pub mod safety;
pub use safety::{MotorGate, Safety};

pub mod sensor;
pub use sensor::Sensor;

mod state;
pub use state::State;

pub mod task;
pub use task::TimerTask;

#[cfg(test)]
mod test_utils;
