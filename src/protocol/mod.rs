//! Ground station protocol.
//!
//! Messages are MultiWii Serial Protocol (v1) frames addressed by a one-byte command.
//! Multi-byte values are little-endian and floats are IEEE-754 single precision.

pub(crate) mod parser;
pub use parser::{Parser, OUTBUF_SIZE, PAYLOAD_SIZE};

mod serial_task;
pub use serial_task::{Event, SerialTask};

/// Commands understood by the [`SerialTask`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Request the six raw receiver channels.
    Receiver = 121,
    /// Request the twelve state values.
    State = 122,
    /// Request the mixer frame code.
    ActuatorType = 123,
    /// Set the four bench test motor commands.
    SetMotor = 215,
}

impl TryFrom<u8> for Command {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            121 => Ok(Command::Receiver),
            122 => Ok(Command::State),
            123 => Ok(Command::ActuatorType),
            215 => Ok(Command::SetMotor),
            unknown => Err(unknown),
        }
    }
}
