//! Board services used by the kernel: time, serial ports and the armed indicator.

use crate::Error;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;
use embedded_time::{duration::Microseconds, Clock};

/// Serial port selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// The port connected to the ground station.
    Primary,
    /// A secondary telemetry radio.
    Telemetry,
}

pub trait Board {
    /// One-time hardware initialization.
    fn begin(&mut self) {}

    /// Seconds since start.
    fn time(&mut self) -> Result<f32, Error>;

    /// Read one byte from `port` if one is available.
    fn serial_read(&mut self, port: Port) -> Option<u8>;

    /// Write one byte to `port`.
    fn serial_write(&mut self, port: Port, byte: u8);

    /// Show whether the vehicle is armed.
    fn show_armed_status(&mut self, armed: bool);
}

/// A [`Board`] built from embedded-hal peripherals.
pub struct HalBoard<C, L, S, T = S> {
    clock: C,
    led: L,
    primary: S,
    telemetry: Option<T>,
}

impl<C, L, S> HalBoard<C, L, S, S> {
    pub fn new(clock: C, led: L, primary: S) -> Self {
        Self {
            clock,
            led,
            primary,
            telemetry: None,
        }
    }
}

impl<C, L, S, T> HalBoard<C, L, S, T> {
    /// Builder method to add a telemetry port and return `self`
    pub fn with_telemetry<U>(self, telemetry: U) -> HalBoard<C, L, S, U> {
        HalBoard {
            clock: self.clock,
            led: self.led,
            primary: self.primary,
            telemetry: Some(telemetry),
        }
    }

    pub fn led(&self) -> &L {
        &self.led
    }
}

fn read<P: serial::Read<u8>>(port: &mut P) -> Option<u8> {
    match port.read() {
        Ok(byte) => Some(byte),
        Err(nb::Error::WouldBlock) => None,
        Err(nb::Error::Other(_)) => {
            warn!("serial read error");
            None
        }
    }
}

fn write<P: serial::Write<u8>>(port: &mut P, byte: u8) {
    if nb::block!(port.write(byte)).is_err() {
        warn!("serial write error");
    }
}

impl<C, L, S, T> Board for HalBoard<C, L, S, T>
where
    C: Clock<T = u32>,
    L: OutputPin,
    S: serial::Read<u8> + serial::Write<u8>,
    T: serial::Read<u8> + serial::Write<u8>,
{
    fn time(&mut self) -> Result<f32, Error> {
        let instant = self.clock.try_now()?;
        let micros = Microseconds::<u32>::try_from(instant.duration_since_epoch())?;
        Ok(micros.0 as f32 * 1e-6)
    }

    fn serial_read(&mut self, port: Port) -> Option<u8> {
        match port {
            Port::Primary => read(&mut self.primary),
            Port::Telemetry => self.telemetry.as_mut().and_then(read),
        }
    }

    fn serial_write(&mut self, port: Port, byte: u8) {
        match port {
            Port::Primary => write(&mut self.primary, byte),
            Port::Telemetry => {
                if let Some(telemetry) = self.telemetry.as_mut() {
                    write(telemetry, byte);
                }
            }
        }
    }

    fn show_armed_status(&mut self, armed: bool) {
        let result = if armed {
            self.led.set_high()
        } else {
            self.led.set_low()
        };

        if result.is_err() {
            warn!("failed to set armed indicator");
        }
    }
}
