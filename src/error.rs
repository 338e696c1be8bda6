use embedded_time::{clock, ConversionError};

/// A flight kernel error caused by clock timing or a full fixed-capacity list.
#[derive(Debug)]
pub enum Error {
    Clock(clock::Error),
    Time(ConversionError),
    /// A sensor, PID controller or serial task was registered past its capacity.
    Capacity,
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

/// A hardware fault reported by a sensor.
///
/// The kernel does not retry: a fault latches [`State::sensor_fault`](crate::State::sensor_fault),
/// which keeps the vehicle from arming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorFault {
    /// Hardware initialization failed.
    Begin,
    /// The sensor reported an error while reading.
    Read,
}
