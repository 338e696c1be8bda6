//! Doubles shared by the unit tests.

use crate::{
    board::{Board, Port},
    receiver::channel,
    Error, Receiver, ESC,
};
use embedded_hal::PwmPin;
use embedded_time::clock;
use heapless::{Deque, Vec};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MockEsc {
    pub armed: bool,
    pub output: f32,
}

impl ESC for MockEsc {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn output(&mut self, output: f32) {
        self.output = output;
    }
}

/// A PWM channel that records the duties it is given.
#[derive(Debug, Default)]
pub struct MockPwm {
    pub enabled: bool,
    pub duty: u16,
    pub history: Vec<u16, 16>,
}

impl MockPwm {
    pub const MAX_DUTY: u16 = 2000;
}

impl PwmPin for MockPwm {
    type Duty = u16;

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn get_duty(&self) -> u16 {
        self.duty
    }

    fn get_max_duty(&self) -> u16 {
        Self::MAX_DUTY
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        // Only the first duties are kept
        self.history.push(duty).ok();
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MockReceiver {
    pub channels: [f32; channel::COUNT],
    pub lost_signal: bool,
}

impl MockReceiver {
    pub fn set_switch(&mut self, armed: bool) {
        self.channels[channel::AUX1] = if armed { 1. } else { -1. };
    }

    pub fn set_throttle_down(&mut self, down: bool) {
        self.channels[channel::THROTTLE] = if down { -1. } else { 0. };
    }
}

impl Receiver for MockReceiver {
    fn raw_channel(&self, index: usize) -> f32 {
        self.channels.get(index).copied().unwrap_or(0.)
    }

    fn lost_signal(&self) -> bool {
        self.lost_signal
    }
}

pub const SERIAL_CAPACITY: usize = 256;

#[derive(Debug, Default)]
pub struct MockBoard {
    pub time: f32,
    pub led: bool,
    pub begun: bool,
    /// Make `time` fail.
    pub clock_fault: bool,
    rx: [Deque<u8, SERIAL_CAPACITY>; 2],
    tx: [Vec<u8, SERIAL_CAPACITY>; 2],
}

fn index(port: Port) -> usize {
    match port {
        Port::Primary => 0,
        Port::Telemetry => 1,
    }
}

impl MockBoard {
    /// Queue bytes to be read from `port`.
    pub fn receive(&mut self, port: Port, bytes: &[u8]) {
        for &byte in bytes {
            self.rx[index(port)].push_back(byte).unwrap();
        }
    }

    /// Bytes written to `port` so far.
    pub fn sent(&self, port: Port) -> &[u8] {
        &self.tx[index(port)]
    }
}

impl Board for MockBoard {
    fn begin(&mut self) {
        self.begun = true;
    }

    fn time(&mut self) -> Result<f32, Error> {
        if self.clock_fault {
            Err(Error::Clock(clock::Error::Unspecified))
        } else {
            Ok(self.time)
        }
    }

    fn serial_read(&mut self, port: Port) -> Option<u8> {
        self.rx[index(port)].pop_front()
    }

    fn serial_write(&mut self, port: Port, byte: u8) {
        self.tx[index(port)].push(byte).unwrap();
    }

    fn show_armed_status(&mut self, armed: bool) {
        self.led = armed;
    }
}

/// Split a float response frame into its command and values.
pub fn response_floats(frame: &[u8]) -> (u8, Vec<f32, 32>) {
    assert_eq!(&frame[..3], b"$M>");
    let size = frame[3] as usize;
    let command = frame[4];
    let payload = &frame[5..5 + size];

    let checksum = frame[3..5 + size].iter().fold(0, |acc, byte| acc ^ byte);
    assert_eq!(frame[5 + size], checksum);

    let values = payload
        .chunks_exact(4)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect();
    (command, values)
}
