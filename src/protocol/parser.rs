use heapless::Deque;

/// Size of the inbound payload buffer.
pub const PAYLOAD_SIZE: usize = 128;

/// Size of the outbound byte queue.
pub const OUTBUF_SIZE: usize = 128;

const PREAMBLE_0: u8 = b'$';
const PREAMBLE_1: u8 = b'M';
const REQUEST: u8 = b'<';
const RESPONSE: u8 = b'>';

/// Preamble, direction, size, command and checksum bytes around a payload.
const FRAME_OVERHEAD: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParserState {
    Idle,
    HeaderStart,
    HeaderM,
    HeaderArrow,
    HeaderSize,
    HeaderCmd,
}

/// Streaming MSP v1 frame parser and response framer.
///
/// Inbound: `$ M < size command payload checksum`, where the checksum is the XOR
/// of the size, command and payload bytes. Responses use `>` in place of `<`.
pub struct Parser {
    state: ParserState,
    size: u8,
    offset: u8,
    command: u8,
    checksum: u8,
    out_checksum: u8,
    outbuf: Deque<u8, OUTBUF_SIZE>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            size: 0,
            offset: 0,
            command: 0,
            checksum: 0,
            out_checksum: 0,
            outbuf: Deque::new(),
        }
    }

    /// Feed one inbound byte, collecting payload bytes into `payload` by offset.
    ///
    /// Returns the command once a complete frame with a valid checksum has been read.
    /// Frames with a bad checksum or a payload larger than `payload` are dropped.
    pub fn parse(&mut self, byte: u8, payload: &mut [u8; PAYLOAD_SIZE]) -> Option<u8> {
        match self.state {
            ParserState::Idle => {
                if byte == PREAMBLE_0 {
                    self.state = ParserState::HeaderStart;
                }
            }
            ParserState::HeaderStart => {
                self.state = if byte == PREAMBLE_1 {
                    ParserState::HeaderM
                } else {
                    ParserState::Idle
                };
            }
            ParserState::HeaderM => {
                self.state = if byte == REQUEST {
                    ParserState::HeaderArrow
                } else {
                    ParserState::Idle
                };
            }
            ParserState::HeaderArrow => {
                if usize::from(byte) > PAYLOAD_SIZE {
                    trace!("dropping oversized frame: {=u8}", byte);
                    self.state = ParserState::Idle;
                } else {
                    self.size = byte;
                    self.offset = 0;
                    self.checksum = byte;
                    self.state = ParserState::HeaderSize;
                }
            }
            ParserState::HeaderSize => {
                self.command = byte;
                self.checksum ^= byte;
                self.state = ParserState::HeaderCmd;
            }
            ParserState::HeaderCmd => {
                if self.offset < self.size {
                    self.checksum ^= byte;
                    payload[usize::from(self.offset)] = byte;
                    self.offset += 1;
                } else {
                    self.state = ParserState::Idle;
                    if self.checksum == byte {
                        return Some(self.command);
                    }
                    trace!("dropping frame with bad checksum");
                }
            }
        }

        None
    }

    /// Queue a response to `command` carrying `values` as little-endian floats.
    ///
    /// The whole response is dropped if it does not fit in the outbound queue.
    pub fn send_floats(&mut self, command: u8, values: &[f32]) {
        if !self.head_reply(command, values.len() * 4) {
            return;
        }
        for value in values {
            for byte in value.to_le_bytes() {
                self.serialize(byte);
            }
        }
        self.complete_reply();
    }

    /// Queue a response to `command` carrying raw `bytes`.
    pub fn send_bytes(&mut self, command: u8, bytes: &[u8]) {
        if !self.head_reply(command, bytes.len()) {
            return;
        }
        for &byte in bytes {
            self.serialize(byte);
        }
        self.complete_reply();
    }

    /// Number of queued outbound bytes.
    pub fn available_bytes(&self) -> usize {
        self.outbuf.len()
    }

    /// Take the next queued outbound byte.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.outbuf.pop_front()
    }

    /// Start a response frame, returning `false` if the complete frame would not fit.
    fn head_reply(&mut self, command: u8, size: usize) -> bool {
        let free = OUTBUF_SIZE - self.outbuf.len();
        let size = match u8::try_from(size) {
            Ok(size) if usize::from(size) + FRAME_OVERHEAD <= free => size,
            _ => {
                warn!("serial output queue full, dropping response to {=u8}", command);
                return false;
            }
        };

        self.push(PREAMBLE_0);
        self.push(PREAMBLE_1);
        self.push(RESPONSE);
        self.out_checksum = 0;
        self.serialize(size);
        self.serialize(command);
        true
    }

    fn complete_reply(&mut self) {
        self.push(self.out_checksum);
    }

    fn serialize(&mut self, byte: u8) {
        self.out_checksum ^= byte;
        self.push(byte);
    }

    fn push(&mut self, byte: u8) {
        if self.outbuf.push_back(byte).is_err() {
            warn!("serial output queue full, dropping byte");
        }
    }
}

/// Frame a request to `command` with `payload`, as a ground station would send it.
#[cfg(test)]
pub(crate) fn request<const M: usize>(command: u8, payload: &[u8]) -> heapless::Vec<u8, M> {
    let mut frame = heapless::Vec::new();
    let size = payload.len() as u8;
    let mut checksum = size ^ command;

    frame.extend_from_slice(&[PREAMBLE_0, PREAMBLE_1, REQUEST, size, command]).unwrap();
    for &byte in payload {
        checksum ^= byte;
        frame.push(byte).unwrap();
    }
    frame.push(checksum).unwrap();
    frame
}
