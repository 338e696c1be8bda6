use super::{Command, Parser, PAYLOAD_SIZE};
use crate::{
    board::{Board, Port},
    receiver::channel,
    task::TimerTask,
    Mixer, Receiver, State, ESC,
};

/// The vehicle seen by a serial task during one tick.
pub struct Event<'a, B, R, E, const N: usize> {
    pub board: &'a mut B,
    pub receiver: &'a R,
    pub mixer: &'a mut Mixer<E, N>,
    pub state: &'a State,

    /// The current time in seconds.
    pub now: f32,
}

/// Rate-limited request/response handler for one serial port.
pub struct SerialTask {
    timer: TimerTask,
    port: Port,
    parser: Parser,
    payload: [u8; PAYLOAD_SIZE],
}

impl SerialTask {
    /// Update rate in hz.
    pub const FREQUENCY: f32 = 66.;

    pub fn new(port: Port) -> Self {
        Self {
            timer: TimerTask::new(Self::FREQUENCY),
            port,
            parser: Parser::new(),
            payload: [0; PAYLOAD_SIZE],
        }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    /// Handle every pending request and send the queued responses, at most once per period.
    pub fn update<B, R, E, const N: usize>(&mut self, event: Event<'_, B, R, E, N>)
    where
        B: Board,
        R: Receiver,
        E: ESC,
    {
        if !self.timer.ready(event.now) {
            return;
        }

        while let Some(byte) = event.board.serial_read(self.port) {
            if let Some(command) = self.parser.parse(byte, &mut self.payload) {
                self.dispatch(command, event.receiver, event.mixer, event.state);
                self.flush(&mut *event.board);
            }
        }

        self.flush(&mut *event.board);
    }

    /// Write every queued response byte to the port.
    fn flush<B: Board>(&mut self, board: &mut B) {
        while let Some(byte) = self.parser.read_byte() {
            board.serial_write(self.port, byte);
        }
    }

    fn dispatch<R, E, const N: usize>(
        &mut self,
        id: u8,
        receiver: &R,
        mixer: &mut Mixer<E, N>,
        state: &State,
    ) where
        R: Receiver,
        E: ESC,
    {
        match Command::try_from(id) {
            Ok(Command::Receiver) => {
                let mut channels = [0.; channel::COUNT];
                for (index, value) in channels.iter_mut().enumerate() {
                    *value = receiver.raw_channel(index);
                }
                self.parser.send_floats(id, &channels);
            }
            Ok(Command::State) => self.parser.send_floats(id, &state.values()),
            Ok(Command::ActuatorType) => self.parser.send_bytes(id, &[mixer.actuator_type()]),
            Ok(Command::SetMotor) => {
                for (index, bytes) in self.payload[..16].chunks_exact(4).enumerate() {
                    let value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                    mixer.set_motor_disarmed(index, value);
                }
            }
            Err(unknown) => debug!("ignoring unknown command {=u8}", unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, SerialTask};
    use crate::board::Port;
    use crate::protocol::parser::request;
    use crate::test_utils::{response_floats, MockBoard, MockEsc, MockReceiver};
    use crate::{demands::demands, Mixer, State, MOTOR_STOP};
    use approx::assert_abs_diff_eq;

    struct Harness {
        task: SerialTask,
        board: MockBoard,
        receiver: MockReceiver,
        mixer: Mixer<MockEsc, 4>,
        state: State,
    }

    impl Harness {
        fn new() -> Self {
            let [a, b, c, d] = [MockEsc::default(); 4];
            Self {
                task: SerialTask::new(Port::Primary),
                board: MockBoard::default(),
                receiver: MockReceiver::default(),
                mixer: Mixer::quad_xmw(a, b, c, d),
                state: State::default(),
            }
        }

        fn send(&mut self, command: u8, payload: &[u8]) {
            let frame = request::<64>(command, payload);
            self.board.receive(Port::Primary, &frame);
        }

        fn update(&mut self, now: f32) {
            self.task.update(Event {
                board: &mut self.board,
                receiver: &self.receiver,
                mixer: &mut self.mixer,
                state: &self.state,
                now,
            });
        }
    }

    #[test]
    fn receiver_request_returns_six_channels() {
        let mut harness = Harness::new();
        harness.receiver.channels = [-1., 0.25, -0.5, 0.75, 1., -0.125];

        harness.send(121, &[]);
        harness.update(1.);

        let (command, values) = response_floats(harness.board.sent(Port::Primary));
        assert_eq!(command, 121);
        assert_eq!(values.as_slice(), &[-1., 0.25, -0.5, 0.75, 1., -0.125]);
    }

    #[test]
    fn state_request_returns_twelve_values() {
        let mut harness = Harness::new();
        harness.state.z = 1.5;
        harness.state.psi = 3.;

        harness.send(122, &[]);
        harness.update(1.);

        let (command, values) = response_floats(harness.board.sent(Port::Primary));
        assert_eq!(command, 122);
        assert_eq!(values.as_slice(), &harness.state.values());
    }

    #[test]
    fn actuator_type_request_returns_frame_code() {
        let mut harness = Harness::new();

        harness.send(123, &[]);
        harness.update(1.);

        let sent = harness.board.sent(Port::Primary);
        assert_eq!(&sent[..6], &[b'$', b'M', b'>', 1, 123, 2]);
        assert_eq!(sent[6], 1 ^ 123 ^ 2);
    }

    fn motor_payload(values: [f32; 4]) -> [u8; 16] {
        let mut payload = [0; 16];
        for (chunk, value) in payload.chunks_exact_mut(4).zip(values) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        payload
    }

    #[test]
    fn set_motor_while_disarmed() {
        let mut harness = Harness::new();

        harness.send(215, &motor_payload([0.1, 0.2, 0.3, 0.4]));
        harness.update(1.);

        assert_eq!(harness.mixer.disarmed_values(), [0.1, 0.2, 0.3, 0.4]);
        assert!(harness.board.sent(Port::Primary).is_empty());

        harness.mixer.run_disarmed();
        assert_eq!(harness.mixer.motor_values(), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn set_motor_while_armed_has_no_effect() {
        let mut harness = Harness::new();
        harness.state.armed = true;
        harness.mixer.run(&demands(0.5, 0., 0., 0.), true);

        harness.send(215, &motor_payload([0.1, 0.2, 0.3, 0.4]));
        harness.update(1.);
        harness.mixer.run(&demands(0.5, 0., 0., 0.), true);

        assert_eq!(harness.mixer.disarmed_values(), [MOTOR_STOP; 4]);
        for value in harness.mixer.motor_values() {
            assert_abs_diff_eq!(value, 0.5);
        }
    }

    #[test]
    fn waits_for_period() {
        let mut harness = Harness::new();

        harness.send(121, &[]);
        harness.update(0.001);
        assert!(harness.board.sent(Port::Primary).is_empty());

        harness.update(0.02);
        assert!(!harness.board.sent(Port::Primary).is_empty());
    }

    #[test]
    fn answers_every_pending_request() {
        let mut harness = Harness::new();

        harness.send(123, &[]);
        harness.send(123, &[]);
        harness.update(1.);

        assert_eq!(harness.board.sent(Port::Primary).len(), 14);
    }

    #[test]
    fn only_reads_its_own_port() {
        let mut harness = Harness::new();
        let frame = request::<8>(123, &[]);
        harness.board.receive(Port::Telemetry, &frame);

        harness.update(1.);

        assert!(harness.board.sent(Port::Primary).is_empty());
        assert!(harness.board.sent(Port::Telemetry).is_empty());
    }

    #[test]
    fn unknown_commands_are_ignored() {
        let mut harness = Harness::new();

        harness.send(42, &[]);
        harness.update(1.);

        assert!(harness.board.sent(Port::Primary).is_empty());
    }

    #[test]
    fn answers_more_requests_than_the_queue_holds() {
        let mut harness = Harness::new();
        for _ in 0..3 {
            harness.send(122, &[]);
        }

        harness.update(1.);

        let sent = harness.board.sent(Port::Primary);
        assert_eq!(sent.len(), 3 * 54);
        for frame in sent.chunks_exact(54) {
            let (command, values) = response_floats(frame);
            assert_eq!(command, 122);
            assert_eq!(values.len(), 12);
        }
    }
}
