//! The control loop driver.

use crate::{
    protocol::{Event, SerialTask},
    Board, Error, Mixer, MotorGate, PidController, Receiver, Safety, Sensor, State, ESC,
};
use heapless::Vec;

pub const MAX_SENSORS: usize = 8;
pub const MAX_PID_CONTROLLERS: usize = 8;
pub const MAX_SERIAL_TASKS: usize = 10;

/// A multi-rotor built from a board, a receiver, a mixer and the sensors and
/// PID controllers registered with it.
///
/// Sensors and PID controllers run in the order they were added.
/// ```ignore
/// let mut imu = Imu::new(driver);
/// let mut yaw = YawPid::new(1., 0.1);
///
/// let mut copter = Copter::new(board, receiver, Mixer::quad_xap(a, b, c, d));
/// copter.add_sensor(&mut imu)?;
/// copter.add_pid_controller(&mut yaw)?;
/// copter.add_serial_task(SerialTask::new(Port::Primary))?;
///
/// copter.begin();
/// loop {
///     copter.update()?;
/// }
/// ```
pub struct Copter<'a, B, R, E, const N: usize> {
    pub board: B,
    pub receiver: R,
    pub mixer: Mixer<E, N>,
    sensors: Vec<&'a mut dyn Sensor, MAX_SENSORS>,
    pid_controllers: Vec<&'a mut dyn PidController, MAX_PID_CONTROLLERS>,
    serial_tasks: Vec<SerialTask, MAX_SERIAL_TASKS>,
    safety: Safety,
    state: State,
}

impl<'a, B, R, E, const N: usize> Copter<'a, B, R, E, N>
where
    B: Board,
    R: Receiver,
    E: ESC,
{
    pub fn new(board: B, receiver: R, mixer: Mixer<E, N>) -> Self {
        Self {
            board,
            receiver,
            mixer,
            sensors: Vec::new(),
            pid_controllers: Vec::new(),
            serial_tasks: Vec::new(),
            safety: Safety::new(),
            state: State::default(),
        }
    }

    pub fn add_sensor(&mut self, sensor: &'a mut dyn Sensor) -> Result<(), Error> {
        self.sensors.push(sensor).map_err(|_| {
            error!("too many sensors");
            Error::Capacity
        })
    }

    pub fn add_pid_controller(&mut self, controller: &'a mut dyn PidController) -> Result<(), Error> {
        self.pid_controllers.push(controller).map_err(|_| {
            error!("too many PID controllers");
            Error::Capacity
        })
    }

    pub fn add_serial_task(&mut self, task: SerialTask) -> Result<(), Error> {
        self.serial_tasks.push(task).map_err(|_| {
            error!("too many serial tasks");
            Error::Capacity
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn safety(&self) -> &Safety {
        &self.safety
    }

    /// Start the board, sensors, receiver and mixer.
    ///
    /// A sensor that fails to start leaves the vehicle unable to arm.
    pub fn begin(&mut self) {
        self.state.armed = false;
        self.board.begin();

        for sensor in self.sensors.iter_mut() {
            if let Err(fault) = sensor.begin() {
                error!("sensor failed to start: {}", fault);
                self.state.sensor_fault = true;
            }
        }

        self.receiver.begin();
        self.mixer.begin();
    }

    /// Run one tick of the control loop.
    ///
    /// If the board clock fails, sensors and serial tasks are skipped but safety
    /// and the mixer still run before the error is returned.
    pub fn update(&mut self) -> Result<(), Error> {
        let time = self.board.time();

        if let Ok(time) = time {
            for sensor in self.sensors.iter_mut() {
                if !sensor.ready(time) {
                    continue;
                }
                if let Err(fault) = sensor.modify_state(&mut self.state, time) {
                    error!("sensor fault: {}", fault);
                    self.state.sensor_fault = true;
                }
            }
        }

        let gate = self.safety.check(
            &mut self.state,
            &self.receiver,
            &mut self.mixer,
            &mut self.board,
        );
        self.mixer.set_armed(self.state.armed);

        let mut demands = self.receiver.demands();
        for controller in self.pid_controllers.iter_mut() {
            controller.modify_demands(&self.state, &mut demands);
        }

        match gate {
            MotorGate::Cut => {}
            MotorGate::Open if self.state.armed => self.mixer.run(&demands, true),
            MotorGate::Open => self.mixer.run_disarmed(),
        }

        let time = time.map_err(|error| {
            error!("board clock failed");
            error
        })?;

        for task in self.serial_tasks.iter_mut() {
            task.update(Event {
                board: &mut self.board,
                receiver: &self.receiver,
                mixer: &mut self.mixer,
                state: &self.state,
                now: time,
            });
        }

        Ok(())
    }
}
