use super::Sensor;
use crate::{filter::LowPassFilter, task::TimerTask, SensorFault, State};

/// A time-of-flight distance driver.
pub trait RangeSource {
    type Error;

    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Returns `true` if a new measurement can be read.
    fn new_data_ready(&mut self) -> bool;

    /// The latest distance in millimeters.
    fn distance_mm(&mut self) -> u16;
}

/// Downward-facing range sensor that owns `z` and `dz`.
///
/// Samples are accepted at most once per period.
/// Vertical velocity is the backward difference between the new distance
/// and the `z` left in the state by the previous accepted sample.
pub struct Rangefinder<D> {
    driver: D,
    filter: LowPassFilter,
    timer: TimerTask,
    distance: f32,
}

impl<D> Rangefinder<D> {
    /// Default sample rate in hz.
    pub const FREQUENCY: f32 = 100.;

    /// Default low-pass cutoff in hz.
    pub const CUTOFF: f32 = 10.;

    pub fn new(driver: D) -> Self {
        Self {
            driver,
            filter: LowPassFilter::with_cutoff(Self::CUTOFF),
            timer: TimerTask::new(Self::FREQUENCY),
            distance: 0.,
        }
    }

    /// Builder method to set the maximum sample rate in hz.
    pub fn with_frequency(mut self, hz: f32) -> Self {
        self.timer = TimerTask::new(hz);
        self
    }

    /// Builder method to set the distance low-pass cutoff in hz (0 disables filtering).
    pub fn with_cutoff(mut self, cutoff_freq: f32) -> Self {
        self.filter.set_cutoff_freq(cutoff_freq);
        self
    }

    /// Seconds between accepted samples.
    pub fn period(&self) -> f32 {
        self.timer.period()
    }

    /// The latest filtered distance in meters.
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl<D: RangeSource> Sensor for Rangefinder<D> {
    fn begin(&mut self) -> Result<(), SensorFault> {
        self.driver.begin().map_err(|_| SensorFault::Begin)
    }

    fn ready(&mut self, time: f32) -> bool {
        if !self.driver.new_data_ready() {
            return false;
        }

        let meters = f32::from(self.driver.distance_mm()) / 1000.;
        self.distance = self.filter.apply(meters, self.period());

        self.timer.ready(time)
    }

    fn modify_state(&mut self, state: &mut State, _time: f32) -> Result<(), SensorFault> {
        state.dz = (self.distance - state.z) / self.period();
        state.z = self.distance;

        Ok(())
    }
}
