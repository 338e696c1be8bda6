/// A task that runs at most once per period of the control loop clock.
#[derive(Clone, Copy, Debug)]
pub struct TimerTask {
    /// The time (in seconds) between runs.
    period: f32,

    /// The time (in seconds) of the last run.
    last_run: f32,
}

impl TimerTask {
    /// Create a new task to run at `hz`.
    pub fn new(hz: f32) -> Self {
        Self {
            period: 1. / hz,
            last_run: 0.,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Returns `true` and records the run if at least one period has elapsed at `now` (in seconds).
    ///
    /// A `now` earlier than the last run means the clock wrapped, so the task runs
    /// and counts periods from there.
    pub fn ready(&mut self, now: f32) -> bool {
        if now < self.last_run || now - self.last_run >= self.period {
            self.last_run = now;
            true
        } else {
            false
        }
    }
}
