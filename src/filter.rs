use core::f32::consts::PI;

/// First order low-pass filter.
///
/// The first sample passes through unchanged. A cutoff of zero (or below) disables filtering.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowPassFilter {
    cutoff_freq: f32,
    output: f32,
    is_initialised: bool,
}

impl LowPassFilter {
    pub fn with_cutoff(cutoff_freq: f32) -> Self {
        Self {
            cutoff_freq,
            output: 0.,
            is_initialised: false,
        }
    }

    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn cutoff_freq(&self) -> f32 {
        self.cutoff_freq
    }

    pub fn set_cutoff_freq(&mut self, cutoff_freq: f32) {
        self.cutoff_freq = cutoff_freq;
    }

    /// Filter a new `sample` taken `dt` seconds after the previous one.
    pub fn apply(&mut self, sample: f32, dt: f32) -> f32 {
        self.output = if self.is_initialised {
            let alpha = alpha(dt, self.cutoff_freq);
            sample * alpha + self.output * (1. - alpha)
        } else {
            self.is_initialised = true;
            sample
        };
        self.output
    }

    pub fn reset(&mut self, value: f32) {
        self.is_initialised = true;
        self.output = value;
    }
}

/// Smoothing factor of a first order filter sampled every `dt` seconds.
pub fn alpha(dt: f32, cutoff_freq: f32) -> f32 {
    if cutoff_freq <= 0. || dt <= 0. {
        return 1.;
    }

    let rc = 1. / (2. * PI * cutoff_freq);
    dt / (dt + rc)
}

/// Constrain `value` to `[-limit, limit]`.
pub fn constrain_abs(value: f32, limit: f32) -> f32 {
    constrain(value, -limit, limit)
}

/// Constrain `value` to `[low, high]`, mapping NaN to the middle of the range.
pub fn constrain(value: f32, low: f32, high: f32) -> f32 {
    if value.is_nan() {
        return (low + high) / 2.;
    }

    value.max(low).min(high)
}
