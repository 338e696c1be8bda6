use super::PidController;
use crate::{demands::YAW, filter::constrain_abs, Demands, State};
use num_traits::Float;

/// Proportional-integral yaw-rate controller.
///
/// The integral is reset whenever the rate error is larger than the maximum rate,
/// and is otherwise kept within the windup limit.
#[derive(Clone, Copy, Debug)]
pub struct YawPid {
    pub kp: f32,
    pub ki: f32,

    /// Integral windup limit
    pub windup_max: f32,

    /// Error (in radians/second) above which the integral is reset
    pub rate_max: f32,

    error_integral: f32,
}

impl YawPid {
    pub const WINDUP_MAX: f32 = 6.;
    pub const RATE_MAX_DEGREES: f32 = 40.;

    pub fn new(kp: f32, ki: f32) -> Self {
        Self {
            kp,
            ki,
            windup_max: Self::WINDUP_MAX,
            rate_max: Self::RATE_MAX_DEGREES.to_radians(),
            error_integral: 0.,
        }
    }

    /// Builder method to set `windup_max` and return `self`
    pub fn with_windup_max(mut self, windup_max: f32) -> Self {
        self.windup_max = windup_max;
        self
    }

    /// Builder method to set `rate_max` from degrees/second and return `self`
    pub fn with_rate_max_degrees(mut self, degrees_per_second: f32) -> Self {
        self.rate_max = degrees_per_second.to_radians();
        self
    }

    /// The accumulated rate error.
    pub fn integral(&self) -> f32 {
        self.error_integral
    }
}

impl PidController for YawPid {
    fn modify_demands(&mut self, state: &State, demands: &mut Demands) {
        // 1. Calculate the error between the demanded and measured yaw rate
        let error = demands[YAW] - state.dpsi;

        // 2. Reset the integral on fast rate changes, otherwise accumulate it up to the windup limit
        if error.abs() > self.rate_max {
            self.error_integral = 0.;
        } else {
            self.error_integral = constrain_abs(self.error_integral + error, self.windup_max);
        }

        // 3. Replace the yaw demand with the corrected rate
        demands[YAW] = self.kp * error + self.ki * self.error_integral;
    }
}

#[cfg(test)]
mod tests {
    use super::YawPid;
    use crate::{demands::demands, demands::YAW, pid::PidController, State};
    use approx::assert_abs_diff_eq;

    fn state_with_yaw_rate(dpsi: f32) -> State {
        State {
            dpsi,
            ..State::default()
        }
    }

    #[test]
    fn proportional_only() {
        let mut pid = YawPid::new(1., 0.);
        let mut demands = demands(0.5, 0., 0., 0.);

        pid.modify_demands(&state_with_yaw_rate(0.2), &mut demands);

        assert_abs_diff_eq!(demands[YAW], -0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(demands[0], 0.5);
    }

    #[test]
    fn integral_saturates_at_windup_limit() {
        let mut pid = YawPid::new(0., 1.).with_windup_max(6.);
        let state = state_with_yaw_rate(-0.5);

        for _ in 0..100 {
            let mut demands = demands(0., 0., 0., 0.);
            pid.modify_demands(&state, &mut demands);

            assert!(pid.integral() <= 6.);
            assert_abs_diff_eq!(demands[YAW], pid.integral(), epsilon = 1e-6);
        }
        assert_abs_diff_eq!(pid.integral(), 6., epsilon = 1e-6);

        let state = state_with_yaw_rate(0.5);
        for _ in 0..100 {
            pid.modify_demands(&state, &mut demands(0., 0., 0., 0.));
            assert!(pid.integral() >= -6.);
        }
        assert_abs_diff_eq!(pid.integral(), -6., epsilon = 1e-6);
    }

    #[test]
    fn integral_resets_on_large_error() {
        let mut pid = YawPid::new(1., 1.).with_rate_max_degrees(40.);

        for _ in 0..5 {
            pid.modify_demands(&state_with_yaw_rate(0.3), &mut demands(0., 0., 0., 0.));
        }
        assert_abs_diff_eq!(pid.integral(), -1.5, epsilon = 1e-5);

        // 1 rad/s is above 40 deg/s
        let mut demands = demands(0., 0., 0., 1.);
        pid.modify_demands(&state_with_yaw_rate(0.), &mut demands);

        assert_abs_diff_eq!(pid.integral(), 0.);
        assert_abs_diff_eq!(demands[YAW], 1., epsilon = 1e-6);
    }

    #[test]
    fn instances_are_independent() {
        let mut a = YawPid::new(0., 1.);
        let b = YawPid::new(0., 1.);

        a.modify_demands(&state_with_yaw_rate(0.1), &mut demands(0., 0., 0., 0.));

        assert_abs_diff_eq!(a.integral(), -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(b.integral(), 0.);
    }
}
