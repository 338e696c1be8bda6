use super::ESC;
use crate::filter::constrain;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::PwmPin;
use num_traits::{Num, NumCast, ToPrimitive};

/// An ESC implementation for RC (servo-style PWM) motor controllers.
pub struct RCESC<T: PwmPin> {
    arm: T::Duty,
    min: T::Duty,
    max: T::Duty,
    pin: T,
}

impl<T> RCESC<T>
where
    T: PwmPin,
    T::Duty: Num + NumCast + ToPrimitive + Copy,
{
    pub fn new(arm: T::Duty, min: T::Duty, max: T::Duty, pin: T) -> Self {
        Self { arm, min, max, pin }
    }

    /// Sweep the full throttle range so the ESC learns its endpoints.
    pub fn calibrate<D>(&mut self, delay: &mut D)
    where
        D: DelayMs<u16>,
    {
        self.pin.set_duty(self.max);
        delay.delay_ms(2000);

        self.pin.set_duty(self.min);
        delay.delay_ms(2000);

        self.pin.set_duty(self.arm);
    }

    pub fn pin(&self) -> &T {
        &self.pin
    }

    /// Convert a command in [0, 1] to a duty between `min` and `max`.
    fn duty(&self, output: f32) -> T::Duty {
        let min = self.min.to_f32().unwrap_or(0.);
        let max = self.max.to_f32().unwrap_or(0.);
        let duty = min + constrain(output, 0., 1.) * (max - min);

        <T::Duty as NumCast>::from(duty).unwrap_or(self.min)
    }
}

impl<T> ESC for RCESC<T>
where
    T: PwmPin,
    T::Duty: Num + NumCast + ToPrimitive + Copy,
{
    fn arm(&mut self) {
        self.pin.enable();
        self.pin.set_duty(self.arm);
    }

    fn output(&mut self, output: f32) {
        let duty = self.duty(output);
        self.pin.set_duty(duty);
    }
}

pub struct Builder<T> {
    arm: T,
    min: T,
    max: Option<T>,
}

impl<T: Default> Default for Builder<T> {
    fn default() -> Self {
        Self {
            arm: T::default(),
            min: T::default(),
            max: None,
        }
    }
}

impl<T: Default> Builder<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Builder<T> {
    pub fn arm(mut self, arm: T) -> Self {
        self.arm = arm;
        self
    }

    pub fn min(mut self, min: T) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    /// Build the ESC, defaulting `max` to the pin's maximum duty.
    pub fn build<P>(self, pin: P) -> RCESC<P>
    where
        P: PwmPin<Duty = T>,
    {
        RCESC {
            arm: self.arm,
            min: self.min,
            max: self.max.unwrap_or_else(|| pin.get_max_duty()),
            pin,
        }
    }
}
