mod rcesc;
pub use rcesc::{Builder, RCESC};

/// Electronic speed controller
pub trait ESC {
    /// Arm this ESC.
    fn arm(&mut self);

    /// Output a motor command in [0, 1].
    fn output(&mut self, output: f32);
}

impl<T> ESC for &mut T
where
    T: ESC + ?Sized,
{
    fn arm(&mut self) {
        (**self).arm()
    }

    fn output(&mut self, output: f32) {
        (**self).output(output);
    }
}
