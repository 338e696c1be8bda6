//! PID controller pipeline.
//!
//! Controllers run once per tick in registration order, each correcting the demand
//! vector left by the previous one. Rate controllers go before angle controllers.

use crate::{Demands, State};

mod yaw;
pub use yaw::YawPid;

pub trait PidController {
    /// Correct `demands` in place from the current `state`.
    fn modify_demands(&mut self, state: &State, demands: &mut Demands);
}

impl<T> PidController for &mut T
where
    T: PidController + ?Sized,
{
    fn modify_demands(&mut self, state: &State, demands: &mut Demands) {
        (**self).modify_demands(state, demands)
    }
}
