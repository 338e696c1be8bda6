//! Arming, disarming and failsafe.

use crate::{Board, Mixer, Receiver, State, ESC};

/// Whether the mixer may output demands for the rest of the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorGate {
    Open,
    /// The motors were cut this tick and must stay stopped.
    Cut,
}

/// Safety state machine, checked once per tick before the mixer runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Safety {
    /// Set the first time the arm switch is seen disarmed and never cleared,
    /// so a vehicle powered up with the switch armed will not arm.
    safe_to_arm: bool,
}

impl Safety {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the arm switch has been seen in the disarmed position.
    pub fn is_safe_to_arm(&self) -> bool {
        self.safe_to_arm
    }

    /// Update the armed and failsafe flags from the receiver and state.
    pub fn check<B, R, E, const N: usize>(
        &mut self,
        state: &mut State,
        receiver: &R,
        mixer: &mut Mixer<E, N>,
        board: &mut B,
    ) -> MotorGate
    where
        B: Board,
        R: Receiver,
        E: ESC,
    {
        // 1. Losing the radio link while armed is a failsafe
        if receiver.lost_signal() && state.armed {
            mixer.cut();
            state.armed = false;
            state.failsafe = true;
            board.show_armed_status(false);
            warn!("failsafe: lost signal while armed");
            return MotorGate::Cut;
        }

        let switch_armed = receiver.in_armed_state();

        // 2. Disarm from the switch
        if state.armed && !switch_armed {
            state.armed = false;
            info!("disarmed");
        }

        // 3. Require the switch to be seen disarmed once before arming
        if !self.safe_to_arm {
            self.safe_to_arm = !switch_armed;
        }

        // A failsafe is only cleared by the switch being disarmed with the link back
        if state.failsafe && !switch_armed && !receiver.lost_signal() {
            state.failsafe = false;
            info!("failsafe cleared");
        }

        // 4. Arm only when every check passes
        if self.safe_to_arm
            && !state.armed
            && !state.failsafe
            && state.safe_to_arm()
            && receiver.inactive()
            && switch_armed
        {
            state.armed = true;
            info!("armed");
        }

        // 5. Keep the motors stopped while the throttle is down
        let gate = if state.armed && receiver.inactive() {
            mixer.cut();
            MotorGate::Cut
        } else {
            MotorGate::Open
        };

        board.show_armed_status(state.armed);

        gate
    }
}
