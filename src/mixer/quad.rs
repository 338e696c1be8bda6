//! X-configuration quad-copter frames.
//!
//! Rows are `[throttle, roll right, pitch forward, yaw right]`.

use super::{Frame, Mixer, Motor};
use crate::ESC;

/// ArduPilot numbering:
///
/// ```text
/// 3cw   1ccw
///    \ /
///     ^
///    / \
/// 2ccw  4cw
/// ```
pub const QUAD_XAP: [[i8; 4]; 4] = [
    [1, -1, -1, 1], // 1 right front
    [1, 1, 1, 1],   // 2 left rear
    [1, 1, -1, -1], // 3 left front
    [1, -1, 1, -1], // 4 right rear
];

/// MultiWii numbering:
///
/// ```text
/// 4cw   2ccw
///    \ /
///     ^
///    / \
/// 3ccw  1cw
/// ```
pub const QUAD_XMW: [[i8; 4]; 4] = [
    [1, -1, 1, -1], // 1 right rear
    [1, -1, -1, 1], // 2 right front
    [1, 1, 1, 1],   // 3 left rear
    [1, 1, -1, -1], // 4 left front
];

impl<E: ESC> Mixer<E, 4> {
    /// Create a new `Mixer` for an X quad-copter with ArduPilot motor numbering.
    pub fn quad_xap(a: E, b: E, c: E, d: E) -> Self {
        Self::quad(Frame::QuadXap, &QUAD_XAP, [a, b, c, d])
    }

    /// Create a new `Mixer` for an X quad-copter with MultiWii motor numbering.
    pub fn quad_xmw(a: E, b: E, c: E, d: E) -> Self {
        Self::quad(Frame::QuadXmw, &QUAD_XMW, [a, b, c, d])
    }

    fn quad(frame: Frame, directions: &[[i8; 4]; 4], escs: [E; 4]) -> Self {
        let [a, b, c, d] = escs;
        Self::from_motors(
            frame,
            [
                Motor::new(a, directions[0]),
                Motor::new(b, directions[1]),
                Motor::new(c, directions[2]),
                Motor::new(d, directions[3]),
            ],
        )
    }
}
