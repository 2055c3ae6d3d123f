//! The velocity rules, as pure functions of one car's velocity and gap
//!
//! Rule 4 (motion) lives in the engine because it writes to the next-state
//! buffer; rules 1-3 only read and are order-independent.

use crate::lane::Velocity;

/// Rule 1: speed up by one if below the limit and the road allows it.
///
/// `limit` only caps the increment. A car already above it (one that just
/// entered a slow zone) keeps its velocity for rules 2 and 3 to reduce.
pub fn accelerate(velocity: Velocity, gap: Velocity, limit: Velocity) -> Velocity {
    if velocity < limit && gap > velocity {
        velocity + 1
    } else {
        velocity
    }
}

/// Rule 2: never plan to move further than the gap ahead
pub fn brake(velocity: Velocity, gap: Velocity) -> Velocity {
    if velocity > gap {
        gap
    } else {
        velocity
    }
}

/// Rule 3: drop one unit when the dawdle trial succeeded
pub fn randomize(velocity: Velocity, dawdle: bool) -> Velocity {
    if dawdle && velocity > 0 {
        velocity - 1
    } else {
        velocity
    }
}
