//! Update engine
//!
//! Advances a lane by one time step. All cars see the same frozen snapshot:
//! gaps are measured on the current [`Lane`], and every move is written to
//! a fresh [`LaneBuffer`]. No car can observe a neighbour that has already
//! moved, so the processing order of cars cannot change the result.

pub mod rules;

use rand::Rng;

use crate::boundary::Boundary;
use crate::lane::{Lane, LaneBuffer, Velocity};
use crate::SimulationError;

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Lane state at t + 1
    pub lane: Lane,
    /// Cars that drove off the open end
    pub exited: usize,
    /// Whether a car entered at cell 0
    pub injected: bool,
}

/// Applies the four rules under a fixed boundary policy
#[derive(Debug, Clone)]
pub struct UpdateEngine {
    v_max: Velocity,
    braking: f64,
    boundary: Boundary,
}

impl UpdateEngine {
    /// Create engine; parameters are assumed validated
    pub fn new(v_max: Velocity, braking: f64, boundary: Boundary) -> Self {
        Self {
            v_max,
            braking,
            boundary,
        }
    }

    /// Compute the lane at t + 1 from the lane at t.
    ///
    /// Cars are visited in ascending cell order and each consumes exactly
    /// one uniform draw, compared against the braking probability, even
    /// when that probability is 0 or 1. A probabilistic injection draw, if
    /// any, comes last.
    pub fn step<R: Rng + ?Sized>(
        &self,
        current: &Lane,
        rng: &mut R,
    ) -> Result<StepOutcome, SimulationError> {
        let length = current.len();
        let positions = current.car_positions();
        let mut next = LaneBuffer::new(length);
        let mut exited = 0;

        for (k, &cell) in positions.iter().enumerate() {
            let velocity = current.cell(cell);
            let gap = self.boundary.gap_ahead(&positions, k, length, self.v_max);
            let gap = Velocity::try_from(gap).unwrap_or(Velocity::MAX);
            let limit = self.boundary.speed_limit(cell, self.v_max);

            let velocity = rules::accelerate(velocity, gap, limit);
            let velocity = rules::brake(velocity, gap);
            let velocity = rules::randomize(velocity, rng.gen::<f64>() < self.braking);

            match self.boundary.destination(cell, velocity, length) {
                Some(target) => next.place(target, velocity)?,
                None => exited += 1,
            }
        }

        let injected = self.boundary.apply_edge_effects(&mut next, rng)?;

        Ok(StepOutcome {
            lane: next.into_lane(),
            exited,
            injected,
        })
    }
}
