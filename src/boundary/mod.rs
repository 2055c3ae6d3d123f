//! Boundary policies
//!
//! The two lane topologies differ in exactly three places, all answered
//! here so the update engine stays topology-agnostic:
//! 1. **Gap ahead**: how many empty cells separate a car from the next one
//! 2. **Destination**: where a move lands (wraps, or leaves the lane)
//! 3. **Edge effects**: injection at cell 0 on the open lane
//!
//! The set of topologies is closed, so it is a plain enum chosen once when
//! the simulator is built.

mod injection;
mod zone;

pub use injection::InjectionPolicy;
pub use zone::SlowZone;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::lane::{LaneBuffer, Velocity};
use crate::SimulationError;

/// Topology tag, as named in configuration and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum BoundaryKind {
    /// Closed loop with wraparound
    Circular,
    /// Open lane, injection on the left, exit on the right
    Bottleneck,
}

impl FromStr for BoundaryKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circular" => Ok(BoundaryKind::Circular),
            "bottleneck" => Ok(BoundaryKind::Bottleneck),
            _ => Err(SimulationError::UnknownBoundary(s.to_string())),
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryKind::Circular => f.write_str("circular"),
            BoundaryKind::Bottleneck => f.write_str("bottleneck"),
        }
    }
}

/// Active boundary policy of a running simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Closed loop: modular gaps and motion, car count conserved
    Circular,
    /// Open lane with optional reduced-speed region
    Bottleneck {
        /// When a car is admitted into a free cell 0
        injection: InjectionPolicy,
        /// Region with a lower speed limit
        slow_zone: Option<SlowZone>,
    },
}

impl Boundary {
    /// Topology tag
    pub fn kind(&self) -> BoundaryKind {
        match self {
            Boundary::Circular => BoundaryKind::Circular,
            Boundary::Bottleneck { .. } => BoundaryKind::Bottleneck,
        }
    }

    /// Gap `d` for the car at `positions[k]`.
    ///
    /// `positions` are the occupied cells of the current snapshot in
    /// ascending order. On the loop the nearest car ahead may sit behind
    /// the seam; a lone car sees the whole loop minus its own cell. On the
    /// open lane the lead car sees the rest of the lane plus `v_max` free
    /// cells past the exit, so it can always drive off.
    pub fn gap_ahead(&self, positions: &[usize], k: usize, length: usize, v_max: Velocity) -> usize {
        let here = positions[k];
        match self {
            Boundary::Circular => {
                let ahead = positions[(k + 1) % positions.len()];
                match (ahead + length - here) % length {
                    0 => length - 1,
                    distance => distance - 1,
                }
            }
            Boundary::Bottleneck { .. } => match positions.get(k + 1) {
                Some(&ahead) => ahead - here - 1,
                None => length - here - 1 + v_max.max(0) as usize,
            },
        }
    }

    /// Speed limit applying to a car currently on `cell`
    pub fn speed_limit(&self, cell: usize, v_max: Velocity) -> Velocity {
        match self {
            Boundary::Bottleneck {
                slow_zone: Some(zone),
                ..
            } if zone.contains(cell) => zone.v_max.min(v_max),
            _ => v_max,
        }
    }

    /// Landing cell after moving `velocity` cells from `cell`.
    ///
    /// `None` means the car left the open lane and is removed.
    pub fn destination(&self, cell: usize, velocity: Velocity, length: usize) -> Option<usize> {
        let target = cell + velocity as usize;
        match self {
            Boundary::Circular => Some(target % length),
            Boundary::Bottleneck { .. } => (target < length).then_some(target),
        }
    }

    /// Apply edge effects after every car has moved.
    ///
    /// Returns whether a car was injected.
    pub fn apply_edge_effects<R: Rng + ?Sized>(
        &self,
        next: &mut LaneBuffer,
        rng: &mut R,
    ) -> Result<bool, SimulationError> {
        match self {
            Boundary::Circular => Ok(false),
            Boundary::Bottleneck { injection, .. } => {
                if next.is_empty() || !next.is_free(0) || !injection.admits(rng) {
                    return Ok(false);
                }
                next.place(0, 0)?;
                Ok(true)
            }
        }
    }
}
