//! Reduced-speed region on the open lane

use crate::lane::Velocity;
use crate::SimulationError;

/// Inclusive cell range `[start, end]` with its own speed limit.
///
/// A car whose current cell lies inside the range accelerates at most to
/// `v_max`. One that arrives faster is not slowed by the zone itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SlowZone {
    /// First cell of the zone
    pub start: usize,
    /// Last cell of the zone (inclusive)
    pub end: usize,
    /// Speed limit inside the zone
    pub v_max: Velocity,
}

impl SlowZone {
    /// Create a zone covering `start..=end`
    pub fn new(start: usize, end: usize, v_max: Velocity) -> Self {
        Self { start, end, v_max }
    }

    /// Whether `cell` lies inside the zone
    pub fn contains(&self, cell: usize) -> bool {
        (self.start..=self.end).contains(&cell)
    }

    /// Zone from optional bounds given as a pair.
    ///
    /// Both bounds absent means no zone; only one of them is an error.
    pub fn from_bounds(
        start: Option<usize>,
        end: Option<usize>,
        v_max: Velocity,
    ) -> Result<Option<Self>, SimulationError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(Self::new(start, end, v_max))),
            (None, None) => Ok(None),
            (start, end) => Err(SimulationError::InvalidSlowZone(format!(
                "start {:?} and end {:?} must be given together",
                start, end
            ))),
        }
    }
}
