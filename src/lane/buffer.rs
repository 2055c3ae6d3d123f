//! Write side of the double-buffered step

use super::{Cell, Lane, Velocity, EMPTY};
use crate::SimulationError;

/// Next-state buffer for one step.
///
/// Starts fully empty and accepts exactly one write per cell. The current
/// lane is never touched while a step is in progress; all rule-4 motion and
/// all injections land here, and the buffer is sealed into the next
/// [`Lane`] once every car has moved.
#[derive(Debug)]
pub struct LaneBuffer {
    cells: Vec<Cell>,
}

impl LaneBuffer {
    /// Empty buffer of `length` cells
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![EMPTY; length],
        }
    }

    /// Number of cells
    /// True for a zero-length buffer
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether nothing has been written to `cell` yet
    pub fn is_free(&self, cell: usize) -> bool {
        self.cells[cell] == EMPTY
    }

    /// Write a car with `velocity` into `cell`.
    ///
    /// A second write to the same cell is a collision and is refused rather
    /// than overwriting the first car.
    pub fn place(&mut self, cell: usize, velocity: Velocity) -> Result<(), SimulationError> {
        debug_assert!(velocity >= 0, "negative velocity {velocity}");
        let slot = &mut self.cells[cell];
        if *slot != EMPTY {
            return Err(SimulationError::Collision { cell });
        }
        *slot = velocity;
        Ok(())
    }

    /// Seal the buffer into the next lane state
    pub fn into_lane(self) -> Lane {
        Lane::from_raw(self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_then_seal() {
        let mut buffer = LaneBuffer::new(4);
        buffer.place(1, 2).unwrap();
        buffer.place(3, 0).unwrap();
        assert!(buffer.is_free(0));
        assert!(!buffer.is_free(1));

        let lane = buffer.into_lane();
        assert_eq!(lane.cells(), &[-1, 2, -1, 0]);
    }

    #[test]
    fn second_write_to_same_cell_is_a_collision() {
        let mut buffer = LaneBuffer::new(3);
        buffer.place(2, 1).unwrap();

        let err = buffer.place(2, 0).unwrap_err();
        assert!(matches!(err, SimulationError::Collision { cell: 2 }));

        // First car survives the refused write
        assert_eq!(buffer.into_lane().cell(2), 1);
    }
}
