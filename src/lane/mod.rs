//! Lane state
//!
//! A lane is a fixed-length row of cells. Each cell holds either
//! [`EMPTY`] or the velocity of the single anonymous car standing on it:
//! - No car identity is tracked; cars are distinguished by position only
//! - Length is fixed at construction and never changes
//! - A `Lane` is never mutated once built; the engine produces a fresh one
//!   each step through a [`LaneBuffer`]

mod buffer;
pub mod init;

pub use buffer::LaneBuffer;

use bitvec::prelude::*;

use crate::SimulationError;

/// Raw cell value: `-1` for empty, otherwise the occupying car's velocity
pub type Cell = i32;

/// Car velocity in cells per step
pub type Velocity = i32;

/// Marker for an unoccupied cell
pub const EMPTY: Cell = -1;

/// Immutable snapshot of one lane at one instant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Lane {
    cells: Vec<Cell>,
}

impl Lane {
    /// Lane of `length` empty cells
    pub fn empty(length: usize) -> Self {
        Self {
            cells: vec![EMPTY; length],
        }
    }

    /// Build a lane from explicit cell values.
    ///
    /// Every value must be [`EMPTY`] or lie in `[0, v_max]`.
    pub fn from_cells(cells: Vec<Cell>, v_max: Velocity) -> Result<Self, SimulationError> {
        if let Some((idx, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, &value)| value != EMPTY && !(0..=v_max).contains(&value))
        {
            return Err(SimulationError::InvalidInitialState(format!(
                "cell {} holds {}, expected -1 or a velocity in [0, {}]",
                idx, value, v_max
            )));
        }
        Ok(Self { cells })
    }

    pub(crate) fn from_raw(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-length lane
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw value of cell `idx`
    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// All raw cell values, left to right
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Velocity of the car on `idx`, if any
    pub fn velocity(&self, idx: usize) -> Option<Velocity> {
        match self.cells[idx] {
            EMPTY => None,
            v => Some(v),
        }
    }

    /// Occupied cell indices in ascending order
    pub fn car_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell != EMPTY)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of cars on the lane
    pub fn car_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Occupation numbers `n_i`: bit `i` is set iff cell `i` holds a car
    pub fn occupancy(&self) -> BitVec {
        self.cells.iter().map(|&cell| cell != EMPTY).collect()
    }

    /// Largest velocity present, `None` on an empty lane
    pub fn max_velocity(&self) -> Option<Velocity> {
        self.cells.iter().copied().filter(|&cell| cell != EMPTY).max()
    }
}
