//! Space-time trace of a run
//!
//! One owned [`Lane`] per recorded instant, oldest first. Rows are copies,
//! never views of the live lane, so later steps cannot alter history.

use crate::lane::{Cell, Lane};

/// Ordered lane snapshots `t = 0..=steps`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Trace {
    frames: Vec<Lane>,
}

impl Trace {
    /// Empty trace with room for `capacity` snapshots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Append a snapshot
    pub fn push(&mut self, lane: Lane) {
        debug_assert!(
            self.frames.first().map_or(true, |first| first.len() == lane.len()),
            "lane length changed mid-trace"
        );
        self.frames.push(lane);
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Lane length, 0 for an empty trace
    pub fn width(&self) -> usize {
        self.frames.first().map_or(0, Lane::len)
    }

    /// Snapshot at time `t`
    pub fn get(&self, t: usize) -> Option<&Lane> {
        self.frames.get(t)
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<&Lane> {
        self.frames.last()
    }

    /// All snapshots, oldest first
    pub fn frames(&self) -> &[Lane] {
        &self.frames
    }

    /// Iterate snapshots, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Lane> {
        self.frames.iter()
    }

    /// `(len, width)` matrix of raw cell values
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.frames.iter().map(|lane| lane.cells().to_vec()).collect()
    }

    /// Cars on the lane at each recorded instant
    pub fn occupied_counts(&self) -> Vec<usize> {
        self.frames
            .iter()
            .map(|lane| lane.occupancy().count_ones())
            .collect()
    }

    /// Digest over every cell of every row.
    ///
    /// Two traces with equal fingerprints hold the same rows.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.width() as u64).to_le_bytes());
        for lane in &self.frames {
            for &cell in lane.cells() {
                hasher.update(&cell.to_le_bytes());
            }
        }
        hasher.finalize()
    }

    /// Text space-time diagram, one line per instant.
    ///
    /// `.` marks an empty cell; occupied cells show the velocity as a
    /// base-36 digit.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.len() * (self.width() + 1));
        for lane in &self.frames {
            for &cell in lane.cells() {
                out.push(render_cell(cell));
            }
            out.push('\n');
        }
        out
    }
}

fn render_cell(cell: Cell) -> char {
    u32::try_from(cell)
        .ok()
        .and_then(|v| char::from_digit(v, 36))
        .unwrap_or(if cell < 0 { '.' } else { '#' })
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Lane;
    type IntoIter = std::slice::Iter<'a, Lane>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut trace = Trace::with_capacity(2);
        trace.push(Lane::from_cells(vec![0, -1, -1, 0], 3).unwrap());
        trace.push(Lane::from_cells(vec![-1, 1, -1, 0], 3).unwrap());
        trace
    }

    #[test]
    fn rows_and_counts() {
        let trace = sample();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.width(), 4);
        assert_eq!(trace.rows(), vec![vec![0, -1, -1, 0], vec![-1, 1, -1, 0]]);
        assert_eq!(trace.occupied_counts(), vec![2, 2]);
    }

    #[test]
    fn render_marks_empty_cells() {
        assert_eq!(sample().render(), "0..0\n.1.0\n");
        assert_eq!(render_cell(12), 'c');
        assert_eq!(render_cell(40), '#');
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = sample();
        let b = sample();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut c = sample();
        c.push(Lane::empty(4));
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
