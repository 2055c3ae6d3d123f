//! Lane initialization at t = 0

use rand::seq::index;
use rand::Rng;

use super::Lane;
use crate::SimulationError;

/// Closed loop: `cars` distinct cells drawn uniformly without replacement,
/// each holding a stopped car.
pub fn circular<R: Rng + ?Sized>(
    length: usize,
    cars: usize,
    rng: &mut R,
) -> Result<Lane, SimulationError> {
    if cars > length {
        return Err(SimulationError::InvalidDensity(format!(
            "{} cars do not fit on {} cells",
            cars, length
        )));
    }

    let mut cells = vec![super::EMPTY; length];
    for idx in index::sample(rng, length, cars) {
        cells[idx] = 0;
    }
    Ok(Lane::from_raw(cells))
}

/// Open lane: starts empty, cars arrive only through injection.
pub fn bottleneck(length: usize) -> Lane {
    Lane::empty(length)
}
