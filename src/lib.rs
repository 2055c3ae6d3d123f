//! # Nagel-Schreckenberg single-lane traffic
//!
//! Cellular-automaton model of one traffic lane. Cars occupy discrete cells
//! and every step all of them update velocity and position at once:
//!
//! 1. **Acceleration**: `v ← v + 1` when below the limit and the gap allows
//! 2. **Braking**: `v ← d` when `v` exceeds the gap `d` to the car ahead
//! 3. **Randomization**: `v ← v - 1` with probability `p`
//! 4. **Motion**: advance `v` cells
//!
//! Two topologies are supported: a closed loop (constant car count) and an
//! open lane fed at cell 0 and drained past the last cell.
//!
//! ## Usage Example
//!
//! ```
//! use nasch::{CarCount, SimulationConfig, Simulator};
//!
//! let config = SimulationConfig::circular(100, 5, 0.3, CarCount::Density(0.2)).with_seed(7);
//! let mut sim = Simulator::new(config)?;
//! let trace = sim.run(50)?;
//! assert_eq!(trace.len(), 51);
//! assert!(trace.occupied_counts().iter().all(|&n| n == 20));
//! # Ok::<(), nasch::SimulationError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod boundary; // Circular / bottleneck policies
pub mod engine;   // Simultaneous four-rule update
pub mod lane;     // Cell storage and initialization
pub mod rng;      // Seeded random source
pub mod trace;    // Space-time history
/// Python bindings for notebook and plotting code.
#[cfg(feature = "python-bindings")]
pub mod python_bindings;

// Re-exports for convenience
pub use boundary::{Boundary, BoundaryKind, InjectionPolicy, SlowZone};
pub use engine::{StepOutcome, UpdateEngine};
pub use lane::{Cell, Lane, LaneBuffer, Velocity, EMPTY};
pub use rng::SimRng;
pub use trace::Trace;

use thiserror::Error;
use tracing::{debug, trace};

/// How many cars start on a closed loop
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum CarCount {
    /// Exactly this many cars
    Exact(usize),
    /// Fraction of occupied cells; resolves to `round(rho * L)` cars
    Density(f64),
}

impl CarCount {
    /// Resolve to a car count on a lane of `length` cells
    pub fn resolve(&self, length: usize) -> Result<usize, SimulationError> {
        match *self {
            CarCount::Exact(cars) if cars <= length => Ok(cars),
            CarCount::Exact(cars) => Err(SimulationError::InvalidDensity(format!(
                "{} cars do not fit on {} cells",
                cars, length
            ))),
            CarCount::Density(rho) if (0.0..=1.0).contains(&rho) => {
                Ok((rho * length as f64).round() as usize)
            }
            CarCount::Density(rho) => Err(SimulationError::InvalidDensity(format!(
                "density {} outside [0, 1]",
                rho
            ))),
        }
    }
}

/// Boundary section of a run configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum BoundaryConfig {
    /// Closed loop seeded with a fixed number of cars
    Circular {
        /// Cars placed at t = 0 (ignored when an initial state is given)
        cars: CarCount,
    },
    /// Open lane, initially empty
    Bottleneck {
        /// Entry policy at cell 0
        injection: InjectionPolicy,
        /// Optional reduced-speed region
        slow_zone: Option<SlowZone>,
    },
}

impl BoundaryConfig {
    /// Topology tag
    pub fn kind(&self) -> BoundaryKind {
        match self {
            BoundaryConfig::Circular { .. } => BoundaryKind::Circular,
            BoundaryConfig::Bottleneck { .. } => BoundaryKind::Bottleneck,
        }
    }
}

/// Configuration parameters for one run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SimulationConfig {
    /// Lane length L
    pub length: usize,

    /// Global speed limit
    pub v_max: Velocity,

    /// Random braking probability p
    pub braking: f64,

    /// Topology and its parameters
    pub boundary: BoundaryConfig,

    /// Seed for the random source
    pub seed: u64,

    /// Steps run before the first snapshot is recorded
    pub warmup: usize,

    /// Explicit cells at t = 0 instead of the topology's default placement
    pub initial_state: Option<Vec<Cell>>,
}

impl SimulationConfig {
    /// Closed loop with `cars` cars at random cells
    pub fn circular(length: usize, v_max: Velocity, braking: f64, cars: CarCount) -> Self {
        Self::with_boundary(length, v_max, braking, BoundaryConfig::Circular { cars })
    }

    /// Open lane fed according to `injection`
    pub fn bottleneck(
        length: usize,
        v_max: Velocity,
        braking: f64,
        injection: InjectionPolicy,
    ) -> Self {
        Self::with_boundary(
            length,
            v_max,
            braking,
            BoundaryConfig::Bottleneck {
                injection,
                slow_zone: None,
            },
        )
    }

    fn with_boundary(length: usize, v_max: Velocity, braking: f64, boundary: BoundaryConfig) -> Self {
        Self {
            length,
            v_max,
            braking,
            boundary,
            seed: rng::DEFAULT_SEED,
            warmup: 0,
            initial_state: None,
        }
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run `warmup` unrecorded steps before the first snapshot
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Start from explicit cells
    pub fn with_initial_state(mut self, cells: Vec<Cell>) -> Self {
        self.initial_state = Some(cells);
        self
    }

    /// Add a reduced-speed region (open lane only; ignored on a loop)
    pub fn with_slow_zone(mut self, zone: SlowZone) -> Self {
        if let BoundaryConfig::Bottleneck { slow_zone, .. } = &mut self.boundary {
            *slow_zone = Some(zone);
        }
        self
    }

    /// Check every parameter, failing on the first violation
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.length == 0 {
            return Err(SimulationError::InvalidLaneLength(self.length));
        }
        if self.v_max <= 0 {
            return Err(SimulationError::InvalidVelocityBound(self.v_max));
        }
        check_probability("braking", self.braking)?;

        match &self.boundary {
            BoundaryConfig::Circular { cars } => {
                if self.initial_state.is_none() {
                    cars.resolve(self.length)?;
                }
            }
            BoundaryConfig::Bottleneck {
                injection,
                slow_zone,
            } => {
                check_probability("injection", injection.probability())?;
                if let Some(zone) = slow_zone {
                    self.validate_slow_zone(zone)?;
                }
            }
        }

        if let Some(cells) = &self.initial_state {
            if cells.len() != self.length {
                return Err(SimulationError::InvalidInitialState(format!(
                    "{} cells given for a lane of {}",
                    cells.len(),
                    self.length
                )));
            }
            Lane::from_cells(cells.clone(), self.v_max)?;
        }

        Ok(())
    }

    fn validate_slow_zone(&self, zone: &SlowZone) -> Result<(), SimulationError> {
        if zone.start > zone.end || zone.end >= self.length {
            return Err(SimulationError::InvalidSlowZone(format!(
                "cells {}..={} not inside a lane of {}",
                zone.start, zone.end, self.length
            )));
        }
        if zone.v_max < 1 || zone.v_max > self.v_max {
            return Err(SimulationError::InvalidSlowZone(format!(
                "zone limit {} outside [1, {}]",
                zone.v_max, self.v_max
            )));
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidProbability { name, value })
    }
}

/// Errors that can occur during simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Lane has no cells
    #[error("Invalid lane length {0}: must be positive")]
    InvalidLaneLength(usize),

    /// Speed limit is not positive
    #[error("Invalid velocity bound {0}: must be positive")]
    InvalidVelocityBound(Velocity),

    /// Braking or injection probability outside [0, 1]
    #[error("Invalid {name} probability {value}: must lie in [0, 1]")]
    InvalidProbability {
        /// Which probability
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Car count or density does not fit the lane
    #[error("Invalid density: {0}")]
    InvalidDensity(String),

    /// Unrecognised boundary tag
    #[error("Unknown boundary kind '{0}': expected 'circular' or 'bottleneck'")]
    UnknownBoundary(String),

    /// Explicit initial cells inconsistent with the lane
    #[error("Invalid initial state: {0}")]
    InvalidInitialState(String),

    /// Slow zone outside the lane or with an unusable limit
    #[error("Invalid slow zone: {0}")]
    InvalidSlowZone(String),

    /// Two cars were written to the same cell in one step
    #[error("Collision at cell {cell}")]
    Collision {
        /// Cell written twice
        cell: usize,
    },
}

/// Simulation driver
///
/// Owns the live lane, the update engine and the random stream of one run.
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    engine: UpdateEngine,
    lane: Lane,
    rng: SimRng,
    steps_taken: usize,
}

impl Simulator {
    /// Validate `config`, build the t = 0 lane and run the warm-up
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut rng = SimRng::from_seed_u64(config.seed);
        let (boundary, lane) = match &config.boundary {
            BoundaryConfig::Circular { cars } => {
                let lane = match &config.initial_state {
                    Some(cells) => Lane::from_cells(cells.clone(), config.v_max)?,
                    None => lane::init::circular(config.length, cars.resolve(config.length)?, &mut rng)?,
                };
                (Boundary::Circular, lane)
            }
            BoundaryConfig::Bottleneck {
                injection,
                slow_zone,
            } => {
                let lane = match &config.initial_state {
                    Some(cells) => Lane::from_cells(cells.clone(), config.v_max)?,
                    None => lane::init::bottleneck(config.length),
                };
                let boundary = Boundary::Bottleneck {
                    injection: *injection,
                    slow_zone: *slow_zone,
                };
                (boundary, lane)
            }
        };

        debug!(
            boundary = %boundary.kind(),
            length = config.length,
            v_max = config.v_max,
            braking = config.braking,
            seed = config.seed,
            cars = lane.car_count(),
            "Lane initialised"
        );

        let engine = UpdateEngine::new(config.v_max, config.braking, boundary);
        let mut simulator = Self {
            config,
            engine,
            lane,
            rng,
            steps_taken: 0,
        };

        for _ in 0..simulator.config.warmup {
            simulator.step()?;
        }
        if simulator.config.warmup > 0 {
            debug!(
                warmup = simulator.config.warmup,
                cars = simulator.lane.car_count(),
                max_velocity = ?simulator.lane.max_velocity(),
                "Warm-up complete"
            );
        }

        Ok(simulator)
    }

    /// Advance one step and return the new lane
    pub fn step(&mut self) -> Result<&Lane, SimulationError> {
        let outcome = self.engine.step(&self.lane, &mut self.rng)?;
        self.steps_taken += 1;
        trace!(
            step = self.steps_taken,
            cars = outcome.lane.car_count(),
            exited = outcome.exited,
            injected = outcome.injected,
            "Step"
        );
        self.lane = outcome.lane;
        Ok(&self.lane)
    }

    /// Record the current lane, then step `steps` times recording each result.
    ///
    /// The returned trace has `steps + 1` rows.
    pub fn run(&mut self, steps: usize) -> Result<Trace, SimulationError> {
        let mut history = Trace::with_capacity(steps + 1);
        history.push(self.lane.clone());
        for _ in 0..steps {
            let lane = self.step()?.clone();
            history.push(lane);
        }
        Ok(history)
    }

    /// Current lane
    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    /// Steps taken so far, warm-up included
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}

/// Build a simulator for `config` and record `steps` steps
pub fn run(config: &SimulationConfig, steps: usize) -> Result<Trace, SimulationError> {
    Simulator::new(config.clone())?.run(steps)
}
