//! # merit-algo: Cost-Minimal Power Allocation
//!
//! This crate turns a validated [`DispatchRequest`] into a feasible,
//! cost-minimal per-plant power assignment, or a structured infeasibility
//! report.
//!
//! ## Pipeline
//!
//! | Stage | Module | Contract |
//! |-------|--------|----------|
//! | Cost annotation | [`cost`] | marginal euro/MWh per plant, wind derating |
//! | Merit order | [`merit`] | stable ascending sort by marginal cost |
//! | Allocation search | [`search`] | breadth-first search for the cheapest exact match |
//! | Projection | [`solution`] | winning vector mapped back to request order |
//!
//! The whole pipeline is a pure, synchronous computation: every call builds
//! its own plant list and work queue, so [`DispatchSolver`] is freely
//! callable from concurrent threads with no locking.
//!
//! ## Example
//!
//! ```rust
//! use merit_algo::DispatchSolver;
//! use merit_core::units::{EuroPerMwh, Megawatts, Percent};
//! use merit_core::{DispatchRequest, FuelPrices, PlantKind, Powerplant};
//!
//! let request = DispatchRequest {
//!     load: Megawatts(50.0),
//!     fuels: FuelPrices {
//!         gas: EuroPerMwh(10.0),
//!         kerosine: EuroPerMwh(50.0),
//!         co2: 20.0,
//!         wind: Percent(60.0),
//!     },
//!     powerplants: vec![Powerplant::new("gas1", PlantKind::GasFired)
//!         .with_efficiency(0.5)
//!         .with_p_limits(0.0, 100.0)],
//! };
//!
//! let solution = DispatchSolver::new().solve(&request).unwrap();
//! assert_eq!(solution.power_of(0), Some(50.0));
//! assert_eq!(solution.total_cost, 1000.0);
//! ```

use merit_core::DispatchRequest;
use thiserror::Error;

pub mod cost;
pub mod merit;
pub mod search;
pub mod solution;

pub use cost::CostedPlant;
pub use search::Winner;
pub use solution::{DispatchSolution, PlantDispatch};

/// Errors produced by the allocation pipeline.
#[derive(Error, Debug)]
pub enum SolveError {
    /// No combination of on/off and partial-load decisions matches demand
    #[error("Infeasible dispatch: {0}")]
    Infeasible(String),

    /// An invariant that upstream validation guarantees was violated
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Unified dispatch solver.
///
/// Builder-style configuration, one fresh search per [`solve`](Self::solve)
/// call. Assumes the request has already passed
/// [`merit_core::validation::validate_request`]; the only checks performed
/// here are fail-fast invariants.
#[derive(Debug, Clone)]
pub struct DispatchSolver {
    integral_outputs: bool,
    step_limit: Option<usize>,
}

impl DispatchSolver {
    /// Create a solver with default settings: fractional outputs at 0.1 MWh
    /// granularity and no search budget.
    pub fn new() -> Self {
        Self {
            integral_outputs: false,
            step_limit: None,
        }
    }

    /// Round wind capacity before the search and response powers after it
    pub fn with_integral_outputs(mut self, integral: bool) -> Self {
        self.integral_outputs = integral;
        self
    }

    /// Bound the number of search states; exhaustion reports as infeasible
    pub fn with_step_limit(mut self, limit: Option<usize>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Get the configured integral-outputs flag
    pub fn integral_outputs(&self) -> bool {
        self.integral_outputs
    }

    /// Solve the dispatch for a validated request.
    pub fn solve(&self, request: &DispatchRequest) -> Result<DispatchSolution, SolveError> {
        let costed = cost::annotate(
            &request.powerplants,
            &request.fuels,
            self.integral_outputs,
        );
        let ordered = merit::sort_by_merit(costed);
        let winner = search::search(&ordered, request.load.value(), self.step_limit)?;
        Ok(solution::project(&ordered, &winner, self.integral_outputs))
    }
}

impl Default for DispatchSolver {
    fn default() -> Self {
        Self::new()
    }
}
