//! Dispatch solution types and result projection.
//!
//! Maps the winning merit-order assignment vector back onto the request
//! fleet. The response preserves the ORIGINAL payload order, not the
//! merit-cost order the search worked in; each costed plant's `source_index`
//! carries the mapping, so duplicate plant names are handled without
//! ambiguity.

use serde::Serialize;

use crate::cost::CostedPlant;
use crate::search::Winner;

/// Output of one plant in the response, serialized as `{"name": ..., "p": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantDispatch {
    pub name: String,
    pub p: f64,
}

/// A complete dispatch: one entry per request plant, in request order.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSolution {
    /// Per-plant outputs, in the order the plants appeared in the request
    pub assignments: Vec<PlantDispatch>,
    /// Total generation cost in euro
    pub total_cost: f64,
    /// Number of search states dequeued to find the winner
    pub states_explored: usize,
}

impl DispatchSolution {
    /// Total power across all plants (MWh)
    pub fn total_power(&self) -> f64 {
        self.assignments.iter().map(|a| a.p).sum()
    }

    /// Output of the plant at a given request index
    pub fn power_of(&self, index: usize) -> Option<f64> {
        self.assignments.get(index).map(|a| a.p)
    }
}

/// Project a winning assignment back to request order.
///
/// Powers are rounded to whole MWh when integral outputs are requested, and
/// to 0.1 MWh granularity otherwise, matching the historical payload
/// contract.
pub fn project(plants: &[CostedPlant], winner: &Winner, integral_outputs: bool) -> DispatchSolution {
    debug_assert_eq!(plants.len(), winner.assignment.len());

    let mut assignments: Vec<PlantDispatch> = vec![
        PlantDispatch {
            name: String::new(),
            p: 0.0,
        };
        plants.len()
    ];

    for (plant, &power) in plants.iter().zip(winner.assignment.iter()) {
        assignments[plant.source_index] = PlantDispatch {
            name: plant.name.clone(),
            p: round_power(power, integral_outputs),
        };
    }

    DispatchSolution {
        assignments,
        total_cost: winner.total_cost,
        states_explored: winner.states_explored,
    }
}

fn round_power(power: f64, integral_outputs: bool) -> f64 {
    if integral_outputs {
        power.round()
    } else {
        (power * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::units::{EuroPerMwh, Megawatts};
    use merit_core::PlantKind;

    fn costed(name: &str, source_index: usize) -> CostedPlant {
        CostedPlant {
            name: name.to_string(),
            kind: PlantKind::GasFired,
            marginal_cost: EuroPerMwh(20.0),
            pmin: Megawatts(0.0),
            effective_pmax: Megawatts(100.0),
            source_index,
        }
    }

    #[test]
    fn test_projection_restores_request_order() {
        // Merit order put the wind plant (request index 2) first
        let plants = vec![costed("windpark1", 2), costed("gas1", 0), costed("tj1", 1)];
        let winner = Winner {
            assignment: vec![25.0, 60.0, 0.0],
            total_cost: 1200.0,
            states_explored: 4,
        };

        let solution = project(&plants, &winner, false);
        let names: Vec<&str> = solution
            .assignments
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["gas1", "tj1", "windpark1"]);
        assert_eq!(solution.power_of(2), Some(25.0));
        assert_eq!(solution.power_of(0), Some(60.0));
    }

    #[test]
    fn test_duplicate_names_tracked_by_index() {
        let plants = vec![costed("twin", 1), costed("twin", 0)];
        let winner = Winner {
            assignment: vec![30.0, 70.0],
            total_cost: 2000.0,
            states_explored: 3,
        };

        let solution = project(&plants, &winner, false);
        assert_eq!(solution.power_of(0), Some(70.0));
        assert_eq!(solution.power_of(1), Some(30.0));
    }

    #[test]
    fn test_rounding_modes() {
        let plants = vec![costed("gas1", 0)];
        let winner = Winner {
            assignment: vec![45.67],
            total_cost: 913.4,
            states_explored: 2,
        };

        let tenths = project(&plants, &winner, false);
        assert_eq!(tenths.power_of(0), Some(45.7));

        let integral = project(&plants, &winner, true);
        assert_eq!(integral.power_of(0), Some(46.0));
    }

    #[test]
    fn test_serialized_shape() {
        let plants = vec![costed("gas1", 0)];
        let winner = Winner {
            assignment: vec![50.0],
            total_cost: 1000.0,
            states_explored: 2,
        };

        let solution = project(&plants, &winner, false);
        let json = serde_json::to_string(&solution.assignments).unwrap();
        assert_eq!(json, r#"[{"name":"gas1","p":50.0}]"#);
    }
}
