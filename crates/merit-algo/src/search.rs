//! Breadth-first allocation search.
//!
//! Explores feasible power-assignment vectors for a merit-order-sorted fleet
//! and keeps the least-cost assignment whose outputs sum exactly to demand.
//!
//! The state space is walked with a FIFO work queue rather than recursion or
//! a priority structure: the set of reachable states is small (at most two
//! branches per below-pmin decision point), and breadth-first order visits
//! shallow on/off flips before deep ones, which also fixes the tie-break.
//! Each state is a fixed-size assignment vector plus a cursor naming the unit
//! currently being adjusted; branching clones the vector, so states are
//! immutable once enqueued.
//!
//! Invariant: every settled index of a dequeued state holds a value in
//! `{0} ∪ [pmin, effective_pmax]`. No state is ever enqueued with a value
//! strictly between 0 and pmin.

use std::collections::VecDeque;

use crate::cost::CostedPlant;
use crate::SolveError;

/// Tolerance for treating the remaining demand as zero.
pub(crate) const POWER_EPS: f64 = 1e-9;

/// The least-cost complete assignment found by [`search`].
///
/// `assignment` is aligned to the merit-sorted fleet, not the request order;
/// use each plant's `source_index` to project back.
#[derive(Debug, Clone)]
pub struct Winner {
    pub assignment: Vec<f64>,
    pub total_cost: f64,
    pub states_explored: usize,
}

/// One node of the search: per-unit outputs plus the unit under adjustment.
///
/// The cursor is signed because the search backs off past index 0 (and runs
/// off the right end) to signal a dead branch.
#[derive(Debug, Clone)]
struct AllocationState {
    assignment: Vec<f64>,
    cursor: isize,
}

/// Find the cheapest assignment whose outputs sum exactly to `load`.
///
/// `plants` must already be merit-order sorted. `step_limit` optionally
/// bounds the number of dequeued states; exhausting it is reported as
/// infeasibility, since the search is deterministic and a budgeted caller
/// cannot distinguish the two.
pub fn search(
    plants: &[CostedPlant],
    load: f64,
    step_limit: Option<usize>,
) -> Result<Winner, SolveError> {
    // Validation happens upstream; a bad load here is a programming error
    // and must not silently produce a wrong answer.
    if !load.is_finite() || load < 0.0 {
        return Err(SolveError::InvalidInput(format!(
            "load must be a non-negative finite number, got {load}"
        )));
    }

    let capacity: f64 = plants.iter().map(|p| p.effective_pmax.value()).sum();
    if load > capacity + POWER_EPS {
        return Err(SolveError::Infeasible(format!(
            "demand of {:.2} MWh exceeds the fleet's derated capacity of {:.2} MWh",
            load, capacity
        )));
    }

    let size = plants.len() as isize;
    let mut queue: VecDeque<AllocationState> = VecDeque::new();
    queue.push_back(AllocationState {
        assignment: vec![0.0; plants.len()],
        cursor: 0,
    });

    let mut best: Option<(Vec<f64>, f64)> = None;
    let mut states_explored = 0usize;

    while let Some(state) = queue.pop_front() {
        states_explored += 1;
        if let Some(limit) = step_limit {
            if states_explored > limit {
                return Err(SolveError::Infeasible(format!(
                    "search budget of {limit} states exhausted before a feasible allocation was found"
                )));
            }
        }

        let total: f64 = state.assignment.iter().sum();
        let remaining = load - total;

        if remaining.abs() <= POWER_EPS {
            // Complete candidate. Replace the best only on strictly lower
            // cost: ties go to the first candidate found, which the BFS
            // order and the stable merit sort make deterministic.
            let cost = total_cost(plants, &state.assignment);
            match &best {
                Some((_, best_cost)) if cost >= *best_cost => {}
                _ => best = Some((state.assignment, cost)),
            }
            continue;
        }

        if state.cursor < 0 || state.cursor >= size {
            continue;
        }
        let at = state.cursor as usize;
        let pmin = plants[at].pmin.value();
        let pmax = plants[at].effective_pmax.value();

        if remaining > 0.0 {
            // Underpowered: push this unit as hard as its band allows.
            if remaining >= pmax {
                branch(&mut queue, &state, at, pmax, 1);
            } else if remaining >= pmin {
                branch(&mut queue, &state, at, remaining, 1);
            } else {
                // Running this unit at all would overshoot. Either leave it
                // off and move on, or force it to its floor and back up to
                // shed the excess from a cheaper, already-settled unit.
                branch(&mut queue, &state, at, 0.0, 1);
                branch(&mut queue, &state, at, pmin, -1);
            }
        } else {
            // Overpowered: shed the excess from this unit.
            let excess = -remaining;
            let current = state.assignment[at];
            if excess >= pmax {
                branch(&mut queue, &state, at, 0.0, -1);
            } else if current - excess >= pmin {
                branch(&mut queue, &state, at, current - excess, -1);
            } else {
                // Reducing would land below pmin: switch the unit off, and
                // also try pinning it at its floor.
                branch(&mut queue, &state, at, 0.0, -1);
                if pmin != 0.0 {
                    branch(&mut queue, &state, at, pmin, -1);
                }
            }
        }
    }

    match best {
        Some((assignment, total_cost)) => Ok(Winner {
            assignment,
            total_cost,
            states_explored,
        }),
        None => Err(SolveError::Infeasible(
            "no combination of on/off and partial-load decisions matches the demand exactly"
                .to_string(),
        )),
    }
}

fn total_cost(plants: &[CostedPlant], assignment: &[f64]) -> f64 {
    plants
        .iter()
        .zip(assignment.iter())
        .map(|(plant, &p)| p * plant.marginal_cost.value())
        .sum()
}

fn branch(
    queue: &mut VecDeque<AllocationState>,
    parent: &AllocationState,
    at: usize,
    power: f64,
    step: isize,
) {
    let mut assignment = parent.assignment.clone();
    assignment[at] = power;
    queue.push_back(AllocationState {
        assignment,
        cursor: parent.cursor + step,
    });
}
