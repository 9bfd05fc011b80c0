//! Merit-order sorting.
//!
//! Orders the annotated fleet from cheapest to most expensive marginal cost.
//! The sort is stable, so plants with equal cost keep their input relative
//! order; the allocation search's first-found-wins tie-break relies on this
//! for deterministic results.

use crate::cost::CostedPlant;

/// Sort plants ascending by marginal cost. Zero-cost (wind) plants come
/// first; equal-cost plants retain their input order.
pub fn sort_by_merit(mut plants: Vec<CostedPlant>) -> Vec<CostedPlant> {
    plants.sort_by(|a, b| {
        a.marginal_cost
            .value()
            .partial_cmp(&b.marginal_cost.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    plants
}
