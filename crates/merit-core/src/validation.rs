//! Field-level payload validation.
//!
//! Checks a deserialized [`DispatchRequest`] for values the allocation
//! pipeline assumes are in range: non-negative load and prices, wind in
//! [0, 100], efficiency in (0, 1] for fuel-consuming plants, and
//! `pmin <= pmax`. Issues are collected into a caller-supplied
//! [`Diagnostics`] so the transport layer can answer with the full error
//! list rather than the first failure.
//!
//! Duplicate plant names are intentionally NOT rejected: names are labels,
//! not keys, and plants sharing a name are dispatched independently.

use crate::diagnostics::Diagnostics;
use crate::{DispatchRequest, Powerplant};

/// Validate a dispatch request, recording every problem found.
///
/// Returns `true` when the request is dispatchable (no errors were added).
pub fn validate_request(request: &DispatchRequest, diag: &mut Diagnostics) -> bool {
    let before = diag.error_count();

    if !request.load.is_finite() || request.load.value() < 0.0 {
        diag.add_error("validation", "The `load` value must be a positive number.");
    }

    validate_fuels(request, diag);

    if request.powerplants.is_empty() {
        diag.add_error("validation", "The `powerplants` list must not be empty.");
    }
    for plant in &request.powerplants {
        validate_plant(plant, diag);
    }

    diag.error_count() == before
}

fn validate_fuels(request: &DispatchRequest, diag: &mut Diagnostics) {
    let fuels = &request.fuels;

    if !fuels.gas.is_finite() || fuels.gas.value() < 0.0 {
        diag.add_error(
            "validation",
            "The `fuels.gas(euro/MWh)` value must be a positive number.",
        );
    }
    if !fuels.kerosine.is_finite() || fuels.kerosine.value() < 0.0 {
        diag.add_error(
            "validation",
            "The `fuels.kerosine(euro/MWh)` value must be a positive number.",
        );
    }
    if !fuels.co2.is_finite() || fuels.co2 < 0.0 {
        diag.add_error(
            "validation",
            "The `fuels.co2(euro/ton)` value must be a positive number.",
        );
    }
    if !fuels.wind.is_finite() || fuels.wind.value() < 0.0 || fuels.wind.value() > 100.0 {
        diag.add_error(
            "validation",
            "The `fuels.wind(%)` value must be a number between 0 and 100.",
        );
    }
}

fn validate_plant(plant: &Powerplant, diag: &mut Diagnostics) {
    let entity = format!("plant '{}'", plant.name);

    if plant.name.is_empty() {
        diag.add_error("validation", "The `powerplants.name` value must not be empty.");
    }

    if plant.kind.burns_fuel()
        && (!plant.efficiency.is_finite() || plant.efficiency <= 0.0 || plant.efficiency > 1.0)
    {
        diag.add_error_with_entity(
            "validation",
            "The `powerplants.efficiency` value must be a number between 0 and 1.",
            &entity,
        );
    }

    if !plant.pmin.is_finite() || plant.pmin.value() < 0.0 {
        diag.add_error_with_entity(
            "validation",
            "The `powerplants.pmin` value must be a positive number.",
            &entity,
        );
    }
    if !plant.pmax.is_finite() || plant.pmax.value() < 0.0 {
        diag.add_error_with_entity(
            "validation",
            "The `powerplants.pmax` value must be a positive number.",
            &entity,
        );
    } else if plant.pmin.is_finite() && plant.pmin.value() > plant.pmax.value() {
        diag.add_error_with_entity(
            "validation",
            "The `powerplants.pmin` value must not exceed `pmax`.",
            &entity,
        );
    }
}
