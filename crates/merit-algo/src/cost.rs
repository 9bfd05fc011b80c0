//! Marginal-cost annotation and wind derating.
//!
//! Turns the raw fleet into [`CostedPlant`]s carrying the euro/MWh cost of
//! producing one unit of electricity and, for wind turbines, the capacity
//! derated by the hour's wind availability. Costs are computed once here and
//! never recomputed mid-search.

use merit_core::units::{EuroPerMwh, Megawatts};
use merit_core::{FuelPrices, PlantKind, Powerplant};

/// Tolerance under which a derated capacity is snapped to the nearest
/// integer, so payloads with whole-number pmax values do not pick up float
/// noise from the percentage multiply.
const INTEGRAL_SNAP_EPS: f64 = 1e-9;

/// A plant annotated with its marginal cost and effective capacity.
///
/// `source_index` is the plant's position in the request fleet; it survives
/// the merit-order sort so results can be projected back to input order.
#[derive(Debug, Clone)]
pub struct CostedPlant {
    pub name: String,
    pub kind: PlantKind,
    /// Cost of producing 1 MWh from this plant
    pub marginal_cost: EuroPerMwh,
    /// Minimum stable output when switched on
    pub pmin: Megawatts,
    /// Maximum output after wind derating
    pub effective_pmax: Megawatts,
    /// Position of this plant in the request fleet
    pub source_index: usize,
}

/// Annotate every plant in the fleet with its marginal cost and effective
/// capacity.
///
/// - gas-fired: `gas_price / efficiency`
/// - turbojet: `kerosine_price / efficiency`
/// - wind turbine: zero cost, `pmax * wind% / 100` capacity
///
/// The CO2 price in `fuels` is deliberately not part of any formula.
/// Inputs are assumed validated; no errors originate here.
pub fn annotate(
    plants: &[Powerplant],
    fuels: &FuelPrices,
    integral_outputs: bool,
) -> Vec<CostedPlant> {
    plants
        .iter()
        .enumerate()
        .map(|(source_index, plant)| {
            let (marginal_cost, effective_pmax) = match plant.kind {
                PlantKind::GasFired => (
                    EuroPerMwh(fuels.gas.value() / plant.efficiency),
                    plant.pmax,
                ),
                PlantKind::Turbojet => (
                    EuroPerMwh(fuels.kerosine.value() / plant.efficiency),
                    plant.pmax,
                ),
                PlantKind::WindTurbine => {
                    let derated = plant.pmax.value() * fuels.wind.as_fraction();
                    (EuroPerMwh(0.0), Megawatts(snap(derated, integral_outputs)))
                }
            };

            CostedPlant {
                name: plant.name.clone(),
                kind: plant.kind,
                marginal_cost,
                pmin: plant.pmin,
                effective_pmax,
                source_index,
            }
        })
        .collect()
}

/// Round a derated capacity when integral outputs are requested, or when it
/// already sits within float noise of an integer.
fn snap(value: f64, integral_outputs: bool) -> f64 {
    if integral_outputs || (value - value.round()).abs() < INTEGRAL_SNAP_EPS {
        value.round()
    } else {
        value
    }
}
