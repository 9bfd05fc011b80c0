//! # merit-core: Dispatch Domain Model
//!
//! Provides the data structures shared by the merit workspace: the generating
//! fleet, the hourly dispatch request, unit-safe quantities, unified errors
//! and payload validation.
//!
//! ## Quick Start
//!
//! ```rust
//! use merit_core::*;
//!
//! let request = DispatchRequest {
//!     load: units::Megawatts(480.0),
//!     fuels: FuelPrices {
//!         gas: units::EuroPerMwh(13.4),
//!         kerosine: units::EuroPerMwh(50.8),
//!         co2: 20.0,
//!         wind: units::Percent(60.0),
//!     },
//!     powerplants: vec![
//!         Powerplant::new("gasfiredbig1", PlantKind::GasFired)
//!             .with_efficiency(0.53)
//!             .with_p_limits(100.0, 460.0),
//!         Powerplant::new("windpark1", PlantKind::WindTurbine)
//!             .with_p_limits(0.0, 150.0),
//!     ],
//! };
//!
//! let mut diag = diagnostics::Diagnostics::new();
//! validation::validate_request(&request, &mut diag);
//! assert!(!diag.has_errors());
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Newtype wrappers for MW, euro/MWh and percentages
//! - [`error`] - Unified [`MeritError`] / [`MeritResult`]
//! - [`diagnostics`] - Per-request warning/error collection
//! - [`validation`] - Field-level payload checks
//!
//! ## Integration with merit-algo
//!
//! The merit-algo crate consumes a validated [`DispatchRequest`] and produces
//! per-plant outputs; it never parses or validates payloads itself.

use serde::{Deserialize, Serialize};

pub mod diagnostics;
pub mod error;
pub mod units;
pub mod validation;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{MeritError, MeritResult};
pub use units::{EuroPerMwh, Megawatts, Percent};

/// Kind of generating unit.
///
/// Serde names match the historical payload values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantKind {
    /// Gas-fired plant; burns gas at the quoted euro/MWh price
    GasFired,
    /// Kerosine turbojet; fast but expensive
    Turbojet,
    /// Wind turbine; zero fuel cost, capacity derated by wind availability
    WindTurbine,
}

impl PlantKind {
    /// True for kinds that consume priced fuel and need an efficiency
    pub fn burns_fuel(&self) -> bool {
        !matches!(self, PlantKind::WindTurbine)
    }
}

impl std::fmt::Display for PlantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlantKind::GasFired => write!(f, "gasfired"),
            PlantKind::Turbojet => write!(f, "turbojet"),
            PlantKind::WindTurbine => write!(f, "windturbine"),
        }
    }
}

impl std::str::FromStr for PlantKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gasfired" => Ok(PlantKind::GasFired),
            "turbojet" => Ok(PlantKind::Turbojet),
            "windturbine" => Ok(PlantKind::WindTurbine),
            _ => Err(format!("Unknown powerplant type: {}", s)),
        }
    }
}

/// A generating unit in the fleet.
///
/// Names are identifiers but NOT keys: duplicate names are valid and the
/// corresponding plants are dispatched independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerplant {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlantKind,
    /// Fraction of fuel energy converted to electricity, in (0, 1].
    /// Unused for wind turbines.
    pub efficiency: f64,
    /// Minimum stable output when switched on (MW)
    pub pmin: Megawatts,
    /// Maximum output (MW)
    pub pmax: Megawatts,
}

impl Powerplant {
    /// Create a new plant with open limits and unit efficiency
    pub fn new(name: impl Into<String>, kind: PlantKind) -> Self {
        Self {
            name: name.into(),
            kind,
            efficiency: 1.0,
            pmin: Megawatts(0.0),
            pmax: Megawatts(0.0),
        }
    }

    /// Set output limits (in MW)
    pub fn with_p_limits(mut self, pmin: f64, pmax: f64) -> Self {
        self.pmin = Megawatts(pmin);
        self.pmax = Megawatts(pmax);
        self
    }

    /// Set conversion efficiency
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }
}

/// Fuel and CO2 prices plus wind availability for the dispatch hour.
///
/// Field names follow the historical payload exactly. The CO2 price is
/// accepted and carried through but not folded into any marginal cost; it is
/// a reserved extension point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelPrices {
    #[serde(rename = "gas(euro/MWh)")]
    pub gas: EuroPerMwh,
    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine: EuroPerMwh,
    #[serde(rename = "co2(euro/ton)")]
    pub co2: f64,
    #[serde(rename = "wind(%)")]
    pub wind: Percent,
}

/// One hourly dispatch request.
///
/// Constructed fresh per call from a deserialized payload; nothing is shared
/// across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Energy to generate during the hour (MWh)
    pub load: Megawatts,
    pub fuels: FuelPrices,
    pub powerplants: Vec<Powerplant>,
}

impl DispatchRequest {
    /// Total installed capacity of the fleet, before wind derating (MW)
    pub fn total_capacity(&self) -> Megawatts {
        Megawatts(self.powerplants.iter().map(|p| p.pmax.value()).sum())
    }

    /// Total of the minimum-on outputs across the fleet (MW)
    pub fn total_pmin(&self) -> Megawatts {
        Megawatts(self.powerplants.iter().map(|p| p.pmin.value()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "load": 480,
        "fuels": {
            "gas(euro/MWh)": 13.4,
            "kerosine(euro/MWh)": 50.8,
            "co2(euro/ton)": 20,
            "wind(%)": 60
        },
        "powerplants": [
            { "name": "gasfiredbig1", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460 },
            { "name": "tj1", "type": "turbojet", "efficiency": 0.3, "pmin": 0, "pmax": 16 },
            { "name": "windpark1", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 150 }
        ]
    }"#;

    #[test]
    fn test_payload_deserialization() {
        let request: DispatchRequest = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(request.load.value(), 480.0);
        assert_eq!(request.fuels.gas.value(), 13.4);
        assert_eq!(request.fuels.kerosine.value(), 50.8);
        assert_eq!(request.fuels.co2, 20.0);
        assert_eq!(request.fuels.wind.value(), 60.0);
        assert_eq!(request.powerplants.len(), 3);
        assert_eq!(request.powerplants[0].kind, PlantKind::GasFired);
        assert_eq!(request.powerplants[2].kind, PlantKind::WindTurbine);
        assert_eq!(request.powerplants[1].pmax.value(), 16.0);
    }

    #[test]
    fn test_payload_field_names_roundtrip() {
        let request: DispatchRequest = serde_json::from_str(PAYLOAD).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("gas(euro/MWh)"));
        assert!(json.contains("kerosine(euro/MWh)"));
        assert!(json.contains("co2(euro/ton)"));
        assert!(json.contains("wind(%)"));
        assert!(json.contains("\"type\":\"gasfired\""));
    }

    #[test]
    fn test_plant_kind_parsing() {
        assert_eq!("gasfired".parse::<PlantKind>().unwrap(), PlantKind::GasFired);
        assert_eq!("turbojet".parse::<PlantKind>().unwrap(), PlantKind::Turbojet);
        assert_eq!(
            "windturbine".parse::<PlantKind>().unwrap(),
            PlantKind::WindTurbine
        );
        assert!("coalfired".parse::<PlantKind>().is_err());
    }

    #[test]
    fn test_plant_kind_burns_fuel() {
        assert!(PlantKind::GasFired.burns_fuel());
        assert!(PlantKind::Turbojet.burns_fuel());
        assert!(!PlantKind::WindTurbine.burns_fuel());
    }

    #[test]
    fn test_plant_builder() {
        let plant = Powerplant::new("gasfiredbig1", PlantKind::GasFired)
            .with_efficiency(0.53)
            .with_p_limits(100.0, 460.0);

        assert_eq!(plant.name, "gasfiredbig1");
        assert_eq!(plant.efficiency, 0.53);
        assert_eq!(plant.pmin.value(), 100.0);
        assert_eq!(plant.pmax.value(), 460.0);
    }

    #[test]
    fn test_fleet_totals() {
        let request: DispatchRequest = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(request.total_capacity().value(), 460.0 + 16.0 + 150.0);
        assert_eq!(request.total_pmin().value(), 100.0);
    }
}
