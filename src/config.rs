use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Classification of a candidate path, driving its per-meter cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    /// Cross-country line: pole-to-pole links, road stitches, tie-ins.
    OffRoad,
    /// Line strung along an existing road.
    OnRoad,
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathType::OffRoad => write!(f, "off_road"),
            PathType::OnRoad => write!(f, "on_road"),
        }
    }
}

/// Per-meter line cost by path type. A type left out of the table cannot be
/// annotated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_road: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_road: Option<f64>,
}

impl CostTable {
    pub fn new(off_road: f64, on_road: f64) -> Self {
        Self { off_road: Some(off_road), on_road: Some(on_road) }
    }

    /// Look up the rate for `path_type`.
    pub fn cost_per_meter(&self, path_type: PathType) -> Result<f64> {
        match path_type {
            PathType::OffRoad => self.off_road,
            PathType::OnRoad => self.on_road,
        }
        .ok_or(PlanError::MissingPathCost(path_type))
    }

    fn entries(&self) -> impl Iterator<Item = (PathType, f64)> + '_ {
        [(PathType::OffRoad, self.off_road), (PathType::OnRoad, self.on_road)]
            .into_iter()
            .filter_map(|(path_type, rate)| rate.map(|rate| (path_type, rate)))
    }
}

/// Options recognized by a planning run. Distances are in projected meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Maximum drop-line length from a customer to its drop pole.
    pub max_distance: f64,
    /// Maximum number of customers served by one drop pole.
    pub max_count_per_facility: usize,
    /// Maximum gap bridged between two disjoint roads.
    pub link_max_length: f64,
    pub cost_per_meter_by_path_type: CostTable,
    /// Maximum spacing between consecutive poles along a distribution line.
    pub pole_max_interval: f64,
    /// Maximum distance from a battery to the drop poles it serves.
    pub battery_max_distance: f64,
    /// Solar panels required per kWh of daily demand.
    pub min_count_per_kwh: f64,
    /// Maximum distance from a street lamp to the customers it lights.
    pub lamp_max_distance: f64,
    /// Turning angles below this force a compact pole.
    pub min_angle_degrees: f64,
    /// Seed for the k-means split of oversized service groups.
    #[serde(default)]
    pub seed: u64,
}

impl PlanConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Reject out-of-range option values.
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("max_distance", self.max_distance),
            ("link_max_length", self.link_max_length),
            ("pole_max_interval", self.pole_max_interval),
            ("battery_max_distance", self.battery_max_distance),
            ("lamp_max_distance", self.lamp_max_distance),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlanError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.max_count_per_facility == 0 {
            return Err(PlanError::Config("max_count_per_facility must be at least 1".into()));
        }
        if !(self.min_count_per_kwh.is_finite() && self.min_count_per_kwh >= 0.0) {
            return Err(PlanError::Config(format!(
                "min_count_per_kwh must be non-negative, got {}", self.min_count_per_kwh
            )));
        }
        if !(0.0..=180.0).contains(&self.min_angle_degrees) {
            return Err(PlanError::Config(format!(
                "min_angle_degrees must lie in [0, 180], got {}", self.min_angle_degrees
            )));
        }
        for (path_type, rate) in self.cost_per_meter_by_path_type.entries() {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(PlanError::Config(format!(
                    "cost per meter for {path_type} must be positive, got {rate}"
                )));
            }
        }
        Ok(())
    }
}
