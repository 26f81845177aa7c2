//! Core data models for hazard-aware routing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const MIN_HAZARD_LEVEL: u8 = 1;
pub const MAX_HAZARD_LEVEL: u8 = 10;
pub const MIN_HAZARD_RADIUS_M: f64 = 1.0;
pub const MAX_HAZARD_RADIUS_M: f64 = 1000.0;
pub const DEFAULT_HAZARD_RADIUS_M: f64 = 50.0;

/// Geographic coordinate (latitude, longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Construct a validated coordinate.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ModelError> {
        let coord = Self { lat, lon };
        coord.validate()?;
        Ok(coord)
    }

    /// Reject non-finite or out-of-range latitude/longitude.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(ModelError::LatitudeOutOfRange(self.lat));
        }
        if !self.lon.is_finite() || self.lon < -180.0 || self.lon > 180.0 {
            return Err(ModelError::LongitudeOutOfRange(self.lon));
        }
        Ok(())
    }
}

/// A circular area with a danger level, avoided above a caller-chosen
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardZone {
    /// Unique hazard ID; assigned by the store when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Danger level, 1 (mild) to 10 (severe).
    pub level: u8,
    #[serde(default = "default_hazard_name")]
    pub name: String,
    #[serde(default = "default_hazard_radius")]
    pub radius_m: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_hazard_name() -> String {
    "Hazard Zone".to_string()
}

fn default_hazard_radius() -> f64 {
    DEFAULT_HAZARD_RADIUS_M
}

impl HazardZone {
    /// Center of the hazard circle.
    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// Validate level, radius and center bounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.center().validate()?;
        if self.level < MIN_HAZARD_LEVEL || self.level > MAX_HAZARD_LEVEL {
            return Err(ModelError::LevelOutOfRange(self.level));
        }
        if !self.radius_m.is_finite()
            || self.radius_m < MIN_HAZARD_RADIUS_M
            || self.radius_m > MAX_HAZARD_RADIUS_M
        {
            return Err(ModelError::RadiusOutOfRange(self.radius_m));
        }
        Ok(())
    }
}

/// Travel mode of the road network a route is computed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Drive,
    Walk,
    Bike,
}

impl TravelMode {
    /// Average speed used for duration estimates, in km/h.
    pub fn average_speed_kmh(self) -> f64 {
        match self {
            TravelMode::Drive => 50.0,
            TravelMode::Walk => 5.0,
            TravelMode::Bike => 15.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Walk => "walk",
            TravelMode::Bike => "bike",
        }
    }
}
