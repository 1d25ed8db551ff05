//! Static characteristics of a grid cell

use super::units::{Degrees, Meters, Millimeters};
use serde::{Deserialize, Serialize};

/// Geographic position of a cell centre
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude (degrees east)
    pub lon: Degrees,
    /// Latitude (degrees north)
    pub lat: Degrees,
}

impl Coordinates {
    /// Create coordinates from raw degrees
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: Degrees::new(lon),
            lat: Degrees::new(lat),
        }
    }
}

/// Soil and terrain properties that drive the water balance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteCharacteristics {
    /// Elevation above sea level
    pub elevation: Meters,
    /// Maximum plant-available soil water storage
    ///
    /// Zero or negative means the soil stores nothing.
    pub field_capacity: Millimeters,
    /// Soil moisture on the first simulated day
    ///
    /// `None` means unknown: the water balance is spun up to equilibrium.
    pub initial_moisture: Option<Millimeters>,
}

impl SiteCharacteristics {
    /// Site with known starting moisture
    #[must_use]
    pub fn new(elevation: f64, field_capacity: f64, initial_moisture: f64) -> Self {
        Self {
            elevation: Meters::new(elevation),
            field_capacity: Millimeters::new(field_capacity),
            initial_moisture: Some(Millimeters::new(initial_moisture)),
        }
    }

    /// Site whose starting moisture is unknown
    #[must_use]
    pub fn with_spin_up(elevation: f64, field_capacity: f64) -> Self {
        Self {
            elevation: Meters::new(elevation),
            field_capacity: Millimeters::new(field_capacity),
            initial_moisture: None,
        }
    }

    /// Whether the water balance must be spun up
    #[must_use]
    pub fn spin_up_required(&self) -> bool {
        self.initial_moisture.is_none()
    }
}
