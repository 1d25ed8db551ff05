//! Reference monthly climates
//!
//! Long-term monthly normals for a handful of contrasting climate types.
//! Used to build synthetic grids for demos and for scenario tests.

use super::drivers::MonthlyDrivers;
use crate::core_types::{Celsius, Fraction, MONTHS_PER_YEAR};

/// Monthly normals for one reference location
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatePreset {
    /// Human readable name
    pub name: String,
    /// Representative latitude (degrees north)
    pub latitude: f64,
    /// Representative elevation (m)
    pub elevation: f64,
    /// Plant-available water capacity typical of the region's soils (mm)
    pub field_capacity: f64,
    /// Mean monthly temperature, Jan..Dec
    pub monthly_temps: [Celsius; MONTHS_PER_YEAR],
    /// Monthly precipitation totals (mm), Jan..Dec
    pub monthly_precip: [f64; MONTHS_PER_YEAR],
    /// Mean monthly sunshine fraction, Jan..Dec
    pub monthly_sunshine: [Fraction; MONTHS_PER_YEAR],
}

impl ClimatePreset {
    /// Boreal forest - long cold winters, short mild summers
    #[must_use]
    pub fn boreal() -> Self {
        Self::from_raw(
            "Boreal",
            62.0,
            150.0,
            120.0,
            [-12.0, -11.5, -6.0, 0.5, 7.5, 13.0, 16.0, 14.0, 8.5, 2.5, -4.0, -9.0],
            [35.0, 25.0, 25.0, 30.0, 40.0, 55.0, 75.0, 75.0, 60.0, 55.0, 50.0, 40.0],
            [0.15, 0.25, 0.35, 0.40, 0.45, 0.45, 0.45, 0.40, 0.35, 0.25, 0.15, 0.10],
        )
    }

    /// Temperate oceanic - mild, wet all year
    #[must_use]
    pub fn temperate() -> Self {
        Self::from_raw(
            "Temperate",
            52.0,
            50.0,
            150.0,
            [3.5, 4.0, 6.0, 8.5, 12.0, 15.0, 17.0, 16.5, 14.0, 10.5, 6.5, 4.5],
            [70.0, 50.0, 55.0, 50.0, 55.0, 55.0, 60.0, 65.0, 60.0, 75.0, 80.0, 75.0],
            [0.20, 0.25, 0.30, 0.38, 0.40, 0.40, 0.40, 0.40, 0.36, 0.30, 0.22, 0.18],
        )
    }

    /// Mediterranean - hot dry summers, mild wet winters
    #[must_use]
    pub fn mediterranean() -> Self {
        Self::from_raw(
            "Mediterranean",
            38.0,
            200.0,
            100.0,
            [10.0, 11.0, 13.0, 15.0, 19.0, 23.0, 26.0, 26.0, 23.0, 19.0, 14.0, 11.0],
            [90.0, 80.0, 60.0, 50.0, 30.0, 10.0, 3.0, 5.0, 25.0, 70.0, 100.0, 110.0],
            [0.50, 0.55, 0.60, 0.62, 0.70, 0.80, 0.88, 0.85, 0.75, 0.60, 0.50, 0.45],
        )
    }

    /// Tropical rainforest - hot and wet, small seasonal cycle
    #[must_use]
    pub fn tropical() -> Self {
        Self::from_raw(
            "Tropical",
            -3.0,
            80.0,
            200.0,
            [26.5, 26.5, 26.8, 27.0, 27.0, 26.5, 26.2, 26.5, 27.0, 27.2, 27.0, 26.8],
            [260.0, 280.0, 300.0, 280.0, 220.0, 120.0, 90.0, 60.0, 80.0, 120.0, 180.0, 230.0],
            [0.35, 0.35, 0.38, 0.40, 0.45, 0.50, 0.55, 0.58, 0.55, 0.48, 0.42, 0.38],
        )
    }

    /// Hot desert - very little rain, high sunshine
    #[must_use]
    pub fn arid() -> Self {
        Self::from_raw(
            "Arid",
            24.0,
            400.0,
            60.0,
            [16.0, 18.0, 22.0, 26.0, 30.0, 33.0, 34.0, 33.5, 31.0, 27.0, 21.0, 17.0],
            [5.0, 4.0, 6.0, 3.0, 2.0, 0.0, 0.0, 1.0, 1.0, 3.0, 4.0, 6.0],
            [0.80, 0.82, 0.84, 0.86, 0.88, 0.92, 0.92, 0.90, 0.88, 0.86, 0.82, 0.80],
        )
    }

    /// All built-in presets
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::boreal(),
            Self::temperate(),
            Self::mediterranean(),
            Self::tropical(),
            Self::arid(),
        ]
    }

    /// Look up a preset by (case-insensitive) name
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "boreal" => Some(Self::boreal()),
            "temperate" | "oceanic" => Some(Self::temperate()),
            "mediterranean" | "med" => Some(Self::mediterranean()),
            "tropical" | "rainforest" => Some(Self::tropical()),
            "arid" | "desert" => Some(Self::arid()),
            _ => None,
        }
    }

    /// Monthly drivers of this preset
    #[must_use]
    pub fn drivers(&self) -> MonthlyDrivers {
        MonthlyDrivers {
            temperature: self.monthly_temps.map(|t| *t),
            precipitation: self.monthly_precip,
            sunshine: self.monthly_sunshine.map(|s| *s),
        }
    }

    fn from_raw(
        name: &str,
        latitude: f64,
        elevation: f64,
        field_capacity: f64,
        temps: [f64; MONTHS_PER_YEAR],
        precip: [f64; MONTHS_PER_YEAR],
        sunshine: [f64; MONTHS_PER_YEAR],
    ) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            elevation,
            field_capacity,
            monthly_temps: temps.map(Celsius::new),
            monthly_precip: precip,
            monthly_sunshine: sunshine.map(Fraction::new),
        }
    }
}
