//! Semantic unit types for site characteristics and model parameters
//!
//! Newtype wrappers keep temperatures, water depths, lengths and angles from
//! being mixed up at API boundaries. The daily/monthly arrays inside a
//! [`GridCell`](crate::grid::GridCell) stay raw `f64` so the hot loop is
//! allocation- and wrapper-free.
//!
//! # Design Philosophy
//! - All quantities are `f64`; climate grids arrive as double-precision matrices
//! - `Deref` to the inner value for arithmetic in formulas
//! - Total ordering via `Ord` (NaN sorts above every value)
//! - Serde serializes each unit as its bare number
//!
//! # Usage
//! ```
//! use stash_core::core_types::units::{Celsius, Millimeters};
//!
//! let t = Celsius::new(12.5);
//! assert!(*t > 10.0);
//!
//! let capacity = Millimeters::new(150.0);
//! assert_eq!(capacity.clamp_storage(Millimeters::new(200.0)), capacity);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Sub};

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Degrees above this threshold, floored at zero
    ///
    /// This is the growing-degree contribution of `temperature` for a day.
    #[inline]
    #[must_use]
    pub fn excess(self, temperature: f64) -> f64 {
        (temperature - self.0).max(0.0)
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// WATER DEPTH
// ============================================================================

/// Water depth in millimetres (equivalently kg/m² of water)
///
/// Used for soil storage, field capacity and spin-up tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millimeters(f64);

impl Eq for Millimeters {}

impl PartialOrd for Millimeters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Millimeters {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Millimeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Millimeters {
    /// Empty store
    pub const ZERO: Millimeters = Millimeters(0.0);

    /// Create a new depth
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millimeters(value)
    }

    /// Clamp a stored amount into `[0, self]`, treating `self` as a capacity
    ///
    /// A non-positive or NaN capacity means "no storage" and always yields zero.
    #[inline]
    #[must_use]
    pub fn clamp_storage(self, amount: Millimeters) -> Millimeters {
        if self.0.is_nan() || self.0 <= 0.0 {
            return Millimeters::ZERO;
        }
        Millimeters(amount.0.clamp(0.0, self.0))
    }
}

impl From<f64> for Millimeters {
    fn from(v: f64) -> Self {
        Millimeters(v)
    }
}

impl From<Millimeters> for f64 {
    fn from(m: Millimeters) -> f64 {
        m.0
    }
}

impl Add for Millimeters {
    type Output = Millimeters;
    fn add(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Millimeters;
    fn sub(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 - rhs.0)
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} mm", self.0)
    }
}

// ============================================================================
// ELEVATION
// ============================================================================

/// Height above sea level in metres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Sea level
    pub const SEA_LEVEL: Meters = Meters(0.0);

    /// Create a new elevation
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} m", self.0)
    }
}

// ============================================================================
// ANGLES
// ============================================================================

/// Geographic angle in decimal degrees (latitude or longitude)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Degrees {
    /// Create a new angle
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees(v)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}°", self.0)
    }
}

// ============================================================================
// DIMENSIONLESS
// ============================================================================

/// Dimensionless fraction clamped to `[0, 1]` (e.g. sunshine fraction)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f64);

impl Deref for Fraction {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fraction {
    /// Create a fraction, clamping into `[0, 1]`
    ///
    /// NaN is mapped to zero.
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Fraction(0.0);
        }
        Fraction(value.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
