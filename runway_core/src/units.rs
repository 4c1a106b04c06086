//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the runway engine. These are
//! plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Internal Units
//!
//! Everything inside the check engine is expressed in a single consistent set:
//! - Length: millimetres (mm)
//! - Force: newtons (N)
//! - Stress: megapascals (MPa = N/mm²)
//! - Moment: newton-millimetres (N·mm)
//!
//! Inputs arrive in the units an engineer writes on a crane data sheet
//! (metres, tonnes, kilonewtons, kg/m) and are converted once at the load
//! model boundary.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::units::{Meters, Millimeters, Tonnes, KiloNewtons};
//!
//! let span = Meters(4.5);
//! let span_mm: Millimeters = span.into();
//! assert_eq!(span_mm.0, 4500.0);
//!
//! let weight: KiloNewtons = Tonnes(10.0).weight();
//! assert!((weight.0 - 98.1).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard gravity used for mass-to-force conversion (m/s²)
pub const GRAVITY_M_S2: f64 = 9.81;

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Mass and Force Units
// ============================================================================

/// Mass in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl Tonnes {
    /// Weight of this mass under standard gravity
    pub fn weight(self) -> KiloNewtons {
        KiloNewtons(self.0 * GRAVITY_M_S2)
    }
}

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

// ============================================================================
// Stress and Line Load Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Linear mass in kilograms per metre (rails, beam self-weight)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMeter(pub f64);

/// Distributed load in newtons per millimetre (= kN/m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMm(pub f64);

impl KgPerMeter {
    /// Gravity line load of this linear mass
    pub fn line_load(self) -> NewtonsPerMm {
        // kg/m * m/s² = N/m, and N/m / 1000 = N/mm
        NewtonsPerMm(self.0 * GRAVITY_M_S2 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Tonnes);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KiloNewtonMeters);
impl_arithmetic!(Megapascals);
impl_arithmetic!(KgPerMeter);
impl_arithmetic!(NewtonsPerMm);
