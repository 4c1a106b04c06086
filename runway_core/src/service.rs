//! # Crane Service
//!
//! CMAA 70 crane service classes and AISC 360 Appendix 3 fatigue detail
//! categories, bundled with the duty cycle that turns them into a design
//! number of stress-range cycles.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::service::{CraneClass, FatigueCategory, ServiceSpec};
//!
//! let service = ServiceSpec {
//!     crane_class: CraneClass::C,
//!     fatigue_category: FatigueCategory::D,
//!     design_life_years: 25.0,
//!     operating_days_per_year: 250.0,
//!     hours_per_day: 16.0,
//!     cycles_per_hour: 20.0,
//! };
//!
//! assert_eq!(service.design_cycles(), 2_000_000.0);
//! let fsr = FatigueCategory::D.allowable_stress_range_mpa(2.0e6).unwrap();
//! assert!(fsr > 48.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{require_positive, CalcError, CalcResult};

// ============================================================================
// Crane Service Class
// ============================================================================

/// CMAA 70 crane service class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CraneClass {
    /// Standby or infrequent service
    A,
    /// Light service
    B,
    /// Moderate service
    #[default]
    C,
    /// Heavy service
    D,
    /// Severe service
    E,
    /// Continuous severe service
    F,
}

impl CraneClass {
    /// All classes for UI selection
    pub const ALL: [CraneClass; 6] = [
        CraneClass::A,
        CraneClass::B,
        CraneClass::C,
        CraneClass::D,
        CraneClass::E,
        CraneClass::F,
    ];

    /// Vertical deflection limit as span/N
    pub fn deflection_limit(&self) -> f64 {
        match self {
            CraneClass::A | CraneClass::B | CraneClass::C => 600.0,
            CraneClass::D => 800.0,
            CraneClass::E | CraneClass::F => 1000.0,
        }
    }

    /// Upper end of the load-cycle range associated with the class
    pub fn max_cycles(&self) -> f64 {
        match self {
            CraneClass::A => 1.0e5,
            CraneClass::B => 5.0e5,
            CraneClass::C => 2.0e6,
            CraneClass::D => 1.0e7,
            CraneClass::E => 2.0e7,
            CraneClass::F => 5.0e7,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CraneClass::A => "Class A (Standby)",
            CraneClass::B => "Class B (Light)",
            CraneClass::C => "Class C (Moderate)",
            CraneClass::D => "Class D (Heavy)",
            CraneClass::E => "Class E (Severe)",
            CraneClass::F => "Class F (Continuous Severe)",
        }
    }
}

impl std::fmt::Display for CraneClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Fatigue Detail Category
// ============================================================================

/// AISC 360 Appendix 3 fatigue detail category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FatigueCategory {
    A,
    B,
    C,
    #[default]
    D,
    E,
    F,
}

impl FatigueCategory {
    /// All categories for UI selection
    pub const ALL: [FatigueCategory; 6] = [
        FatigueCategory::A,
        FatigueCategory::B,
        FatigueCategory::C,
        FatigueCategory::D,
        FatigueCategory::E,
        FatigueCategory::F,
    ];

    /// Fatigue constant Cf (Table A-3.1)
    pub fn constant(&self) -> f64 {
        match self {
            FatigueCategory::A => 250.0e8,
            FatigueCategory::B => 120.0e8,
            FatigueCategory::C => 44.0e8,
            FatigueCategory::D => 22.0e8,
            FatigueCategory::E => 11.0e8,
            FatigueCategory::F => 150.0e10,
        }
    }

    /// Threshold stress range F_TH (MPa)
    pub fn threshold_mpa(&self) -> f64 {
        match self {
            FatigueCategory::A => 165.0,
            FatigueCategory::B => 110.0,
            FatigueCategory::C => 69.0,
            FatigueCategory::D => 48.0,
            FatigueCategory::E => 31.0,
            FatigueCategory::F => 55.0,
        }
    }

    /// Allowable stress range F_SR (MPa) for `cycles` stress-range cycles.
    ///
    /// Categories A–E use eq. A-3-1M, category F (shear in welds) uses
    /// eq. A-3-2M. Neither may drop below the threshold.
    pub fn allowable_stress_range_mpa(&self, cycles: f64) -> CalcResult<f64> {
        if !cycles.is_finite() || cycles <= 0.0 {
            return Err(CalcError::formula_domain(
                "Fatigue",
                format!("number of stress cycles must be positive, got {}", cycles),
            ));
        }
        let fsr = match self {
            FatigueCategory::F => (self.constant() * 1.1e5 / cycles).powf(1.0 / 6.0),
            _ => (self.constant() * 329.0 / cycles).powf(1.0 / 3.0),
        };
        Ok(fsr.max(self.threshold_mpa()))
    }
}

impl std::fmt::Display for FatigueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Category {:?}", self)
    }
}

// ============================================================================
// Service Specification
// ============================================================================

/// Crane class, fatigue detail and duty cycle for one runway
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// CMAA service class
    pub crane_class: CraneClass,
    /// Governing fatigue detail category of the girder
    pub fatigue_category: FatigueCategory,
    /// Design life in years
    pub design_life_years: f64,
    /// Operating days per year
    pub operating_days_per_year: f64,
    /// Operating hours per day
    pub hours_per_day: f64,
    /// Loaded passes per hour
    pub cycles_per_hour: f64,
}

impl Default for ServiceSpec {
    fn default() -> Self {
        Self {
            crane_class: CraneClass::C,
            fatigue_category: FatigueCategory::D,
            design_life_years: 25.0,
            operating_days_per_year: 250.0,
            hours_per_day: 16.0,
            cycles_per_hour: 20.0,
        }
    }
}

impl ServiceSpec {
    /// Validate duty-cycle inputs.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("service.design_life_years", self.design_life_years)?;
        require_positive("service.operating_days_per_year", self.operating_days_per_year)?;
        require_positive("service.hours_per_day", self.hours_per_day)?;
        require_positive("service.cycles_per_hour", self.cycles_per_hour)?;
        if self.operating_days_per_year > 366.0 {
            return Err(CalcError::invalid_input(
                "service.operating_days_per_year",
                self.operating_days_per_year.to_string(),
                "Cannot exceed 366 days per year",
            ));
        }
        if self.hours_per_day > 24.0 {
            return Err(CalcError::invalid_input(
                "service.hours_per_day",
                self.hours_per_day.to_string(),
                "Cannot exceed 24 hours per day",
            ));
        }

        let cycles = self.design_cycles();
        if cycles > self.crane_class.max_cycles() {
            warn!(
                cycles,
                class = ?self.crane_class,
                class_max = self.crane_class.max_cycles(),
                "design cycle count exceeds the range of the selected crane class"
            );
        }
        Ok(())
    }

    /// Design number of stress-range cycles N = life × days × hours × cycles/hour
    pub fn design_cycles(&self) -> f64 {
        self.design_life_years * self.operating_days_per_year * self.hours_per_day * self.cycles_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deflection_limits() {
        assert_eq!(CraneClass::A.deflection_limit(), 600.0);
        assert_eq!(CraneClass::C.deflection_limit(), 600.0);
        assert_eq!(CraneClass::D.deflection_limit(), 800.0);
        assert_eq!(CraneClass::F.deflection_limit(), 1000.0);
    }

    #[test]
    fn test_allowable_range_category_d() {
        // (22e8 * 329 / 2e6)^(1/3) = 71.27 MPa
        let fsr = FatigueCategory::D.allowable_stress_range_mpa(2.0e6).unwrap();
        assert!((fsr - 71.27).abs() < 0.05);
    }

    #[test]
    fn test_allowable_range_threshold() {
        // Very high cycle counts fall to the threshold
        let fsr = FatigueCategory::B.allowable_stress_range_mpa(1.0e10).unwrap();
        assert_eq!(fsr, 110.0);
    }

    #[test]
    fn test_allowable_range_category_f() {
        // (150e10 * 1.1e5 / 2e6)^(1/6) = 66.0 MPa
        let fsr = FatigueCategory::F.allowable_stress_range_mpa(2.0e6).unwrap();
        assert!((fsr - 66.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_cycles_is_domain_error() {
        let err = FatigueCategory::C.allowable_stress_range_mpa(0.0).unwrap_err();
        assert_eq!(err.error_code(), "FORMULA_DOMAIN_ERROR");
    }

    #[test]
    fn test_design_cycles() {
        let spec = ServiceSpec::default();
        assert_eq!(spec.design_cycles(), 2.0e6);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let spec = ServiceSpec {
            hours_per_day: 30.0,
            ..ServiceSpec::default()
        };
        assert!(spec.validate().is_err());

        let spec = ServiceSpec {
            cycles_per_hour: 0.0,
            ..ServiceSpec::default()
        };
        assert!(spec.validate().is_err());
    }
}
