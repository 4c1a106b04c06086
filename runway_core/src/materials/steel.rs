//! Structural steel grades (ASTM) for built-up and rolled runway beams.
//!
//! Minimum specified strengths are the SI values published with each
//! ASTM standard.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Megapascals;

/// Modulus of elasticity of structural steel (MPa)
pub const STEEL_E_MPA: f64 = 200_000.0;

/// Shear modulus of structural steel (MPa)
pub const STEEL_G_MPA: f64 = 77_200.0;

/// Density of structural steel (kg/m³)
pub const STEEL_DENSITY_KG_M3: f64 = 7850.0;

/// ASTM steel grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelGrade {
    /// ASTM A36 carbon plate/shape steel
    #[serde(rename = "A36")]
    A36,
    /// ASTM A572 Grade 50 high-strength low-alloy steel
    #[serde(rename = "A572-50", alias = "A572Gr50")]
    A572Gr50,
    /// ASTM A992 wide-flange steel
    #[default]
    #[serde(rename = "A992")]
    A992,
    /// ASTM A913 Grade 65 quenched and self-tempered steel
    #[serde(rename = "A913-65", alias = "A913Gr65")]
    A913Gr65,
}

/// Mechanical properties for one steel grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelProperties {
    /// Minimum yield stress Fy (MPa)
    pub fy_mpa: f64,
    /// Minimum tensile strength Fu (MPa)
    pub fu_mpa: f64,
    /// Modulus of elasticity E (MPa)
    pub e_mpa: f64,
    /// Shear modulus G (MPa)
    pub g_mpa: f64,
    /// Density (kg/m³)
    pub density_kg_m3: f64,
}

impl SteelProperties {
    /// Yield stress as a typed value
    pub fn fy(&self) -> Megapascals {
        Megapascals(self.fy_mpa)
    }

    /// √(E/Fy), the slenderness scale used throughout AISC 360
    pub fn slenderness_scale(&self) -> f64 {
        (self.e_mpa / self.fy_mpa).sqrt()
    }
}

impl SteelGrade {
    /// All grades for UI selection
    pub const ALL: [SteelGrade; 4] = [
        SteelGrade::A36,
        SteelGrade::A572Gr50,
        SteelGrade::A992,
        SteelGrade::A913Gr65,
    ];

    /// Constant property record for this grade
    pub fn properties(&self) -> SteelProperties {
        let (fy_mpa, fu_mpa) = match self {
            SteelGrade::A36 => (250.0, 400.0),
            SteelGrade::A572Gr50 => (345.0, 450.0),
            SteelGrade::A992 => (345.0, 450.0),
            SteelGrade::A913Gr65 => (450.0, 550.0),
        };
        SteelProperties {
            fy_mpa,
            fu_mpa,
            e_mpa: STEEL_E_MPA,
            g_mpa: STEEL_G_MPA,
            density_kg_m3: STEEL_DENSITY_KG_M3,
        }
    }

    /// Short designation (e.g., "A572-50")
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::A36 => "A36",
            SteelGrade::A572Gr50 => "A572-50",
            SteelGrade::A992 => "A992",
            SteelGrade::A913Gr65 => "A913-65",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.to_uppercase().replace([' ', '_', '.'], "");
        match normalized.as_str() {
            "A36" => Ok(SteelGrade::A36),
            "A572-50" | "A57250" | "A572GR50" | "A572-GR50" => Ok(SteelGrade::A572Gr50),
            "A992" => Ok(SteelGrade::A992),
            "A913-65" | "A91365" | "A913GR65" | "A913-GR65" => Ok(SteelGrade::A913Gr65),
            _ => Err(CalcError::invalid_input(
                "material",
                s,
                "Unknown steel grade (expected A36, A572-50, A992 or A913-65)",
            )),
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ASTM {}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_table() {
        assert_eq!(SteelGrade::A36.properties().fy_mpa, 250.0);
        assert_eq!(SteelGrade::A572Gr50.properties().fu_mpa, 450.0);
        assert_eq!(SteelGrade::A913Gr65.properties().fy_mpa, 450.0);
        for grade in SteelGrade::ALL {
            let p = grade.properties();
            assert!(p.fu_mpa > p.fy_mpa);
            assert_eq!(p.e_mpa, STEEL_E_MPA);
        }
    }

    #[test]
    fn test_slenderness_scale() {
        let scale = SteelGrade::A992.properties().slenderness_scale();
        assert!((scale - 24.077).abs() < 1e-3);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("a572 gr50").unwrap(), SteelGrade::A572Gr50);
        assert_eq!(SteelGrade::from_str_flexible("A913-65").unwrap(), SteelGrade::A913Gr65);
        assert!(SteelGrade::from_str_flexible("S355").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SteelGrade::A572Gr50).unwrap();
        assert_eq!(json, "\"A572-50\"");
        let parsed: SteelGrade = serde_json::from_str("\"A572Gr50\"").unwrap();
        assert_eq!(parsed, SteelGrade::A572Gr50);
    }
}
