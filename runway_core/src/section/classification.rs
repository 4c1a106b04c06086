//! Local-buckling classification per AISC 360-16 Table B4.1b.
//!
//! The classification is decided once when section properties are built;
//! the flexure check dispatches on the resulting [`FlexuralForm`] and never
//! re-derives it.

use serde::{Deserialize, Serialize};

use crate::materials::SteelProperties;

/// Width-to-thickness class of one plate element in flexure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementClass {
    Compact,
    Noncompact,
    Slender,
}

impl ElementClass {
    fn from_ratio(ratio: f64, compact_limit: f64, noncompact_limit: f64) -> Self {
        if ratio <= compact_limit {
            ElementClass::Compact
        } else if ratio <= noncompact_limit {
            ElementClass::Noncompact
        } else {
            ElementClass::Slender
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementClass::Compact => "compact",
            ElementClass::Noncompact => "noncompact",
            ElementClass::Slender => "slender",
        }
    }
}

/// Which chapter F provisions apply, selected by web slenderness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexuralForm {
    /// F2/F3: compact web (plastic moment available)
    CompactWeb,
    /// F4: noncompact web (web plastification factor Rpc)
    NoncompactWeb,
    /// F5: slender web (bending strength reduction Rpg)
    SlenderWeb,
}

impl FlexuralForm {
    /// AISC section reference
    pub fn code_reference(&self) -> &'static str {
        match self {
            FlexuralForm::CompactWeb => "AISC F2/F3",
            FlexuralForm::NoncompactWeb => "AISC F4",
            FlexuralForm::SlenderWeb => "AISC F5",
        }
    }
}

/// Limiting width-to-thickness ratios λp and λr
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlendernessLimits {
    pub flange_compact: f64,
    pub flange_noncompact: f64,
    pub web_compact: f64,
    pub web_noncompact: f64,
}

/// Classification of the flange and web of an I-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionClassification {
    /// bf / 2tf
    pub flange_ratio: f64,
    /// h / tw
    pub web_ratio: f64,
    /// Flange local buckling coefficient kc (built-up sections)
    pub kc: f64,
    pub limits: SlendernessLimits,
    pub flange: ElementClass,
    pub web: ElementClass,
}

impl SectionClassification {
    /// Classify a doubly symmetric I-section.
    ///
    /// `built_up` selects the welded-shape flange limit (case 11) over the
    /// rolled-shape limit (case 10).
    pub fn classify(
        flange_ratio: f64,
        web_ratio: f64,
        built_up: bool,
        steel: &SteelProperties,
    ) -> Self {
        let scale = steel.slenderness_scale();
        let kc = flange_buckling_kc(web_ratio);
        let fl = 0.7 * steel.fy_mpa;

        let flange_noncompact = if built_up {
            0.95 * (kc * steel.e_mpa / fl).sqrt()
        } else {
            1.0 * scale
        };

        let limits = SlendernessLimits {
            flange_compact: 0.38 * scale,
            flange_noncompact,
            web_compact: 3.76 * scale,
            web_noncompact: 5.70 * scale,
        };

        Self {
            flange_ratio,
            web_ratio,
            kc,
            flange: ElementClass::from_ratio(flange_ratio, limits.flange_compact, limits.flange_noncompact),
            web: ElementClass::from_ratio(web_ratio, limits.web_compact, limits.web_noncompact),
            limits,
        }
    }

    /// Chapter F form implied by the web class
    pub fn flexural_form(&self) -> FlexuralForm {
        match self.web {
            ElementClass::Compact => FlexuralForm::CompactWeb,
            ElementClass::Noncompact => FlexuralForm::NoncompactWeb,
            ElementClass::Slender => FlexuralForm::SlenderWeb,
        }
    }
}

/// kc = 4/√(h/tw), limited to 0.35 ≤ kc ≤ 0.76
pub fn flange_buckling_kc(web_ratio: f64) -> f64 {
    (4.0 / web_ratio.sqrt()).clamp(0.35, 0.76)
}
