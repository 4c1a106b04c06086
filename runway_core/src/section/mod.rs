//! # Section Model
//!
//! Candidate cross-sections for a runway girder and their derived
//! properties. The optimizer works on a parametric welded I-section
//! ([`BuiltUpSection`]); an engineer may instead supply a rolled shape's
//! published properties ([`RolledShape`]) for a check-only run.
//!
//! All dimensions are millimetres; properties follow (mm², mm⁴, mm³, mm⁶).
//!
//! ## Example
//!
//! ```rust
//! use runway_core::section::{BuiltUpSection, SectionCandidate, FlexuralForm};
//! use runway_core::materials::SteelGrade;
//!
//! let candidate = SectionCandidate::BuiltUp(BuiltUpSection::new(400.0, 8.0, 200.0, 12.0));
//! let props = candidate.properties(SteelGrade::A992).unwrap();
//!
//! assert_eq!(props.depth_mm, 424.0);
//! assert_eq!(props.area_mm2, 2.0 * 200.0 * 12.0 + 400.0 * 8.0);
//! assert_eq!(props.flexural_form, FlexuralForm::CompactWeb);
//! ```

pub mod classification;

pub use classification::{
    flange_buckling_kc, ElementClass, FlexuralForm, SectionClassification, SlendernessLimits,
};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{SteelGrade, SteelProperties};

/// Fillet weld leg assumed between web and flange of a welded girder (mm)
pub const WEB_FLANGE_WELD_MM: f64 = 5.0;

/// Largest h/tw for a web without transverse stiffeners
pub const UNSTIFFENED_WEB_LIMIT: f64 = 260.0;

/// Largest web-to-compression-flange area ratio aw
pub const MAX_WEB_FLANGE_AREA_RATIO: f64 = 10.0;

// ============================================================================
// Candidates
// ============================================================================

/// Doubly symmetric welded I-section from four plate dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuiltUpSection {
    /// Clear web height between flanges, h (mm)
    pub web_height_mm: f64,
    /// Web thickness, tw (mm)
    pub web_thickness_mm: f64,
    /// Flange width, bf (mm)
    pub flange_width_mm: f64,
    /// Flange thickness, tf (mm)
    pub flange_thickness_mm: f64,
}

impl BuiltUpSection {
    pub fn new(web_height_mm: f64, web_thickness_mm: f64, flange_width_mm: f64, flange_thickness_mm: f64) -> Self {
        Self {
            web_height_mm,
            web_thickness_mm,
            flange_width_mm,
            flange_thickness_mm,
        }
    }

    /// Overall depth d = h + 2tf
    pub fn depth_mm(&self) -> f64 {
        self.web_height_mm + 2.0 * self.flange_thickness_mm
    }

    /// Geometric sanity: positive finite plates and a real flange outstand.
    pub fn validate(&self) -> CalcResult<()> {
        let dims = [
            ("web_height_mm", self.web_height_mm),
            ("web_thickness_mm", self.web_thickness_mm),
            ("flange_width_mm", self.flange_width_mm),
            ("flange_thickness_mm", self.flange_thickness_mm),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::degenerate_section(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if self.flange_width_mm <= self.web_thickness_mm {
            return Err(CalcError::degenerate_section(format!(
                "flange width {} mm must exceed web thickness {} mm",
                self.flange_width_mm, self.web_thickness_mm
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for BuiltUpSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PG {:.0}x{:.0} + 2-PL {:.0}x{:.0}",
            self.web_height_mm, self.web_thickness_mm, self.flange_width_mm, self.flange_thickness_mm
        )
    }
}

/// Published properties of a rolled I-shape (check only, never resized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledShape {
    /// Designation (e.g., "W410x46.1")
    pub label: String,
    pub depth_mm: f64,
    pub flange_width_mm: f64,
    pub flange_thickness_mm: f64,
    pub web_thickness_mm: f64,
    pub area_mm2: f64,
    pub ix_mm4: f64,
    pub iy_mm4: f64,
    pub sx_mm3: f64,
    pub sy_mm3: f64,
    pub zx_mm3: f64,
    pub zy_mm3: f64,
    pub j_mm4: f64,
    pub cw_mm6: f64,
    /// Design distance from outer flange face to web toe of fillet (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_des_mm: Option<f64>,
}

impl RolledShape {
    /// Flange-to-fillet distance, tf when not published
    pub fn k_mm(&self) -> f64 {
        self.k_des_mm.unwrap_or(self.flange_thickness_mm)
    }

    pub fn validate(&self) -> CalcResult<()> {
        let values = [
            ("depth_mm", self.depth_mm),
            ("flange_width_mm", self.flange_width_mm),
            ("flange_thickness_mm", self.flange_thickness_mm),
            ("web_thickness_mm", self.web_thickness_mm),
            ("area_mm2", self.area_mm2),
            ("ix_mm4", self.ix_mm4),
            ("iy_mm4", self.iy_mm4),
            ("sx_mm3", self.sx_mm3),
            ("sy_mm3", self.sy_mm3),
            ("zx_mm3", self.zx_mm3),
            ("zy_mm3", self.zy_mm3),
            ("j_mm4", self.j_mm4),
            ("cw_mm6", self.cw_mm6),
            ("k_des_mm", self.k_mm()),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::degenerate_section(format!(
                    "{} '{}' must be positive and finite, got {}",
                    self.label, name, value
                )));
            }
        }
        if self.flange_width_mm <= self.web_thickness_mm {
            return Err(CalcError::degenerate_section(format!(
                "{}: flange width must exceed web thickness",
                self.label
            )));
        }
        if self.depth_mm <= 2.0 * self.k_mm() {
            return Err(CalcError::degenerate_section(format!(
                "{}: depth {} mm leaves no web between fillets (k = {} mm)",
                self.label,
                self.depth_mm,
                self.k_mm()
            )));
        }
        Ok(())
    }
}

/// A section to check or optimize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionCandidate {
    /// Parametric welded plate girder
    BuiltUp(BuiltUpSection),
    /// Manually supplied rolled shape
    Rolled(RolledShape),
}

impl SectionCandidate {
    pub fn properties(&self, grade: SteelGrade) -> CalcResult<SectionProperties> {
        properties(self, grade)
    }

    pub fn label(&self) -> String {
        match self {
            SectionCandidate::BuiltUp(plates) => plates.to_string(),
            SectionCandidate::Rolled(shape) => shape.label.clone(),
        }
    }

    pub fn is_built_up(&self) -> bool {
        matches!(self, SectionCandidate::BuiltUp(_))
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Geometric and classification properties of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub built_up: bool,

    // Dimensions
    pub depth_mm: f64,
    /// Web height used for slenderness: clear height (built-up) or d - 2k (rolled)
    pub web_height_mm: f64,
    pub web_thickness_mm: f64,
    pub flange_width_mm: f64,
    pub flange_thickness_mm: f64,
    /// Flange face to web toe of fillet/weld, for concentrated-load checks
    pub k_mm: f64,

    // Properties
    pub area_mm2: f64,
    pub ix_mm4: f64,
    pub iy_mm4: f64,
    pub sx_mm3: f64,
    pub sy_mm3: f64,
    pub zx_mm3: f64,
    pub zy_mm3: f64,
    pub rx_mm: f64,
    pub ry_mm: f64,
    pub j_mm4: f64,
    pub cw_mm6: f64,
    /// Distance between flange centroids
    pub ho_mm: f64,
    /// Effective radius of gyration for LTB (F2)
    pub rts_mm: f64,
    /// Radius of gyration of compression flange plus 1/6 web (F4/F5)
    pub rt_mm: f64,
    /// Web-to-compression-flange area ratio
    pub aw: f64,
    pub mass_kg_per_m: f64,

    pub classification: SectionClassification,
    pub flexural_form: FlexuralForm,
}

/// Compute properties for a candidate section.
pub fn properties(candidate: &SectionCandidate, grade: SteelGrade) -> CalcResult<SectionProperties> {
    match candidate {
        SectionCandidate::BuiltUp(plates) => built_up_properties(plates, grade),
        SectionCandidate::Rolled(shape) => rolled_properties(shape, grade),
    }
}

fn built_up_properties(plates: &BuiltUpSection, grade: SteelGrade) -> CalcResult<SectionProperties> {
    plates.validate()?;
    let steel = grade.properties();

    let h = plates.web_height_mm;
    let tw = plates.web_thickness_mm;
    let bf = plates.flange_width_mm;
    let tf = plates.flange_thickness_mm;
    let d = plates.depth_mm();

    let area = 2.0 * bf * tf + h * tw;
    let flange_arm = (h + tf) / 2.0;
    let ix = tw * h.powi(3) / 12.0 + 2.0 * (bf * tf.powi(3) / 12.0 + bf * tf * flange_arm.powi(2));
    let iy = 2.0 * tf * bf.powi(3) / 12.0 + h * tw.powi(3) / 12.0;
    let sx = ix / (d / 2.0);
    let sy = iy / (bf / 2.0);
    let zx = bf * tf * (d - tf) + tw * h * h / 4.0;
    let zy = tf * bf * bf / 2.0 + h * tw * tw / 4.0;
    let j = (2.0 * bf * tf.powi(3) + h * tw.powi(3)) / 3.0;
    let ho = d - tf;
    let cw = iy * ho * ho / 4.0;

    let classification = SectionClassification::classify(bf / (2.0 * tf), h / tw, true, &steel);

    Ok(finish(
        PlateGeometry { d, h, tw, bf, tf, k: tf + WEB_FLANGE_WELD_MM },
        RawProperties { area, ix, iy, sx, sy, zx, zy, j, cw, ho },
        true,
        classification,
        steel.density_kg_m3,
    ))
}

fn rolled_properties(shape: &RolledShape, grade: SteelGrade) -> CalcResult<SectionProperties> {
    shape.validate()?;
    let steel = grade.properties();

    let d = shape.depth_mm;
    let tf = shape.flange_thickness_mm;
    let tw = shape.web_thickness_mm;
    let bf = shape.flange_width_mm;
    let k = shape.k_mm();
    let h = d - 2.0 * k;

    let classification = SectionClassification::classify(bf / (2.0 * tf), h / tw, false, &steel);

    Ok(finish(
        PlateGeometry { d, h, tw, bf, tf, k },
        RawProperties {
            area: shape.area_mm2,
            ix: shape.ix_mm4,
            iy: shape.iy_mm4,
            sx: shape.sx_mm3,
            sy: shape.sy_mm3,
            zx: shape.zx_mm3,
            zy: shape.zy_mm3,
            j: shape.j_mm4,
            cw: shape.cw_mm6,
            ho: d - tf,
        },
        false,
        classification,
        steel.density_kg_m3,
    ))
}

struct PlateGeometry {
    d: f64,
    h: f64,
    tw: f64,
    bf: f64,
    tf: f64,
    k: f64,
}

struct RawProperties {
    area: f64,
    ix: f64,
    iy: f64,
    sx: f64,
    sy: f64,
    zx: f64,
    zy: f64,
    j: f64,
    cw: f64,
    ho: f64,
}

/// Derived radii and the flexural form, shared by both candidate kinds.
fn finish(
    g: PlateGeometry,
    p: RawProperties,
    built_up: bool,
    classification: SectionClassification,
    density_kg_m3: f64,
) -> SectionProperties {
    let rts = ((p.iy * p.cw).sqrt() / p.sx).sqrt();
    let aw = g.h * g.tw / (g.bf * g.tf);
    let rt = g.bf / (12.0 * (1.0 + aw / 6.0)).sqrt();

    SectionProperties {
        built_up,
        depth_mm: g.d,
        web_height_mm: g.h,
        web_thickness_mm: g.tw,
        flange_width_mm: g.bf,
        flange_thickness_mm: g.tf,
        k_mm: g.k,
        area_mm2: p.area,
        ix_mm4: p.ix,
        iy_mm4: p.iy,
        sx_mm3: p.sx,
        sy_mm3: p.sy,
        zx_mm3: p.zx,
        zy_mm3: p.zy,
        rx_mm: (p.ix / p.area).sqrt(),
        ry_mm: (p.iy / p.area).sqrt(),
        j_mm4: p.j,
        cw_mm6: p.cw,
        ho_mm: p.ho,
        rts_mm: rts,
        rt_mm: rt,
        aw,
        mass_kg_per_m: p.area * density_kg_m3 / 1.0e6,
        flexural_form: classification.flexural_form(),
        classification,
    }
}

/// Largest h/tw the web may have (AISC F13.2).
///
/// 260 without transverse stiffeners; with stiffeners at spacing a,
/// 12.0√(E/Fy) for a/h <= 1.5 and 0.40·E/Fy otherwise.
pub fn web_slenderness_limit(web_height_mm: f64, steel: &SteelProperties, stiffener_spacing_mm: Option<f64>) -> f64 {
    match stiffener_spacing_mm {
        None => UNSTIFFENED_WEB_LIMIT,
        Some(a) if a / web_height_mm <= 1.5 => 12.0 * steel.slenderness_scale(),
        Some(_) => 0.40 * steel.e_mpa / steel.fy_mpa,
    }
}

/// Plate girder proportion limits (AISC F13.2).
///
/// A web too slender for its stiffening, or a web area more than ten times
/// the compression flange, is a degenerate section: the flexure and shear
/// formulas are not valid for it.
pub fn check_proportions(
    section: &SectionProperties,
    steel: &SteelProperties,
    stiffener_spacing_mm: Option<f64>,
) -> CalcResult<()> {
    let limit = web_slenderness_limit(section.web_height_mm, steel, stiffener_spacing_mm);
    let ratio = section.classification.web_ratio;
    if ratio > limit {
        return Err(CalcError::degenerate_section(format!(
            "web slenderness h/tw = {:.1} exceeds the proportion limit {:.1}",
            ratio, limit
        )));
    }
    if section.aw > MAX_WEB_FLANGE_AREA_RATIO {
        return Err(CalcError::degenerate_section(format!(
            "web-to-flange area ratio aw = {:.2} exceeds {:.0}",
            section.aw, MAX_WEB_FLANGE_AREA_RATIO
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plates() -> BuiltUpSection {
        BuiltUpSection::new(300.0, 6.0, 150.0, 10.0)
    }

    #[test]
    fn test_built_up_properties() {
        let p = properties(&SectionCandidate::BuiltUp(plates()), SteelGrade::A992).unwrap();
        // A = 2(150)(10) + 300(6)
        assert!((p.area_mm2 - 4800.0).abs() < 1e-9);
        // Ix = 6(300³)/12 + 2[150(10³)/12 + 150(10)(155²)]
        let ix = 6.0 * 300.0_f64.powi(3) / 12.0 + 2.0 * (150.0 * 1000.0 / 12.0 + 1500.0 * 155.0_f64.powi(2));
        assert!((p.ix_mm4 - ix).abs() < 1e-3);
        assert!((p.sx_mm3 - ix / 160.0).abs() < 1e-6);
        // Zx = 150(10)(310) + 6(300²)/4
        assert!((p.zx_mm3 - 600_000.0).abs() < 1e-6);
        assert!((p.ho_mm - 310.0).abs() < 1e-12);
        assert!((p.k_mm - 15.0).abs() < 1e-12);
        assert!((p.mass_kg_per_m - 37.68).abs() < 1e-9);
        assert_eq!(p.flexural_form, FlexuralForm::CompactWeb);
    }

    #[test]
    fn test_shape_factor_reasonable() {
        let p = properties(&SectionCandidate::BuiltUp(plates()), SteelGrade::A992).unwrap();
        let shape_factor = p.zx_mm3 / p.sx_mm3;
        assert!(shape_factor > 1.05 && shape_factor < 1.25);
        assert!(p.zy_mm3 / p.sy_mm3 > 1.4);
    }

    #[test]
    fn test_rts_and_rt() {
        let p = properties(&SectionCandidate::BuiltUp(plates()), SteelGrade::A992).unwrap();
        let expected_rts = ((p.iy_mm4 * p.cw_mm6).sqrt() / p.sx_mm3).sqrt();
        assert!((p.rts_mm - expected_rts).abs() < 1e-9);
        // aw = 300×6/(150×10) = 1.2
        assert!((p.aw - 1.2).abs() < 1e-12);
        assert!((p.rt_mm - 150.0 / (12.0 * 1.2_f64).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_sections() {
        let zero_web = SectionCandidate::BuiltUp(BuiltUpSection::new(300.0, 0.0, 150.0, 10.0));
        let err = zero_web.properties(SteelGrade::A992).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");

        let no_outstand = SectionCandidate::BuiltUp(BuiltUpSection::new(300.0, 20.0, 20.0, 10.0));
        assert!(no_outstand.properties(SteelGrade::A992).is_err());

        let nan = SectionCandidate::BuiltUp(BuiltUpSection::new(f64::NAN, 6.0, 150.0, 10.0));
        assert!(nan.properties(SteelGrade::A992).is_err());
    }

    #[test]
    fn test_slender_web_form() {
        let deep = SectionCandidate::BuiltUp(BuiltUpSection::new(1200.0, 8.0, 300.0, 20.0));
        let p = deep.properties(SteelGrade::A992).unwrap();
        assert_eq!(p.classification.web, ElementClass::Slender);
        assert_eq!(p.flexural_form, FlexuralForm::SlenderWeb);
    }

    #[test]
    fn test_web_slenderness_limits() {
        let steel = SteelGrade::A992.properties();
        assert!((web_slenderness_limit(1000.0, &steel, None) - 260.0).abs() < 1e-12);
        let close = web_slenderness_limit(1000.0, &steel, Some(1000.0));
        assert!((close - 12.0 * (200_000.0_f64 / 345.0).sqrt()).abs() < 1e-9);
        let wide = web_slenderness_limit(1000.0, &steel, Some(2000.0));
        assert!((wide - 0.40 * 200_000.0 / 345.0).abs() < 1e-9);
    }

    #[test]
    fn test_proportions_reject_thin_deep_web() {
        let steel = SteelGrade::A992.properties();
        // h/tw = 1500/5 = 300
        let thin = SectionCandidate::BuiltUp(BuiltUpSection::new(1500.0, 5.0, 300.0, 20.0))
            .properties(SteelGrade::A992)
            .unwrap();
        let err = check_proportions(&thin, &steel, None).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("h/tw"));

        // h/tw = 1300/5 = 260 sits on the limit
        let edge = SectionCandidate::BuiltUp(BuiltUpSection::new(1300.0, 5.0, 300.0, 20.0))
            .properties(SteelGrade::A992)
            .unwrap();
        assert!(check_proportions(&edge, &steel, None).is_ok());
        // close stiffeners allow up to 12√(E/Fy) ≈ 289
        assert!(check_proportions(&thin, &steel, Some(1500.0)).is_err());
        let stiffened = SectionCandidate::BuiltUp(BuiltUpSection::new(1400.0, 5.0, 300.0, 20.0))
            .properties(SteelGrade::A992)
            .unwrap();
        assert!(check_proportions(&stiffened, &steel, None).is_err());
        assert!(check_proportions(&stiffened, &steel, Some(1400.0)).is_ok());
    }

    #[test]
    fn test_proportions_reject_small_flange() {
        // aw = 1500×8 / (100×6) = 20
        let steel = SteelGrade::A992.properties();
        let p = SectionCandidate::BuiltUp(BuiltUpSection::new(1500.0, 8.0, 100.0, 6.0))
            .properties(SteelGrade::A992)
            .unwrap();
        let err = check_proportions(&p, &steel, None).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
        assert!(err.to_string().contains("aw"));
    }

    #[test]
    fn test_rolled_properties() {
        let shape = RolledShape {
            label: "W410x46.1".to_string(),
            depth_mm: 403.0,
            flange_width_mm: 140.0,
            flange_thickness_mm: 11.2,
            web_thickness_mm: 7.0,
            area_mm2: 5890.0,
            ix_mm4: 156.0e6,
            iy_mm4: 5.14e6,
            sx_mm3: 773.0e3,
            sy_mm3: 73.4e3,
            zx_mm3: 885.0e3,
            zy_mm3: 115.0e3,
            j_mm4: 192.0e3,
            cw_mm6: 196.0e9,
            k_des_mm: Some(23.0),
        };
        let p = properties(&SectionCandidate::Rolled(shape.clone()), SteelGrade::A992).unwrap();
        assert!(!p.built_up);
        assert!((p.web_height_mm - 357.0).abs() < 1e-9);
        assert!((p.ry_mm - (5.14e6_f64 / 5890.0).sqrt()).abs() < 1e-9);
        assert_eq!(p.sx_mm3, 773.0e3);

        let bad = RolledShape {
            k_des_mm: Some(250.0),
            ..shape
        };
        assert!(SectionCandidate::Rolled(bad).properties(SteelGrade::A992).is_err());
    }

    #[test]
    fn test_candidate_serialization() {
        let candidate = SectionCandidate::BuiltUp(plates());
        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains("\"type\":\"BuiltUp\""));
        let roundtrip: SectionCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(candidate, roundtrip);
    }

    #[test]
    fn test_label() {
        assert_eq!(SectionCandidate::BuiltUp(plates()).label(), "PG 300x6 + 2-PL 150x10");
    }
}
