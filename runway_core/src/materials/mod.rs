//! # Materials
//!
//! Structural steel grades available for runway beams. The set is closed:
//! each grade maps to a constant record of yield and tensile strength, with
//! modulus and density shared by all carbon steels.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::materials::SteelGrade;
//!
//! let props = SteelGrade::A992.properties();
//! assert_eq!(props.fy_mpa, 345.0);
//! assert_eq!(props.e_mpa, 200_000.0);
//! ```

pub mod steel;

pub use steel::{SteelGrade, SteelProperties, STEEL_DENSITY_KG_M3, STEEL_E_MPA, STEEL_G_MPA};
