//! # Geotechnical Equations
//!
//! Metadata for every empirical relation the pipeline applies, so results can
//! be audited against their literature sources. The implementations live in
//! [`crate::calculations`]; this module only describes them.
//!
//! ## References
//!
//! - Liao & Whitman (1986): overburden correction
//! - Terzaghi (1984): high blow count correction
//! - Stroud (1974): Su from SPT
//! - Peck, Hanson & Thornburn (1974): φ' from SPT
//! - Duncan & Buchignani (1976): E/Su ratios
//! - Jaky (1944): K0
//! - API RP 2A: clay adhesion for driven elements

pub mod registry;

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
