//! # Equation Registry
//!
//! Central registry of every empirical relation used by the parameter
//! pipeline. Each equation has metadata including its literature source,
//! formula, variable definitions and the function that implements it.
//!
//! ## Usage
//!
//! ```rust
//! use geotech_core::equations::registry::{Equation, EquationCategory};
//! use geotech_core::settings::CalculationSettings;
//!
//! let meta = Equation::JakyK0.metadata();
//! assert_eq!(meta.category, EquationCategory::EarthPressure);
//! println!("Formula: {} ({})", meta.formula_plain, meta.reference.citation());
//!
//! // Equations that a given settings combination actually exercises
//! let used = Equation::applicable(&CalculationSettings::default());
//! assert!(used.contains(&Equation::LiaoWhitmanCorrectedN));
//! assert!(!used.contains(&Equation::TerzaghiCorrectedN));
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::{CalculationSettings, ConstructionMethod, CorrectionMethod};

// ============================================================================
// References
// ============================================================================

/// Source of an empirical relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Published paper or textbook
    Literature {
        authors: &'static str,
        year: u16,
        title: &'static str,
    },
    /// Industry standard or design manual
    Standard {
        name: &'static str,
        section: &'static str,
    },
    /// Local correlation table without a single published source
    Empirical { note: &'static str },
    /// Soil mechanics fundamentals
    Mechanics,
}

impl CodeReference {
    /// Full citation for reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Literature { authors, year, title } => {
                format!("{} ({}), {}", authors, year, title)
            }
            CodeReference::Standard { name, section } => format!("{} Section {}", name, section),
            CodeReference::Empirical { note } => format!("Empirical correlation: {}", note),
            CodeReference::Mechanics => "Fundamental Soil Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Literature { authors, .. } => *authors,
            CodeReference::Standard { name, .. } => *name,
            CodeReference::Empirical { .. } => "Empirical",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Groups equations in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    UnitWeight,
    EffectiveStress,
    SptCorrection,
    Strength,
    Stiffness,
    EarthPressure,
    InterfaceFriction,
    Consistency,
}

impl EquationCategory {
    pub const ALL: [EquationCategory; 8] = [
        EquationCategory::UnitWeight,
        EquationCategory::EffectiveStress,
        EquationCategory::SptCorrection,
        EquationCategory::Strength,
        EquationCategory::Stiffness,
        EquationCategory::EarthPressure,
        EquationCategory::InterfaceFriction,
        EquationCategory::Consistency,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::UnitWeight => "Unit Weight",
            EquationCategory::EffectiveStress => "Effective Stress",
            EquationCategory::SptCorrection => "SPT Corrections",
            EquationCategory::Strength => "Shear Strength",
            EquationCategory::Stiffness => "Elastic Parameters",
            EquationCategory::EarthPressure => "Earth Pressure at Rest",
            EquationCategory::InterfaceFriction => "Interface Friction",
            EquationCategory::Consistency => "Consistency",
        }
    }

    /// Position in the pipeline (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::UnitWeight => 1,
            EquationCategory::EffectiveStress => 2,
            EquationCategory::SptCorrection => 3,
            EquationCategory::Strength => 4,
            EquationCategory::Stiffness => 5,
            EquationCategory::EarthPressure => 6,
            EquationCategory::InterfaceFriction => 7,
            EquationCategory::Consistency => 8,
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "N", "σv'")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units (e.g., "kN/m²", "-")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Overburden Correction Factor")
    pub name: &'static str,
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every relation used in the parameter pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// γsat step table from N
    SaturatedUnitWeight,
    /// σv' accumulation above/below the water table
    VerticalEffectiveStress,
    /// CN = √(100/σv')
    OverburdenCorrectionFactor,
    /// Ncor = CN × N
    LiaoWhitmanCorrectedN,
    /// Ncor = 15 + ½(N − 15)
    TerzaghiCorrectedN,
    /// Su = α × Ncor × 9.81
    UndrainedShearStrength,
    /// φ' = 27.1 + 0.3 Ncor − 0.00054 Ncor²
    FrictionAngle,
    /// E = α × Su
    ClayYoungsModulus,
    /// E' = β × Ncor
    SandYoungsModulus,
    /// ν by soil family
    PoissonRatio,
    /// Fixed K0 for clay
    ClayK0,
    /// K0 = 1 − sin φ'
    JakyK0,
    /// Rint ramp for driven elements in clay
    DrivenClayInterface,
    /// Rint = 0.45 for bored elements in clay
    BoredClayInterface,
    /// Rint by contact surface in sand
    SandInterface,
    /// Clay consistency from Su
    ClayConsistency,
    /// Sand relative density from N
    SandConsistency,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::SaturatedUnitWeight => EquationMetadata {
                name: "Saturated Unit Weight",
                description: "Saturated unit weight estimated from the field SPT blow count",
                formula_plain: "γsat = 15 (N<5), 16 (N<8), 17 (N<11), 18 (N<27), 19 (N<35), 20 otherwise",
                reference: CodeReference::Empirical {
                    note: "SPT N vs. unit weight step table",
                },
                variables: vec![
                    Variable::new("N", "Field SPT blow count", "blows/0.3 m"),
                    Variable::new("γsat", "Saturated unit weight", "kN/m³"),
                ],
                assumptions: vec!["Missing or zero N yields γsat = 0", "Same table for clay and sand"],
                category: EquationCategory::UnitWeight,
                source_module: "calculations/unit_weight.rs",
                source_function: "gamma_sat",
            },

            Equation::VerticalEffectiveStress => EquationMetadata {
                name: "Vertical Effective Stress",
                description: "Effective overburden accumulated layer by layer from the ground surface",
                formula_plain: "σv'(i) = σv'(i-1) + γsat × Δh above the water table, + (γsat − γw) × Δh below",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("σv'", "Vertical effective stress", "kN/m²"),
                    Variable::new("γsat", "Saturated unit weight", "kN/m³"),
                    Variable::new("γw", "Unit weight of water (9.81)", "kN/m³"),
                    Variable::new("Δh", "Depth increment from the previous layer", "m"),
                ],
                assumptions: vec![
                    "Hydrostatic pore pressure",
                    "Tested layers take the above/below branch from their base elevation",
                    "Gap-filled intervals straddling the water table are split exactly",
                ],
                category: EquationCategory::EffectiveStress,
                source_module: "calculations/effective_stress.rs",
                source_function: "StressState::advance",
            },

            Equation::OverburdenCorrectionFactor => EquationMetadata {
                name: "Overburden Correction Factor",
                description: "Normalizes sand blow counts to an effective overburden of 100 kN/m²",
                formula_plain: "CN = √(100 / σv')",
                reference: CodeReference::Literature {
                    authors: "Liao & Whitman",
                    year: 1986,
                    title: "Overburden correction factors for SPT in sand",
                },
                variables: vec![
                    Variable::new("CN", "Overburden correction factor", "-"),
                    Variable::new("σv'", "Vertical effective stress", "kN/m²"),
                ],
                assumptions: vec!["Sand only", "CN = 0 when σv' ≤ 0", "No upper cap applied"],
                category: EquationCategory::SptCorrection,
                source_module: "calculations/overburden.rs",
                source_function: "cn_factor",
            },

            Equation::LiaoWhitmanCorrectedN => EquationMetadata {
                name: "Corrected N (Liao and Whitman)",
                description: "Blow count corrected for overburden",
                formula_plain: "Ncor = CN × N",
                reference: CodeReference::Literature {
                    authors: "Liao & Whitman",
                    year: 1986,
                    title: "Overburden correction factors for SPT in sand",
                },
                variables: vec![
                    Variable::new("Ncor", "Corrected blow count", "blows/0.3 m"),
                    Variable::new("CN", "Overburden correction factor", "-"),
                    Variable::new("N", "Field SPT blow count", "blows/0.3 m"),
                ],
                assumptions: vec!["Sand only; clay uses Ncor = N"],
                category: EquationCategory::SptCorrection,
                source_module: "calculations/overburden.rs",
                source_function: "ncor",
            },

            Equation::TerzaghiCorrectedN => EquationMetadata {
                name: "Corrected N (Terzaghi)",
                description: "Dilatancy correction for high blow counts in sand",
                formula_plain: "Ncor = 15 + 0.5 × (N − 15) for N > 15, Ncor = N otherwise",
                reference: CodeReference::Literature {
                    authors: "Terzaghi",
                    year: 1984,
                    title: "Soil Mechanics in Engineering Practice",
                },
                variables: vec![
                    Variable::new("Ncor", "Corrected blow count", "blows/0.3 m"),
                    Variable::new("N", "Field SPT blow count", "blows/0.3 m"),
                ],
                assumptions: vec!["Sand only; clay uses Ncor = N", "Independent of σv'"],
                category: EquationCategory::SptCorrection,
                source_module: "calculations/overburden.rs",
                source_function: "ncor",
            },

            Equation::UndrainedShearStrength => EquationMetadata {
                name: "Undrained Shear Strength",
                description: "Undrained shear strength of clay from the corrected blow count",
                formula_plain: "Su = α × Ncor × 9.81, α = 0.6739 (CH) or 0.5077 (CL)",
                reference: CodeReference::Literature {
                    authors: "Stroud",
                    year: 1974,
                    title: "The standard penetration test in insensitive clays and soft rocks",
                },
                variables: vec![
                    Variable::new("Su", "Undrained shear strength", "kN/m²"),
                    Variable::new("α", "Plasticity-dependent factor", "-"),
                    Variable::new("Ncor", "Corrected blow count", "blows/0.3 m"),
                ],
                assumptions: vec!["Clay only (CH, CL)"],
                category: EquationCategory::Strength,
                source_module: "calculations/strength.rs",
                source_function: "undrained_shear_strength",
            },

            Equation::FrictionAngle => EquationMetadata {
                name: "Effective Friction Angle",
                description: "Drained friction angle of sand from the corrected blow count",
                formula_plain: "φ' = 27.1 + 0.3 × Ncor − 0.00054 × Ncor²",
                reference: CodeReference::Literature {
                    authors: "Peck, Hanson & Thornburn",
                    year: 1974,
                    title: "Foundation Engineering",
                },
                variables: vec![
                    Variable::new("φ'", "Effective friction angle", "deg"),
                    Variable::new("Ncor", "Corrected blow count", "blows/0.3 m"),
                ],
                assumptions: vec!["Sand only (SM, SC, SP-SM)"],
                category: EquationCategory::Strength,
                source_module: "calculations/strength.rs",
                source_function: "friction_angle",
            },

            Equation::ClayYoungsModulus => EquationMetadata {
                name: "Young's Modulus (Clay)",
                description: "Undrained stiffness of clay as a multiple of Su",
                formula_plain: "E = α × Su, α from structure type and Su range (≤2.5, ≤5, >5 kN/m²)",
                reference: CodeReference::Literature {
                    authors: "Duncan & Buchignani",
                    year: 1976,
                    title: "An engineering manual for settlement studies",
                },
                variables: vec![
                    Variable::new("E", "Young's modulus", "kN/m²"),
                    Variable::new("α", "E/Su multiplier", "-"),
                    Variable::new("Su", "Undrained shear strength", "kN/m²"),
                ],
                assumptions: vec![
                    "Sheet Pile 150/300/500, Earth Retaining Structure 250/350/500, Diaphragm Wall 500/750/1000",
                    "E = 0 when Su is missing or zero",
                ],
                category: EquationCategory::Stiffness,
                source_module: "calculations/stiffness.rs",
                source_function: "elastic_modulus",
            },

            Equation::SandYoungsModulus => EquationMetadata {
                name: "Young's Modulus (Sand)",
                description: "Drained stiffness of sand from the corrected blow count",
                formula_plain: "E' = β × Ncor, β = 1000 (ERS) or 2000 (Diaphragm Wall) kN/m²",
                reference: CodeReference::Empirical {
                    note: "SPT N vs. drained modulus",
                },
                variables: vec![
                    Variable::new("E'", "Drained Young's modulus", "kN/m²"),
                    Variable::new("β", "E'/Ncor multiplier", "kN/m²"),
                    Variable::new("Ncor", "Corrected blow count", "blows/0.3 m"),
                ],
                assumptions: vec!["Sheet piles in sand are not covered and report E' = 0"],
                category: EquationCategory::Stiffness,
                source_module: "calculations/stiffness.rs",
                source_function: "elastic_modulus",
            },

            Equation::PoissonRatio => EquationMetadata {
                name: "Poisson's Ratio",
                description: "Poisson's ratio by soil family",
                formula_plain: "ν = 0.495 (clay), 0.333 (sand)",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("ν", "Poisson's ratio", "-")],
                assumptions: vec!["Clay undrained, near incompressible", "Unknown soil reports 0"],
                category: EquationCategory::Stiffness,
                source_module: "calculations/stiffness.rs",
                source_function: "poisson_ratio",
            },

            Equation::ClayK0 => EquationMetadata {
                name: "K0 (Clay)",
                description: "Coefficient of earth pressure at rest for clay",
                formula_plain: "K0 = 0.65 (Sheet Pile), 0.80 otherwise",
                reference: CodeReference::Empirical {
                    note: "fixed K0 by structure type",
                },
                variables: vec![Variable::new("K0", "Earth pressure coefficient at rest", "-")],
                assumptions: vec!["Clay only"],
                category: EquationCategory::EarthPressure,
                source_module: "calculations/earth_pressure.rs",
                source_function: "k0",
            },

            Equation::JakyK0 => EquationMetadata {
                name: "K0 (Jaky)",
                description: "Coefficient of earth pressure at rest for normally consolidated sand",
                formula_plain: "K0 = 1 − sin φ'",
                reference: CodeReference::Literature {
                    authors: "Jaky",
                    year: 1944,
                    title: "The coefficient of earth pressure at rest",
                },
                variables: vec![
                    Variable::new("K0", "Earth pressure coefficient at rest", "-"),
                    Variable::new("φ'", "Effective friction angle", "deg"),
                ],
                assumptions: vec!["Sand only", "Normally consolidated"],
                category: EquationCategory::EarthPressure,
                source_module: "calculations/earth_pressure.rs",
                source_function: "jaky",
            },

            Equation::DrivenClayInterface => EquationMetadata {
                name: "Interface Ratio (Driven, Clay)",
                description: "Adhesion ratio for driven elements in clay",
                formula_plain: "Rint = 1.0 (Su < 2.5), 1 − 0.5 × (Su − 2.5)/5 (Su < 7.5), 0.5 otherwise",
                reference: CodeReference::Standard {
                    name: "API RP 2A",
                    section: "6.4.2",
                },
                variables: vec![
                    Variable::new("Rint", "Interface strength reduction factor", "-"),
                    Variable::new("Su", "Undrained shear strength", "kN/m²"),
                ],
                assumptions: vec!["Rint = 0 when Su is missing or zero"],
                category: EquationCategory::InterfaceFriction,
                source_module: "calculations/interface.rs",
                source_function: "rint",
            },

            Equation::BoredClayInterface => EquationMetadata {
                name: "Interface Ratio (Bored, Clay)",
                description: "Adhesion ratio for bored elements in clay",
                formula_plain: "Rint = 0.45",
                reference: CodeReference::Literature {
                    authors: "Skempton",
                    year: 1959,
                    title: "Cast in-situ bored piles in London clay",
                },
                variables: vec![Variable::new("Rint", "Interface strength reduction factor", "-")],
                assumptions: vec!["Independent of Su"],
                category: EquationCategory::InterfaceFriction,
                source_module: "calculations/interface.rs",
                source_function: "rint",
            },

            Equation::SandInterface => EquationMetadata {
                name: "Interface Ratio (Sand)",
                description: "Interface friction ratio for sand against the structure surface",
                formula_plain: "Rint = 1.0 rough concrete, 0.8 smooth concrete, 0.7 rough steel, 0.5 smooth steel, 0.8 timber",
                reference: CodeReference::Empirical {
                    note: "interface friction by contact surface",
                },
                variables: vec![Variable::new("Rint", "Interface strength reduction factor", "-")],
                assumptions: vec!["Unspecified surface yields Rint = 0"],
                category: EquationCategory::InterfaceFriction,
                source_module: "calculations/interface.rs",
                source_function: "sand_surface",
            },

            Equation::ClayConsistency => EquationMetadata {
                name: "Clay Consistency",
                description: "Descriptive consistency from the effective Su",
                formula_plain: "Very Soft < 12 ≤ Soft < 25 ≤ Hard < 50 ≤ Stiff < 100 ≤ Very Stiff < 200 ≤ Hard (kN/m²)",
                reference: CodeReference::Empirical {
                    note: "Su consistency bands",
                },
                variables: vec![Variable::new("Su", "Undrained shear strength", "kN/m²")],
                assumptions: vec!["Uses the laboratory Su when one is recorded"],
                category: EquationCategory::Consistency,
                source_module: "soil.rs",
                source_function: "Consistency::for_clay",
            },

            Equation::SandConsistency => EquationMetadata {
                name: "Sand Relative Density",
                description: "Descriptive relative density from the field blow count",
                formula_plain: "Very Loose < 4 ≤ Loose < 10 ≤ Medium Dense < 30 ≤ Dense < 50 ≤ Very Dense",
                reference: CodeReference::Literature {
                    authors: "Terzaghi & Peck",
                    year: 1948,
                    title: "Soil Mechanics in Engineering Practice",
                },
                variables: vec![Variable::new("N", "Field SPT blow count", "blows/0.3 m")],
                assumptions: vec!["Uses the uncorrected N"],
                category: EquationCategory::Consistency,
                source_module: "soil.rs",
                source_function: "Consistency::for_sand",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut cats: Vec<_> = EquationCategory::ALL
            .into_iter()
            .filter(|c| !Equation::in_category(*c).is_empty())
            .collect();
        cats.sort_by_key(|c| c.sort_order());
        cats
    }

    /// Equations exercised by a run with `settings`, in pipeline order.
    pub fn applicable(settings: &CalculationSettings) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .copied()
            .filter(|eq| match eq {
                Equation::OverburdenCorrectionFactor | Equation::LiaoWhitmanCorrectedN => {
                    settings.correction_method == CorrectionMethod::LiaoWhitman1986
                }
                Equation::TerzaghiCorrectedN => settings.correction_method == CorrectionMethod::Terzaghi1984,
                Equation::DrivenClayInterface => settings.method == ConstructionMethod::Driven,
                Equation::BoredClayInterface => settings.method == ConstructionMethod::Bored,
                _ => true,
            })
            .collect()
    }
}

/// All equations in the registry, in pipeline order
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::SaturatedUnitWeight,
    Equation::VerticalEffectiveStress,
    Equation::OverburdenCorrectionFactor,
    Equation::LiaoWhitmanCorrectedN,
    Equation::TerzaghiCorrectedN,
    Equation::UndrainedShearStrength,
    Equation::FrictionAngle,
    Equation::ClayYoungsModulus,
    Equation::SandYoungsModulus,
    Equation::PoissonRatio,
    Equation::ClayK0,
    Equation::JakyK0,
    Equation::DrivenClayInterface,
    Equation::BoredClayInterface,
    Equation::SandInterface,
    Equation::ClayConsistency,
    Equation::SandConsistency,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference as markdown.
///
/// ```rust
/// use geotech_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Geotech Equations Reference"));
/// assert!(markdown.contains("SPT Corrections"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Geotech Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every correlation used to derive soil parameters from
SPT borehole logs, with its formula, literature source, source location and
assumptions.

## Units and Conventions

| Quantity | Convention |
|----------|------------|
| Depth | Metres below ground surface, positive downward |
| Elevation | Metres, project datum |
| Water depth | Metres relative to ground, negative below ground |
| Stress, Su, E | kN/m² |
| Unit weight | kN/m³ |
| Friction angle | Degrees |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in Equation::in_category(*category) {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StructureType;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 17);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        assert!(Equation::OverburdenCorrectionFactor.metadata().formula_plain.contains("√(100 / σv')"));
        assert!(Equation::JakyK0.metadata().formula_plain.contains("1 − sin φ'"));
    }

    #[test]
    fn test_code_reference_citation() {
        let jaky = Equation::JakyK0.metadata().reference;
        assert_eq!(jaky.citation(), "Jaky (1944), The coefficient of earth pressure at rest");
        assert_eq!(jaky.short_form(), "Jaky");

        let api = CodeReference::Standard { name: "API RP 2A", section: "6.4.2" };
        assert_eq!(api.citation(), "API RP 2A Section 6.4.2");
        assert_eq!(CodeReference::Mechanics.short_form(), "Mechanics");
    }

    #[test]
    fn test_categories_sorted_and_complete() {
        let cats = Equation::all_categories();
        assert_eq!(cats.len(), EquationCategory::ALL.len());
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn test_applicable_follows_settings() {
        let default = Equation::applicable(&CalculationSettings::default());
        assert!(default.contains(&Equation::OverburdenCorrectionFactor));
        assert!(default.contains(&Equation::DrivenClayInterface));
        assert!(!default.contains(&Equation::BoredClayInterface));
        assert_eq!(default.len(), ALL_EQUATIONS.len() - 2);

        let settings = CalculationSettings {
            structure_type: StructureType::SheetPile,
            method: ConstructionMethod::Bored,
            correction_method: CorrectionMethod::Terzaghi1984,
            ..CalculationSettings::default()
        };
        let used = Equation::applicable(&settings);
        assert!(used.contains(&Equation::TerzaghiCorrectedN));
        assert!(!used.contains(&Equation::LiaoWhitmanCorrectedN));
        assert!(!used.contains(&Equation::OverburdenCorrectionFactor));
        assert!(used.contains(&Equation::BoredClayInterface));
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Geotech Equations Reference"));
        assert!(markdown.contains("Auto-generated from source code"));
        for category in EquationCategory::ALL {
            assert!(
                markdown.contains(&format!("## {}", category.display_name())),
                "Missing {}",
                category.display_name()
            );
        }

        assert!(markdown.contains("### Overburden Correction Factor"));
        assert!(markdown.contains("Liao & Whitman (1986)"));
        assert!(markdown.contains("API RP 2A"));
        assert!(markdown.contains("calculations/effective_stress.rs"));
        assert!(markdown.contains("**Total Equations:** 17"));
        assert!(markdown.contains("**Categories:** 8"));
    }
}
