//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during refinement
//! - persisted as scheme JSON files
//! - reloaded later for verification or further refinement

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Reference integration domain of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Square `[-1, 1]^2`.
    Quadrilateral,
    /// Cube `[-1, 1]^3`.
    Hexahedron,
    /// Reference simplex with vertices `(0,0)`, `(1,0)`, `(0,1)`.
    Triangle,
    /// Unit sphere surface `S^2`.
    Sphere,
}

impl Domain {
    /// Coordinate dimension of expanded points.
    pub fn dim(self) -> usize {
        match self {
            Domain::Quadrilateral | Domain::Triangle => 2,
            Domain::Hexahedron | Domain::Sphere => 3,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Domain::Quadrilateral => "quadrilateral (C2)",
            Domain::Hexahedron => "hexahedron (C3)",
            Domain::Triangle => "triangle (T2)",
            Domain::Sphere => "sphere (U3)",
        }
    }
}

/// Symmetry orbit kind.
///
/// Each variant names one orbit of the domain's point-symmetry group: a
/// representative parameter tuple expands to a fixed number of points
/// (`multiplicity`), and the representative itself carries a fixed number of
/// free coordinates (`arity`). Both are structural constants; refinement only
/// ever moves the free coordinates and recomputes the weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitKind {
    // Quadrilateral (full D4 symmetry of the square).
    Zero2,
    SymmR0,
    SymmS,
    #[serde(rename = "symm_s_t")]
    SymmST,

    // Hexahedron (full octahedral symmetry of the cube).
    Zero3,
    SymmR00,
    SymmRr0,
    SymmRrr,
    SymmRrs,

    // Triangle (S3 permutations of barycentric coordinates).
    Centroid,
    Vertex,
    D3Aa,
    D3Ab,

    // Sphere (octahedral symmetry with reflections).
    A1,
    A2,
    A3,
    Pq0,
    Llm,
    Rsw,
}

impl OrbitKind {
    /// Domain this orbit kind belongs to.
    pub fn domain(self) -> Domain {
        match self {
            OrbitKind::Zero2 | OrbitKind::SymmR0 | OrbitKind::SymmS | OrbitKind::SymmST => {
                Domain::Quadrilateral
            }
            OrbitKind::Zero3
            | OrbitKind::SymmR00
            | OrbitKind::SymmRr0
            | OrbitKind::SymmRrr
            | OrbitKind::SymmRrs => Domain::Hexahedron,
            OrbitKind::Centroid | OrbitKind::Vertex | OrbitKind::D3Aa | OrbitKind::D3Ab => {
                Domain::Triangle
            }
            OrbitKind::A1
            | OrbitKind::A2
            | OrbitKind::A3
            | OrbitKind::Pq0
            | OrbitKind::Llm
            | OrbitKind::Rsw => Domain::Sphere,
        }
    }

    /// Number of free parameters per tuple (0, 1, or 2).
    pub fn arity(self) -> usize {
        match self {
            OrbitKind::Zero2
            | OrbitKind::Zero3
            | OrbitKind::Centroid
            | OrbitKind::Vertex
            | OrbitKind::A1
            | OrbitKind::A2
            | OrbitKind::A3 => 0,
            OrbitKind::SymmR0
            | OrbitKind::SymmS
            | OrbitKind::SymmR00
            | OrbitKind::SymmRr0
            | OrbitKind::SymmRrr
            | OrbitKind::D3Aa
            | OrbitKind::Pq0
            | OrbitKind::Llm => 1,
            OrbitKind::SymmST | OrbitKind::SymmRrs | OrbitKind::D3Ab | OrbitKind::Rsw => 2,
        }
    }

    /// Number of points one parameter tuple expands to.
    pub fn multiplicity(self) -> usize {
        match self {
            OrbitKind::Zero2 | OrbitKind::Zero3 | OrbitKind::Centroid => 1,
            OrbitKind::Vertex | OrbitKind::D3Aa => 3,
            OrbitKind::SymmR0 | OrbitKind::SymmS => 4,
            OrbitKind::SymmR00 | OrbitKind::A1 | OrbitKind::D3Ab => 6,
            OrbitKind::SymmST | OrbitKind::SymmRrr | OrbitKind::A3 => 8,
            OrbitKind::SymmRr0 | OrbitKind::A2 => 12,
            OrbitKind::SymmRrs | OrbitKind::Pq0 | OrbitKind::Llm => 24,
            OrbitKind::Rsw => 48,
        }
    }

    /// Serialized name, for error messages.
    pub fn name(self) -> &'static str {
        match self {
            OrbitKind::Zero2 => "zero2",
            OrbitKind::SymmR0 => "symm_r0",
            OrbitKind::SymmS => "symm_s",
            OrbitKind::SymmST => "symm_s_t",
            OrbitKind::Zero3 => "zero3",
            OrbitKind::SymmR00 => "symm_r00",
            OrbitKind::SymmRr0 => "symm_rr0",
            OrbitKind::SymmRrr => "symm_rrr",
            OrbitKind::SymmRrs => "symm_rrs",
            OrbitKind::Centroid => "centroid",
            OrbitKind::Vertex => "vertex",
            OrbitKind::D3Aa => "d3_aa",
            OrbitKind::D3Ab => "d3_ab",
            OrbitKind::A1 => "a1",
            OrbitKind::A2 => "a2",
            OrbitKind::A3 => "a3",
            OrbitKind::Pq0 => "pq0",
            OrbitKind::Llm => "llm",
            OrbitKind::Rsw => "rsw",
        }
    }
}

/// One orbit of a scheme in compact form.
///
/// `data` is a small row matrix: the first row holds the weights (one per
/// parameter tuple / column), the remaining `arity` rows hold the free
/// parameters. Arity-0 orbits carry the weight row only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitData {
    pub kind: OrbitKind,
    pub data: Vec<Vec<f64>>,
}

impl OrbitData {
    /// Number of parameter tuples (columns).
    pub fn tuples(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// The weight row.
    pub fn weights(&self) -> &[f64] {
        self.data.first().map_or(&[], Vec::as_slice)
    }

    /// The parameter rows (may be empty for arity-0 orbits).
    pub fn params(&self) -> &[Vec<f64>] {
        if self.data.is_empty() { &[] } else { &self.data[1..] }
    }
}

/// Bibliographic metadata of a published scheme. Never touched by refinement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A quadrature scheme in compact orbit form.
///
/// `orbits` is an ordered list; that order fixes the column layout of every
/// matrix the refinement engine builds, so it must survive a round trip
/// through serialization unchanged.
///
/// Field order matters for persistence: `orbits` is declared (and therefore
/// written) last, so the bulk numeric payload ends the file. serde_json emits
/// floats with shortest-roundtrip precision, so re-parsing a written scheme
/// reproduces the exact same bit patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub domain: Domain,
    /// Claimed exact-integration polynomial degree.
    pub degree: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    pub test_tolerance: f64,
    pub orbits: Vec<OrbitData>,
}

impl Scheme {
    /// Total number of points the scheme expands to.
    pub fn point_count(&self) -> usize {
        self.orbits
            .iter()
            .map(|o| o.kind.multiplicity() * o.tuples())
            .sum()
    }

    /// Structural validation of user-supplied scheme data.
    ///
    /// Checks that every orbit belongs to the scheme's domain and that every
    /// data matrix has exactly `1 + arity` equal-width, nonempty, finite-width
    /// rows. Parameter *values* are not range-checked here; out-of-range
    /// values merely produce a degenerate trial during refinement.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.test_tolerance.is_finite() {
            return Err(AppError::malformed(format!(
                "Scheme '{}': non-finite test tolerance.",
                self.name
            )));
        }
        if self.orbits.is_empty() {
            return Err(AppError::malformed(format!(
                "Scheme '{}': no orbits.",
                self.name
            )));
        }
        for orbit in &self.orbits {
            let kind = orbit.kind;
            if kind.domain() != self.domain {
                return Err(AppError::malformed(format!(
                    "Scheme '{}': orbit '{}' belongs to domain {}, scheme is {}.",
                    self.name,
                    kind.name(),
                    kind.domain().display_name(),
                    self.domain.display_name(),
                )));
            }
            let rows = orbit.data.len();
            if rows != 1 + kind.arity() {
                return Err(AppError::malformed(format!(
                    "Scheme '{}': orbit '{}' has {} data rows, expected {} (weights + parameters).",
                    self.name,
                    kind.name(),
                    rows,
                    1 + kind.arity(),
                )));
            }
            let cols = orbit.tuples();
            if cols == 0 {
                return Err(AppError::malformed(format!(
                    "Scheme '{}': orbit '{}' has an empty weight row.",
                    self.name,
                    kind.name(),
                )));
            }
            if orbit.data.iter().any(|row| row.len() != cols) {
                return Err(AppError::malformed(format!(
                    "Scheme '{}': orbit '{}' has ragged data rows.",
                    self.name,
                    kind.name(),
                )));
            }
        }
        Ok(())
    }
}
