//! src/error.rs
//! Error type for the boundary operations of the coupling engine.
//!
//! The coupling computation itself never fails: missing parameters, the
//! antiparallel-axis degeneracy and spin mismatches all resolve to a defined
//! value. Only building inputs (orbitals, directions) and reading parameter
//! tables can go wrong, and those are reported through [`TbError`].

use thiserror::Error;

/// The primary error type for all fallible operations in this library.
#[derive(Error, Debug)]
pub enum TbError {
    // --- I/O and Parsing Errors ---
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameter table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse data from file '{file}': {message}")]
    FileParse { file: String, message: String },

    #[error("Invalid orbital name: '{0}'")]
    InvalidOrbitalName(String),

    #[error("Invalid symmetry name: '{0}'")]
    InvalidSymmetryName(String),

    // --- Invalid Input and Arguments ---
    #[error("Magnetic quantum number m={m} is out of range for l={l}")]
    MagneticOutOfRange { l: u32, m: i32 },

    #[error("Orbital degree l={0} exceeds the supported maximum")]
    DegreeTooLarge(u32),

    #[error("Dimension mismatch for '{context}': expected {expected}, got {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("Cannot derive direction cosines from a zero-length vector")]
    ZeroLengthVector,

    #[error("Cannot derive direction cosines from a vector with non-finite components")]
    NonFiniteVector,

    #[error("Orbital index {index} is out of bounds for basis '{title}' with {norb} orbitals")]
    OrbitalIndexOutOfBounds {
        title: String,
        index: usize,
        norb: usize,
    },

    #[error("Parameters cannot be registered for the no-coupling shell of bond '{0}'")]
    NoCouplingShell(String),

    #[error("Invalid bond label: '{0}'")]
    InvalidBondLabel(String),
}

/// A specialized `Result` type for this library's operations.
pub type Result<T> = std::result::Result<T, TbError>;
