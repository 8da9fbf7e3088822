#![allow(clippy::too_many_arguments)]
//! Diatomic coupling engine for empirical tight-binding models.
//!
//! The crate computes the hopping integral between two atomic orbitals on two
//! sites. Empirical Slater-Koster constants, tabulated along the bond axis for
//! each species pair and neighbour shell, are rotated into the actual bond
//! direction following A.V. Podolskiy and P. Vogl, Phys. Rev. B **69**, 233101
//! (2004). It currently provides:
//!
//! 1: Parameter tables (built-in Si, H and Bi sets, or loaded from JSON)
//!
//! 2: Rotation elements $d^l_{m_1m_2}(N)$ and the azimuthal projectors built on them
//!
//! 3: The scalar coupling between two orbitals, and the full coupling block of a bond
//!
//! Missing parameters never abort a calculation: they contribute zero and are
//! reported through a [`DiagnosticSink`].
//!
//! ```
//! use ndarray::array;
//! use tb_diatomic::*;
//!
//! let table = ParameterTable::builtin();
//! let sk = SlaterKoster::new(&table, LogSink);
//! let si = AtomBasis::silicon(0);
//! let dir = DirectionCosines::from_vector(&array![1.0, 1.0, 1.0]).unwrap();
//! let block = sk.coupling_block(&si, &si, &dir, Shell::First);
//! assert_eq!(block.dim(), (10, 10));
//! ```
pub mod angular;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod matrix_element;
pub mod orbital;
pub mod params;
pub mod rotation;

pub use crate::diagnostics::{
    DiagnosticSink, LogSink, MissCollector, MissCounter, MissKind, TableMiss,
};
pub use crate::error::{Result, TbError};
pub use crate::geometry::DirectionCosines;
pub use crate::matrix_element::{Bond, SlaterKoster, matrix_element, me, sign_prefactor};
pub use crate::orbital::{AtomBasis, Orbital, OrbitalKind};
pub use crate::params::{
    BondLabel, BondParameterSet, ParameterTable, PrincipalCode, Shell, symmetry_label,
};
pub use crate::rotation::{MAX_DEGREE, rotation_element};
