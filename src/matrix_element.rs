//! Two-center hopping integrals for arbitrarily oriented bonds.
//!
//! For orbitals $\ket{n_1 l_1 m_1}$ and $\ket{n_2 l_2 m_2}$ on two sites joined
//! by the unit vector $(L,M,N)$ the coupling is
//! $$
//! E=(-1)^{(l_1-l_2+|l_1-l_2|)/2}\Big[2A_{m_1}A_{m_2}d^{l_1}_{|m_1|0}d^{l_2}_{|m_2|0}V_{\sigma}
//! +\sum_{m=1}^{l_{min}}\left(S^{l_1}_{m_1m}S^{l_2}_{m_2m}+T^{l_1}_{m_1m}T^{l_2}_{m_2m}\right)V_{m}\Big]
//! $$
//! with $\gamma=\operatorname{atan2}(L,M)$, the rotation elements $d$ of
//! [`crate::rotation`] and the projectors $S$, $T$ of [`crate::angular`].
//! $V_m$ are the tabulated constants of the bond, see [`ParameterTable::lookup`].
use crate::angular::{a_coef, s_me, t_me};
use crate::diagnostics::DiagnosticSink;
use crate::geometry::DirectionCosines;
use crate::orbital::{AtomBasis, Orbital};
use crate::params::{BondLabel, ParameterTable, PrincipalCode, Shell};
use crate::rotation::rotation_element;
use crate::Result;
use log::debug;
use ndarray::Array2;
use rayon::prelude::*;

/// Sign $(-1)^{(l_1-l_2+|l_1-l_2|)/2}$ relating the orbital order of the call
/// to the $(l_{min},l_{max})$ order of the table: `+1` for $l_1\le l_2$,
/// $(-1)^{l_1-l_2}$ otherwise.
#[inline(always)]
pub fn sign_prefactor(l1: u32, l2: u32) -> f64 {
    if l1 > l2 && (l1 - l2) % 2 == 1 { -1.0 } else { 1.0 }
}

/// Coupling between `orb1` on a site of species `title1` and `orb2` on a site
/// of species `title2`, the bond pointing along `dir`.
///
/// Orbitals with different spin tags do not couple. Missing table entries
/// contribute zero and are reported to `sink`.
pub fn matrix_element<D: DiagnosticSink + ?Sized>(
    table: &ParameterTable,
    title1: &str,
    orb1: &Orbital,
    title2: &str,
    orb2: &Orbital,
    dir: &DirectionCosines,
    shell: Shell,
    sink: &D,
) -> f64 {
    if orb1.s != orb2.s {
        return 0.0;
    }
    bond_coupling(table, &BondLabel::new(title1, title2), orb1, orb2, dir, shell, sink)
}

/// [`matrix_element`] for an already resolved bond label, spin tags assumed equal.
fn bond_coupling<D: DiagnosticSink + ?Sized>(
    table: &ParameterTable,
    bond: &BondLabel,
    orb1: &Orbital,
    orb2: &Orbital,
    dir: &DirectionCosines,
    shell: Shell,
    sink: &D,
) -> f64 {
    let (l1, m1) = (orb1.l, orb1.m);
    let (l2, m2) = (orb2.l, orb2.m);

    let gamma = dir.gamma();
    let n = dir.n;

    let code = PrincipalCode::new(orb1.n, l1, orb2.n, l2);
    let l_min = l1.min(l2);
    let l_max = l1.max(l2);

    let mut ans = 2.0
        * a_coef(m1, gamma)
        * a_coef(m2, gamma)
        * rotation_element(n, l1, m1.abs(), 0)
        * rotation_element(n, l2, m2.abs(), 0)
        * table.lookup(bond, code, l_min, l_max, 0, shell, sink);

    for m in 1..=l_min {
        let mi = m as i32;
        ans += (s_me(n, l1, m1, mi, gamma) * s_me(n, l2, m2, mi, gamma)
            + t_me(n, l1, m1, mi, gamma) * t_me(n, l2, m2, mi, gamma))
            * table.lookup(bond, code, l_min, l_max, m, shell, sink);
    }

    sign_prefactor(l1, l2) * ans
}

/// [`matrix_element`] addressed by orbital index within two basis sets.
pub fn me<D: DiagnosticSink + ?Sized>(
    table: &ParameterTable,
    atom1: &AtomBasis,
    ll1: usize,
    atom2: &AtomBasis,
    ll2: usize,
    dir: &DirectionCosines,
    shell: Shell,
    sink: &D,
) -> Result<f64> {
    let orb1 = atom1.orbital(ll1)?;
    let orb2 = atom2.orbital(ll2)?;
    Ok(matrix_element(
        table,
        &atom1.title,
        orb1,
        &atom2.title,
        orb2,
        dir,
        shell,
        sink,
    ))
}

/// One site pair as seen by the Hamiltonian assembler.
#[derive(Debug, Clone, Copy)]
pub struct Bond<'a> {
    pub atom1: &'a AtomBasis,
    pub atom2: &'a AtomBasis,
    /// Direction from `atom1` to `atom2`
    pub direction: DirectionCosines,
    pub shell: Shell,
}

/// Coupling engine bound to one parameter table and one diagnostic sink.
///
/// The engine only borrows the table, so any number of engines (and threads)
/// can share a single [`ParameterTable`].
#[derive(Debug, Clone)]
pub struct SlaterKoster<'t, S> {
    table: &'t ParameterTable,
    sink: S,
}

impl<'t, S: DiagnosticSink> SlaterKoster<'t, S> {
    pub fn new(table: &'t ParameterTable, sink: S) -> Self {
        Self { table, sink }
    }

    pub fn table(&self) -> &ParameterTable {
        self.table
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Orbital-level coupling, see [`matrix_element`].
    pub fn coupling(
        &self,
        title1: &str,
        orb1: &Orbital,
        title2: &str,
        orb2: &Orbital,
        dir: &DirectionCosines,
        shell: Shell,
    ) -> f64 {
        matrix_element(self.table, title1, orb1, title2, orb2, dir, shell, &self.sink)
    }

    /// Coupling by orbital index, see [`me`].
    pub fn me(
        &self,
        atom1: &AtomBasis,
        ll1: usize,
        atom2: &AtomBasis,
        ll2: usize,
        dir: &DirectionCosines,
        shell: Shell,
    ) -> Result<f64> {
        me(self.table, atom1, ll1, atom2, ll2, dir, shell, &self.sink)
    }

    /// All couplings of one bond as a `norb1 × norb2` block.
    pub fn coupling_block(
        &self,
        atom1: &AtomBasis,
        atom2: &AtomBasis,
        dir: &DirectionCosines,
        shell: Shell,
    ) -> Array2<f64> {
        let bond = BondLabel::new(&atom1.title, &atom2.title);
        Array2::from_shape_fn((atom1.norb(), atom2.norb()), |(i, j)| {
            let (orb1, orb2) = (&atom1.orbitals()[i], &atom2.orbitals()[j]);
            if orb1.s != orb2.s {
                return 0.0;
            }
            bond_coupling(self.table, &bond, orb1, orb2, dir, shell, &self.sink)
        })
    }

    /// [`SlaterKoster::coupling_block`] for every bond, evaluated in parallel.
    /// Blocks come back in the order of `bonds`.
    pub fn bond_blocks_parallel(&self, bonds: &[Bond<'_>]) -> Vec<Array2<f64>> {
        debug!("evaluating {} bond blocks", bonds.len());
        bonds
            .par_iter()
            .map(|b| self.coupling_block(b.atom1, b.atom2, &b.direction, b.shell))
            .collect()
    }
}
