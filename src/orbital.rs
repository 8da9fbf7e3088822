//! Orbitals and per-site basis sets.
//!
//! An [`Orbital`] is described by its quantum numbers $(n,l,m)$ and a spin tag.
//! The magnetic number follows the real-harmonic convention of the coupling
//! engine: $m<0$ is the sine-like partner, $m>0$ the cosine-like partner and
//! $m=0$ the harmonic aligned with the rotation axis.
use crate::rotation::MAX_DEGREE;
use crate::{Result, TbError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named real orbitals.
///
/// The mapping onto $(n,l,m)$ is fixed by the azimuthal coefficients of the
/// engine, so some harmonics come out with an overall sign relative to the
/// textbook cubic harmonics:
///
/// | kind | $(n,l,m)$ | harmonic |
/// |------|-----------|----------|
/// | `s` | $(0,0,0)$ | $s$ |
/// | `c` | $(1,0,0)$ | excited $s^*$ |
/// | `px` | $(0,1,-1)$ | $x$ |
/// | `py` | $(0,1,1)$ | $-y$ |
/// | `pz` | $(0,1,0)$ | $z$ |
/// | `dxy` | $(0,2,-2)$ | $-\sqrt3\,xy$ |
/// | `dxz` | $(0,2,-1)$ | $\sqrt3\,xz$ |
/// | `dz2` | $(0,2,0)$ | $(3z^2-r^2)/2$ |
/// | `dyz` | $(0,2,1)$ | $-\sqrt3\,yz$ |
/// | `dx2y2` | $(0,2,2)$ | $-\frac{\sqrt3}{2}(x^2-y^2)$ |
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OrbitalKind {
    s,
    c,
    px,
    py,
    pz,
    dxy,
    dxz,
    dz2,
    dyz,
    dx2y2,
}

impl OrbitalKind {
    /// $(n,l,m)$ of this orbital.
    pub fn quantum_numbers(&self) -> (u32, u32, i32) {
        match self {
            OrbitalKind::s => (0, 0, 0),
            OrbitalKind::c => (1, 0, 0),
            OrbitalKind::px => (0, 1, -1),
            OrbitalKind::py => (0, 1, 1),
            OrbitalKind::pz => (0, 1, 0),
            OrbitalKind::dxy => (0, 2, -2),
            OrbitalKind::dxz => (0, 2, -1),
            OrbitalKind::dz2 => (0, 2, 0),
            OrbitalKind::dyz => (0, 2, 1),
            OrbitalKind::dx2y2 => (0, 2, 2),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            OrbitalKind::s => "s",
            OrbitalKind::c => "c",
            OrbitalKind::px => "px",
            OrbitalKind::py => "py",
            OrbitalKind::pz => "pz",
            OrbitalKind::dxy => "dxy",
            OrbitalKind::dxz => "dxz",
            OrbitalKind::dz2 => "dz2",
            OrbitalKind::dyz => "dyz",
            OrbitalKind::dx2y2 => "dx2-y2",
        }
    }
}

impl FromStr for OrbitalKind {
    type Err = TbError;
    fn from_str(s: &str) -> Result<Self> {
        let kind = match s {
            "s" => OrbitalKind::s,
            "c" | "s*" => OrbitalKind::c,
            "px" => OrbitalKind::px,
            "py" => OrbitalKind::py,
            "pz" => OrbitalKind::pz,
            "dxy" => OrbitalKind::dxy,
            "dxz" => OrbitalKind::dxz,
            "dz2" => OrbitalKind::dz2,
            "dyz" => OrbitalKind::dyz,
            "dx2-y2" | "dx2y2" | "dx2my2" => OrbitalKind::dx2y2,
            _ => return Err(TbError::InvalidOrbitalName(s.to_string())),
        };
        Ok(kind)
    }
}

impl fmt::Display for OrbitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// One atomic orbital of a basis set.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Orbital {
    /// Principal quantum number code, `0` for the ground-state shell
    pub n: u32,
    /// Angular-momentum degree (0=s, 1=p, 2=d, ...)
    pub l: u32,
    /// Magnetic quantum number, $|m|\le l$
    pub m: i32,
    /// Spin / species channel tag; orbitals with different tags never couple
    pub s: u8,
    /// On-site energy in eV, not used by the coupling itself
    #[serde(default)]
    pub energy: f64,
}

impl Orbital {
    /// Create an orbital, checking $|m|\le l\le$ [`MAX_DEGREE`].
    pub fn new(n: u32, l: u32, m: i32, s: u8) -> Result<Self> {
        if l > MAX_DEGREE {
            return Err(TbError::DegreeTooLarge(l));
        }
        if m.unsigned_abs() > l {
            return Err(TbError::MagneticOutOfRange { l, m });
        }
        Ok(Self {
            n,
            l,
            m,
            s,
            energy: 0.0,
        })
    }

    pub fn from_kind(kind: OrbitalKind, spin: u8) -> Self {
        let (n, l, m) = kind.quantum_numbers();
        Self {
            n,
            l,
            m,
            s: spin,
            energy: 0.0,
        }
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }
}

/// The orbitals carried by one site, plus the species title used to build
/// bond labels.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AtomBasis {
    /// Species title, e.g. `"Si"`
    pub title: String,
    orbitals: Vec<Orbital>,
    labels: Vec<String>,
}

impl AtomBasis {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            orbitals: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Append an orbital under a free-form label.
    pub fn add_orbital(&mut self, label: &str, orbital: Orbital) -> &mut Self {
        self.labels.push(label.to_string());
        self.orbitals.push(orbital);
        self
    }

    /// Append a named orbital with its on-site energy.
    pub fn add_kind(&mut self, kind: OrbitalKind, energy: f64, spin: u8) -> &mut Self {
        self.add_orbital(kind.to_str(), Orbital::from_kind(kind, spin).with_energy(energy))
    }

    #[inline(always)]
    pub fn norb(&self) -> usize {
        self.orbitals.len()
    }

    pub fn orbitals(&self) -> &[Orbital] {
        &self.orbitals
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The `index`-th orbital, or an error naming this basis.
    pub fn orbital(&self, index: usize) -> Result<&Orbital> {
        self.orbitals
            .get(index)
            .ok_or_else(|| TbError::OrbitalIndexOutOfBounds {
                title: self.title.clone(),
                index,
                norb: self.orbitals.len(),
            })
    }

    /// Single-s hydrogen basis.
    pub fn hydrogen(spin: u8) -> Self {
        let mut basis = Self::new("H");
        basis.add_kind(OrbitalKind::s, 0.9998, spin);
        basis
    }

    /// Silicon $sp^3d^5s^*$ basis.
    pub fn silicon(spin: u8) -> Self {
        let mut basis = Self::new("Si");
        basis
            .add_kind(OrbitalKind::s, -2.0196, spin)
            .add_kind(OrbitalKind::c, 19.6748, spin)
            .add_kind(OrbitalKind::px, 4.5448, spin)
            .add_kind(OrbitalKind::py, 4.5448, spin)
            .add_kind(OrbitalKind::pz, 4.5448, spin)
            .add_kind(OrbitalKind::dz2, 14.1836, spin)
            .add_kind(OrbitalKind::dxz, 14.1836, spin)
            .add_kind(OrbitalKind::dyz, 14.1836, spin)
            .add_kind(OrbitalKind::dxy, 14.1836, spin)
            .add_kind(OrbitalKind::dx2y2, 14.1836, spin);
        basis
    }

    /// Bismuth $sp^3$ basis.
    pub fn bismuth(spin: u8) -> Self {
        let mut basis = Self::new("Bi");
        basis
            .add_kind(OrbitalKind::s, -10.906, spin)
            .add_kind(OrbitalKind::px, -0.486, spin)
            .add_kind(OrbitalKind::py, -0.486, spin)
            .add_kind(OrbitalKind::pz, -0.486, spin);
        basis
    }
}

impl fmt::Display for AtomBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtomBasis {{ title: {}, orbitals: [", self.title)?;
        for (i, (label, orb)) in self.labels.iter().zip(&self.orbitals).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}({},{},{};{})", label, orb.n, orb.l, orb.m, orb.s)?;
        }
        write!(f, "] }}")
    }
}
