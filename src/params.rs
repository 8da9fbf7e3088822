//! Empirical diatomic parameter tables and their lookup.
//!
//! A [`ParameterTable`] maps `(bond, shell)` to a [`BondParameterSet`], which in
//! turn maps symmetry labels such as `"sp_sigma"` or `"1s1s_sigma"` to a
//! coupling constant in eV. Tables are built once and only read afterwards,
//! so one table can be shared by every thread assembling a Hamiltonian.
use crate::diagnostics::{DiagnosticSink, MissKind, TableMiss};
use crate::rotation::MAX_DEGREE;
use crate::{Result, TbError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Orbital letters indexed by $l$.
pub const ORBITAL_LETTERS: [&str; 5] = ["s", "p", "d", "f", "g"];
/// Names of the symmetry channels indexed by $|m|$.
pub const SYMMETRY_NAMES: [&str; 5] = ["sigma", "pi", "delta", "phi", "gamma"];

/// Neighbour shell a parameter set applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shell {
    /// The nearest-neighbour set, registered without a suffix (`PARAMS_SI_SI`)
    #[default]
    First,
    /// The `k`-th shell set, registered with suffix `k` (`PARAMS_BI_BI2`)
    Nth(usize),
    /// No physical coupling at this distance; lookups return zero
    NoCoupling,
}

impl Shell {
    /// `0` is the first shell, any other index the suffixed set.
    pub fn from_index(k: usize) -> Self {
        if k == 0 { Shell::First } else { Shell::Nth(k) }
    }

    /// `Nth(0)` is the first shell; every other value is already canonical.
    pub fn canonical(self) -> Self {
        match self {
            Shell::Nth(0) => Shell::First,
            other => other,
        }
    }

    /// Numeric index used in the on-disk format, `0` for the first shell.
    pub fn index(&self) -> usize {
        match self.canonical() {
            Shell::Nth(k) => k,
            _ => 0,
        }
    }

    /// Suffix appended to the bond label of the set, empty for the first shell.
    pub fn suffix(&self) -> String {
        match self.canonical() {
            Shell::Nth(k) => k.to_string(),
            _ => String::new(),
        }
    }
}

/// Order-independent label of a species pair: uppercased titles, sorted and
/// joined by `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BondLabel(String);

impl BondLabel {
    pub fn new(title1: &str, title2: &str) -> Self {
        let mut atoms = [title1.to_uppercase(), title2.to_uppercase()];
        atoms.sort();
        BondLabel(format!("{}_{}", atoms[0], atoms[1]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BondLabel {
    type Err = TbError;
    /// Parse `"SI_H"`, `"h_si"`, ... into the canonical `"H_SI"`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('_') {
            Some((a, b)) if !a.is_empty() && !b.is_empty() && !b.contains('_') => {
                Ok(BondLabel::new(a, b))
            }
            _ => Err(TbError::InvalidBondLabel(s.to_string())),
        }
    }
}

impl TryFrom<String> for BondLabel {
    type Error = TbError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BondLabel> for String {
    fn from(bond: BondLabel) -> String {
        bond.0
    }
}

impl Borrow<str> for BondLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BondLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Principal-quantum-number pair of a bond, ordered like the $(l_{min},l_{max})$
/// part of the symmetry label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrincipalCode(pub u32, pub u32);

impl PrincipalCode {
    /// Order $(n_1,n_2)$ so that it follows $(l_{min},l_{max})$; for equal
    /// degrees the smaller $n$ comes first.
    pub fn new(n1: u32, l1: u32, n2: u32, l2: u32) -> Self {
        if l1 > l2 {
            PrincipalCode(n2, n1)
        } else if l1 == l2 {
            PrincipalCode(n1.min(n2), n1.max(n2))
        } else {
            PrincipalCode(n1, n2)
        }
    }

    fn token(n: u32) -> String {
        // 基态壳层不写数字
        if n == 0 { String::new() } else { n.to_string() }
    }
}

/// Build the table key, e.g. `"sp_sigma"`, `"1s1s_sigma"`, `"s1s_sigma"`.
///
/// Requires `symmetry <= l_min <= l_max <= MAX_DEGREE`.
pub fn symmetry_label(code: PrincipalCode, l_min: u32, l_max: u32, symmetry: u32) -> String {
    debug_assert!(l_min <= l_max && l_max <= MAX_DEGREE && symmetry <= l_min);
    format!(
        "{}{}{}{}_{}",
        PrincipalCode::token(code.0),
        ORBITAL_LETTERS[l_min as usize],
        PrincipalCode::token(code.1),
        ORBITAL_LETTERS[l_max as usize],
        SYMMETRY_NAMES[symmetry as usize]
    )
}

/// Index of a symmetry channel name (`"sigma"` → 0, `"pi"` → 1, ...).
pub fn symmetry_index(name: &str) -> Result<u32> {
    SYMMETRY_NAMES
        .iter()
        .position(|s| *s == name)
        .map(|i| i as u32)
        .ok_or_else(|| TbError::InvalidSymmetryName(name.to_string()))
}

/// Coupling constants of one species pair at one shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BondParameterSet {
    params: BTreeMap<String, f64>,
}

impl BondParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            params: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    pub fn insert(&mut self, label: &str, value: f64) -> Option<f64> {
        self.params.insert(label.to_string(), value)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.params.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.params.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// --- Built-in parameter sets, energies in eV ---

/// Si-Si, nearest neighbours.
pub const PARAMS_SI_SI: &[(&str, f64)] = &[
    ("ss_sigma", -1.9413),
    ("1s1s_sigma", -3.3081),
    ("s1s_sigma", -1.6933),
    ("sp_sigma", 2.7836),
    ("1sp_sigma", 2.8428),
    ("sd_sigma", -2.7998),
    ("1sd_sigma", -0.7003),
    ("pp_sigma", 4.1068),
    ("pp_pi", -1.5934),
    ("pd_sigma", -2.1073),
    ("pd_pi", 1.9977),
    ("dd_sigma", -1.2327),
    ("dd_pi", 2.5145),
    ("dd_delta", -2.4734),
];

/// H-Si, nearest neighbours.
pub const PARAMS_H_SI: &[(&str, f64)] = &[
    ("ss_sigma", -3.9997),
    ("cs_sigma", -1.6977),
    ("sp_sigma", 4.2518),
    ("sd_sigma", -2.1055),
];

pub const PARAMS_H_H: &[(&str, f64)] = &[("ss_sigma", 1.0)];

/// Bi-Bi, first shell.
pub const PARAMS_BI_BI1: &[(&str, f64)] = &[
    ("ss_sigma", -0.608),
    ("sp_sigma", 1.320),
    ("pp_sigma", 1.854),
    ("pp_pi", -0.600),
];

/// Bi-Bi, second shell.
pub const PARAMS_BI_BI2: &[(&str, f64)] = &[
    ("ss_sigma", -0.384),
    ("sp_sigma", 0.433),
    ("pp_sigma", 1.396),
    ("pp_pi", -0.344),
];

/// Bi-Bi, third shell.
pub const PARAMS_BI_BI3: &[(&str, f64)] = &[
    ("ss_sigma", 0.0),
    ("sp_sigma", 0.0),
    ("pp_sigma", 0.156),
    ("pp_pi", 0.0),
];

/// One `(bond, shell)` entry in the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableRecord {
    bond: String,
    #[serde(default)]
    shell: usize,
    params: BondParameterSet,
}

/// Read-only mapping `(bond, shell)` → parameter set.
///
/// Shells are stored in canonical form, so `Shell::Nth(0)` and `Shell::First`
/// address the same set.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    sets: HashMap<BondLabel, HashMap<Shell, BondParameterSet>>,
}

impl ParameterTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with every built-in set registered.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        let builtin: [(&str, Shell, &[(&str, f64)]); 6] = [
            ("SI_SI", Shell::First, PARAMS_SI_SI),
            ("H_SI", Shell::First, PARAMS_H_SI),
            ("H_H", Shell::First, PARAMS_H_H),
            ("BI_BI", Shell::Nth(1), PARAMS_BI_BI1),
            ("BI_BI", Shell::Nth(2), PARAMS_BI_BI2),
            ("BI_BI", Shell::Nth(3), PARAMS_BI_BI3),
        ];
        for (bond, shell, pairs) in builtin {
            table
                .sets
                .entry(BondLabel(bond.to_string()))
                .or_default()
                .insert(shell, BondParameterSet::from_pairs(pairs));
        }
        table
    }

    /// Process-wide built-in table, constructed on first use.
    pub fn builtin_shared() -> &'static ParameterTable {
        static BUILTIN: OnceLock<ParameterTable> = OnceLock::new();
        BUILTIN.get_or_init(ParameterTable::builtin)
    }

    /// Register (or replace) the set for `bond` at `shell`.
    pub fn register(
        &mut self,
        bond: BondLabel,
        shell: Shell,
        set: BondParameterSet,
    ) -> Result<&mut Self> {
        if shell == Shell::NoCoupling {
            return Err(TbError::NoCouplingShell(bond.to_string()));
        }
        let shell = shell.canonical();
        let name = format!("PARAMS_{}{}", bond, shell.suffix());
        if self.sets.entry(bond).or_default().insert(shell, set).is_some() {
            debug!("replaced parameter set {}", name);
        }
        Ok(self)
    }

    pub fn get(&self, bond: &BondLabel, shell: Shell) -> Option<&BondParameterSet> {
        self.get_by_name(bond.as_str(), shell)
    }

    /// [`ParameterTable::get`] keyed by the label text, without building a [`BondLabel`].
    pub fn get_by_name(&self, bond: &str, shell: Shell) -> Option<&BondParameterSet> {
        // 无耦合壳层不查表
        if shell == Shell::NoCoupling {
            return None;
        }
        self.sets.get(bond)?.get(&shell.canonical())
    }

    pub fn len(&self) -> usize {
        self.sets.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Resolve one coupling constant.
    ///
    /// Returns `0.0` without touching the table for [`Shell::NoCoupling`].
    /// A missing set or label is a legitimate zero coupling: it returns `0.0`
    /// and reports exactly one [`TableMiss`] to `sink`.
    pub fn lookup<D: DiagnosticSink + ?Sized>(
        &self,
        bond: &BondLabel,
        code: PrincipalCode,
        l_min: u32,
        l_max: u32,
        symmetry: u32,
        shell: Shell,
        sink: &D,
    ) -> f64 {
        if shell == Shell::NoCoupling {
            return 0.0;
        }
        let label = symmetry_label(code, l_min, l_max, symmetry);
        let miss = |kind| TableMiss {
            bond: bond.clone(),
            shell: shell.canonical(),
            label: label.clone(),
            kind,
        };
        match self.get(bond, shell) {
            None => {
                sink.record(&miss(MissKind::Set));
                0.0
            }
            Some(set) => match set.get(&label) {
                Some(value) => value,
                None => {
                    sink.record(&miss(MissKind::Label));
                    0.0
                }
            },
        }
    }

    /// Parse a table from its JSON form:
    /// `[{"bond": "SI_SI", "shell": 0, "params": {"ss_sigma": -1.9413}}, ...]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<TableRecord> = serde_json::from_str(json)?;
        let mut table = Self::empty();
        for record in records {
            let bond: BondLabel = record.bond.parse()?;
            table.register(bond, Shell::from_index(record.shell), record.params)?;
        }
        Ok(table)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json).map_err(|e| match e {
            TbError::Json(err) => TbError::FileParse {
                file: path.display().to_string(),
                message: err.to_string(),
            },
            other => other,
        })
    }

    /// Serialize to the JSON form read by [`ParameterTable::from_json_str`],
    /// sorted by bond and shell.
    pub fn to_json_string(&self) -> Result<String> {
        let mut records: Vec<TableRecord> = self
            .sets
            .iter()
            .flat_map(|(bond, shells)| {
                shells.iter().map(move |(shell, params)| TableRecord {
                    bond: bond.to_string(),
                    shell: shell.index(),
                    params: params.clone(),
                })
            })
            .collect();
        records.sort_by(|a, b| (&a.bond, a.shell).cmp(&(&b.bond, b.shell)));
        Ok(serde_json::to_string_pretty(&records)?)
    }
}
