use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::array;
use tb_diatomic::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit(v: [f64; 3]) -> DirectionCosines {
    DirectionCosines::from_vector(&array![v[0], v[1], v[2]]).unwrap()
}

fn si_si(kind: OrbitalKind) -> Orbital {
    Orbital::from_kind(kind, 0)
}

#[test]
fn rotation_identity_and_degeneracy() {
    for l in 0..=MAX_DEGREE {
        assert_abs_diff_eq!(rotation_element(1.0, l, 0, 0), 1.0, epsilon = 1e-12);
        let li = l as i32;
        for m1 in -li..=li {
            for m2 in -li..=li {
                assert!(rotation_element(-1.0, l, m1, m2).is_finite());
            }
        }
    }
}

#[test]
fn ss_sigma_on_axis() {
    init_logger();
    let table = ParameterTable::builtin();
    let counter = MissCounter::new();
    let s = si_si(OrbitalKind::s);
    let v = matrix_element(&table, "SI", &s, "SI", &s, &unit([0.0, 0.0, 1.0]), Shell::First, &counter);
    assert_relative_eq!(v, -1.9413, max_relative = 1e-12);
    assert_eq!(counter.count(), 0);
}

#[test]
fn ss_sigma_reversed_axis() {
    let table = ParameterTable::builtin();
    let s = si_si(OrbitalKind::s);
    let up = matrix_element(&table, "SI", &s, "SI", &s, &unit([0.0, 0.0, 1.0]), Shell::First, &());
    let down = matrix_element(&table, "SI", &s, "SI", &s, &unit([0.0, 0.0, -1.0]), Shell::First, &());
    assert_relative_eq!(up.abs(), down.abs(), max_relative = 1e-12);
    assert_relative_eq!(down, -1.9413, max_relative = 1e-12);
}

#[test]
fn sp_sigma_on_axis() {
    let table = ParameterTable::builtin();
    let s = si_si(OrbitalKind::s);
    let pz = si_si(OrbitalKind::pz);
    let v = matrix_element(&table, "SI", &s, "SI", &pz, &unit([0.0, 0.0, 1.0]), Shell::First, &());
    assert_relative_eq!(v, 2.7836, max_relative = 1e-12);
}

#[test]
fn missing_pd_sigma_for_h_si() {
    init_logger();
    let table = ParameterTable::builtin();
    let collector = MissCollector::new();
    let p = Orbital::new(0, 1, 0, 0).unwrap();
    let d = Orbital::new(0, 2, 0, 0).unwrap();
    let v = matrix_element(&table, "H", &p, "Si", &d, &unit([0.0, 0.0, 1.0]), Shell::First, &collector);
    assert_eq!(v, 0.0);
    // sigma and pi are both untabulated for H-Si
    let misses = collector.take();
    assert_eq!(misses.len(), 2);
    assert_eq!(misses[0].label, "pd_sigma");
    assert_eq!(misses[1].label, "pd_pi");
    assert!(misses.iter().all(|m| m.bond.as_str() == "H_SI" && m.kind == MissKind::Label));

    // the log sink just warns and carries on
    let sk = SlaterKoster::new(&table, LogSink);
    let v = sk.coupling("H", &p, "Si", &d, &unit([0.0, 0.0, 1.0]), Shell::First);
    assert_eq!(v, 0.0);
}

#[test]
fn no_coupling_shell_ignores_table() {
    let table = ParameterTable::builtin();
    let counter = MissCounter::new();
    let s = si_si(OrbitalKind::s);
    let v = matrix_element(&table, "BI", &s, "BI", &s, &unit([0.0, 0.0, 1.0]), Shell::NoCoupling, &counter);
    assert_eq!(v, 0.0);
    assert_eq!(counter.count(), 0);
}

#[test]
fn bismuth_shells() {
    let table = ParameterTable::builtin();
    let counter = MissCounter::new();
    let bi = AtomBasis::bismuth(0);
    let sk = SlaterKoster::new(&table, &counter);
    let dir = unit([0.0, 0.0, 1.0]);
    for (shell, vss) in [(1, -0.608), (2, -0.384), (3, 0.0)] {
        let v = sk.me(&bi, 0, &bi, 0, &dir, Shell::from_index(shell)).unwrap();
        assert_abs_diff_eq!(v, vss, epsilon = 1e-12);
    }
    assert_eq!(counter.count(), 0);
    // no unsuffixed Bi-Bi set: one miss per channel, zero coupling
    let v = sk.me(&bi, 3, &bi, 3, &dir, Shell::First).unwrap();
    assert_eq!(v, 0.0);
    assert_eq!(counter.count(), 2);
}

#[test]
fn swap_and_reverse_reproduces_coupling() {
    let table = ParameterTable::builtin();
    let d = unit([0.3, -0.5, 0.6]);
    let pairs = [
        (OrbitalKind::s, OrbitalKind::s),
        (OrbitalKind::s, OrbitalKind::px),
        (OrbitalKind::c, OrbitalKind::pz),
        (OrbitalKind::px, OrbitalKind::py),
        (OrbitalKind::pz, OrbitalKind::pz),
        (OrbitalKind::px, OrbitalKind::dxy),
        (OrbitalKind::pz, OrbitalKind::dz2),
        (OrbitalKind::py, OrbitalKind::dx2y2),
    ];
    for (ka, kb) in pairs {
        let (a, b) = (si_si(ka), si_si(kb));
        let forward = matrix_element(&table, "Si", &a, "Si", &b, &d, Shell::First, &());
        // swapped orbitals, same bond: parity (-1)^(l_a + l_b)
        let swapped = matrix_element(&table, "Si", &b, "Si", &a, &d, Shell::First, &());
        let parity = sign_prefactor(b.l, a.l) * sign_prefactor(a.l, b.l);
        assert_abs_diff_eq!(swapped, parity * forward, epsilon = 1e-12);
        // swapped orbitals, reversed bond: identical coupling
        let reversed = matrix_element(&table, "Si", &b, "Si", &a, &-d, Shell::First, &());
        assert_abs_diff_eq!(reversed, forward, epsilon = 1e-12);
    }
}

#[test]
fn closed_form_pd() {
    let table = ParameterTable::builtin();
    let d = unit([0.3, -0.5, 0.6]);
    let (l, m, n) = (d.l, d.m, d.n);
    let rho2 = l * l + m * m;
    let v = matrix_element(
        &table,
        "Si",
        &si_si(OrbitalKind::pz),
        "Si",
        &si_si(OrbitalKind::dz2),
        &d,
        Shell::First,
        &(),
    );
    let expected = n * (n * n - 0.5 * rho2) * -2.1073 + 3f64.sqrt() * n * rho2 * 1.9977;
    assert_abs_diff_eq!(v, expected, epsilon = 1e-12);

    let v = matrix_element(
        &table,
        "Si",
        &si_si(OrbitalKind::dz2),
        "Si",
        &si_si(OrbitalKind::dz2),
        &d,
        Shell::First,
        &(),
    );
    let expected = (n * n - 0.5 * rho2).powi(2) * -1.2327
        + 3.0 * n * n * rho2 * 2.5145
        + 0.75 * rho2 * rho2 * -2.4734;
    assert_abs_diff_eq!(v, expected, epsilon = 1e-12);
}

#[test]
fn table_from_json_drives_engine() {
    let json = r#"[{"bond": "C_C", "shell": 0, "params": {"pp_sigma": 6.38, "pp_pi": -2.66}}]"#;
    let table = ParameterTable::from_json_str(json).unwrap();
    let mut c = AtomBasis::new("C");
    c.add_kind(OrbitalKind::pz, 0.0, 0);
    let sk = SlaterKoster::new(&table, MissCounter::new());
    // graphene-like in-plane bond: pz-pz is pure pi
    let v = sk.me(&c, 0, &c, 0, &unit([1.0, 0.0, 0.0]), Shell::First).unwrap();
    assert_abs_diff_eq!(v, -2.66, epsilon = 1e-12);
    assert_eq!(sk.sink().count(), 0);
}
