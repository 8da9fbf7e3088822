//! Azimuthal weighting of the rotation elements.
//!
//! Real (cubic) harmonics are combinations of $\ket{l,m}$ and $\ket{l,-m}$.
//! The coefficients below carry the azimuth $\gamma$ of the bond, and the
//! combined projectors $S$ and $T$ mix the $\pm|m|$ rotation elements into
//! the symmetric and antisymmetric channels used by the matrix element sum.
use crate::rotation::rotation_element;
use std::f64::consts::FRAC_1_SQRT_2;

#[inline(always)]
fn parity(m: i32) -> f64 {
    if m.abs() % 2 == 0 { 1.0 } else { -1.0 }
}

/// Step function on the magnetic number: `1` for $m\ge 0$, `0` otherwise.
///
/// Note that $m=0$ maps to `1`.
#[inline(always)]
pub fn tau(m: i32) -> f64 {
    if m < 0 { 0.0 } else { 1.0 }
}

/// $A_m(\gamma)$: $1/\sqrt2$ for $m=0$, otherwise
/// $(-1)^{|m|}\left[\tau(m)\cos(|m|\gamma)-\tau(-m)\sin(|m|\gamma)\right]$.
pub fn a_coef(m: i32, gamma: f64) -> f64 {
    if m == 0 {
        FRAC_1_SQRT_2
    } else {
        let am = m.abs() as f64;
        parity(m) * (tau(m) * (am * gamma).cos() - tau(-m) * (am * gamma).sin())
    }
}

/// $B_m(\gamma)=(-1)^{|m|}\left[\tau(m)\sin(|m|\gamma)+\tau(-m)\cos(|m|\gamma)\right]$.
///
/// Only meaningful for $m\neq 0$; [`t_me`] never calls it with $m=0$.
pub fn b_coef(m: i32, gamma: f64) -> f64 {
    let am = m.abs() as f64;
    parity(m) * (tau(m) * (am * gamma).sin() + tau(-m) * (am * gamma).cos())
}

/// Symmetric projector
/// $S^l_{m_1 m_2}=A_{m_1}(\gamma)\left[(-1)^{|m_2|}d^l_{|m_1||m_2|}+d^l_{|m_1|,-|m_2|}\right]$.
pub fn s_me(n: f64, l: u32, m1: i32, m2: i32, gamma: f64) -> f64 {
    let (am1, am2) = (m1.abs(), m2.abs());
    a_coef(m1, gamma)
        * (parity(m2) * rotation_element(n, l, am1, am2) + rotation_element(n, l, am1, -am2))
}

/// Antisymmetric projector
/// $T^l_{m_1 m_2}=B_{m_1}(\gamma)\left[(-1)^{|m_2|}d^l_{|m_1||m_2|}-d^l_{|m_1|,-|m_2|}\right]$,
/// identically zero for $m_1=0$.
pub fn t_me(n: f64, l: u32, m1: i32, m2: i32, gamma: f64) -> f64 {
    if m1 == 0 {
        return 0.0;
    }
    let (am1, am2) = (m1.abs(), m2.abs());
    b_coef(m1, gamma)
        * (parity(m2) * rotation_element(n, l, am1, am2) - rotation_element(n, l, am1, -am2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn tau_is_one_at_zero() {
        assert_eq!(tau(0), 1.0);
        assert_eq!(tau(2), 1.0);
        assert_eq!(tau(-1), 0.0);
    }

    #[test]
    fn a_coef_values() {
        assert_abs_diff_eq!(a_coef(0, 1.234), FRAC_1_SQRT_2);
        // m>0 picks the cosine, m<0 the sine
        assert_abs_diff_eq!(a_coef(1, FRAC_PI_3), -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(a_coef(-1, FRAC_PI_2), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a_coef(2, FRAC_PI_3), (2.0 * FRAC_PI_3).cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(a_coef(-2, FRAC_PI_3), -(2.0 * FRAC_PI_3).sin(), epsilon = 1e-12);
    }

    #[test]
    fn b_coef_values() {
        assert_abs_diff_eq!(b_coef(1, FRAC_PI_2), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b_coef(-1, FRAC_PI_2), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b_coef(-2, FRAC_PI_3), (2.0 * FRAC_PI_3).cos(), epsilon = 1e-12);
    }

    #[test]
    fn t_me_vanishes_for_m_zero() {
        assert_eq!(t_me(0.3, 2, 0, 1, 0.7), 0.0);
    }

    #[test]
    fn p_shell_projectors() {
        let (n, gamma) = (0.4_f64, 0.9_f64);
        // S^1_{-1,1} = -N sin(gamma), T^1_{-1,1} = cos(gamma)
        assert_abs_diff_eq!(s_me(n, 1, -1, 1, gamma), -n * gamma.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(t_me(n, 1, -1, 1, gamma), gamma.cos(), epsilon = 1e-12);
        // S^1_{0,1} = sin(theta), independent of gamma
        assert_abs_diff_eq!(s_me(n, 1, 0, 1, gamma), (1.0 - n * n).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s_me(n, 1, 0, 1, 2.0), (1.0 - n * n).sqrt(), epsilon = 1e-12);
    }
}
