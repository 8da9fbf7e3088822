//! Generalized rotation elements for the two-center integrals.
//!
//! The coupling constants in a parameter table are measured along the bond
//! axis. To use them for a bond pointing in an arbitrary direction they are
//! rotated with the small-angle formalism of Podolskiy and Vogl,
//! Phys. Rev. B **69**, 233101 (2004):
//! $$
//! d^l_{m_1 m_2}(N)=\left(\frac{1+N}{2}\right)^l
//! \left(\frac{1-N}{1+N}\right)^{(m_1-m_2)/2}
//! \sqrt{(l+m_2)!(l-m_2)!(l+m_1)!(l-m_1)!}
//! \sum_t \frac{(-1)^t}{(l+m_2-t)!(l-m_1-t)!\,t!\,(t+m_1-m_2)!}
//! \left(\frac{1-N}{1+N}\right)^t
//! $$
//! where $N$ is the direction cosine between the bond and the rotation axis.

/// Largest orbital degree with named orbital letters and symmetry channels.
/// The factorials it needs ($\le (2l)!$) are well inside [`FACTORIALS`].
pub const MAX_DEGREE: u32 = 4;

const fn factorial_table() -> [f64; 21] {
    let mut table = [1.0; 21];
    let mut i = 1;
    while i < 21 {
        table[i] = table[i - 1] * i as f64;
        i += 1;
    }
    table
}

/// $0!$ to $20!$, shared by every call.
pub static FACTORIALS: [f64; 21] = factorial_table();

#[inline(always)]
fn fact(n: i32) -> f64 {
    FACTORIALS[n as usize]
}

/// Rotation element $d^l_{m_1 m_2}(N)$.
///
/// `n` is the direction cosine to the rotation axis and must lie in $[-1,1]$;
/// `m1`, `m2` must satisfy $|m_i|\le l$ and `l` must not exceed [`MAX_DEGREE`].
///
/// At $N=-1$ the ratio $(1-N)/(1+N)$ blows up and the product turns into
/// $0\cdot\infty$. Every non-finite result is mapped to `0.0`, so the returned
/// value is always finite.
pub fn rotation_element(n: f64, l: u32, m1: i32, m2: i32) -> f64 {
    debug_assert!(l <= MAX_DEGREE, "orbital degree {l} exceeds MAX_DEGREE");
    debug_assert!(m1.unsigned_abs() <= l && m2.unsigned_abs() <= l);
    let l = l as i32;
    let ratio = (1.0 - n) / (1.0 + n);

    let prefactor = (0.5 * (1.0 + n)).powi(l)
        * ratio.powf(0.5 * (m1 - m2) as f64)
        * (fact(l + m2) * fact(l - m2) * fact(l + m1) * fact(l - m1)).sqrt();

    let mut ans = 0.0;
    for t in 0..(2 * l + 2) {
        if l + m2 - t >= 0 && l - m1 - t >= 0 && t + m1 - m2 >= 0 {
            let sign = if t % 2 == 0 { 1.0 } else { -1.0 };
            ans += sign * ratio.powi(t)
                / (fact(l + m2 - t) * fact(l - m1 - t) * fact(t) * fact(t + m1 - m2));
        }
    }

    let value = ans * prefactor;
    if value.is_finite() { value } else { 0.0 }
}
