//! Bond direction cosines.
use crate::{Result, TbError};
use ndarray::{Array1, ArrayBase, Data, Ix1};
use std::ops::Neg;

/// Unit vector $(L,M,N)$ pointing from the first site to the second.
///
/// $N$ is the cosine to the rotation ($z$) axis and $\gamma=\operatorname{atan2}(L,M)$
/// is the azimuth used by the angular coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionCosines {
    pub l: f64,
    pub m: f64,
    pub n: f64,
}

impl DirectionCosines {
    /// Normalize an arbitrary nonzero, finite 3-vector.
    pub fn from_vector<S>(v: &ArrayBase<S, Ix1>) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        if v.len() != 3 {
            return Err(TbError::DimensionMismatch {
                context: "bond vector".to_string(),
                expected: 3,
                found: v.len(),
            });
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(TbError::NonFiniteVector);
        }
        // 先按最大分量缩放, 避免平方溢出
        let scale = v.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
        if scale < 1e-12 {
            return Err(TbError::ZeroLengthVector);
        }
        let scaled = v.mapv(|x| x / scale);
        let norm = scaled.dot(&scaled).sqrt();
        Ok(Self {
            l: scaled[0] / norm,
            m: scaled[1] / norm,
            n: scaled[2] / norm,
        })
    }

    /// Direction between two Cartesian positions, `from` → `to`.
    pub fn between<S, T>(from: &ArrayBase<S, Ix1>, to: &ArrayBase<T, Ix1>) -> Result<Self>
    where
        S: Data<Elem = f64>,
        T: Data<Elem = f64>,
    {
        if from.len() != to.len() {
            return Err(TbError::DimensionMismatch {
                context: "bond endpoints".to_string(),
                expected: from.len(),
                found: to.len(),
            });
        }
        Self::from_vector(&(to - from))
    }

    /// Take components as given. The caller guarantees unit length.
    #[inline(always)]
    pub fn new_unchecked(l: f64, m: f64, n: f64) -> Self {
        Self { l, m, n }
    }

    /// Azimuth $\gamma=\operatorname{atan2}(L,M)$.
    #[inline(always)]
    pub fn gamma(&self) -> f64 {
        self.l.atan2(self.m)
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(vec![self.l, self.m, self.n])
    }
}

impl Neg for DirectionCosines {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            l: -self.l,
            m: -self.m,
            n: -self.n,
        }
    }
}
