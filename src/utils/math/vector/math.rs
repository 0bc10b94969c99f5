use std::cmp::Ordering;

use num::Num;

use super::SpVec;

impl<N> SpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product of two sparse vectors (merge join over indices)
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        let (a_inds, a_vals) = (self.indices(), self.values());
        let (b_inds, b_vals) = (other.indices(), other.values());
        let mut result = 0.0_f64;
        let (mut i, mut j) = (0, 0);
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result += a_vals[i].into() * b_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Σ v_i^2
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.values()
            .iter()
            .map(|&v| {
                let v: f64 = v.into();
                v * v
            })
            .sum()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }
}

impl SpVec<f32> {
    /// Scale to unit L2 norm. All-zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in self.values_mut() {
                *v = (*v as f64 / norm) as f32;
            }
        }
    }
}

impl SpVec<f64> {
    /// Scale to unit L2 norm. All-zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in self.values_mut() {
                *v /= norm;
            }
        }
    }
}
