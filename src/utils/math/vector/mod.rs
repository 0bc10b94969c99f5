pub mod math;

use std::fmt::Debug;

use num::Num;

/// SpVec is a sparse vector that treats zero as the implicit element.
/// It keeps `inds` (element positions) and `vals` (element values)
/// side by side.
///
/// `inds` is always strictly ascending.
#[derive(Clone, PartialEq)]
pub struct SpVec<N>
where
    N: Num + Copy,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    len: usize,
}

impl<N> SpVec<N>
where
    N: Num + Copy,
{
    /// Empty vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        SpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    #[inline]
    pub fn with_capacity(len: usize, nnz: usize) -> Self {
        SpVec {
            inds: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
            len,
        }
    }

    /// Build from (index, value) pairs in any order.
    /// Zero values are dropped, duplicate indices are summed.
    /// Indices at or past `len` are ignored.
    pub fn from_pairs<I>(len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let mut pairs: Vec<(usize, N)> = pairs.into_iter().filter(|(i, _)| *i < len).collect();
        pairs.sort_by_key(|(i, _)| *i);
        let mut vec = SpVec::with_capacity(len, pairs.len());
        for (idx, val) in pairs {
            if let (Some(&last), Some(slot)) = (vec.inds.last(), vec.vals.last_mut()) {
                if last == idx {
                    *slot = *slot + val;
                    continue;
                }
            }
            vec.inds.push(idx);
            vec.vals.push(val);
        }
        vec.retain_non_zero();
        vec
    }

    /// Append an element past the current last index.
    /// Returns false (and does nothing) if the index is out of order or out of range.
    #[inline]
    pub fn push(&mut self, index: usize, value: N) -> bool {
        if index >= self.len || self.inds.last().is_some_and(|&last| last >= index) {
            return false;
        }
        if value != N::zero() {
            self.inds.push(index);
            self.vals.push(value);
        }
        true
    }

    /// dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Value at `index`, zero if not stored
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate stored elements in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }

    /// Dense copy
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = val;
        }
        dense
    }

    #[inline]
    fn retain_non_zero(&mut self) {
        let mut keep = 0;
        for pos in 0..self.inds.len() {
            if self.vals[pos] != N::zero() {
                self.inds[keep] = self.inds[pos];
                self.vals[keep] = self.vals[pos];
                keep += 1;
            }
        }
        self.inds.truncate(keep);
        self.vals.truncate(keep);
    }
}

impl<N> Debug for SpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "SpVec(len: {}, nnz: {}) [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", idx, val)?;
            }
            write!(f, "]")
        } else {
            f.debug_map().entries(self.raw_iter()).finish()
        }
    }
}

/// Row-major sparse matrix: one SpVec per row, all of dimension `n_cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpMatrix<N>
where
    N: Num + Copy,
{
    rows: Vec<SpVec<N>>,
    n_cols: usize,
}

impl<N> SpMatrix<N>
where
    N: Num + Copy,
{
    /// Rows must all have dimension `n_cols`
    pub fn from_rows(rows: Vec<SpVec<N>>, n_cols: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == n_cols));
        SpMatrix { rows, n_cols }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&SpVec<N>> {
        self.rows.get(index)
    }

    #[inline]
    pub fn rows(&self) -> &[SpVec<N>] {
        &self.rows
    }

    /// total stored elements
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SpVec::nnz).sum()
    }
}
