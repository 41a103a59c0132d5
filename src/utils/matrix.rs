use bytemuck::Pod;

use crate::types::CityId;

/// Dense square-or-rectangular matrix over a flat Vec, indexed by city.
#[derive(Debug, Clone)]
pub struct Matrix2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Matrix2<T> {
    pub fn new(rows: usize, cols: usize, init: T) -> Self {
        Self {
            data: vec![init; rows * cols],
            rows,
            cols,
        }
    }

    /// Square matrix with one row and column per city.
    pub fn square(n: usize, init: T) -> Self {
        Self::new(n, n, init)
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.cols + col]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.cols + col]
    }

    /// Bounds-checked lookup by city pair.
    #[inline]
    pub fn at(&self, from: CityId, to: CityId) -> Option<&T> {
        let (r, c) = (from.index(), to.index());
        (r < self.rows && c < self.cols).then(|| self.get(r, c))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }
}

// Byte-wise equality, so f64 matrices can be compared exactly.
impl<T: Pod> PartialEq for Matrix2<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && bytemuck::cast_slice::<T, u8>(&self.data)
                == bytemuck::cast_slice::<T, u8>(&other.data)
    }
}

impl<T: Pod> Eq for Matrix2<T> {}
