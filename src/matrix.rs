//! Dense 2-D matrix arithmetic for network inference and backpropagation.

use crate::error::{Error, Result};
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Dense row-major matrix of `f64` values.
///
/// A value type: `Clone` produces an independent deep copy and equality is
/// exact structural equality (shape, then every element, no tolerance).
/// The data is rectangular by construction; every shape-changing operation
/// allocates a fresh matrix, so the invariant cannot be broken after the fact.
///
/// Multiplication comes in three distinct named forms:
/// [`hadamard`](Matrix::hadamard) (elementwise, in place),
/// [`scale`](Matrix::scale) (scalar, in place) and [`matmul`](Matrix::matmul)
/// (true product, new matrix).
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Create a zero-filled `rows` x `cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        Ok(Self::zeroed(rows, cols))
    }

    /// Zero-filled matrix for internal construction with known-valid shapes.
    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Build a matrix from explicit rows, validating rectangularity.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(Error::ShapeMismatch {
                lhs_rows: rows,
                lhs_cols: cols,
                rhs_rows: 1,
                rhs_cols: bad.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a column matrix (`len` x 1) from a flat slice.
    pub fn from_array(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidDimension { rows: 1, cols: 0 });
        }
        let row = Self {
            rows: 1,
            cols: values.len(),
            data: vec![values.to_vec()],
        };
        Ok(row.transpose())
    }

    /// Flatten to a row-major vector of length `rows * cols`.
    pub fn to_array(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for row in &self.data {
            out.extend_from_slice(row);
        }
        out
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::ShapeMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols,
            });
        }
        Ok(())
    }

    /// Elementwise addition in place. Returns `self` for chaining.
    pub fn add(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_same_shape(other)?;
        Ok(self.apply_indexed(|v, i, j| v + other.data[i][j]))
    }

    /// Add a scalar to every element in place. Returns `self` for chaining.
    pub fn add_scalar(&mut self, n: f64) -> &mut Self {
        self.apply(|v| v + n)
    }

    /// Elementwise difference `a - b` as a new matrix.
    pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.check_same_shape(b)?;
        Ok(a.map_indexed(|v, i, j| v - b.data[i][j]))
    }

    /// Hadamard (elementwise) product in place. Returns `self` for chaining.
    pub fn hadamard(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_same_shape(other)?;
        Ok(self.apply_indexed(|v, i, j| v * other.data[i][j]))
    }

    /// Multiply every element by a scalar in place. Returns `self` for chaining.
    pub fn scale(&mut self, n: f64) -> &mut Self {
        self.apply(|v| v * n)
    }

    /// True matrix product `a x b`. Requires `a.cols == b.rows`.
    pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols != b.rows {
            return Err(Error::DimensionMismatch {
                expected: a.cols,
                actual: b.rows,
            });
        }
        let mut out = Matrix::zeroed(a.rows, b.cols);
        for i in 0..a.rows {
            for j in 0..b.cols {
                let mut sum = 0.0;
                for k in 0..a.cols {
                    sum += a.data[i][k] * b.data[k][j];
                }
                out.data[i][j] = sum;
            }
        }
        Ok(out)
    }

    /// Transposed copy with swapped dimensions.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeroed(self.cols, self.rows);
        out.apply_indexed(|_, i, j| self.data[j][i]);
        out
    }

    /// Apply a function to every element in place. Returns `self` for chaining.
    ///
    /// This is the universal traversal primitive; the other elementwise
    /// operations are expressed through it.
    pub fn apply<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(f64) -> f64,
    {
        self.apply_indexed(|v, _, _| f(v))
    }

    /// Apply a function of `(value, row, col)` to every element in place.
    pub fn apply_indexed<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(f64, usize, usize) -> f64,
    {
        for (i, row) in self.data.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = f(*value, i, j);
            }
        }
        self
    }

    /// Pure variant of [`apply`](Matrix::apply): maps into a new matrix.
    pub fn map<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        self.map_indexed(|v, _, _| f(v))
    }

    /// Pure variant of [`apply_indexed`](Matrix::apply_indexed).
    pub fn map_indexed<F>(&self, f: F) -> Matrix
    where
        F: FnMut(f64, usize, usize) -> f64,
    {
        let mut out = self.clone();
        out.apply_indexed(f);
        out
    }

    /// Fill with uniform random values in `[0, 1)`. Returns `self` for chaining.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.apply(|_| rng.gen::<f64>())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row][col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for value in row {
                write!(f, "{value:>10.4}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn matrix(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn new_matrix_is_zero_filled() {
        let m = Matrix::new(3, 4).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.to_array().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Matrix::new(0, 4),
            Err(Error::InvalidDimension { rows: 0, cols: 4 })
        );
        assert_eq!(
            Matrix::new(3, 0),
            Err(Error::InvalidDimension { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn add_scalar_to_matrix() {
        let mut m = matrix(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        m.add_scalar(1.0);

        let expected = matrix(vec![
            vec![2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0],
            vec![8.0, 9.0, 10.0],
        ]);
        assert_eq!(m, expected);
    }

    #[test]
    fn add_matrix_to_other_matrix() {
        let mut m = matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let n = matrix(vec![vec![10.0, 11.0], vec![12.0, 13.0]]);
        m.add(&n).unwrap();

        assert_eq!(m, matrix(vec![vec![11.0, 13.0], vec![15.0, 17.0]]));
    }

    #[test]
    fn subtract_matrix_from_other_matrix() {
        let m = matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let n = matrix(vec![vec![10.0, 11.0], vec![12.0, 13.0]]);
        let l = Matrix::subtract(&n, &m).unwrap();

        assert_eq!(l, matrix(vec![vec![9.0, 9.0], vec![9.0, 9.0]]));
    }

    #[test]
    fn matrix_product() {
        let m = matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let n = matrix(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let l = Matrix::matmul(&m, &n).unwrap();

        assert_eq!(l, matrix(vec![vec![58.0, 64.0], vec![139.0, 154.0]]));
    }

    #[test]
    fn hadamard_product() {
        let mut m = matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let n = matrix(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        m.hadamard(&n).unwrap();

        assert_eq!(
            m,
            matrix(vec![vec![7.0, 16.0], vec![27.0, 40.0], vec![55.0, 72.0]])
        );
    }

    #[test]
    fn scalar_product() {
        let mut m = matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        m.scale(7.0);

        assert_eq!(
            m,
            matrix(vec![vec![7.0, 14.0], vec![21.0, 28.0], vec![35.0, 42.0]])
        );
    }

    #[test]
    fn transpose_square_single_element() {
        let m = matrix(vec![vec![1.0]]);
        assert_eq!(m.transpose(), m);
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let m = matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let expected = matrix(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        assert_eq!(m.transpose(), expected);
    }

    #[test]
    fn double_transpose_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut m = Matrix::new(4, 7).unwrap();
        m.randomize(&mut rng);

        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn mapping_with_pure_map() {
        let m = matrix(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        let mapped = m.map(|v| v * 10.0);

        assert_eq!(
            mapped,
            matrix(vec![
                vec![10.0, 20.0, 30.0],
                vec![40.0, 50.0, 60.0],
                vec![70.0, 80.0, 90.0],
            ])
        );
        // the source is untouched
        assert_eq!(m[(0, 0)], 1.0);
    }

    #[test]
    fn mapping_in_place_with_indices() {
        let mut m = matrix(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        m.apply_indexed(|v, row, col| v * 100.0 + row as f64 * 10.0 + col as f64);

        assert_eq!(
            m,
            matrix(vec![
                vec![100.0, 201.0, 302.0],
                vec![410.0, 511.0, 612.0],
                vec![720.0, 821.0, 922.0],
            ])
        );
    }

    #[test]
    fn elementwise_ops_reject_mismatched_shapes() {
        let mut a = Matrix::new(1, 2).unwrap();
        let b = Matrix::new(3, 4).unwrap();

        assert!(a.add(&b).is_err());
        assert!(a.hadamard(&b).is_err());
        assert!(Matrix::subtract(&a, &b).is_err());
    }

    #[test]
    fn matmul_rejects_incompatible_inner_dimensions() {
        let a = Matrix::new(1, 2).unwrap();
        let b = Matrix::new(3, 4).unwrap();

        assert_eq!(
            Matrix::matmul(&a, &b),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn matrix_from_array_is_a_column() {
        let m = Matrix::from_array(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(m, matrix(vec![vec![1.0], vec![2.0], vec![3.0]]));
    }

    #[test]
    fn matrix_to_array_flattens_row_major() {
        let m = matrix(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        assert_eq!(
            m.to_array(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn chaining_in_place_operations() {
        let mut m = matrix(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        m.apply(|v| v - 1.0).scale(10.0).add_scalar(6.0);

        assert_eq!(
            m,
            matrix(vec![
                vec![6.0, 16.0, 26.0],
                vec![36.0, 46.0, 56.0],
                vec![66.0, 76.0, 86.0],
            ])
        );
    }

    #[test]
    fn randomize_fills_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut m = Matrix::new(5, 5).unwrap();
        m.randomize(&mut rng);

        assert!(m.to_array().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn clone_is_an_independent_deep_copy() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut m = Matrix::new(5, 5).unwrap();
        m.randomize(&mut rng);

        let mut n = m.clone();
        assert_eq!(n, m);

        n.add_scalar(1.0);
        assert_ne!(n, m);
    }
}
