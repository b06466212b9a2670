use rand::Rng;

use crate::error::{NetworkError, Result};

/// Dense weight matrix connecting one layer to the next.
///
/// Storage is a single flat `Vec<f64>` in source-major order: the weight from
/// source neuron `row` to destination neuron `col` lives at
/// `row * cols + col`. The shape is fixed at construction; callers can change
/// values but never the length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    pub fn zeros(rows: usize, cols: usize) -> WeightMatrix {
        WeightMatrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Fills a `rows × cols` matrix with independent draws from `[0, 1)`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> WeightMatrix {
        let data = (0..rows * cols).map(|_| rng.gen::<f64>()).collect();
        WeightMatrix { rows, cols, data }
    }

    /// Wraps existing source-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<WeightMatrix> {
        if data.len() != rows * cols {
            return Err(NetworkError::WeightShape {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(WeightMatrix { rows, cols, data })
    }

    /// Number of source neurons.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of destination neurons.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "weight ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Weight from source `row` to destination `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let i = self.index(row, col);
        self.data[i] = value;
    }

    /// All outgoing weights of one source neuron.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Overwrites every value in place; `values` must match `len()`.
    pub fn copy_from_slice(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.data.len() {
            return Err(NetworkError::WeightShape {
                expected: self.data.len(),
                actual: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Computes `z_j = Σ_i input_i * w(i, j)` for every destination `j`.
    ///
    /// # Panics
    /// Panics if `input.len() != rows()`.
    pub fn weighted_sums(&self, input: &[f64]) -> Vec<f64> {
        assert_eq!(input.len(), self.rows, "input length must equal row count");
        let mut sums = vec![0.0; self.cols];
        for (i, &a) in input.iter().enumerate() {
            for (sum, &w) in sums.iter_mut().zip(self.row(i)) {
                *sum += a * w;
            }
        }
        sums
    }
}
