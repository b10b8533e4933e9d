use half::f16;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use crate::error::PostProcessError;

/// Number of leading columns before the class scores: `cx, cy, w, h, objectness`.
pub const ROW_PREFIX: usize = 5;

/// One output layer of the detector: `[N, 5 + C]`, one candidate per row.
///
/// Row layout is `[cx, cy, w, h, objectness, score_0 .. score_{C-1}]`, with
/// geometry normalized to the network input.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutputTensor {
    data: Array2<f32>,
}

impl RawOutputTensor {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    /// An output layer that produced no rows.
    pub fn empty(row_len: usize) -> Self {
        Self { data: Array2::zeros((0, row_len)) }
    }

    /// Builds a tensor from nested rows. Ragged input is rejected.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> crate::Result<Self> {
        let row_len = rows.first().map_or(0, Vec::len);
        if let Some(short) = rows.iter().find(|row| row.len() != row_len) {
            return Err(PostProcessError::InvalidTensorShape {
                tensor: 0,
                row_len: short.len(),
                expected: row_len,
            });
        }
        let n = rows.len();
        let flat = rows.into_iter().flatten().collect::<Vec<f32>>();
        let data = Array2::from_shape_vec((n, row_len), flat).map_err(|_| {
            PostProcessError::InvalidTensorShape {
                tensor: 0,
                row_len,
                expected: row_len,
            }
        })?;
        Ok(Self { data })
    }

    /// Widens a half-precision output (fp16 engines) to `f32`.
    pub fn from_f16(view: ArrayView2<'_, f16>) -> Self {
        Self { data: view.mapv(f32::from) }
    }

    /// Number of candidate rows.
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Length of every row.
    pub fn row_len(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn row_iter(&self) -> impl Iterator<Item = ArrayView1<'_, f32>> {
        self.data.axis_iter(Axis(0))
    }
}
