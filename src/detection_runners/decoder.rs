use ndarray::{s, ArrayView1};
use rayon::prelude::*;

use crate::common::{BvrCandidate, RawOutputTensor, ROW_PREFIX};
use crate::data::ConfidenceMode;
use crate::error::PostProcessError;

/// Everything the decoder needs besides the tensors themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeParams {
    /// Network input `(width, height)` the geometry is normalized to.
    pub input_size: (u32, u32),
    /// Frame `(width, height)` the boxes are reported in.
    pub target_size: (u32, u32),
    pub objectness_threshold: f32,
    pub class_threshold: f32,
    pub num_classes: usize,
    pub confidence_mode: ConfidenceMode,
}

impl DecodeParams {
    pub fn new(input_size: (u32, u32), target_size: (u32, u32), num_classes: usize) -> Self {
        Self {
            input_size,
            target_size,
            objectness_threshold: 0.5,
            class_threshold: 0.5,
            num_classes,
            confidence_mode: ConfidenceMode::default(),
        }
    }

    pub fn with_thresholds(mut self, objectness: f32, class: f32) -> Self {
        self.objectness_threshold = objectness;
        self.class_threshold = class;
        self
    }

    pub fn with_confidence_mode(mut self, mode: ConfidenceMode) -> Self {
        self.confidence_mode = mode;
        self
    }

    /// Shortest row that still carries every class score.
    pub fn expected_row_len(&self) -> usize {
        ROW_PREFIX + self.num_classes
    }

    /// Fails on a zero-sized network input, which has no meaningful geometry to scale.
    pub fn validate(&self) -> crate::Result<()> {
        let (width, height) = self.input_size;
        if width == 0 || height == 0 {
            return Err(PostProcessError::InvalidInputSize { width, height });
        }
        Ok(())
    }

    /// Per-axis factors from network input space to frame space.
    fn scale(&self) -> (f32, f32) {
        (
            self.target_size.0 as f32 / self.input_size.0 as f32,
            self.target_size.1 as f32 / self.input_size.1 as f32,
        )
    }
}

/// Candidates from every well-formed tensor plus a tally of what was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub candidates: Vec<BvrCandidate>,
    pub skipped_tensors: usize,
    pub skipped_rows: usize,
}

/// Decodes one tensor, failing if its rows are too short for the label count.
pub fn decode_tensor(tensor: &RawOutputTensor, params: &DecodeParams) -> crate::Result<Vec<BvrCandidate>> {
    params.validate()?;
    decode_tensor_at(0, tensor, params)
}

/// Decodes every tensor in order. A malformed tensor is logged, counted and skipped.
///
/// Only bad parameters fail the whole call.
pub fn decode(tensors: &[RawOutputTensor], params: &DecodeParams) -> crate::Result<DecodeReport> {
    params.validate()?;
    let results = tensors
        .iter()
        .enumerate()
        .map(|(idx, tensor)| decode_tensor_at(idx, tensor, params))
        .collect::<Vec<_>>();
    Ok(merge(tensors, results))
}

/// Same as [`decode`], with the tensors decoded on the rayon pool.
///
/// Candidate order matches the sequential path.
pub fn decode_par(tensors: &[RawOutputTensor], params: &DecodeParams) -> crate::Result<DecodeReport> {
    params.validate()?;
    let results = tensors
        .par_iter()
        .enumerate()
        .map(|(idx, tensor)| decode_tensor_at(idx, tensor, params))
        .collect::<Vec<_>>();
    Ok(merge(tensors, results))
}

fn merge(tensors: &[RawOutputTensor], results: Vec<crate::Result<Vec<BvrCandidate>>>) -> DecodeReport {
    let mut report = DecodeReport::default();
    for (tensor, result) in tensors.iter().zip(results) {
        match result {
            Ok(mut candidates) => report.candidates.append(&mut candidates),
            Err(err) => {
                log::warn!("Skipping output tensor: {}", err);
                report.skipped_tensors += 1;
                report.skipped_rows += tensor.rows();
            }
        }
    }
    log::debug!(
        "Decoded {} candidates from {} tensors ({} rows skipped)",
        report.candidates.len(),
        tensors.len(),
        report.skipped_rows
    );
    report
}

fn decode_tensor_at(idx: usize, tensor: &RawOutputTensor, params: &DecodeParams) -> crate::Result<Vec<BvrCandidate>> {
    if tensor.is_empty() {
        return Ok(Vec::new());
    }

    let expected = params.expected_row_len();
    if tensor.row_len() < expected {
        return Err(PostProcessError::InvalidTensorShape {
            tensor: idx,
            row_len: tensor.row_len(),
            expected,
        });
    }

    let scale = params.scale();
    Ok(tensor
        .row_iter()
        .filter_map(|row| decode_row(row, params, scale))
        .collect())
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn decode_row(row: ArrayView1<'_, f32>, params: &DecodeParams, (sx, sy): (f32, f32)) -> Option<BvrCandidate> {
    // written as "keep only if greater" so NaN never passes a gate
    let objectness = row[4];
    if !(objectness > params.objectness_threshold) {
        return None;
    }

    let scores = row.slice(s![ROW_PREFIX..ROW_PREFIX + params.num_classes]);
    let (class_id, score) = first_max(scores)?;

    let confidence = params.confidence_mode.confidence(objectness, score);
    if !(confidence > params.class_threshold) {
        return None;
    }

    let (in_w, in_h) = (params.input_size.0 as f32, params.input_size.1 as f32);
    let cx = row[0] * in_w;
    let cy = row[1] * in_h;
    let w = row[2] * in_w;
    let h = row[3] * in_h;

    // `as i32` truncates toward zero
    let x = ((cx - w / 2.) * sx) as i32;
    let y = ((cy - h / 2.) * sy) as i32;
    let width = (w * sx) as i32;
    let height = (h * sy) as i32;

    Some(
        BvrCandidate::default()
            .with_x1y1_wh(x, y, width, height)
            .with_class_id(class_id)
            .with_confidence(confidence),
    )
}

/// Index and value of the largest score; the lowest index wins a tie and NaN scores are ignored.
fn first_max(scores: ArrayView1<'_, f32>) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .fold(None, |best, cur| match best {
            Some(best) if cur.1 <= best.1 => Some(best),
            _ => Some(cur),
        })
}
