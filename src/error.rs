use thiserror::Error;

/// Errors raised by the post-processing pipeline and its loaders.
#[derive(Error, Debug)]
pub enum PostProcessError {
    /// A tensor's rows are too short to carry box, objectness and every class score.
    #[error("tensor {tensor} has rows of length {row_len}, expected at least {expected}")]
    InvalidTensorShape {
        tensor: usize,
        row_len: usize,
        expected: usize,
    },

    /// A candidate refers to a class that has no label. Internal consistency failure.
    #[error("class id {class_id} has no label ({labels} labels loaded)")]
    LabelIndexOutOfRange { class_id: usize, labels: usize },

    /// A kept index does not point into the candidate list. Internal consistency failure.
    #[error("kept index {index} is out of range for {candidates} candidates")]
    CandidateIndexOutOfRange { index: usize, candidates: usize },

    #[error("threshold `{name}` must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("network input size must be non-zero, got {width}x{height}")]
    InvalidInputSize { width: u32, height: u32 },

    #[error("no class labels were loaded")]
    EmptyLabels,

    #[error("invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PostProcessError {
    /// True for errors that signal a defect in the pipeline rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            PostProcessError::LabelIndexOutOfRange { .. }
                | PostProcessError::CandidateIndexOutOfRange { .. }
        )
    }
}
