use crate::common::{BvrDetection, RawOutputTensor};

/// Output tensors of one forward pass, tagged with the frame they came from.
#[derive(Debug, Clone)]
pub struct TensorFrame {
    pub frame_id: u64,
    pub tensors: Vec<RawOutputTensor>,
    pub target_width: u32,
    pub target_height: u32,
}

/// Post-processing result for one `TensorFrame`.
#[derive(Debug, Clone, Default)]
pub struct FrameDetections {
    pub frame_id: u64,
    pub detections: Vec<BvrDetection>,
    pub skipped_rows: usize,
}

/// Worker side of the frame channels.
#[derive(Debug)]
pub struct DetectionState {
    pub frame_rx: crossbeam_channel::Receiver<Box<TensorFrame>>,
    pub det_tx: crossbeam_channel::Sender<Box<FrameDetections>>,
}

/// Producer side of the frame channels.
#[derive(Debug)]
pub struct SendState {
    pub frame_tx: crossbeam_channel::Sender<Box<TensorFrame>>,
    pub det_rx: crossbeam_channel::Receiver<Box<FrameDetections>>,
}

/// Creates both ends with `capacity` frames of buffering in each direction.
pub fn frame_channels(capacity: usize) -> (SendState, DetectionState) {
    let (frame_tx, frame_rx) = crossbeam_channel::bounded(capacity);
    let (det_tx, det_rx) = crossbeam_channel::bounded(capacity);
    (
        SendState { frame_tx, det_rx },
        DetectionState { frame_rx, det_tx },
    )
}
