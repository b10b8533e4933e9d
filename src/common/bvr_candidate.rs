use serde::{Deserialize, Serialize};
use crate::common::BvrBox;
use crate::detection_runners::nms::Nms;

/// A decoded prediction that passed the confidence gates but has not been through NMS yet.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BvrCandidate {
    pub bbox: BvrBox,
    pub class_id: usize,
    pub confidence: f32,
}

impl Nms for BvrCandidate {
    /// Computes the intersection over union (IoU) between this candidate's box and another.
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.iou(&other.bbox)
    }

    /// Returns the confidence score of the candidate.
    fn confidence(&self) -> f32 {
        self.confidence
    }
}

impl BvrCandidate {
    pub fn new(bbox: BvrBox, class_id: usize, confidence: f32) -> Self {
        Self {
            bbox,
            class_id,
            confidence,
        }
    }

    pub fn with_x1y1_wh(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.bbox = BvrBox::new(x, y, w, h);
        self
    }

    pub fn with_class_id(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }
}
