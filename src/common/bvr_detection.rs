use serde::{Deserialize, Serialize};
use crate::common::BvrBox;

/// Final, labeled detection handed back to the caller.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BvrDetection {
    pub class_id: usize,
    pub bbox: BvrBox,
    pub label: String,
    pub confidence: f32,
}

impl BvrDetection {
    pub fn new(class_id: usize, bbox: BvrBox, label: &str, confidence: f32) -> Self {
        Self {
            class_id,
            bbox,
            label: label.to_string(),
            confidence,
        }
    }

    /// Sets the label of the detection.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Caption used by overlays, e.g. `person (95%)`. Halves round away from zero.
    pub fn caption(&self) -> String {
        format!("{} ({}%)", self.label, (self.confidence * 100.).round())
    }
}

impl std::fmt::Display for BvrDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x, y, w, h) = self.bbox.xy1_wh();
        write!(
            f,
            "Detection: Class: {} ({}), BBox: ({}, {}, {}, {}), Confidence: {:.2}",
            self.label, self.class_id, x, y, w, h, self.confidence
        )
    }
}
