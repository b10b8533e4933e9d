//! Options for building a post-processor.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::data::{ConfidenceMode, InputCalibration};
use crate::error::PostProcessError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPost {
    pub labels_path: String,

    // thresholds, all within [0, 1]
    pub objectness_threshold: f32,
    pub class_threshold: f32,
    pub score_threshold: f32,
    pub iou_threshold: f32,

    pub calibration: InputCalibration,
    pub confidence_mode: ConfidenceMode,
    pub parallel: bool,
    pub profile: bool,
}

impl Default for ConfigPost {
    fn default() -> Self {
        Self {
            labels_path: String::new(),

            objectness_threshold: 0.5,
            class_threshold: 0.5,
            score_threshold: 0.5,
            iou_threshold: 0.4,

            calibration: InputCalibration::default(),
            confidence_mode: ConfidenceMode::default(),
            parallel: false,
            profile: false,
        }
    }
}

impl ConfigPost {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads a JSON config. Missing fields take their defaults; the result is validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigPost = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded post-processing config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_labels_path(mut self, labels_path: &str) -> Self {
        self.labels_path = labels_path.to_string();
        self
    }

    pub fn with_objectness(mut self, x: f32) -> Self {
        self.objectness_threshold = x;
        self
    }

    pub fn with_class_conf(mut self, x: f32) -> Self {
        self.class_threshold = x;
        self
    }

    pub fn with_score(mut self, x: f32) -> Self {
        self.score_threshold = x;
        self
    }

    pub fn with_iou(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_calibration(mut self, x: InputCalibration) -> Self {
        self.calibration = x;
        self
    }

    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.calibration = InputCalibration::Resize { width, height };
        self
    }

    pub fn with_confidence_mode(mut self, x: ConfidenceMode) -> Self {
        self.confidence_mode = x;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Rejects thresholds outside `[0, 1]` (NaN included) and zero network sizes.
    pub fn validate(&self) -> crate::Result<()> {
        let thresholds = [
            ("objectness_threshold", self.objectness_threshold),
            ("class_threshold", self.class_threshold),
            ("score_threshold", self.score_threshold),
            ("iou_threshold", self.iou_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(PostProcessError::InvalidThreshold { name, value });
            }
        }

        if let InputCalibration::Resize { width, height } = self.calibration {
            if width == 0 || height == 0 {
                return Err(PostProcessError::InvalidInputSize { width, height });
            }
        }
        Ok(())
    }

    pub fn to_string(&self) -> String {
        format!("Labels Path: {}\n\
        Objectness Threshold: {}\n\
        Class Threshold: {}\n\
        NMS Score Threshold: {}\n\
        NMS IoU Threshold: {}\n\
        Input Calibration: {:?}\n\
        Confidence Mode: {}\n\
        Parallel Decode: {}",
                self.labels_path, self.objectness_threshold, self.class_threshold,
                self.score_threshold, self.iou_threshold, self.calibration,
                self.confidence_mode.as_str(), self.parallel)
    }
}
