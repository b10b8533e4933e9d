use crate::common::{BvrCandidate, BvrDetection, ClassLabels, RawOutputTensor};
use crate::data::ConfigPost;
use crate::detection_runners::assembler;
use crate::detection_runners::decoder::{self, DecodeParams, DecodeReport};
use crate::detection_runners::nms;
use crate::detection_runners::post_process::PostProcess;

/// Immutable post-processing context: validated thresholds plus the class labels.
///
/// Built once and shared by reference (or `Arc`) with whichever thread delivers
/// frames; every call works on fresh buffers.
#[derive(Debug, Clone)]
pub struct BvrPostProcessor {
    config: ConfigPost,
    labels: ClassLabels,
}

impl BvrPostProcessor {
    /// Validates `config` and pairs it with already loaded labels.
    pub fn new(config: ConfigPost, labels: ClassLabels) -> crate::Result<Self> {
        config.validate()?;
        log::info!(
            "Post-processor ready: {} classes, {} calibration, {} confidence",
            labels.len(),
            config.calibration.as_str(),
            config.confidence_mode.as_str()
        );
        Ok(Self { config, labels })
    }

    /// Validates `config` and loads the labels from `config.labels_path`.
    pub fn from_config(config: ConfigPost) -> crate::Result<Self> {
        config.validate()?;
        let labels = ClassLabels::from_file(&config.labels_path)?;
        Self::new(config, labels)
    }

    pub fn config(&self) -> &ConfigPost {
        &self.config
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Decoder parameters for a frame of `target_size`.
    pub fn decode_params(&self, target_size: (u32, u32)) -> DecodeParams {
        DecodeParams::new(
            self.config.calibration.input_size(target_size),
            target_size,
            self.labels.len(),
        )
        .with_thresholds(self.config.objectness_threshold, self.config.class_threshold)
        .with_confidence_mode(self.config.confidence_mode)
    }

    /// Runs decode, NMS and assembly for one inference pass.
    pub fn process(&self, xs: &[RawOutputTensor], target_size: (u32, u32)) -> crate::Result<Vec<BvrDetection>> {
        Ok(self.run(xs, target_size)?.detections)
    }
}

impl PostProcess for BvrPostProcessor {
    fn decode(&self, xs: &[RawOutputTensor], target_size: (u32, u32)) -> crate::Result<DecodeReport> {
        let params = self.decode_params(target_size);
        if self.config.parallel && xs.len() > 1 {
            decoder::decode_par(xs, &params)
        } else {
            decoder::decode(xs, &params)
        }
    }

    fn suppress(&self, candidates: &[BvrCandidate]) -> Vec<usize> {
        nms::suppress(candidates, self.config.score_threshold, self.config.iou_threshold)
    }

    fn assemble(&self, candidates: &[BvrCandidate], kept: &[usize]) -> crate::Result<Vec<BvrDetection>> {
        assembler::assemble(candidates, kept, &self.labels)
    }

    fn profile(&self) -> bool {
        self.config.profile
    }
}
