use std::time::Instant;
use crate::common::{BvrCandidate, BvrDetection, RawOutputTensor};
use crate::data::TimeCalc;
use crate::detection_runners::decoder::DecodeReport;
use crate::utils;

/// Detections of one pass plus what the decoder had to skip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostProcessOutput {
    pub detections: Vec<BvrDetection>,
    pub skipped_tensors: usize,
    pub skipped_rows: usize,
}

/// Decoder, suppressor and assembler stages behind one pipeline.
pub trait PostProcess {
    /// Decodes raw tensors into candidates in frame space.
    fn decode(&self, xs: &[RawOutputTensor], target_size: (u32, u32)) -> crate::Result<DecodeReport>;

    /// Picks the candidates that survive non-maximum suppression.
    fn suppress(&self, candidates: &[BvrCandidate]) -> Vec<usize>;

    /// Labels the surviving candidates.
    fn assemble(&self, candidates: &[BvrCandidate], kept: &[usize]) -> crate::Result<Vec<BvrDetection>>;

    /// Whether [`PostProcess::forward`] logs stage timings at info level.
    fn profile(&self) -> bool {
        false
    }

    /// Executes the full pipeline.
    fn run(&self, xs: &[RawOutputTensor], target_size: (u32, u32)) -> crate::Result<PostProcessOutput> {
        let report = self.decode(xs, target_size)?;
        let kept = self.suppress(&report.candidates);
        let detections = self.assemble(&report.candidates, &kept)?;
        Ok(PostProcessOutput {
            detections,
            skipped_tensors: report.skipped_tensors,
            skipped_rows: report.skipped_rows,
        })
    }

    /// Executes the full pipeline, recording decode/NMS/assemble times as stages 0, 1 and 2.
    fn forward(&self, xs: &[RawOutputTensor], target_size: (u32, u32), times: &mut TimeCalc) -> crate::Result<PostProcessOutput> {
        let profile = self.profile();
        let start = Instant::now();

        let t_decode = Instant::now();
        let report = self.decode(xs, target_size)?;
        times.add_or_push(0, t_decode.elapsed());

        let mut _elapsed = start.elapsed();
        _elapsed = utils::trace(profile, "TIME", "Decode", start, _elapsed);

        let t_nms = Instant::now();
        let kept = self.suppress(&report.candidates);
        times.add_or_push(1, t_nms.elapsed());

        _elapsed = utils::trace(profile, "TIME", "NMS", start, _elapsed);

        let t_assemble = Instant::now();
        let detections = self.assemble(&report.candidates, &kept)?;
        times.add_or_push(2, t_assemble.elapsed());

        utils::trace(profile, "TIME", "Assemble", start, _elapsed);

        Ok(PostProcessOutput {
            detections,
            skipped_tensors: report.skipped_tensors,
            skipped_rows: report.skipped_rows,
        })
    }
}
