use crate::common::{BvrCandidate, BvrDetection, ClassLabels};
use crate::error::PostProcessError;

/// Turns the kept candidate indices into labeled detections, in `kept` order.
///
/// A class id without a label, or a kept index past the candidate list, means the
/// pipeline itself is inconsistent and is returned as an error straight away.
pub fn assemble(candidates: &[BvrCandidate], kept: &[usize], labels: &ClassLabels) -> crate::Result<Vec<BvrDetection>> {
    kept.iter()
        .map(|&index| {
            let candidate = candidates.get(index).ok_or(PostProcessError::CandidateIndexOutOfRange {
                index,
                candidates: candidates.len(),
            })?;
            let label = labels.get(candidate.class_id).ok_or(PostProcessError::LabelIndexOutOfRange {
                class_id: candidate.class_id,
                labels: labels.len(),
            })?;
            Ok(BvrDetection::new(candidate.class_id, candidate.bbox, label, candidate.confidence))
        })
        .collect()
}

/// Per-label counts such as `person: 2, car: 1`, labels in order of first appearance.
///
/// Returns `None` (the word) when there is nothing to report.
pub fn summarize(detections: &[BvrDetection]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for det in detections {
        match counts.iter_mut().find(|(label, _)| *label == det.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((det.label.as_str(), 1)),
        }
    }

    if counts.is_empty() {
        return "None".to_string();
    }
    counts
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect::<Vec<_>>()
        .join(", ")
}
