/// Anything that can take part in non-maximum suppression.
pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn confidence(&self) -> f32;
}

/// Greedy non-maximum suppression across all classes.
///
/// Entries with `confidence <= score_threshold` are dropped first. The rest are
/// visited in descending confidence (a stable sort, so equal confidences keep
/// their input order); each visited entry is kept and removes every later entry
/// whose IoU with it is `>= iou_threshold`.
///
/// Returns indices into `boxes`, in the order they were kept.
pub fn suppress<T: Nms>(boxes: &[T], score_threshold: f32, iou_threshold: f32) -> Vec<usize> {
    let mut order = (0..boxes.len())
        .filter(|&i| boxes[i].confidence() > score_threshold)
        .collect::<Vec<usize>>();
    if order.is_empty() {
        return Vec::new();
    }

    order.sort_by(|&a, &b| boxes[b].confidence().total_cmp(&boxes[a].confidence()));

    let mut suppressed = vec![false; order.len()];
    let mut kept = Vec::new();

    for pos in 0..order.len() {
        if suppressed[pos] {
            continue;
        }
        let best = &boxes[order[pos]];
        kept.push(order[pos]);

        for later in (pos + 1)..order.len() {
            if !suppressed[later] && best.iou(&boxes[order[later]]) >= iou_threshold {
                suppressed[later] = true;
            }
        }
    }

    log::trace!("NMS kept {} of {} boxes", kept.len(), boxes.len());
    kept
}
