use serde::{Deserialize, Serialize};
use crate::common::BvrDetection;

/// A detection box mapped from frame pixels into display units, ready for a renderer.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayItem {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

impl OverlayItem {
    /// Scales `det` from a `frame_size` image to a `display_size` surface.
    ///
    /// Each axis is scaled independently. An unknown display size (either side zero)
    /// or an empty frame leaves the box in frame pixels.
    pub fn from_detection(det: &BvrDetection, frame_size: (u32, u32), display_size: (u32, u32)) -> Self {
        let (frame_w, frame_h) = frame_size;
        let (display_w, display_h) = display_size;

        let (scale_x, scale_y) = if display_w > 0 && display_h > 0 && frame_w > 0 && frame_h > 0 {
            (display_w as f64 / frame_w as f64, display_h as f64 / frame_h as f64)
        } else {
            (1.0, 1.0)
        };

        let (x, y, w, h) = det.bbox.xy1_wh();
        Self {
            left: x as f64 * scale_x,
            top: y as f64 * scale_y,
            width: w as f64 * scale_x,
            height: h as f64 * scale_y,
            label: det.caption(),
        }
    }
}
