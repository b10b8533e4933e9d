mod bvr_box;
mod bvr_candidate;
mod bvr_detection;
mod class_labels;
mod overlay_item;
mod raw_output_tensor;

pub use bvr_box::*;
pub use bvr_candidate::*;
pub use bvr_detection::*;
pub use class_labels::*;
pub use overlay_item::*;
pub use raw_output_tensor::*;
