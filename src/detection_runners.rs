pub mod assembler;
pub mod decoder;
pub mod frame_worker;
pub mod nms;
pub mod post_process;
mod post_processor;

pub use assembler::{assemble, summarize};
pub use decoder::{decode, decode_par, decode_tensor, DecodeParams, DecodeReport};
pub use frame_worker::spawn_frame_worker;
pub use nms::{suppress, Nms};
pub use post_process::{PostProcess, PostProcessOutput};
pub use post_processor::BvrPostProcessor;
