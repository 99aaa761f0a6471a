//! Pipeline orchestration.
//!
//! ## Submodules
//!
//! - [`artifacts`]: the tables a run produces
//! - [`observer`]: stage boundary hooks and timing
//! - [`runner`]: sequences resolution, matrix building, parsing, statistics and ranking

pub mod artifacts;
pub mod observer;
pub mod runner;

pub use artifacts::PipelineOutput;
pub use observer::{NoopObserver, PipelineObserver, RecordingObserver, StageReport};
pub use runner::Pipeline;
