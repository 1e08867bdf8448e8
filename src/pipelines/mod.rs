/*! Pipeline stages.

Each stage reads from the previous one's output directory, is independently
re-runnable and idempotent given identical inputs and configuration.
!*/
pub mod normalize;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod reshape;
pub mod shard;

pub use normalize::{Normalize, NormalizeStats};
pub use pipeline::Pipeline;
pub use reshape::{Reshape, ReshapeSummary};
pub use shard::{ShardCsv, ShardSummary};
