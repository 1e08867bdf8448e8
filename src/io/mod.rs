/*! Shard IO.

Reading and writing of line-delimited JSON shard files. A shard is a unit of
batching only; files are numbered with a zero-padded index so lexicographic
order matches production order.
!*/
pub mod reader;
pub mod writer;

use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::error;

use crate::error::Error;

pub use reader::RecordReader;
pub use writer::ShardWriter;

/// Shard filename for a 0-based index: `shard_00000.jsonl`.
pub fn shard_file_name(index: usize) -> String {
    format!("shard_{:05}.jsonl", index)
}

/// Shard files in `dir`, sorted by filename.
///
/// Unreadable directory entries are logged and skipped.
pub fn shard_paths(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let pattern = dir.join("*.jsonl");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non-UTF8 shard directory: {:?}", dir)))?;
    let paths = glob::glob(pattern)?
        .filter_map(|entry| {
            entry.map_or_else(
                |e| {
                    error!("error reading shard directory entry: {}", e);
                    None
                },
                Some,
            )
        })
        .sorted()
        .collect();
    Ok(paths)
}
