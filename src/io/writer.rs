//! Shard file writer.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Error;

/// Writes one JSON object per line to a single shard file.
///
/// `serde_json` emits unescaped UTF-8, so non-ASCII text is preserved
/// literally. The handle is scoped to one shard; [ShardWriter::finish] flushes
/// before the next shard is opened.
pub struct ShardWriter {
    handle: BufWriter<File>,
}

impl ShardWriter {
    /// Create (or overwrite) the shard file at `path`.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let handle = BufWriter::new(File::create(path)?);
        Ok(Self { handle })
    }

    pub fn write_record<S: Serialize>(&mut self, record: &S) -> Result<(), Error> {
        serde_json::to_writer(&mut self.handle, record)?;
        self.handle.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and close the shard.
    pub fn finish(mut self) -> Result<(), Error> {
        self.handle.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shard_00000.jsonl");

        let mut w = ShardWriter::create(&path).unwrap();
        w.write_record(&json!({"id": "q:1", "text": "oli otya?"}))
            .unwrap();
        w.write_record(&json!({"id": "r:1", "text": "bulungi"}))
            .unwrap();
        w.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        // non-ASCII stays literal, no \u escapes
        let mut w = ShardWriter::create(&path).unwrap();
        w.write_record(&json!({"text": "привет"})).unwrap();
        w.finish().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("привет"));
    }
}
