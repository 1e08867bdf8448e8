//! Stage 3: clean text, resolve language labels, segment into sentences.
//!
//! Per record: clean → map label → segment → emit, with two early-exit drop
//! points. Drops are counted, never errors; a line that fails to parse as
//! JSON aborts the run.
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::{Map, Value};

use crate::cleaning::clean;
use crate::error::Error;
use crate::io::{shard_paths, RecordReader, ShardWriter};
use crate::mapping::LabelMap;
use crate::pipelines::pipeline::Pipeline;
use crate::segmenting::{join_sentences, segmenter, SegmentFn};

/// Drop accounting for one shard or a whole run.
///
/// `kept + skipped_empty + skipped_unknown_label` equals the input record
/// count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub kept: u64,
    pub skipped_empty: u64,
    pub skipped_unknown_label: u64,
}

impl AddAssign for NormalizeStats {
    fn add_assign(&mut self, other: Self) {
        self.kept += other.kept;
        self.skipped_empty += other.skipped_empty;
        self.skipped_unknown_label += other.skipped_unknown_label;
    }
}

enum Outcome {
    Kept,
    EmptyText,
    UnknownLabel,
}

pub struct Normalize {
    src: PathBuf,
    dst: PathBuf,
    label_map_path: PathBuf,
    keep_hint: bool,
    segment: SegmentFn,
}

impl Normalize {
    pub fn new(src: PathBuf, dst: PathBuf, label_map_path: PathBuf, keep_hint: bool) -> Self {
        Self {
            src,
            dst,
            label_map_path,
            keep_hint,
            // strategy picked once, the per-record path stays branch-free
            segment: segmenter(),
        }
    }

    fn process_shard(&self, src: &Path, labels: &LabelMap) -> Result<NormalizeStats, Error> {
        let name = src
            .file_name()
            .ok_or_else(|| Error::Custom(format!("no file name in {:?}", src)))?;
        let mut writer = ShardWriter::create(&self.dst.join(name))?;
        let mut stats = NormalizeStats::default();

        for record in RecordReader::from_path(src)? {
            let mut record = record?;
            match self.normalize_record(&mut record, labels) {
                Outcome::Kept => {
                    writer.write_record(&record)?;
                    stats.kept += 1;
                }
                Outcome::EmptyText => stats.skipped_empty += 1,
                Outcome::UnknownLabel => stats.skipped_unknown_label += 1,
            }
        }
        writer.finish()?;
        Ok(stats)
    }

    /// Clean, resolve and segment one record in place.
    fn normalize_record(&self, record: &mut Map<String, Value>, labels: &LabelMap) -> Outcome {
        let text = match record.get("text") {
            Some(Value::String(s)) => clean(s),
            _ => String::new(),
        };
        if text.is_empty() {
            return Outcome::EmptyText;
        }

        let lang = match label_str(record.get("lang_hint")).and_then(|l| labels.resolve(&l)) {
            Some(code) => code.to_string(),
            None => return Outcome::UnknownLabel,
        };

        let sents = join_sentences(&(self.segment)(&text));

        record.insert("lang".to_string(), Value::String(lang));
        record.insert("text".to_string(), Value::String(text));
        record.insert("sents".to_string(), Value::String(sents));
        if !self.keep_hint {
            record.remove("lang_hint");
        }
        Outcome::Kept
    }
}

impl Pipeline<NormalizeStats> for Normalize {
    fn run(&self) -> Result<NormalizeStats, Error> {
        let labels = LabelMap::from_path(&self.label_map_path)?;

        let shards = shard_paths(&self.src)?;
        if shards.is_empty() {
            warn!("no .jsonl files found in {:?}", self.src);
            return Ok(NormalizeStats::default());
        }
        std::fs::create_dir_all(&self.dst)?;
        info!("normalizing {:?} into {:?}", self.src, self.dst);

        let mut totals = NormalizeStats::default();
        for (i, shard) in shards.iter().enumerate() {
            let stats = self.process_shard(shard, &labels)?;
            println!(
                "[{}/{}] {}: kept={} empty={} unknown={}",
                i + 1,
                shards.len(),
                shard.file_name().unwrap_or_default().to_string_lossy(),
                stats.kept,
                stats.skipped_empty,
                stats.skipped_unknown_label
            );
            totals += stats;
        }

        println!(
            "done. kept={}, skipped(empty)={}, skipped(unknown_label)={}",
            totals.kept, totals.skipped_empty, totals.skipped_unknown_label
        );
        Ok(totals)
    }
}

/// Raw label as a string; `None` for null/absent labels. Non-string scalars
/// (a numeric label column, say) are stringified before lookup.
fn label_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
