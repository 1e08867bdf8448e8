//! Stage 1: shard a monolithic CSV export into JSONL chunk files.
//!
//! The source is streamed row by row and the output file is rotated every
//! `chunk_size` rows, so memory use stays flat regardless of source size.
//! Column types are inferred per field since the export carries no schema.
use std::path::PathBuf;

use log::info;
use serde_json::{Map, Number, Value};

use crate::error::Error;
use crate::io::{shard_file_name, ShardWriter};
use crate::pipelines::pipeline::Pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSummary {
    pub shards: usize,
    pub rows: u64,
}

pub struct ShardCsv {
    src: PathBuf,
    dst: PathBuf,
    chunk_size: usize,
}

impl ShardCsv {
    pub fn new(src: PathBuf, dst: PathBuf, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            src,
            dst,
            chunk_size,
        }
    }

    fn open_shard(&self, index: usize) -> Result<ShardWriter, Error> {
        ShardWriter::create(&self.dst.join(shard_file_name(index)))
    }

    fn close_shard(writer: ShardWriter, index: usize, rows: usize) -> Result<(), Error> {
        writer.finish()?;
        println!("wrote {} with {} rows", shard_file_name(index), rows);
        Ok(())
    }
}

impl Pipeline<ShardSummary> for ShardCsv {
    fn run(&self) -> Result<ShardSummary, Error> {
        if !self.src.is_file() {
            return Err(Error::SourceNotFound(self.src.clone()));
        }
        std::fs::create_dir_all(&self.dst)?;
        info!("sharding {:?} into {:?}", self.src, self.dst);

        let mut reader = csv::Reader::from_path(&self.src)?;
        let headers = reader.headers()?.clone();

        let mut writer: Option<ShardWriter> = None;
        let mut shard_idx = 0;
        let mut rows_in_shard = 0;
        let mut rows = 0u64;

        for record in reader.records() {
            let record = record?;
            let row = row_to_record(&headers, &record);

            let w = match &mut writer {
                Some(w) => w,
                slot => slot.insert(self.open_shard(shard_idx)?),
            };
            w.write_record(&row)?;
            rows_in_shard += 1;
            rows += 1;

            if rows_in_shard == self.chunk_size {
                if let Some(w) = writer.take() {
                    Self::close_shard(w, shard_idx, rows_in_shard)?;
                }
                shard_idx += 1;
                rows_in_shard = 0;
            }
        }
        // final, possibly shorter batch
        if let Some(w) = writer.take() {
            Self::close_shard(w, shard_idx, rows_in_shard)?;
            shard_idx += 1;
        }

        println!(
            "done. {} shard files created in {}",
            shard_idx,
            self.dst.display()
        );
        Ok(ShardSummary {
            shards: shard_idx,
            rows,
        })
    }
}

fn row_to_record(headers: &csv::StringRecord, record: &csv::StringRecord) -> Map<String, Value> {
    headers
        .iter()
        .zip(record.iter())
        .map(|(key, field)| (key.to_string(), infer_scalar(field)))
        .collect()
}

/// Empty → null, else integer, else finite float, else string.
fn infer_scalar(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = field.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(field.to_string())
}
