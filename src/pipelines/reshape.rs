//! Stage 2: reshape wide shards into long post shards.
//!
//! A wide record carries a question and a response as sibling fields; each
//! side becomes its own [Post] line, question first. A side missing its
//! content or identifier is skipped without error (forum exports carry a
//! baseline rate of half-empty rows).
use std::path::{Path, PathBuf};

use log::info;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::io::{shard_paths, RecordReader, ShardWriter};
use crate::mapping::ColumnMap;
use crate::pipelines::pipeline::Pipeline;
use crate::post::{Post, Role};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReshapeSummary {
    pub rows_in: u64,
    pub posts_out: u64,
}

pub struct Reshape {
    src: PathBuf,
    dst: PathBuf,
    columns: ColumnMap,
}

impl Reshape {
    pub fn new(src: PathBuf, dst: PathBuf, columns: ColumnMap) -> Self {
        Self { src, dst, columns }
    }

    fn process_shard(&self, src: &Path, summary: &mut ReshapeSummary) -> Result<(), Error> {
        let name = src
            .file_name()
            .ok_or_else(|| Error::Custom(format!("no file name in {:?}", src)))?;
        let mut writer = ShardWriter::create(&self.dst.join(name))?;

        for record in RecordReader::from_path(src)? {
            let record = record?;
            summary.rows_in += 1;
            // question side first: determines output line order
            for role in Role::SIDES {
                if let Some(post) = build_post(&record, role, &self.columns) {
                    writer.write_record(&post)?;
                    summary.posts_out += 1;
                }
            }
        }
        writer.finish()?;
        println!("wrote {}", name.to_string_lossy());
        Ok(())
    }
}

impl Pipeline<ReshapeSummary> for Reshape {
    fn run(&self) -> Result<ReshapeSummary, Error> {
        if !self.src.is_dir() {
            return Err(Error::SourceNotFound(self.src.clone()));
        }
        std::fs::create_dir_all(&self.dst)?;
        info!("reshaping {:?} into {:?}", self.src, self.dst);

        let mut summary = ReshapeSummary::default();
        for shard in shard_paths(&self.src)? {
            self.process_shard(&shard, &mut summary)?;
        }

        // counters are exact; the separators are display-only
        println!(
            "rows in (wide) ~{}, rows out (posts) ~{}",
            group_thousands(summary.rows_in),
            group_thousands(summary.posts_out)
        );
        Ok(summary)
    }
}

/// Extract one side of a wide record, or `None` when its content or
/// identifier is absent, null or whitespace-only.
pub fn build_post(record: &Map<String, Value>, role: Role, columns: &ColumnMap) -> Option<Post> {
    let side = columns.side(role);

    let text = scalar_str(record.get(&side.content)).filter(|s| !s.trim().is_empty())?;
    let raw_id = scalar_str(record.get(&side.id)).filter(|s| !s.trim().is_empty())?;

    let mut post = Post::new(role, &raw_id, text);
    post.thread_id = field(record, &columns.thread_id);
    post.created_at = field(record, &side.created_at);
    post.author = field(record, &side.user_id);
    post.lang_hint = field(record, &side.language);
    Some(post)
}

fn field(record: &Map<String, Value>, column: &str) -> Value {
    record.get(column).cloned().unwrap_or(Value::Null)
}

/// String form of a JSON scalar; `None` for null or absent values.
fn scalar_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
