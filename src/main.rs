//! # forumprep
//!
//! Batch pipeline turning a forum-dataset export into a cleaned,
//! language-normalized, sentence-segmented translation corpus.
//!
//! ```sh
//! forumprep <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     shard        Shard a CSV export into JSONL chunk files
//!     reshape      Reshape wide shards into one-post-per-line shards
//!     normalize    Clean text, map language labels, sentence-split
//! ```
use structopt::StructOpt;

use forumprep::cli;
use forumprep::error::Error;
use forumprep::mapping::ColumnMap;
use forumprep::pipelines::{Normalize, Pipeline, Reshape, ShardCsv};

#[macro_use]
extern crate log;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Forumprep::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Forumprep::Shard(s) => {
            let p = ShardCsv::new(s.src, s.dst, s.chunk_size);
            p.run()?;
        }
        cli::Forumprep::Reshape(r) => {
            let columns = ColumnMap::from_path(&r.columns)?;
            let p = Reshape::new(r.src, r.dst, columns);
            p.run()?;
        }
        cli::Forumprep::Normalize(n) => {
            let p = Normalize::new(n.in_dir, n.out_dir, n.lang_map, n.keep_hint);
            p.run()?;
        }
    };
    Ok(())
}
