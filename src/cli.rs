//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "forumprep", about = "forum corpus preparation tool.")]
/// Holds every command that is callable by the `forumprep` command.
pub enum Forumprep {
    #[structopt(about = "Shard a CSV export into JSONL chunk files")]
    Shard(Shard),
    #[structopt(about = "Reshape wide shards into one-post-per-line shards")]
    Reshape(Reshape),
    #[structopt(about = "Clean text, map language labels, sentence-split")]
    Normalize(Normalize),
}

#[derive(Debug, StructOpt)]
/// Shard command and parameters.
pub struct Shard {
    #[structopt(parse(from_os_str), help = "source CSV file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "shard destination directory")]
    pub dst: PathBuf,
    #[structopt(
        help = "number of rows per shard file.",
        long = "chunk_size",
        default_value = "100000",
        short = "s"
    )]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
/// Reshape command and parameters.
pub struct Reshape {
    #[structopt(parse(from_os_str), help = "wide shard directory")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "long shard destination directory")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "columns",
        help = "path to the wide-to-long column map",
        default_value = "config/columns.json"
    )]
    pub columns: PathBuf,
}

#[derive(Debug, StructOpt)]
/// Normalize command and parameters.
pub struct Normalize {
    #[structopt(
        parse(from_os_str),
        long = "in_dir",
        help = "input directory with long-format JSONL shards",
        default_value = "data/shards_posts"
    )]
    pub in_dir: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "out_dir",
        help = "output directory for normalized shards",
        default_value = "data/shards_lang"
    )]
    pub out_dir: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "lang_map",
        help = "path to the label map (raw label -> canonical code)",
        default_value = "config/lang_map.json"
    )]
    pub lang_map: PathBuf,
    #[structopt(
        long = "keep-hint",
        help = "keep the original lang_hint field (dropped by default)"
    )]
    pub keep_hint: bool,
}
