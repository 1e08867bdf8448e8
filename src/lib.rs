/*! # forumprep

Preparation pipeline turning a raw forum-dataset export into a cleaned,
language-normalized, sentence-segmented corpus for translation-model training.

Three stages, each re-runnable and streaming one record at a time:

1. [pipelines::ShardCsv] — shard a monolithic CSV into JSONL chunk files.
2. [pipelines::Reshape] — split each wide question+response row into
   standalone post records.
3. [pipelines::Normalize] — clean text, map raw language labels to canonical
   codes and segment text into sentences.
!*/
pub mod cleaning;
pub mod cli;
pub mod error;
pub mod io;
pub mod mapping;
pub mod pipelines;
pub mod post;
pub mod segmenting;
