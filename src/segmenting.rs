/*! Sentence segmentation.

Splits cleaned text into sentences. Two strategies exist:

- the `unicode` feature (on by default) segments on Unicode sentence
  boundaries (UAX #29),
- without it, a deterministic regex fallback splits after sentence-terminal
  punctuation followed by whitespace.

The strategy is picked once by [segmenter] and threaded into the pipeline as
a plain function value, keeping the per-record path branch-free.
!*/
use lazy_static::lazy_static;
use regex::Regex;

/// Segmentation strategy: cleaned text in, trimmed non-empty sentences out.
pub type SegmentFn = fn(&str) -> Vec<String>;

/// Join segmented sentences into the flat newline-delimited `sents` field.
pub fn join_sentences(sentences: &[String]) -> String {
    sentences.join("\n")
}

/// Pick the segmentation strategy available in this build.
pub fn segmenter() -> SegmentFn {
    #[cfg(feature = "unicode")]
    {
        unicode_sentences
    }
    #[cfg(not(feature = "unicode"))]
    {
        punct_sentences
    }
}

#[cfg(feature = "unicode")]
fn unicode_sentences(text: &str) -> Vec<String> {
    use unicode_segmentation::UnicodeSegmentation;

    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

lazy_static! {
    /// Sentence-terminal punctuation followed by whitespace.
    static ref SENT_BOUNDARY_RE: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Regex fallback: split after `.`, `!` or `?` followed by whitespace.
pub fn punct_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENT_BOUNDARY_RE.find_iter(text) {
        // keep the punctuation mark (one byte), drop the whitespace
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
}
