//! Line-delimited JSON record reader.
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Error;

/// Streams one JSON object per line; a single forward pass, never restarted.
///
/// Records are open key→value mappings since no source schema is enforced.
#[derive(Debug)]
pub struct Reader<T>
where
    T: Read,
{
    lines: Lines<BufReader<T>>,
}

pub type RecordReader = Reader<File>;

impl RecordReader {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let handle = File::open(src)?;
        Ok(Self::new(BufReader::new(handle)))
    }
}

impl<T> Reader<T>
where
    T: Read,
{
    pub fn new(reader: BufReader<T>) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<T> Iterator for Reader<T>
where
    T: Read,
{
    type Item = Result<Map<String, Value>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(Error::Io(e))),
        };
        Some(serde_json::from_str::<Map<String, Value>>(&line).map_err(Error::Serde))
    }
}
