//! Pipeline trait.
use crate::error::Error;

/// Implemented by each stage; generic over the summary type returned by a
/// completed run so callers and tests can assert on counters.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
