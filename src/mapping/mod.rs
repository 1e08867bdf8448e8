/*! External configuration tables.

Both tables are loaded once at stage start and treated as immutable for the
remainder of the run.
!*/
mod columns;
mod labels;

pub use columns::{ColumnMap, SideColumns};
pub use labels::LabelMap;
