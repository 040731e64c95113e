//! Record model
//!
//! Nested records, dotted field paths, and the column catalog.

mod columns;
mod errors;
mod path;
mod value;

pub use columns::{Column, ColumnCatalog, ColumnCategory};
pub use errors::{RecordError, RecordResult};
pub use path::{
    canonical_path, flat_key, flatten, leaf_paths, project, resolve, resolve_field, FLAT_KEYS,
};
pub use value::{Number, Record, Value};
