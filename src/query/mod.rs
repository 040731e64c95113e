//! Query subsystem
//!
//! Runs a [`QueryDescriptor`] over an in-memory record slice and produces a
//! [`ResultPage`].
//!
//! # Invariants
//!
//! - Deterministic: identical inputs give identical pages
//! - A record is kept iff it matches the search term and every active
//!   column predicate
//! - Sorting is stable; absent sort values settle at the end
//! - An out-of-range page is empty, never an error

mod descriptor;
mod engine;
mod result;
mod sorter;

pub use descriptor::{
    OutputFormat, PageRequest, Projection, QueryDescriptor, SortDirection, SortKey,
};
pub use engine::{run, ColumnFilter, QueryEngine};
pub use result::{Pagination, ResultPage};
pub use sorter::ResultSorter;
