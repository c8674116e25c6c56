//! Query engine for executing resolved filters and sorts against records
//!
//! This module provides:
//! - Conditions compiled from applied filters
//! - Orderings compiled from applied sorts
//! - The query builder seam and its in-memory implementation
//! - Pagination of the results

mod builder;
mod condition;
mod order;
mod pagination;
mod query_errors;

pub use builder::*;
pub use condition::*;
pub use order::*;
pub use pagination::*;
pub use query_errors::*;
