//! Declarative filter and sort resolution for listings.
//!
//! A domain declares the filters and sorts it accepts, the engine validates
//! raw request parameters against them, compiles the applied ones into a
//! query over in-memory records and wraps one page of results in a JSON
//! envelope describing what was applied and what else is allowed.

pub mod batch;
pub mod category;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod filter;
pub mod listing;
pub mod money;
pub mod params;
pub mod query;
pub mod record;
pub mod sort;
pub mod value;

pub use config::QueryConfig;
pub use envelope::{ErrorResponse, ResponseEnvelope};
pub use params::QueryParams;
pub use query::{Operand, Page, PageRequest, QueryError};
pub use record::{FieldId, FieldValue, Record, RecordId};
pub use value::{TypedValue, ValueType};
