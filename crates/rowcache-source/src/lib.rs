//! Row source contract and row-mapping strategies
//!
//! A [`RowSource`] executes a parameterized statement against the underlying
//! database client and produces raw associative rows. A [`RowMapper`] turns
//! each raw row into the application shape the caller asked for:
//!
//! - [`RawRows`]: the raw associative row, untouched
//! - [`IntoRecord`]: a typed record populated from the row's columns
//! - [`MapRow`]: a caller-supplied transform over the raw row
//! - [`MapRecord`]: a caller-supplied transform over a typed record
//!
//! [`MemoryRowSource`] is a preloaded fixture source for demos and tests.

pub mod mapper;
pub mod memory;
pub mod source;

pub use mapper::{IntoRecord, MapRecord, MapRow, RawRows, RowMapper};
pub use memory::MemoryRowSource;
pub use source::RowSource;
