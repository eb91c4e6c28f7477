//! GTF text parsing.
//!
//! Parsing is a linear pipeline over the whole input:
//!
//! 1. [`tokenizer`] skips comment and blank lines and splits data lines into
//!    nine tab-separated fields, failing on any other field count.
//! 2. [`coerce`] turns the eight fixed fields into typed columns (`start` and
//!    `end` as integers, `score` as float with `"."` mapped to NaN).
//! 3. [`expand`] optionally turns the attribute fields into one column per
//!    key.
//! 4. [`TableAssembler`](crate::data_structs::TableAssembler) joins the
//!    pieces into a [`GtfTable`](crate::data_structs::GtfTable).

pub mod coerce;
pub mod expand;
mod read;
pub mod tokenizer;

pub use coerce::{
    CoercedRow,
    ColumnCoercer,
};
pub use expand::AttributeExpander;
pub use read::{
    parse,
    parse_and_expand,
    read_gtf,
    GtfReadOptions,
    GtfReaderBuilder,
};
pub use tokenizer::{
    GtfLineTokenizer,
    RawRow,
};
