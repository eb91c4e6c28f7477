//! # gtfparse
//!
//! `gtfparse` reads GTF (Gene Transfer Format) annotation files into
//! [Polars](https://pola.rs) DataFrames.
//!
//! Every data line of a GTF file has nine tab-separated fields: `seqname`,
//! `source`, `feature`, `start`, `end`, `score`, `strand`, `frame` and
//! `attribute`. The first eight become typed columns (`start`/`end` as
//! `Int64`, `score` as `Float64` with `"."` read as NaN, the rest as
//! strings). The attribute field, a list of `key "value";` pairs whose keys
//! vary from line to line, is either kept verbatim or expanded into one
//! string column per key, with `""` where a line lacks that key.
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = BufReader::new(File::open("path/to/annotation.gtf")?);
//!     let table = gtfparse::parse_and_expand(file)?;
//!
//!     let transcripts = table.str_values("transcript_id")?;
//!     println!(
//!         "{} rows, {} attribute columns, first transcript: {:?}",
//!         table.height(),
//!         table.attribute_columns().len(),
//!         transcripts.first()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Reading options such as feature filtering or restricting the expanded
//! attributes are set on [`GtfReaderBuilder`]. The [`tools`] module holds
//! transforms for parsed tables.
//!
//! Malformed lines (wrong field count, non-numeric coordinates or score)
//! abort parsing with a [`ParsingError`]. Irregular attribute segments are
//! salvaged where possible and never fail the parse.
//!
//! ## Features
//!
//! * `compression`: read `.gz` files in [`read_gtf`].

pub mod data_structs;
pub mod error;
pub mod exports;
pub mod io;
pub mod schema;
pub mod tools;

pub use crate::data_structs::{
    AttributeEntry,
    GtfTable,
};
pub use crate::error::{
    ParsingError,
    Result,
};
pub use crate::io::gtf::{
    parse,
    parse_and_expand,
    read_gtf,
    GtfReadOptions,
    GtfReaderBuilder,
};
pub use crate::schema::{
    GtfColumns,
    REQUIRED_COLUMNS,
};
