//! In-memory structures produced by GTF parsing.
//!
//! - [`attributes`]: [`AttributeEntry`], the key/value pairs of a single
//!   line's attribute column.
//! - [`table`]: [`GtfTable`], a Polars DataFrame with the GTF column layout,
//!   and the [`TableAssembler`] which builds it from typed fixed columns and
//!   raw or expanded attribute columns.

pub mod attributes;
pub mod table;

pub use attributes::AttributeEntry;
pub use table::{
    AttributeColumns,
    ExpandedAttributes,
    FixedColumns,
    GtfTable,
    TableAssembler,
};
