use once_cell::sync::Lazy;
use polars::prelude::*;

/// Number of tab-separated fields on every GTF data line.
pub const N_REQUIRED_COLUMNS: usize = 9;

/// Names of the nine GTF columns, in file order.
///
/// Used both to name the output columns and to validate the field count of
/// every data line.
pub const REQUIRED_COLUMNS: [&str; N_REQUIRED_COLUMNS] = GtfColumns::colnames();

/// Source value written into rows synthesised by
/// [`create_missing_features`](crate::tools::create_missing_features).
pub const SYNTHETIC_SOURCE: &str = "gtfparse";

static FIXED_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::from_iter(
        GtfColumns::fixed()
            .iter()
            .map(|c| (PlSmallStr::from(c.as_str()), c.dtype())),
    )
});

static RAW_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::from_iter(
        GtfColumns::all()
            .iter()
            .map(|c| (PlSmallStr::from(c.as_str()), c.dtype())),
    )
});

/// Represents the columns of a GTF file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GtfColumns {
    Seqname,
    Source,
    Feature,
    Start,
    End,
    Score,
    Strand,
    Frame,
    Attribute,
}

impl GtfColumns {
    /// All nine columns in file order.
    pub const fn all() -> [GtfColumns; N_REQUIRED_COLUMNS] {
        [
            GtfColumns::Seqname,
            GtfColumns::Source,
            GtfColumns::Feature,
            GtfColumns::Start,
            GtfColumns::End,
            GtfColumns::Score,
            GtfColumns::Strand,
            GtfColumns::Frame,
            GtfColumns::Attribute,
        ]
    }

    /// The eight typed columns which precede the attribute column.
    pub const fn fixed() -> [GtfColumns; N_REQUIRED_COLUMNS - 1] {
        [
            GtfColumns::Seqname,
            GtfColumns::Source,
            GtfColumns::Feature,
            GtfColumns::Start,
            GtfColumns::End,
            GtfColumns::Score,
            GtfColumns::Strand,
            GtfColumns::Frame,
        ]
    }

    /// Returns the string representation of the column name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GtfColumns::Seqname => "seqname",
            GtfColumns::Source => "source",
            GtfColumns::Feature => "feature",
            GtfColumns::Start => "start",
            GtfColumns::End => "end",
            GtfColumns::Score => "score",
            GtfColumns::Strand => "strand",
            GtfColumns::Frame => "frame",
            GtfColumns::Attribute => "attribute",
        }
    }

    /// Zero-based position of the field on a data line.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the Polars DataType the column is coerced into.
    pub const fn dtype(&self) -> DataType {
        match self {
            GtfColumns::Start | GtfColumns::End => DataType::Int64,
            GtfColumns::Score => DataType::Float64,
            _ => DataType::String,
        }
    }

    /// Returns an array containing all GTF column names as strings.
    pub const fn colnames() -> [&'static str; N_REQUIRED_COLUMNS] {
        [
            GtfColumns::Seqname.as_str(),
            GtfColumns::Source.as_str(),
            GtfColumns::Feature.as_str(),
            GtfColumns::Start.as_str(),
            GtfColumns::End.as_str(),
            GtfColumns::Score.as_str(),
            GtfColumns::Strand.as_str(),
            GtfColumns::Frame.as_str(),
            GtfColumns::Attribute.as_str(),
        ]
    }

    /// Checks if the given string matches any of the eight typed column
    /// names.
    pub fn is_fixed_name(name: &str) -> bool {
        Self::fixed().iter().any(|c| c.as_str() == name)
    }

    /// Checks if the given string matches any of the GTF column names.
    pub fn has_name(name: &str) -> bool {
        REQUIRED_COLUMNS.contains(&name)
    }

    /// Schema of the eight typed columns.
    pub fn fixed_schema() -> &'static Schema {
        &FIXED_SCHEMA
    }

    /// Schema of a table parsed without attribute expansion.
    pub fn schema() -> &'static Schema {
        &RAW_SCHEMA
    }

    /// Creates a Polars expression (Expr) referencing this column.
    #[inline(always)]
    pub fn col(&self) -> Expr {
        col(self.as_str())
    }
}
