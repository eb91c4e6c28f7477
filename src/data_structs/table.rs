use anyhow::bail;
use itertools::Itertools;
use log::debug;
use polars::prelude::*;

use crate::schema::GtfColumns;

macro_rules! get_col_fn {
    ($name: ident, $col: expr, $col_fn: ident, $rettype: ty) => {
        pub fn $name(&self) -> PolarsResult<&$rettype> {
            self.data.column($col.as_str())?.$col_fn()
        }
    };
}

/// A parsed GTF file: one column per GTF field, in file order.
///
/// The first eight columns are always the typed fixed columns. They are
/// followed either by the raw `attribute` column, or by one string column
/// per attribute key when attributes were expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct GtfTable {
    data: DataFrame,
}

impl GtfTable {
    get_col_fn!(seqname, GtfColumns::Seqname, str, StringChunked);

    get_col_fn!(source, GtfColumns::Source, str, StringChunked);

    get_col_fn!(feature, GtfColumns::Feature, str, StringChunked);

    get_col_fn!(start, GtfColumns::Start, i64, Int64Chunked);

    get_col_fn!(end, GtfColumns::End, i64, Int64Chunked);

    get_col_fn!(score, GtfColumns::Score, f64, Float64Chunked);

    get_col_fn!(strand, GtfColumns::Strand, str, StringChunked);

    get_col_fn!(frame, GtfColumns::Frame, str, StringChunked);

    get_col_fn!(attribute, GtfColumns::Attribute, str, StringChunked);

    /// Wraps a DataFrame without validating its layout.
    pub(crate) fn new_unchecked(data: DataFrame) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of data lines.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.data
            .get_columns()
            .iter()
            .map(|c| c.name().as_str())
            .collect()
    }

    pub fn column(
        &self,
        name: &str,
    ) -> PolarsResult<&Column> {
        self.data.column(name)
    }

    /// Values of a string column, e.g. an expanded attribute column.
    pub fn str_values(
        &self,
        name: &str,
    ) -> PolarsResult<Vec<&str>> {
        Ok(self
            .data
            .column(name)?
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default())
            .collect())
    }

    /// Names of expanded attribute columns (everything after the fixed
    /// columns except the raw attribute column).
    pub fn attribute_columns(&self) -> Vec<&str> {
        self.column_names()
            .into_iter()
            .filter(|name| !GtfColumns::has_name(name))
            .collect()
    }

    /// Whether the raw attribute column was replaced by expanded columns.
    pub fn is_expanded(&self) -> bool {
        self.data
            .column(GtfColumns::Attribute.as_str())
            .is_err()
    }

    /// Keeps the rows matching `predicate`, column layout untouched.
    pub fn filter(
        &self,
        predicate: Expr,
    ) -> PolarsResult<GtfTable> {
        let data = self
            .data
            .clone()
            .lazy()
            .filter(predicate)
            .collect()?;
        Ok(GtfTable { data })
    }

    /// Keeps only rows of the given feature type.
    pub fn filter_feature(
        &self,
        feature: &str,
    ) -> PolarsResult<GtfTable> {
        self.filter(GtfColumns::Feature.col().eq(lit(feature)))
    }
}

impl TryFrom<DataFrame> for GtfTable {
    type Error = anyhow::Error;

    fn try_from(data: DataFrame) -> Result<Self, Self::Error> {
        let schema = data.schema();
        for (name, dtype) in GtfColumns::fixed_schema().iter() {
            match schema.get(name) {
                Some(found) if found == dtype => {},
                Some(found) => {
                    bail!("Column '{}' has dtype {}, expected {}", name, found, dtype)
                },
                None => bail!("Column '{}' is missing", name),
            }
        }
        Ok(GtfTable { data })
    }
}

impl From<GtfTable> for DataFrame {
    fn from(value: GtfTable) -> Self {
        value.data
    }
}

/// Typed values of the eight fixed columns, one vector per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedColumns {
    pub seqname: Vec<String>,
    pub source:  Vec<String>,
    pub feature: Vec<String>,
    pub start:   Vec<i64>,
    pub end:     Vec<i64>,
    pub score:   Vec<f64>,
    pub strand:  Vec<String>,
    pub frame:   Vec<String>,
}

impl FixedColumns {
    pub fn len(&self) -> usize {
        self.seqname.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqname.is_empty()
    }

    fn lengths(&self) -> [usize; 8] {
        [
            self.seqname.len(),
            self.source.len(),
            self.feature.len(),
            self.start.len(),
            self.end.len(),
            self.score.len(),
            self.strand.len(),
            self.frame.len(),
        ]
    }

    fn into_columns(self) -> Vec<Column> {
        vec![
            Column::new(GtfColumns::Seqname.as_str().into(), self.seqname),
            Column::new(GtfColumns::Source.as_str().into(), self.source),
            Column::new(GtfColumns::Feature.as_str().into(), self.feature),
            Column::new(GtfColumns::Start.as_str().into(), self.start),
            Column::new(GtfColumns::End.as_str().into(), self.end),
            Column::new(GtfColumns::Score.as_str().into(), self.score),
            Column::new(GtfColumns::Strand.as_str().into(), self.strand),
            Column::new(GtfColumns::Frame.as_str().into(), self.frame),
        ]
    }
}

/// Attribute columns produced by the attribute expander, in first-seen
/// key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandedAttributes {
    pub names:   Vec<String>,
    pub columns: Vec<Vec<String>>,
}

/// What follows the fixed columns in the assembled table.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeColumns {
    /// The ninth field, verbatim.
    Raw(Vec<String>),
    Expanded(ExpandedAttributes),
}

/// Concatenates the fixed columns with the attribute columns into a
/// [`GtfTable`].
pub struct TableAssembler {
    fixed:      FixedColumns,
    attributes: AttributeColumns,
}

impl TableAssembler {
    pub fn new(
        fixed: FixedColumns,
        attributes: AttributeColumns,
    ) -> Self {
        Self { fixed, attributes }
    }

    pub fn assemble(self) -> PolarsResult<GtfTable> {
        let height = self.fixed.len();
        debug_assert!(
            self.fixed.lengths().iter().all_equal(),
            "Fixed columns have unequal lengths: {:?}",
            self.fixed.lengths()
        );

        let mut columns = self.fixed.into_columns();
        match self.attributes {
            AttributeColumns::Raw(values) => {
                debug_assert_eq!(values.len(), height);
                columns.push(Column::new(
                    GtfColumns::Attribute.as_str().into(),
                    values,
                ));
            },
            AttributeColumns::Expanded(expanded) => {
                debug_assert_eq!(expanded.names.len(), expanded.columns.len());
                for (name, values) in expanded.names.into_iter().zip(expanded.columns) {
                    debug_assert_eq!(
                        values.len(),
                        height,
                        "Attribute column '{}' has wrong length",
                        name
                    );
                    columns.push(Column::new(name.into(), values));
                }
            },
        }

        debug!("Assembling table with {} rows and {} columns", height, columns.len());
        let data = DataFrame::new(columns)?;
        Ok(GtfTable::new_unchecked(data))
    }
}
