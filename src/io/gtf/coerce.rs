use std::str::FromStr;

use super::tokenizer::RawRow;
use crate::data_structs::FixedColumns;
use crate::error::{
    ParsingError,
    Result,
};
use crate::schema::GtfColumns;

/// Missing-value marker of the `score` column.
pub const MISSING_SCORE: &str = ".";

/// Numeric fields of one row, coerced but not yet stored.
#[derive(Debug, Clone, Copy)]
pub struct CoercedRow<'a> {
    row:   &'a RawRow,
    start: i64,
    end:   i64,
    score: f64,
}

impl<'a> CoercedRow<'a> {
    /// Parses `start`, `end` and `score` of `row`.
    pub fn new(row: &'a RawRow) -> Result<Self> {
        Ok(Self {
            row,
            start: parse_number::<i64>(row, GtfColumns::Start)?,
            end: parse_number::<i64>(row, GtfColumns::End)?,
            score: parse_score(row)?,
        })
    }

    pub fn feature(&self) -> &str { self.row.field(GtfColumns::Feature) }
}

/// Accumulates the eight fixed fields of each row as typed columns.
#[derive(Debug, Default)]
pub struct ColumnCoercer {
    columns: FixedColumns,
}

impl ColumnCoercer {
    pub fn new() -> Self { Self::default() }

    /// Coerces the fixed fields of `row` and appends them. On error nothing
    /// is appended.
    pub fn push_row(
        &mut self,
        row: &RawRow,
    ) -> Result<()> {
        self.push(CoercedRow::new(row)?);
        Ok(())
    }

    /// Appends a row whose numeric fields were already coerced.
    pub fn push(
        &mut self,
        coerced: CoercedRow,
    ) {
        let row = coerced.row;
        let columns = &mut self.columns;
        columns
            .seqname
            .push(row.field(GtfColumns::Seqname).to_string());
        columns
            .source
            .push(row.field(GtfColumns::Source).to_string());
        columns
            .feature
            .push(row.field(GtfColumns::Feature).to_string());
        columns.start.push(coerced.start);
        columns.end.push(coerced.end);
        columns.score.push(coerced.score);
        columns
            .strand
            .push(row.field(GtfColumns::Strand).to_string());
        columns
            .frame
            .push(row.field(GtfColumns::Frame).to_string());
    }

    pub fn len(&self) -> usize { self.columns.len() }

    pub fn is_empty(&self) -> bool { self.columns.is_empty() }

    pub fn finish(self) -> FixedColumns { self.columns }
}

fn parse_number<T: FromStr>(
    row: &RawRow,
    column: GtfColumns,
) -> Result<T> {
    let value = row.field(column);
    value
        .parse::<T>()
        .map_err(|_| invalid_number(row, column, value))
}

/// `"."` means absent and becomes NaN.
fn parse_score(row: &RawRow) -> Result<f64> {
    match row.field(GtfColumns::Score) {
        MISSING_SCORE => Ok(f64::NAN),
        _ => parse_number::<f64>(row, GtfColumns::Score),
    }
}

fn invalid_number(
    row: &RawRow,
    column: GtfColumns,
    value: &str,
) -> ParsingError {
    ParsingError::InvalidNumber {
        line:   row.line(),
        column: column.as_str(),
        value:  value.to_string(),
    }
}
