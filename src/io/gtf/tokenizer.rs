use std::io::{
    BufRead,
    Lines,
};

use log::trace;

use crate::error::{
    ParsingError,
    Result,
};
use crate::schema::{
    GtfColumns,
    N_REQUIRED_COLUMNS,
};

const COMMENT_PREFIX: char = '#';
const FIELD_SEPARATOR: char = '\t';

/// The nine raw fields of one GTF data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line:   usize,
    fields: Vec<String>,
}

impl RawRow {
    /// 1-based line number in the input, counting comment and blank lines.
    pub fn line(&self) -> usize { self.line }

    pub fn field(
        &self,
        column: GtfColumns,
    ) -> &str {
        &self.fields[column.index()]
    }

    /// Consumes the row, returning the raw attribute field.
    pub fn into_attribute(mut self) -> String {
        self.fields.swap_remove(GtfColumns::Attribute.index())
    }
}

/// Splits a GTF line into tab-separated fields.
///
/// Returns `Ok(None)` for blank and comment lines, and a field count error
/// when a data line does not have exactly nine fields.
pub fn tokenize_line(
    line: &str,
    line_no: usize,
) -> Result<Option<RawRow>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let fields = line
        .split(FIELD_SEPARATOR)
        .map(String::from)
        .collect::<Vec<_>>();
    if fields.len() != N_REQUIRED_COLUMNS {
        return Err(ParsingError::field_count(
            line_no,
            N_REQUIRED_COLUMNS,
            fields.len(),
        ));
    }

    Ok(Some(RawRow {
        line: line_no,
        fields,
    }))
}

/// Iterator over the data lines of a GTF stream.
///
/// Stops yielding after the first error.
pub struct GtfLineTokenizer<R: BufRead> {
    lines:   Lines<R>,
    line_no: usize,
    failed:  bool,
}

impl<R: BufRead> GtfLineTokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines:   reader.lines(),
            line_no: 0,
            failed:  false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize { self.line_no }
}

impl<R: BufRead> Iterator for GtfLineTokenizer<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(ParsingError::Io {
                        line: self.line_no,
                        source,
                    }));
                },
            };

            match tokenize_line(&line, self.line_no) {
                Ok(Some(row)) => return Some(Ok(row)),
                Ok(None) => trace!("Skipping line {}", self.line_no),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                },
            }
        }
    }
}
