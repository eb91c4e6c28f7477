//! Error types for GTF parsing.
//!
//! Only structural problems are errors: a wrong number of tab-separated
//! fields on a data line, or a malformed value in the `start`, `end` or
//! `score` columns. Irregular attribute segments are recovered locally and
//! never reach the caller.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, ParsingError>;

/// Errors which abort a parse. No partial table is returned.
#[derive(Debug, Error)]
pub enum ParsingError {
    /// More tab-separated fields than GTF allows, usually because
    /// attribute values were split on tabs.
    #[error(
        "Too many fields at line {line}: expected {expected} tab-separated \
         fields, found {found}"
    )]
    TooManyFields {
        line:     usize,
        expected: usize,
        found:    usize,
    },

    /// Fewer fields than GTF requires, usually because columns are
    /// separated by spaces instead of tabs.
    #[error(
        "Too few fields at line {line}: expected {expected} tab-separated \
         fields, found {found}"
    )]
    TooFewFields {
        line:     usize,
        expected: usize,
        found:    usize,
    },

    /// Non-numeric, non-sentinel token in a numeric column.
    #[error("Non-numeric value '{value}' in column '{column}' at line {line}")]
    InvalidNumber {
        line:   usize,
        column: &'static str,
        value:  String,
    },

    /// The stream failed or held invalid UTF-8 while reading `line`.
    #[error("Could not read line {line}: {source}")]
    Io {
        line:   usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not assemble table: {0}")]
    Polars(#[from] PolarsError),
}

impl ParsingError {
    /// Line number (1-based) of the offending input line, if the error is
    /// tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParsingError::TooManyFields { line, .. }
            | ParsingError::TooFewFields { line, .. }
            | ParsingError::InvalidNumber { line, .. }
            | ParsingError::Io { line, .. } => Some(*line),
            ParsingError::Polars(_) => None,
        }
    }

    /// Builds the field-count error matching the observed count.
    pub(crate) fn field_count(
        line: usize,
        expected: usize,
        found: usize,
    ) -> Self {
        if found > expected {
            ParsingError::TooManyFields {
                line,
                expected,
                found,
            }
        }
        else {
            ParsingError::TooFewFields {
                line,
                expected,
                found,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_count_picks_direction() {
        assert!(matches!(
            ParsingError::field_count(3, 9, 12),
            ParsingError::TooManyFields { line: 3, found: 12, .. }
        ));
        assert!(matches!(
            ParsingError::field_count(4, 9, 1),
            ParsingError::TooFewFields { line: 4, found: 1, .. }
        ));
    }

    #[test]
    fn messages_name_line_and_column() {
        let err = ParsingError::InvalidNumber {
            line:   7,
            column: "start",
            value:  "abc".to_string(),
        };
        assert_eq!(err.line(), Some(7));
        assert_eq!(
            err.to_string(),
            "Non-numeric value 'abc' in column 'start' at line 7"
        );

        let err = ParsingError::field_count(2, 9, 1);
        assert_eq!(
            err.to_string(),
            "Too few fields at line 2: expected 9 tab-separated fields, found 1"
        );
    }
}
