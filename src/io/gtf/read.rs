use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::Path;

use anyhow::Context;
use hashbrown::HashSet;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
};

use super::coerce::{
    CoercedRow,
    ColumnCoercer,
};
use super::expand::AttributeExpander;
use super::tokenizer::GtfLineTokenizer;
use crate::data_structs::{
    AttributeColumns,
    GtfTable,
    TableAssembler,
};
use crate::error::Result;
use crate::io::compression::Compression;
use crate::tools::infer_biotype_columns;

/// Settings for GTF reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GtfReadOptions {
    /// Replace the raw attribute column with one column per attribute key.
    pub expand_attributes: bool,
    /// Restrict expansion to these attribute keys.
    pub attribute_columns: Option<Vec<String>>,
    /// Keep only data lines with one of these feature types.
    pub features:          Option<Vec<String>>,
    /// Value written where a row lacks an expanded attribute key.
    pub missing_value:     String,
    /// Copy `source` into absent biotype columns for old Ensembl releases.
    pub infer_biotype:     bool,
}

impl Default for GtfReadOptions {
    fn default() -> Self {
        Self {
            expand_attributes: true,
            attribute_columns: None,
            features:          None,
            missing_value:     String::new(),
            infer_biotype:     false,
        }
    }
}

/// Configures and runs GTF parsing.
///
/// ```no_run
/// use gtfparse::io::gtf::GtfReaderBuilder;
///
/// let table = GtfReaderBuilder::default()
///     .with_features(Some(vec!["gene".to_string()]))
///     .with_attribute_columns(Some(vec!["gene_id".to_string(), "gene_name".to_string()]))
///     .read("annotation.gtf")?;
/// println!("{} genes", table.height());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GtfReaderBuilder {
    options: GtfReadOptions,
}

impl From<GtfReadOptions> for GtfReaderBuilder {
    fn from(options: GtfReadOptions) -> Self { Self { options } }
}

impl GtfReaderBuilder {
    pub fn with_expand_attributes(
        mut self,
        expand_attributes: bool,
    ) -> Self {
        self.options.expand_attributes = expand_attributes;
        self
    }

    pub fn with_attribute_columns(
        mut self,
        attribute_columns: Option<Vec<String>>,
    ) -> Self {
        self.options.attribute_columns = attribute_columns;
        self
    }

    pub fn with_features(
        mut self,
        features: Option<Vec<String>>,
    ) -> Self {
        self.options.features = features;
        self
    }

    pub fn with_missing_value<S: Into<String>>(
        mut self,
        missing_value: S,
    ) -> Self {
        self.options.missing_value = missing_value.into();
        self
    }

    pub fn with_infer_biotype(
        mut self,
        infer_biotype: bool,
    ) -> Self {
        self.options.infer_biotype = infer_biotype;
        self
    }

    pub fn options(&self) -> &GtfReadOptions { &self.options }

    /// Parses a whole GTF stream into a table.
    ///
    /// Fails on the first data line with a wrong field count or a malformed
    /// `start`, `end` or `score` value. Irregular attributes never fail.
    pub fn parse<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<GtfTable> {
        let features: Option<HashSet<&str>> = self
            .options
            .features
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect());

        let mut tokenizer = GtfLineTokenizer::new(reader);
        let mut coercer = ColumnCoercer::new();
        let mut attributes = Vec::new();
        for row in tokenizer.by_ref() {
            let row = row?;
            // Dropped rows must still hold valid numbers.
            let coerced = CoercedRow::new(&row)?;
            if let Some(features) = features.as_ref() {
                if !features.contains(coerced.feature()) {
                    continue;
                }
            }
            coercer.push(coerced);
            attributes.push(row.into_attribute());
        }
        debug!(
            "Read {} data rows from {} lines",
            coercer.len(),
            tokenizer.lines_read()
        );

        let attributes = if self.options.expand_attributes {
            let expanded = AttributeExpander::default()
                .with_missing_value(self.options.missing_value.as_str())
                .with_restrict_to(self.options.attribute_columns.clone())
                .expand(&attributes);
            AttributeColumns::Expanded(expanded)
        }
        else {
            AttributeColumns::Raw(attributes)
        };

        let table = TableAssembler::new(coercer.finish(), attributes).assemble()?;
        if self.options.infer_biotype {
            Ok(infer_biotype_columns(table)?)
        }
        else {
            Ok(table)
        }
    }

    /// Opens and parses a GTF file. Paths ending in `.gz` are decompressed
    /// when the `compression` feature is enabled.
    pub fn read<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> anyhow::Result<GtfTable> {
        let path = path.as_ref();
        let handle = File::open(path)
            .with_context(|| format!("Could not open {}", path.display()))?;
        let compression = Compression::from_path(path);
        debug!("Reading {} ({})", path.display(), compression.name());
        let reader = BufReader::new(compression.get_decoder(handle)?);
        let table = self
            .parse(reader)
            .with_context(|| format!("Could not parse {}", path.display()))?;
        Ok(table)
    }
}

/// Parses GTF text into the nine GTF columns, keeping the attribute column
/// as raw strings.
pub fn parse<R: BufRead>(reader: R) -> Result<GtfTable> {
    GtfReaderBuilder::default()
        .with_expand_attributes(false)
        .parse(reader)
}

/// Parses GTF text into the eight fixed columns followed by one column per
/// attribute key.
pub fn parse_and_expand<R: BufRead>(reader: R) -> Result<GtfTable> {
    GtfReaderBuilder::default()
        .with_expand_attributes(true)
        .parse(reader)
}

/// Reads a GTF file with default options (attributes expanded).
pub fn read_gtf<P: AsRef<Path>>(path: P) -> anyhow::Result<GtfTable> {
    GtfReaderBuilder::default().read(path)
}
