use anyhow::bail;
use hashbrown::HashSet;
use itertools::Itertools;
use log::{
    info,
    warn,
};
use polars::prelude::*;

use crate::data_structs::GtfTable;
use crate::schema::{
    GtfColumns,
    SYNTHETIC_SOURCE,
};

/// A feature type to synthesise when the table has no rows of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFeature {
    /// Feature type of the new rows, e.g. `gene`.
    pub feature:       String,
    /// Column whose distinct values identify one new row each, e.g.
    /// `gene_id`.
    pub unique_key:    String,
    /// Columns to carry over when all rows of a group agree on one value.
    pub extra_columns: Vec<String>,
}

/// Settings for [`create_missing_features`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingFeatures {
    features:      Vec<MissingFeature>,
    missing_value: String,
}

impl MissingFeatures {
    pub fn new() -> Self { Self::default() }

    pub fn with_feature<I, S>(
        mut self,
        feature: &str,
        unique_key: &str,
        extra_columns: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>, {
        self.features.push(MissingFeature {
            feature:       feature.to_string(),
            unique_key:    unique_key.to_string(),
            extra_columns: extra_columns
                .into_iter()
                .map(Into::into)
                .collect(),
        });
        self
    }

    /// Value for string columns the new rows cannot be given a value for.
    pub fn with_missing_value<S: Into<String>>(
        mut self,
        missing_value: S,
    ) -> Self {
        self.missing_value = missing_value.into();
        self
    }

    pub fn features(&self) -> &[MissingFeature] { &self.features }
}

/// Builds rows for feature types which are absent from the table, such as
/// `gene` or `transcript` rows in files which only list exons.
///
/// One row is created per distinct non-empty value of the feature's unique
/// key, in first-seen order. It spans from the smallest `start` to the
/// largest `end` of its group, takes `seqname` and `strand` from the group's
/// first row, and has `source` set to `"gtfparse"`. Extra columns are filled
/// only when the group agrees on a single value. Everything else is missing
/// (`score` is NaN). New rows are appended after the existing ones.
pub fn create_missing_features(
    table: GtfTable,
    config: &MissingFeatures,
) -> anyhow::Result<GtfTable> {
    let existing: HashSet<String> = table
        .feature()?
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();

    let original = table.into_inner();
    let mut result = original.clone();
    for missing in config.features() {
        if existing.contains(&missing.feature) {
            info!("Feature '{}' already exists in GTF data", missing.feature);
            continue;
        }
        match synthesize_feature(&original, missing, &config.missing_value)? {
            Some(rows) => {
                info!(
                    "Created {} rows for missing feature '{}'",
                    rows.height(),
                    missing.feature
                );
                result.vstack_mut(&rows)?;
            },
            None => {
                warn!(
                    "No values in '{}' to create feature '{}' from",
                    missing.unique_key, missing.feature
                )
            },
        }
    }
    result.rechunk_mut();
    GtfTable::try_from(result)
}

/// Columns which the synthesised rows always derive from their group.
const DERIVED_COLUMNS: [GtfColumns; 6] = [
    GtfColumns::Seqname,
    GtfColumns::Source,
    GtfColumns::Feature,
    GtfColumns::Start,
    GtfColumns::End,
    GtfColumns::Strand,
];

fn synthesize_feature(
    data: &DataFrame,
    missing: &MissingFeature,
    missing_value: &str,
) -> anyhow::Result<Option<DataFrame>> {
    let key = missing.unique_key.as_str();
    let columns = data
        .get_columns()
        .iter()
        .map(|c| (c.name().as_str(), c.dtype()))
        .collect_vec();

    match data.column(key) {
        Ok(column) if column.dtype() == &DataType::String => {},
        Ok(column) => {
            bail!("Key column '{}' must hold strings, found {}", key, column.dtype())
        },
        Err(_) => {
            bail!(
                "Column '{}' does not exist in GTF, columns = {:?}",
                key,
                columns.iter().map(|(name, _)| name).collect_vec()
            )
        },
    }
    for extra in missing.extra_columns.iter() {
        if data.column(extra).is_err() {
            bail!(
                "Column '{}' does not exist in GTF, columns = {:?}",
                extra,
                columns.iter().map(|(name, _)| name).collect_vec()
            );
        }
    }
    let extras = missing
        .extra_columns
        .iter()
        .map(String::as_str)
        .filter(|name| {
            *name != key && !DERIVED_COLUMNS.iter().any(|c| c.as_str() == *name)
        })
        .collect::<HashSet<_>>();

    let keyed = data
        .clone()
        .lazy()
        .filter(
            col(key)
                .is_not_null()
                .and(col(key).neq(lit("")))
                .and(col(key).neq(lit(missing_value))),
        )
        .collect()?;
    if keyed.height() == 0 {
        return Ok(None);
    }

    let mut aggregations = vec![
        GtfColumns::Seqname.col().first(),
        GtfColumns::Start.col().min(),
        GtfColumns::End.col().max(),
        GtfColumns::Strand.col().first(),
    ];
    for (name, dtype) in columns.iter().filter(|(name, _)| extras.contains(name)) {
        aggregations.push(
            when(col(*name).n_unique().eq(lit(1)))
                .then(col(*name).first())
                .otherwise(missing_literal(dtype, missing_value))
                .alias(*name),
        );
    }

    let selection = columns
        .iter()
        .map(|(name, dtype)| {
            match *name {
                name if name == key || extras.contains(name) => col(name),
                "seqname" | "start" | "end" | "strand" => col(*name),
                "feature" => lit(missing.feature.as_str()).alias(*name),
                "source" => lit(SYNTHETIC_SOURCE).alias(*name),
                name => missing_literal(dtype, missing_value).alias(name),
            }
        })
        .collect_vec();

    let rows = keyed
        .lazy()
        .group_by_stable([col(key)])
        .agg(aggregations)
        .select(selection)
        .collect()?;
    Ok(Some(rows))
}

fn missing_literal(
    dtype: &DataType,
    missing_value: &str,
) -> Expr {
    match dtype {
        DataType::String => lit(missing_value.to_string()),
        DataType::Float64 => lit(f64::NAN).cast(DataType::Float64),
        DataType::Float32 => lit(f32::NAN).cast(DataType::Float32),
        other => lit(NULL).cast(other.clone()),
    }
}
