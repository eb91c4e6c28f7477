use log::info;
use polars::prelude::*;

use crate::data_structs::GtfTable;
use crate::schema::GtfColumns;

/// Source value that marks a biotype-in-source annotation.
const BIOTYPE_MARKER: &str = "protein_coding";
const BIOTYPE_COLUMNS: [&str; 2] = ["gene_biotype", "transcript_biotype"];

/// Ensembl releases before 78 stored the biotype in the `source` column.
///
/// If any `source` value is `protein_coding`, `source` is copied into
/// whichever of `gene_biotype` and `transcript_biotype` is absent. Otherwise
/// the table is returned unchanged.
pub fn infer_biotype_columns(table: GtfTable) -> PolarsResult<GtfTable> {
    let has_biotype_source = table
        .source()?
        .into_iter()
        .any(|source| source == Some(BIOTYPE_MARKER));
    if !has_biotype_source {
        return Ok(table);
    }

    let source = table
        .column(GtfColumns::Source.as_str())?
        .clone();
    let mut data = table.into_inner();
    for name in BIOTYPE_COLUMNS {
        if data.column(name).is_err() {
            info!("Using column 'source' to replace missing '{}'", name);
            data.with_column(source.clone().with_name(name.into()))?;
        }
    }
    Ok(GtfTable::new_unchecked(data))
}
