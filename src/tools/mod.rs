//! Transforms applied to parsed tables.
//!
//! - [`infer_biotype_columns`] recovers `gene_biotype`/`transcript_biotype`
//!   from the `source` column of older Ensembl annotations.
//! - [`create_missing_features`] synthesises `gene` or `transcript` rows for
//!   files which only list exons and CDS entries.

mod biotype;
mod missing_features;

pub use biotype::infer_biotype_columns;
pub use missing_features::{
    create_missing_features,
    MissingFeature,
    MissingFeatures,
};
