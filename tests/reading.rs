use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use gtfparse::{
    read_gtf,
    GtfReadOptions,
    GtfReaderBuilder,
};
use rstest::*;
use tempfile::TempDir;

mod common;
use common::{
    init_logger,
    DemoGtfBuilder,
    ENSEMBL_ATTRIBUTE_COLUMNS,
    ENSEMBL_GTF,
};

struct GtfFixture {
    // Dropping removes the files.
    _dir: TempDir,
    path: PathBuf,
}

#[fixture]
fn ensembl_file() -> GtfFixture {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ensembl.gtf");
    File::create(&path)
        .unwrap()
        .write_all(ENSEMBL_GTF.as_bytes())
        .unwrap();
    GtfFixture { _dir: dir, path }
}

#[rstest]
fn read_gtf_expands_by_default(ensembl_file: GtfFixture) -> anyhow::Result<()> {
    let table = read_gtf(&ensembl_file.path)?;
    assert_eq!(table.height(), 2);
    assert!(table.is_expanded());
    assert_eq!(table.attribute_columns(), ENSEMBL_ATTRIBUTE_COLUMNS);
    Ok(())
}

#[rstest]
fn read_missing_file_fails() {
    let err = read_gtf("/nonexistent/annotation.gtf").unwrap_err();
    assert!(err.to_string().contains("Could not open"));
}

#[rstest]
fn read_malformed_file_reports_line(ensembl_file: GtfFixture) {
    let mut handle = File::options()
        .append(true)
        .open(&ensembl_file.path)
        .unwrap();
    handle.write_all(b"1\thavana\tgene\t1\t2\t.\t+\n").unwrap();
    drop(handle);

    let err = read_gtf(&ensembl_file.path).unwrap_err();
    let parsing = err
        .downcast_ref::<gtfparse::ParsingError>()
        .expect("parsing error kept as source");
    assert_eq!(parsing.line(), Some(6));
}

#[rstest]
fn builder_options_apply_to_files(ensembl_file: GtfFixture) -> anyhow::Result<()> {
    let table = GtfReaderBuilder::default()
        .with_features(Some(vec!["transcript".to_string()]))
        .with_attribute_columns(Some(vec![
            "transcript_name".to_string(),
            "gene_id".to_string(),
        ]))
        .read(&ensembl_file.path)?;
    assert_eq!(table.height(), 1);
    // Column order follows first appearance in the file.
    assert_eq!(table.attribute_columns(), ["gene_id", "transcript_name"]);
    assert_eq!(table.str_values("transcript_name")?, ["DDX11L1-002"]);

    let raw = GtfReaderBuilder::default()
        .with_expand_attributes(false)
        .read(&ensembl_file.path)?;
    assert!(!raw.is_expanded());
    assert_eq!(raw.height(), 2);
    Ok(())
}

#[rstest]
fn options_deserialize_with_defaults() -> anyhow::Result<()> {
    let options: GtfReadOptions =
        serde_json::from_str(r#"{"features": ["transcript", "exon"], "missing_value": "NA"}"#)?;
    assert!(options.expand_attributes);
    assert!(!options.infer_biotype);
    assert_eq!(
        options.features,
        Some(vec!["transcript".to_string(), "exon".to_string()])
    );
    assert_eq!(options.missing_value, "NA");

    let restored: GtfReadOptions = serde_json::from_str(&serde_json::to_string(&options)?)?;
    assert_eq!(restored, options);

    let text = DemoGtfBuilder::new(3, 2).build();
    let table = GtfReaderBuilder::from(options).parse(text.as_bytes())?;
    assert_eq!(table.height(), 9);
    assert_eq!(
        table.str_values("exon_number")?[..3],
        ["NA", "1", "2"]
    );
    Ok(())
}

#[cfg(feature = "compression")]
#[rstest]
fn reads_gzipped_files() -> anyhow::Result<()> {
    use flate2::write::GzEncoder;

    let demo = DemoGtfBuilder::new(10, 3);
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("demo.gtf.gz");
    let mut encoder = GzEncoder::new(File::create(&path)?, flate2::Compression::default());
    encoder.write_all(demo.build().as_bytes())?;
    encoder.finish()?;

    let table = read_gtf(&path)?;
    assert_eq!(table.height(), demo.n_rows());
    Ok(())
}

#[cfg(not(feature = "compression"))]
#[rstest]
fn gzipped_files_need_compression_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.gtf.gz");
    File::create(&path).unwrap();

    let err = read_gtf(&path).unwrap_err();
    assert!(err.to_string().contains("compression"));
}
