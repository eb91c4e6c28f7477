#![allow(dead_code)]

use gtfparse::exports::pretty_env_logger;

/// Sample GTF data copied from
/// http://useast.ensembl.org/info/website/upload/gff.html
pub const ENSEMBL_GTF: &str = "
# sample GTF data copied from:
# http://useast.ensembl.org/info/website/upload/gff.html?redirect=no
1\ttranscribed_unprocessed_pseudogene\tgene\t11869\t14409\t.\t+\t.\tgene_id \"ENSG00000223972\"; gene_name \"DDX11L1\"; gene_source \"havana\"; gene_biotype \"transcribed_unprocessed_pseudogene\";
1\tprocessed_transcript\ttranscript\t11869\t14409\t.\t+\t.\tgene_id \"ENSG00000223972\"; transcript_id \"ENST00000456328\"; gene_name \"DDX11L1\"; gene_source \"havana\"; gene_biotype \"transcribed_unprocessed_pseudogene\"; transcript_name \"DDX11L1-002\"; transcript_source \"havana\";
";

pub const ENSEMBL_ATTRIBUTE_COLUMNS: [&str; 7] = [
    "gene_id",
    "gene_name",
    "gene_source",
    "gene_biotype",
    "transcript_id",
    "transcript_name",
    "transcript_source",
];

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

/// Generates `n_genes` genes, each with one transcript and `exons_per_gene`
/// exons.
pub struct DemoGtfBuilder {
    n_genes:        usize,
    exons_per_gene: usize,
}

impl DemoGtfBuilder {
    pub fn new(
        n_genes: usize,
        exons_per_gene: usize,
    ) -> Self {
        Self {
            n_genes,
            exons_per_gene,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_genes * (2 + self.exons_per_gene)
    }

    pub fn build(&self) -> String {
        let mut text = String::from("#!genome-build demo\n");
        for gene in 0..self.n_genes {
            let chr = gene % 3 + 1;
            let start = gene * 10_000 + 1;
            let end = start + self.exons_per_gene * 1_000;
            let strand = if gene % 2 == 0 { '+' } else { '-' };
            let gene_attrs = format!("gene_id \"G{gene}\"; gene_name \"NAME{gene}\";");
            text.push_str(&format!(
                "{chr}\tdemo\tgene\t{start}\t{end}\t.\t{strand}\t.\t{gene_attrs}\n"
            ));
            text.push_str(&format!(
                "{chr}\tdemo\ttranscript\t{start}\t{end}\t.\t{strand}\t.\t{gene_attrs} transcript_id \"T{gene}\";\n"
            ));
            for exon in 0..self.exons_per_gene {
                let exon_start = start + exon * 1_000;
                text.push_str(&format!(
                    "{chr}\tdemo\texon\t{exon_start}\t{}\t{}.5\t{strand}\t{}\t{gene_attrs} transcript_id \"T{gene}\"; exon_number \"{}\"; tag \"basic\"; tag \"CCDS\";\n",
                    exon_start + 500,
                    exon,
                    exon % 3,
                    exon + 1,
                ));
            }
        }
        text
    }
}
