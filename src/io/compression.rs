use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compression of a GTF file on disk, detected from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gz,
}

impl Compression {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gz,
            _ => Compression::None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Compression::None => "none",
            Compression::Gz => "gzip",
        }
    }

    #[cfg(feature = "compression")]
    pub fn get_decoder(
        &self,
        handle: File,
    ) -> anyhow::Result<Box<dyn Read>> {
        let decoder: Box<dyn Read> = match self {
            Compression::Gz => Box::new(flate2::read::MultiGzDecoder::new(handle)),
            Compression::None => Box::new(handle),
        };
        Ok(decoder)
    }

    #[cfg(not(feature = "compression"))]
    pub fn get_decoder(
        &self,
        handle: File,
    ) -> anyhow::Result<Box<dyn Read>> {
        match self {
            Compression::None => Ok(Box::new(handle)),
            other => {
                anyhow::bail!(
                    "Reading {} input requires the `compression` feature",
                    other.name()
                )
            },
        }
    }
}
