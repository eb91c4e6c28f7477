pub mod compression;
pub mod gtf;
