//! Manage different types of compression for a logfile
use std::path::Path;

/// The compression schemes a source logfile can be archived with.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CompressionScheme {
    Gzip,
    Bzip2,
    Xz,
    Uncompressed,
}

impl CompressionScheme {
    /// True if not compressed
    #[inline(always)]
    pub fn is_compressed(&self) -> bool {
        self != &CompressionScheme::Uncompressed
    }

    /// Guess the scheme from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .map(|x| x.to_string_lossy().to_string());
        CompressionScheme::from(extension.as_deref())
    }
}

/// Conversion from a file extension.
impl From<Option<&str>> for CompressionScheme {
    fn from(ext: Option<&str>) -> Self {
        match ext {
            Some("gz") => CompressionScheme::Gzip,
            Some("bz2") => CompressionScheme::Bzip2,
            Some("xz") => CompressionScheme::Xz,
            _ => CompressionScheme::Uncompressed,
        }
    }
}
