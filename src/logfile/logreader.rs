//! A buffered reader hiding the compression scheme of the source logfile.
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use log::debug;
use xz2::read::XzDecoder;

use crate::context;
use crate::logfile::compression::CompressionScheme;
use crate::misc::error::AppResult;

pub enum LogReader<R: Read> {
    Gzip(BufReader<GzDecoder<R>>),
    Bzip2(BufReader<BzDecoder<R>>),
    Xz(BufReader<XzDecoder<R>>),
    Uncompressed(BufReader<R>),
}

impl<R: Read> Read for LogReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            LogReader::Gzip(f) => f.read(buf),
            LogReader::Bzip2(f) => f.read(buf),
            LogReader::Xz(f) => f.read(buf),
            LogReader::Uncompressed(f) => f.read(buf),
        }
    }
}

impl<R: Read> BufRead for LogReader<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            LogReader::Gzip(f) => f.fill_buf(),
            LogReader::Bzip2(f) => f.fill_buf(),
            LogReader::Xz(f) => f.fill_buf(),
            LogReader::Uncompressed(f) => f.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            LogReader::Gzip(f) => f.consume(amt),
            LogReader::Bzip2(f) => f.consume(amt),
            LogReader::Xz(f) => f.consume(amt),
            LogReader::Uncompressed(f) => f.consume(amt),
        }
    }
}

impl<R: Read> LogReader<R> {
    /// Wraps an already opened stream according to `compression`.
    pub fn new(stream: R, compression: CompressionScheme) -> Self {
        match compression {
            CompressionScheme::Gzip => LogReader::Gzip(BufReader::new(GzDecoder::new(stream))),
            CompressionScheme::Bzip2 => LogReader::Bzip2(BufReader::new(BzDecoder::new(stream))),
            CompressionScheme::Xz => LogReader::Xz(BufReader::new(XzDecoder::new(stream))),
            CompressionScheme::Uncompressed => LogReader::Uncompressed(BufReader::new(stream)),
        }
    }
}

impl LogReader<File> {
    /// Creates a new reader depending on the compression. This reader can be used as a regular `BufReader` struct.
    pub fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        // open target file
        let file = File::open(path.as_ref()).map_err(|e| {
            context!(e, "unable to open source file {:?}", path.as_ref())
        })?;

        let compression = CompressionScheme::from_path(path.as_ref());
        debug!(
            "opened source file {:?}, compressed={}, compression={:?}",
            path.as_ref(),
            compression.is_compressed(),
            compression
        );

        Ok(LogReader::new(file, compression))
    }
}
