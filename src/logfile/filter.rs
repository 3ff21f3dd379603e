//! This is where marker lines are extracted from the source logfile and appended to the destination.
//!
//! Lines are handled as raw bytes: the client log encoding is not known, and payloads are
//! written back untouched. Decoding only happens for log messages.
use std::fs::OpenOptions;
use std::io::{BufRead, BufWriter, Write};

use log::{debug, info, trace, warn};
use regex::bytes::Regex;

use crate::configuration::config::{Config, MissingSeparator};
use crate::context;
use crate::logfile::logreader::LogReader;
use crate::misc::{
    error::{AppCustomErrorKind, AppError, AppResult},
    util::{DEFAULT_CONTAINER_CAPACITY, DEFAULT_STRING_CAPACITY},
};

/// Counters gathered during a run.
#[derive(Debug, Default, PartialEq)]
pub struct FilterStats {
    pub lines_read: usize,
    pub lines_matched: usize,
    pub fragments: usize,
    pub malformed: usize,
}

/// A single pass iterator over the lines of a reader. Each item is the 1-based line number
/// and the line bytes, terminator included.
pub struct LogLines<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        LogLines {
            reader,
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = AppResult<(usize, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buffer = Vec::with_capacity(DEFAULT_STRING_CAPACITY);
        match self.reader.read_until(b'\n', &mut buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(Ok((self.line_number, buffer)))
            }
            Err(e) => Some(Err(AppError::Io(e))),
        }
    }
}

/// Builds a regex matching `literal` as is.
fn literal(literal: &str) -> AppResult<Regex> {
    Regex::new(&regex::escape(literal))
        .map_err(|e| context!(e, "error building matcher for {:?}", literal))
}

/// Returns the bytes of `line` following the first match of `separator`.
#[inline(always)]
pub fn extract_fragment<'a>(line: &'a [u8], separator: &Regex) -> Option<&'a [u8]> {
    separator.find(line).map(|m| &line[m.end()..])
}

/// Extracts marker lines from `config.source` and appends them to `config.destination`.
pub struct LogFilter<'a> {
    config: &'a Config,
    marker: Regex,
    separator: Regex,
}

impl<'a> LogFilter<'a> {
    pub fn new(config: &'a Config) -> AppResult<Self> {
        Ok(LogFilter {
            config,
            marker: literal(&config.marker)?,
            separator: literal(&config.separator)?,
        })
    }

    /// The whole pipeline.
    ///
    /// 1. open the source, uncompressing it on the fly if its extension asks for it
    /// 2. keep lines containing the marker, and cut them after the first separator
    /// 3. append those fragments, in source order, to the destination
    ///
    /// The source is fully read before the destination is opened: an error while reading
    /// leaves the destination untouched.
    pub fn run(&self) -> AppResult<FilterStats> {
        info!(
            "start processing source:{:?}, marker:{:?}, separator:{:?}",
            &self.config.source, &self.config.marker, &self.config.separator
        );

        let reader = LogReader::from_path(&self.config.source)?;
        let (fragments, stats) = self
            .extract(reader)
            .map_err(|e| context!(e, "error reading source file {:?}", &self.config.source))?;

        let bytes = self.append(&fragments)?;

        info!(
            "appended {} bytes to {:?}, stats: {:?}",
            bytes, &self.config.destination, &stats
        );
        Ok(stats)
    }

    /// Reads all lines from `reader` and returns the fragments to write.
    pub fn extract<R: BufRead>(&self, reader: R) -> AppResult<(Vec<Vec<u8>>, FilterStats)> {
        let mut fragments = Vec::with_capacity(DEFAULT_CONTAINER_CAPACITY);
        let mut stats = FilterStats::default();

        for line in LogLines::new(reader) {
            let (line_number, line) = line?;
            stats.lines_read = line_number;

            if !self.marker.is_match(&line) {
                continue;
            }
            stats.lines_matched += 1;
            trace!(
                "line {} matched: {:?}",
                line_number,
                String::from_utf8_lossy(&line)
            );

            match extract_fragment(&line, &self.separator) {
                Some(fragment) => fragments.push(fragment.to_vec()),
                None => match self.config.missing_separator {
                    MissingSeparator::Skip => {
                        warn!(
                            "line {} holds marker {:?} but no separator {:?}, skipped",
                            line_number, &self.config.marker, &self.config.separator
                        );
                        stats.malformed += 1;
                    }
                    MissingSeparator::Abort => {
                        return Err(AppError::new(
                            AppCustomErrorKind::MissingSeparator,
                            &format!(
                                "line {} holds marker {:?} but no separator {:?}",
                                line_number, &self.config.marker, &self.config.separator
                            ),
                        ));
                    }
                },
            }
        }

        stats.fragments = fragments.len();
        debug!("extraction done: {:?}", &stats);
        Ok((fragments, stats))
    }

    /// Appends `fragments` as is to the destination, creating it if needed. Returns the
    /// number of bytes written.
    pub fn append(&self, fragments: &[Vec<u8>]) -> AppResult<usize> {
        let path = &self.config.destination;

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| context!(e, "unable to open destination file {:?}", path))?;
        let mut writer = BufWriter::new(file);

        let mut bytes = 0;
        for fragment in fragments {
            writer
                .write_all(fragment)
                .map_err(|e| context!(e, "error writing destination file {:?}", path))?;
            bytes += fragment.len();
        }

        writer
            .flush()
            .map_err(|e| context!(e, "error writing destination file {:?}", path))?;

        Ok(bytes)
    }
}
