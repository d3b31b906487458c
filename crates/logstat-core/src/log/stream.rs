use super::{LineParser, LogFile, ParsedRecord};
use crate::{Error, Result};
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Final status of a fully consumed [`LogStream`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParseSummary {
    pub total_lines: u64,
    pub handled_lines: u64,
    pub success_ratio: f64,
}

/// Single-pass iterator over the records of one log file.
///
/// Malformed lines are counted and skipped. Whether the log as a whole is usable is only
/// known once every line has been read, so callers drain the iterator and then call
/// [`LogStream::finish`] to get the verdict. The file handle is owned by the stream and is
/// closed when the stream is finished or dropped.
pub struct LogStream {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    parser: LineParser,
    min_success_ratio: f64,
    line: Vec<u8>,
    total_lines: u64,
    handled_lines: u64,
    read_error: Option<io::Error>,
    exhausted: bool,
}

impl LogStream {
    /// Open a log, decompressing it on the fly when it is gzipped
    pub fn open(log: &LogFile, min_success_ratio: f64) -> Result<Self> {
        tracing::debug!("Opening log file: {}", log.path.display());

        let file = File::open(&log.path).inspect_err(|e| {
            tracing::error!("Cannot open log file {}: {}", log.path.display(), e);
        })?;

        let reader: Box<dyn BufRead> = if log.compressed {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self::from_reader(&log.path, reader, min_success_ratio))
    }

    /// Stream records from an already opened reader; `path` is only used in messages
    pub fn from_reader<R>(path: &Path, reader: R, min_success_ratio: f64) -> Self
    where
        R: BufRead + 'static,
    {
        Self {
            path: path.to_path_buf(),
            reader: Box::new(reader),
            parser: LineParser::default(),
            min_success_ratio,
            line: Vec::new(),
            total_lines: 0,
            handled_lines: 0,
            read_error: None,
            exhausted: false,
        }
    }

    /// Use a parser with a different field layout
    pub fn with_parser(mut self, parser: LineParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn handled_lines(&self) -> u64 {
        self.handled_lines
    }

    /// Close the log and check the share of lines that parsed.
    ///
    /// Any lines not yet read are consumed first. Fails on a read error, on an empty log,
    /// and when the success ratio is below the configured minimum.
    pub fn finish(mut self) -> Result<ParseSummary> {
        self.by_ref().for_each(drop);

        let LogStream {
            path,
            reader,
            min_success_ratio,
            total_lines,
            handled_lines,
            read_error,
            ..
        } = self;
        drop(reader);

        if let Some(e) = read_error {
            return Err(Error::Io(e));
        }

        if total_lines == 0 {
            return Err(Error::EmptyLog { path });
        }

        let success_ratio = handled_lines as f64 / total_lines as f64;
        tracing::info!(
            "Parsed {} of {} lines from {} ({:.2}%)",
            handled_lines,
            total_lines,
            path.display(),
            success_ratio * 100.0
        );

        if success_ratio < min_success_ratio {
            return Err(Error::QualityBelowThreshold {
                path,
                handled: handled_lines,
                total: total_lines,
                ratio: success_ratio,
                threshold: min_success_ratio,
            });
        }

        Ok(ParseSummary {
            total_lines,
            handled_lines,
            success_ratio,
        })
    }
}

impl Iterator for LogStream {
    type Item = ParsedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => {
                    self.total_lines += 1;
                    match self.parser.parse_bytes(&self.line) {
                        Ok(record) => {
                            self.handled_lines += 1;
                            return Some(record);
                        }
                        Err(e) => tracing::debug!(
                            "Skipping line {} of {}: {}",
                            self.total_lines,
                            self.path.display(),
                            e
                        ),
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::error!(
                        "Read error after line {} of {}: {}",
                        self.total_lines,
                        self.path.display(),
                        e
                    );
                    self.read_error = Some(e);
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}
