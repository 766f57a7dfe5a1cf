//! # Sample Log Reader
//!
//! Streams a persisted sample log one line at a time without loading it
//! into memory. Each line is classified against the configured width.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use shared_types::{classify_line, BitVectorError, LogLine};

use crate::error::ReplayError;

/// One classified log line with its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberedLine {
    pub line: usize,
    pub content: LogLine,
}

/// Line-by-line reader over any buffered source.
pub struct SampleLogReader<R: BufRead> {
    inner: R,
    width: usize,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> SampleLogReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R, width: usize) -> Self {
        Self {
            inner,
            width,
            line: 0,
            buf: Vec::with_capacity(width + 2),
        }
    }

    /// Lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

/// Open a log file on disk for buffered reading.
pub fn open_log(path: &Path) -> Result<BufReader<File>, ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

impl<R: BufRead> Iterator for SampleLogReader<R> {
    type Item = Result<NumberedLine, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let content = match std::str::from_utf8(&self.buf) {
                    Ok(text) => classify_line(text, self.width),
                    // Not UTF-8: report the first byte that is not a bit symbol.
                    Err(err) => LogLine::Malformed(BitVectorError::InvalidSymbol {
                        position: err.valid_up_to(),
                        symbol: char::REPLACEMENT_CHARACTER,
                    }),
                };
                Some(Ok(NumberedLine {
                    line: self.line,
                    content,
                }))
            }
            Err(source) => Some(Err(ReplayError::Read {
                line: self.line + 1,
                source,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::BitVector;
    use std::io::Cursor;

    #[test]
    fn test_reads_and_classifies_lines() {
        let data = "0101\n\n010\n1111\n";
        let lines: Vec<_> = SampleLogReader::new(Cursor::new(data), 4)
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0].content,
            LogLine::Sample(BitVector::new("0101").unwrap())
        );
        assert_eq!(lines[1].content, LogLine::Blank);
        assert!(matches!(lines[2].content, LogLine::Malformed(_)));
        assert_eq!(lines[3].line, 4);
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines: Vec<_> = SampleLogReader::new(Cursor::new("11\n00"), 2)
            .map(|r| r.unwrap().content)
            .collect();
        assert_eq!(
            lines,
            vec![
                LogLine::Sample(BitVector::new("11").unwrap()),
                LogLine::Sample(BitVector::new("00").unwrap()),
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let data: &[u8] = b"0\xff01\n";
        let lines: Vec<_> = SampleLogReader::new(Cursor::new(data), 4)
            .map(|r| r.unwrap().content)
            .collect();
        assert!(matches!(
            lines[0],
            LogLine::Malformed(BitVectorError::InvalidSymbol { position: 1, .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_log(Path::new("/nonexistent/samples.txt"));
        assert!(matches!(result, Err(ReplayError::Open { .. })));
    }
}
