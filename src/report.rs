//! Line-oriented I/O for gcov console reports.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Input buffer size (256 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Output buffer size (64 KB). Output is at most a quarter of the input lines.
pub const DEFAULT_OUTPUT_BUFFER: usize = 64 * 1024;

/// Initial line buffer capacity. gcov paths are rarely longer.
pub const DEFAULT_LINE_BUFFER: usize = 1024;

/// Errors that can occur while filtering a report.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;

/// Streaming reader yielding raw lines with their terminators.
///
/// Lines are not decoded; gcov paths may contain arbitrary bytes.
pub struct ReportReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl ReportReader<File> {
    /// Open a report file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> ReportReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_INPUT_BUFFER)
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::with_capacity(DEFAULT_LINE_BUFFER),
        }
    }

    /// Read the next line, terminator included.
    ///
    /// Returns `None` at end of input. The final line may lack a terminator.
    pub fn read_line(&mut self) -> Result<Option<&[u8]>> {
        self.buffer.clear();
        let n = self.reader.read_until(b'\n', &mut self.buffer)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(&self.buffer))
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Buffered writer for condensed report lines.
pub struct ReportWriter<W: Write> {
    writer: BufWriter<W>,
    lines_written: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            lines_written: 0,
        }
    }

    /// Write a line followed by `\n`.
    #[inline]
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
