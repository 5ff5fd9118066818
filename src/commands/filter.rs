//! Streaming gcov report filter.
//!
//! Reads a gcov console report one line at a time, feeds each line through a
//! [`RecordFilter`], and writes the condensed `filename : statistic` lines.
//!
//! # Memory Complexity
//!
//! O(1) - one line buffer plus the remembered filename line.

use crate::record::{Action, RecordFilter, RecordPosition};
use crate::report::{ReportReader, ReportWriter, Result};
use crate::rules::{FileRules, Verdict};
use std::io::{self, Read, Write};
use std::path::Path;

/// Filter command configuration.
#[derive(Debug, Clone, Default)]
pub struct FilterCommand {
    /// Filename predicate applied to each record.
    pub rules: FileRules,
}

impl FilterCommand {
    pub fn new() -> Self {
        Self {
            rules: FileRules::default(),
        }
    }

    /// Replace the filename rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Filter a report file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input_path: P, output: W) -> Result<FilterStats> {
        let reader = ReportReader::from_path(input_path)?;
        self.run_streaming(reader, output)
    }

    /// Filter standard input.
    pub fn run_stdin<W: Write>(&self, output: W) -> Result<FilterStats> {
        let stdin = io::stdin();
        let reader = ReportReader::new(stdin.lock());
        self.run_streaming(reader, output)
    }

    /// Core loop: read, classify by position, emit.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        mut reader: ReportReader<R>,
        output: W,
    ) -> Result<FilterStats> {
        let mut stats = FilterStats::default();
        let mut writer = ReportWriter::new(output);
        let mut filter = RecordFilter::new(self.rules.clone());

        while let Some(line) = reader.read_line()? {
            match filter.process(line) {
                Action::Remembered => stats.records += 1,
                Action::Emit(out) => writer.write_line(&out)?,
                Action::Rejected(Verdict::Excluded) => stats.excluded += 1,
                Action::Rejected(_) => stats.suffix_mismatches += 1,
                Action::Skipped => {}
            }
        }

        writer.flush()?;
        stats.lines_read = reader.line_number();
        stats.emitted = writer.lines_written();
        stats.trailing_partial = filter.position() != RecordPosition::AwaitFilename;
        Ok(stats)
    }
}

/// Statistics from a filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Input lines consumed
    pub lines_read: usize,
    /// Records started (filename lines seen)
    pub records: usize,
    /// Records written to output
    pub emitted: usize,
    /// Records dropped by the exclusion marker
    pub excluded: usize,
    /// Records dropped by the suffix window
    pub suffix_mismatches: usize,
    /// Input ended mid-record
    pub trailing_partial: bool,
}

impl std::fmt::Display for FilterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lines: {}, Records: {}, Emitted: {}, Excluded: {}, Suffix mismatches: {}",
            self.lines_read, self.records, self.emitted, self.excluded, self.suffix_mismatches
        )?;
        if self.trailing_partial {
            write!(f, " (trailing partial record)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    const REPORT: &str = "\
File 'src/contactsd.cpp'
Lines executed:87.50% of 40
src/contactsd.cpp:creating 'contactsd.cpp.gcov'

File 'src/contactsd.h'
Lines executed:100.00% of 2
src/contactsd.h:creating 'contactsd.h.gcov'

File 'moc_contactsd.moc.cpp'
Lines executed:0.00% of 12
moc_contactsd.moc.cpp:creating 'moc_contactsd.moc.cpp.gcov'

File 'src/logger.cpp'
Lines executed:50.00% of 8
src/logger.cpp:creating 'logger.cpp.gcov'

";

    fn filter_str(cmd: &FilterCommand, input: &str) -> (String, FilterStats) {
        let mut output = Vec::new();
        let reader = ReportReader::new(Cursor::new(input.as_bytes().to_vec()));
        let stats = cmd.run_streaming(reader, &mut output).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    fn test_filter_gcov_report() {
        let (out, stats) = filter_str(&FilterCommand::new(), REPORT);
        assert_eq!(
            out,
            "File 'src/contactsd.cpp' : Lines executed:87.50% of 40\n\
             File 'src/logger.cpp' : Lines executed:50.00% of 8\n"
        );
        assert_eq!(stats.lines_read, 16);
        assert_eq!(stats.records, 4);
        assert_eq!(stats.emitted, 2);
        assert_eq!(stats.excluded, 1);
        assert_eq!(stats.suffix_mismatches, 1);
        assert!(!stats.trailing_partial);
    }

    #[test]
    fn test_empty_input() {
        let (out, stats) = filter_str(&FilterCommand::new(), "");
        assert!(out.is_empty());
        assert_eq!(stats, FilterStats::default());
    }

    #[test]
    fn test_trailing_filename_only() {
        let input = "File 'a.cpp'\n10%\nx\n\nFile 'b.cpp'\n";
        let (out, stats) = filter_str(&FilterCommand::new(), input);
        assert_eq!(out, "File 'a.cpp' : 10%\n");
        assert_eq!(stats.records, 2);
        assert!(stats.trailing_partial);
    }

    #[test]
    fn test_custom_rules() {
        let cmd = FilterCommand::new().with_rules(FileRules::default().with_tail_width(1));
        let (out, _) = filter_str(&cmd, "foo.cpp\n90% covered\nx\ny\n");
        assert_eq!(out, "foo.cpp : 90% covered\n");
    }

    #[test]
    fn test_run_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", REPORT).unwrap();
        file.flush().unwrap();

        let mut output = Vec::new();
        let stats = FilterCommand::new().run(file.path(), &mut output).unwrap();
        assert_eq!(stats.emitted, 2);
        assert!(output.starts_with(b"File 'src/contactsd.cpp' : "));
    }

    #[test]
    fn test_stats_display() {
        let stats = FilterStats {
            lines_read: 8,
            records: 2,
            emitted: 1,
            excluded: 1,
            suffix_mismatches: 0,
            trailing_partial: false,
        };
        assert_eq!(
            stats.to_string(),
            "Lines: 8, Records: 2, Emitted: 1, Excluded: 1, Suffix mismatches: 0"
        );
        let partial = FilterStats {
            trailing_partial: true,
            ..stats
        };
        assert!(partial.to_string().ends_with("(trailing partial record)"));
    }
}
