//! Positional state machine over 4-line gcov records.
//!
//! gcov prints each source as a fixed group of lines:
//!
//! ```text
//! File 'src/contactsd.cpp'
//! Lines executed:87.50% of 40
//! src/contactsd.cpp:creating 'contactsd.cpp.gcov'
//! <blank>
//! ```
//!
//! Only the first two lines matter. The filter remembers the filename line,
//! pairs it with the statistic line when the filename qualifies, and skips the
//! rest. Nothing is validated: the position is purely `lines consumed mod 4`.

use crate::rules::{FileRules, Verdict};

/// Position of the next line within the current record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordPosition {
    #[default]
    AwaitFilename,
    AwaitStat,
    Skip1,
    Skip2,
}

impl RecordPosition {
    /// Position after consuming one line.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            RecordPosition::AwaitFilename => RecordPosition::AwaitStat,
            RecordPosition::AwaitStat => RecordPosition::Skip1,
            RecordPosition::Skip1 => RecordPosition::Skip2,
            RecordPosition::Skip2 => RecordPosition::AwaitFilename,
        }
    }

    /// Cursor value in 0..4.
    pub fn index(self) -> usize {
        match self {
            RecordPosition::AwaitFilename => 0,
            RecordPosition::AwaitStat => 1,
            RecordPosition::Skip1 => 2,
            RecordPosition::Skip2 => 3,
        }
    }
}

/// What happened to the line just processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Filename line stored for the next step.
    Remembered,
    /// Statistic line paired with a qualifying filename.
    Emit(Vec<u8>),
    /// Statistic line dropped because the filename was rejected.
    Rejected(Verdict),
    /// Line at position 2 or 3.
    Skipped,
}

/// Strip one trailing `\n` (and a preceding `\r`).
#[inline]
pub fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Stateful record filter. One instance per input stream.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    rules: FileRules,
    position: RecordPosition,
    filename: Vec<u8>,
}

impl RecordFilter {
    pub fn new(rules: FileRules) -> Self {
        Self {
            rules,
            position: RecordPosition::AwaitFilename,
            filename: Vec::with_capacity(256),
        }
    }

    /// Current cursor.
    pub fn position(&self) -> RecordPosition {
        self.position
    }

    pub fn rules(&self) -> &FileRules {
        &self.rules
    }

    /// Consume one raw line (terminator included, as read).
    pub fn process(&mut self, line: &[u8]) -> Action {
        let action = match self.position {
            RecordPosition::AwaitFilename => {
                self.filename.clear();
                self.filename.extend_from_slice(line);
                Action::Remembered
            }
            RecordPosition::AwaitStat => match self.rules.check(&self.filename) {
                Verdict::Qualifies => Action::Emit(self.format_pair(line)),
                verdict => Action::Rejected(verdict),
            },
            RecordPosition::Skip1 | RecordPosition::Skip2 => Action::Skipped,
        };
        self.position = self.position.next();
        action
    }

    /// Consume one line and return the output line, if any (no terminator).
    pub fn filter_line(&mut self, line: &[u8]) -> Option<Vec<u8>> {
        match self.process(line) {
            Action::Emit(out) => Some(out),
            _ => None,
        }
    }

    fn format_pair(&self, stat: &[u8]) -> Vec<u8> {
        let name = trim_terminator(&self.filename);
        let stat = trim_terminator(stat);
        let mut out = Vec::with_capacity(name.len() + stat.len() + 3);
        out.extend_from_slice(name);
        out.extend_from_slice(b" : ");
        out.extend_from_slice(stat);
        out
    }
}
