//! Filename rules for selecting compiled sources.
//!
//! gcov prints one `File '<path>'` line per source it touched, including
//! moc-generated translation units and headers. A filename line qualifies when
//! it does not carry the exclusion marker past its first byte and the fixed
//! window just before its tail matches the required suffix.
//!
//! The window is positional: with the default tail width of 2 the last two
//! bytes of the raw line (closing quote and `\n` in gcov output) are skipped,
//! and the 4 bytes before them are compared against `.cpp`.

use memchr::memmem;

/// Default required suffix.
pub const DEFAULT_SUFFIX: &str = ".cpp";

/// Default exclusion marker (Qt moc output).
pub const DEFAULT_EXCLUDE: &str = ".moc";

/// Default number of trailing bytes skipped before the suffix window.
pub const DEFAULT_TAIL_WIDTH: usize = 2;

/// Why a filename line was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Qualifies,
    Excluded,
    SuffixMismatch,
}

/// Predicate over raw filename lines (terminator included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    /// Bytes that must appear in the suffix window.
    pub suffix: Vec<u8>,
    /// Marker that rejects a line when found at an offset greater than zero.
    pub exclude: Vec<u8>,
    /// Bytes at the end of the line that are not part of the suffix window.
    pub tail_width: usize,
}

impl Default for FileRules {
    fn default() -> Self {
        Self::new()
    }
}

impl FileRules {
    pub fn new() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.as_bytes().to_vec(),
            exclude: DEFAULT_EXCLUDE.as_bytes().to_vec(),
            tail_width: DEFAULT_TAIL_WIDTH,
        }
    }

    /// Set the required suffix.
    pub fn with_suffix(mut self, suffix: impl Into<Vec<u8>>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the exclusion marker. An empty marker excludes nothing.
    pub fn with_exclude(mut self, exclude: impl Into<Vec<u8>>) -> Self {
        self.exclude = exclude.into();
        self
    }

    /// Set the number of trailing bytes skipped before the suffix window.
    pub fn with_tail_width(mut self, tail_width: usize) -> Self {
        self.tail_width = tail_width;
        self
    }

    /// True if the exclusion marker occurs anywhere past the first byte.
    ///
    /// A marker at offset 0 does not count.
    #[inline]
    pub fn is_excluded(&self, line: &[u8]) -> bool {
        if self.exclude.is_empty() || line.is_empty() {
            return false;
        }
        // Searching from offset 1 finds any occurrence with start > 0.
        memmem::find(&line[1..], &self.exclude).is_some()
    }

    /// The bytes compared against the suffix, or `None` if the line is too short.
    #[inline]
    pub fn suffix_window<'a>(&self, line: &'a [u8]) -> Option<&'a [u8]> {
        let end = line.len().checked_sub(self.tail_width)?;
        let start = end.checked_sub(self.suffix.len())?;
        Some(&line[start..end])
    }

    /// Classify a raw filename line.
    pub fn check(&self, line: &[u8]) -> Verdict {
        if self.is_excluded(line) {
            return Verdict::Excluded;
        }
        match self.suffix_window(line) {
            Some(window) if window == self.suffix.as_slice() => Verdict::Qualifies,
            _ => Verdict::SuffixMismatch,
        }
    }

    #[inline]
    pub fn qualifies(&self, line: &[u8]) -> bool {
        self.check(line) == Verdict::Qualifies
    }
}
