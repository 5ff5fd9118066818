//! gcov-filter: condense gcov console output.
//!
//! gcov prints a 4-line block per source file. This crate keeps the blocks for
//! compiled C++ sources, drops moc-generated units and headers, and reduces
//! each kept block to a single `filename : statistic` line.
//!
//! # Example
//!
//! ```rust
//! use gcov_filter::commands::FilterCommand;
//! use gcov_filter::report::ReportReader;
//!
//! let input = "File 'src/main.cpp'\nLines executed:75.00% of 4\n\n\n";
//! let reader = ReportReader::new(input.as_bytes());
//! let mut output = Vec::new();
//! let stats = FilterCommand::new().run_streaming(reader, &mut output).unwrap();
//!
//! assert_eq!(stats.emitted, 1);
//! assert_eq!(output, b"File 'src/main.cpp' : Lines executed:75.00% of 4\n");
//! ```

pub mod commands;
pub mod record;
pub mod report;
pub mod rules;

// Re-export commonly used types
pub use commands::{FilterCommand, FilterStats};
pub use record::{Action, RecordFilter, RecordPosition};
pub use report::{FilterError, ReportReader, ReportWriter};
pub use rules::{FileRules, Verdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
