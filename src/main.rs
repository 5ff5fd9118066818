//! gcov-filter: condense gcov output to `filename : coverage` lines
//!
//! Usage: gcov -o obj src/*.cpp | gcov-filter [OPTIONS]

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use gcov_filter::commands::FilterCommand;
use gcov_filter::report::FilterError;
use gcov_filter::rules::{FileRules, DEFAULT_EXCLUDE, DEFAULT_SUFFIX, DEFAULT_TAIL_WIDTH};

#[derive(Parser)]
#[command(name = "gcov-filter")]
#[command(version)]
#[command(about = "Condense gcov output to filename : coverage lines for compiled C++ sources", long_about = None)]
struct Cli {
    /// Input gcov report (use - for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Required filename suffix
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// Drop files whose name contains this marker past the first character
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    exclude: String,

    /// Trailing bytes of the filename line skipped before the suffix
    /// (2 = closing quote and newline in gcov "File '...'" lines)
    #[arg(long, default_value_t = DEFAULT_TAIL_WIDTH)]
    tail: usize,

    /// Print filter statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), FilterError> {
    if cli.suffix.is_empty() {
        return Err(FilterError::InvalidArgument(
            "--suffix must not be empty".to_string(),
        ));
    }

    let rules = FileRules::default()
        .with_suffix(cli.suffix)
        .with_exclude(cli.exclude)
        .with_tail_width(cli.tail);
    let cmd = FilterCommand::new().with_rules(rules);

    let stdout = io::stdout();
    let handle = stdout.lock();

    let result = match cli.input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, handle)?,
        _ => cmd.run_stdin(handle)?,
    };

    if cli.stats {
        eprintln!("Filter stats: {}", result);
    }

    Ok(())
}
