//! CLI for linebench.
//!
//! Three subcommands cover the measurement pipeline: `throughput` and
//! `latency` read the system under test's output from stdin and emit a
//! JSON result document, `chart` renders ASCII charts from a directory
//! of such documents. Human-readable summaries and progress always go
//! to stderr so that piping the structured stdout output stays
//! lossless.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use linebench_charts::{render_charts, write_charts, ChartKind};
use linebench_core::result::EMPTY_RESULT_MARKER;
use linebench_core::throughput::{Progress, ThroughputOptions, DEFAULT_REPORT_INTERVAL};
use linebench_core::{latency, throughput, LatencyOutcome, LineStream, SystemClock};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Benchmark line-oriented data pipelines.
#[derive(Parser, Debug)]
#[command(name = "linebench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure line throughput from stdin.
    Throughput {
        /// Stop after this many seconds.
        #[arg(long)]
        duration: Option<f64>,

        /// Stop after this many lines.
        #[arg(long)]
        max_lines: Option<u64>,

        /// Progress report interval in seconds.
        #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
        report_interval: f64,

        /// Suppress progress and summary output.
        #[arg(long)]
        quiet: bool,

        /// Write the JSON result document to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Measure per-line latency of timestamped lines from stdin.
    ///
    /// Expects the wire format `<decimal-seconds>|<payload>`. Exits
    /// non-zero when not a single line could be parsed.
    Latency {
        /// Stop after this many lines.
        #[arg(long)]
        max_lines: Option<u64>,

        /// Suppress summary output.
        #[arg(long)]
        quiet: bool,

        /// Write the JSON result document to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render ASCII charts from a directory of result documents.
    Chart {
        /// Directory containing JSON result documents.
        results_dir: PathBuf,

        /// Write chart files here instead of printing to stdout.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Which chart to render.
        #[arg(long, value_enum, default_value_t = ChartTypeArg::All)]
        chart_type: ChartTypeArg,
    },
}

/// Chart selection on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTypeArg {
    /// Throughput comparison only.
    Throughput,
    /// Line-length sweep only.
    LineLength,
    /// Latency comparison only.
    Latency,
    /// Every chart.
    All,
}

impl ChartTypeArg {
    /// The chart passes this selection requests.
    pub fn kinds(self) -> Vec<ChartKind> {
        match self {
            ChartTypeArg::Throughput => vec![ChartKind::Throughput],
            ChartTypeArg::LineLength => vec![ChartKind::LineLength],
            ChartTypeArg::Latency => vec![ChartKind::Latency],
            ChartTypeArg::All => ChartKind::all(),
        }
    }
}

/// Parse the command line and run the selected command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Throughput {
            duration,
            max_lines,
            report_interval,
            quiet,
            output,
        } => {
            let options = throughput_options(duration, max_lines, report_interval, quiet);
            run_throughput(
                io::stdin().lock(),
                &options,
                quiet,
                output.as_deref(),
                interrupt_flag(),
            )
        }
        Commands::Latency {
            max_lines,
            quiet,
            output,
        } => {
            let options = latency_options(max_lines);
            run_latency(
                io::stdin().lock(),
                &options,
                quiet,
                output.as_deref(),
                interrupt_flag(),
            )
        }
        Commands::Chart {
            results_dir,
            output_dir,
            chart_type,
        } => run_chart(&results_dir, output_dir.as_deref(), chart_type),
    }
}

/// Build throughput meter options from the raw flags.
///
/// A zero-valued limit means no limit, and quiet mode silences
/// progress by pushing the cadence out of reach.
fn throughput_options(
    duration: Option<f64>,
    max_lines: Option<u64>,
    report_interval: f64,
    quiet: bool,
) -> ThroughputOptions {
    ThroughputOptions {
        duration: duration.filter(|limit| *limit > 0.0),
        max_lines: max_lines.filter(|limit| *limit > 0),
        report_interval: if quiet {
            f64::INFINITY
        } else {
            report_interval
        },
    }
}

/// Build latency meter options from the raw flags. A zero-valued limit
/// means no limit.
fn latency_options(max_lines: Option<u64>) -> latency::LatencyOptions {
    latency::LatencyOptions {
        max_lines: max_lines.filter(|limit| *limit > 0),
    }
}

/// Install a SIGINT handler that raises a stop flag, so an interrupted
/// run still emits a document over whatever was measured.
fn interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let raised = Arc::clone(&flag);
    if let Err(err) = ctrlc::set_handler(move || raised.store(true, Ordering::SeqCst)) {
        tracing::warn!("could not install interrupt handler: {err}");
    }
    flag
}

/// End a line stream as soon as the stop flag is raised.
///
/// The flag is observed between lines. A run blocked inside a read
/// still ends promptly on Ctrl-C: the generator side of the pipeline
/// receives the same signal and closes the pipe.
fn stoppable<I>(lines: I, stop: Arc<AtomicBool>) -> impl Iterator<Item = String>
where
    I: Iterator<Item = String>,
{
    lines.take_while(move |_| !stop.load(Ordering::SeqCst))
}

fn run_throughput(
    input: impl BufRead,
    options: &ThroughputOptions,
    quiet: bool,
    output: Option<&Path>,
    stop: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let lines = stoppable(LineStream::new(input), Arc::clone(&stop));
    let result = throughput::measure(lines, options, &SystemClock, print_progress);
    if !quiet {
        if stop.load(Ordering::SeqCst) {
            eprintln!("\nInterrupted by user");
        }
        eprint!("{}", throughput_summary(&result));
    }
    emit_document(&result, output, quiet)
}

fn run_latency(
    input: impl BufRead,
    options: &latency::LatencyOptions,
    quiet: bool,
    output: Option<&Path>,
    stop: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let lines = stoppable(LineStream::new(input), Arc::clone(&stop));
    let outcome = latency::measure(lines, options, &SystemClock);
    if !quiet && stop.load(Ordering::SeqCst) {
        eprintln!("\nInterrupted by user");
    }
    match outcome {
        LatencyOutcome::Stats(result) => {
            if !quiet {
                eprint!("{}", latency_summary(&result));
            }
            emit_document(&result, output, quiet)
        }
        LatencyOutcome::Empty(_) => anyhow::bail!("{EMPTY_RESULT_MARKER}"),
    }
}

fn run_chart(
    results_dir: &Path,
    output_dir: Option<&Path>,
    chart_type: ChartTypeArg,
) -> anyhow::Result<()> {
    let charts = render_charts(results_dir, &chart_type.kinds())?;
    match output_dir {
        Some(output_dir) => {
            for path in write_charts(&charts, output_dir)? {
                eprintln!("Chart saved to: {}", path.display());
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            for (index, chart) in charts.iter().enumerate() {
                if index > 0 {
                    let _ = writeln!(stdout, "\n{}\n", "=".repeat(70));
                }
                let _ = writeln!(stdout, "{}", chart.text);
            }
        }
    }
    Ok(())
}

/// Print one interim progress line, flushed immediately so an operator
/// sees it in real time.
fn print_progress(progress: Progress) {
    let mut stderr = io::stderr();
    let _ = writeln!(
        stderr,
        "Progress: {} lines, {:.0} lines/s, {:.2} MB/s",
        group_thousands(progress.line_count),
        progress.lines_per_second,
        progress.megabytes_per_second,
    );
    let _ = stderr.flush();
}

/// Format a count with `,` thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Write the document to `output`, or pretty-print it to stdout.
fn emit_document<T: Serialize>(
    document: &T,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            linebench_core::io::write_document(document, path)
                .with_context(|| format!("could not save results to {}", path.display()))?;
            if !quiet {
                eprintln!("\nResults saved to: {}", path.display());
            }
        }
        None => println!("{}", linebench_core::io::to_pretty_json(document)?),
    }
    Ok(())
}

fn throughput_summary(result: &linebench_core::ThroughputResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Throughput Results ===");
    let _ = writeln!(out, "Lines processed: {}", group_thousands(result.line_count));
    let _ = writeln!(out, "Bytes processed: {}", group_thousands(result.byte_count));
    let _ = writeln!(out, "Duration: {:.2} seconds", result.duration_seconds);
    let _ = writeln!(out, "Throughput: {:.0} lines/s", result.lines_per_second);
    let _ = writeln!(out, "Throughput: {:.2} MB/s", result.megabytes_per_second);
    let _ = writeln!(out, "Avg line length: {:.0} bytes", result.avg_line_length);
    out
}

fn latency_summary(result: &linebench_core::LatencyResult) -> String {
    let ms = &result.latency_milliseconds;
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Latency Results ===");
    let _ = writeln!(out, "Lines processed: {}", group_thousands(result.line_count));
    let _ = writeln!(
        out,
        "Valid measurements: {}",
        group_thousands(result.valid_measurements)
    );
    if result.error_count > 0 {
        let _ = writeln!(out, "Errors: {}", group_thousands(result.error_count));
    }
    let _ = writeln!(out, "\nLatency (milliseconds):");
    let _ = writeln!(out, "  Min:    {:.2} ms", ms.min);
    let _ = writeln!(out, "  Median: {:.2} ms", ms.median);
    let _ = writeln!(out, "  Mean:   {:.2} ms", ms.mean);
    let _ = writeln!(out, "  P95:    {:.2} ms", ms.p95);
    let _ = writeln!(out, "  P99:    {:.2} ms", ms.p99);
    let _ = writeln!(out, "  Max:    {:.2} ms", ms.max);
    let _ = writeln!(out, "  StdDev: {:.2} ms", ms.stddev);
    out
}
