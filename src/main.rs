// Command-line entry point for stackfold.

use anyhow::{bail, Result};
use clap::Parser;
use stackfold::application::ProfileUsecase;
use stackfold::infrastructure::{concurrency, LogLoader};
use stackfold::ports::{HtmlExporter, JsonExporter, ReportExporter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input backtrace log path
    #[arg(short, long)]
    input: String,

    /// Output report path
    #[arg(short, long)]
    output: String,

    /// Output format (html, json)
    #[arg(short, long, default_value = "html")]
    format: String,

    /// Maximum accepted log size in bytes
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_size: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if concurrency::init_thread_pool().is_err() {
        eprintln!("[WARN] rayon pool already initialized, reusing it");
    }

    let log_content = LogLoader::load(&cli.input, cli.max_size)?;

    let exporter: &dyn ReportExporter = match cli.format.as_str() {
        "html" => &HtmlExporter,
        "json" => &JsonExporter,
        other => bail!("Unknown output format '{}' (expected html or json)", other),
    };

    let usecase = ProfileUsecase { exporter };
    let report = usecase.run(&log_content, &cli.output)?;

    println!(
        "Folded {} traces into {} (format: {})",
        report.total_traces, cli.output, cli.format
    );
    Ok(())
}
