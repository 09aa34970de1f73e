mod demo;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cms_rust::SketchConfig;
use cms_rust::config::{DEFAULT_DEPTH, DEFAULT_WIDTH};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xxhash_rust::xxh64::Xxh64Builder;

#[derive(Parser)]
#[command(name = "cms-rust")]
#[command(version)]
#[command(about = "Count-min sketch frequency estimation")]
struct Cli {
    /// Log level
    #[arg(short = 'v', long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive add/count session on one sketch
    Shell(ShellArgs),
    /// Measure overestimation across sketch widths and plot it
    Study(StudyArgs),
}

#[derive(Args)]
struct ShellArgs {
    /// Counters per row
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Number of rows (hash functions)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Whitespace-separated items to add before the session starts
    #[arg(short, long, value_name = "FILE")]
    load: Option<PathBuf>,
}

#[derive(Args)]
struct StudyArgs {
    /// Distinct keys inserted per trial
    #[arg(short = 'n', long, default_value_t = 10_000)]
    keys: u64,

    /// Run the trials on one thread
    #[arg(long)]
    sequential: bool,

    /// Where to write the chart
    #[arg(short, long, default_value = "overestimation.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with shell output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cms_rust={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // The following runs use the Xxh64 hash function.
    // You can use a different hash function by providing a different BuildHasher.
    match cli.command {
        Some(Command::Study(args)) => {
            demo::synthetic::plot_overestimation::<Xxh64Builder>(
                args.keys,
                !args.sequential,
                &args.output,
            )
            .map_err(|e| anyhow::anyhow!("study failed: {}", e))?;
        }
        Some(Command::Shell(args)) => run_shell(args)?,
        None => run_shell(ShellArgs {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            load: None,
        })?,
    }

    Ok(())
}

fn run_shell(args: ShellArgs) -> Result<()> {
    let config = SketchConfig::new(args.width, args.depth);
    demo::interactive::run::<Xxh64Builder>(&config, args.load.as_deref())
}
