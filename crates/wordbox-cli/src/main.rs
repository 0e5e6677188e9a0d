mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "wordbox",
    version,
    about = "Extract positioned words and fonts from PDF documents"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a PDF (or a raw extraction JSON) into pages of words
    Normalize {
        /// Path to PDF or raw extraction JSON file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the normalized document to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Scale factor from pdftohtml pixels to output units
        #[arg(long, default_value_t = wordbox_core::DEFAULT_RATIO)]
        ratio: f64,

        /// Skip the qpdf repair pass before extraction
        #[arg(long)]
        no_repair: bool,
    },
    /// Run pdftohtml only and print the raw extraction as JSON
    Extract {
        /// Path to PDF file
        input_file: PathBuf,

        /// Skip the qpdf repair pass before extraction
        #[arg(long)]
        no_repair: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Normalize {
            input_file,
            output,
            out,
            ratio,
            no_repair,
        } => commands::normalize::run(input_file, &output, out, ratio, no_repair),
        Commands::Extract {
            input_file,
            no_repair,
        } => commands::extract::run(input_file, no_repair),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
