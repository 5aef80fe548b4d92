//! `randqc`: write a random, fully measured circuit as `OpenQASM` 3.
//!
//! ```text
//! randqc 3 5            # -> q03-05.qasm
//! randqc 2 2 test       # -> test.qasm
//! randqc -vv 12 40      # debug logging, prints the sampling seed
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::process::ExitCode;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

/// Random quantum circuit generator
#[derive(Parser)]
#[command(name = "randqc", author, version, about, long_about = None)]
struct Cli {
    /// Number of qubits
    dim: u32,

    /// Number of gate layers
    depth: u32,

    /// Output file name without the `.qasm` extension [default: q<DIM>-<DEPTH>]
    name: Option<String>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Logs go to stderr; stdout only carries the one-line summary.
fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match commands::generate::execute(cli.dim, cli.depth, cli.name.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
