use std::{fs, path::PathBuf};

use clap::Parser;
use snpli::interpret;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// snpli interprets parameterized Spiking Neural P-system descriptions and
/// prints the generated system.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The program to interpret.
    file: PathBuf,

    /// Logs more of what the interpreter does. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Exits with an error when any warning or skipped statement was reported.
    #[arg(long)]
    deny_warnings: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "snpli=warn",
        1 => "snpli=info",
        2 => "snpli=debug",
        _ => "snpli=trace",
    };
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env()
                                            .unwrap_or_else(|_| default_filter.into()))
                                  .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                                  .init();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               args.file.display());
                     std::process::exit(1);
                 });

    let result = interpret(&source).unwrap_or_else(|e| {
                                       eprintln!("{e}");
                                       std::process::exit(1);
                                   });

    info!(neurons = result.system.neurons.len(),
          synapses = result.system.synapses.len(),
          diagnostics = result.diagnostics.len(),
          "interpretation finished");
    print!("{}", result.system);

    if args.deny_warnings && !result.diagnostics.is_empty() {
        eprintln!("{} diagnostic(s) reported.", result.diagnostics.len());
        std::process::exit(1);
    }
}
