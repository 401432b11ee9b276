//! nativepack CLI - native addon resolution for desktop app builds
//!
//! Usage: nativepack <COMMAND>
//!
//! Commands:
//!   resolve   Resolve a direct binary reference and print its loader
//!   bindings  Build the `bindings` locator module
//!   discover  List the compiled binaries of a package
//!   probe     Check whether the runtime can load a binary

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use nativepack::NativeError;

/// Exit status when the whole build must stop (probe protocol error)
const FATAL_EXIT_CODE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        let fatal = err
            .downcast_ref::<NativeError>()
            .map(NativeError::is_process_fatal)
            .unwrap_or(false);
        eprintln!("Error: {:#}", err);
        std::process::exit(if fatal { FATAL_EXIT_CODE } else { 1 });
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = commands::GlobalOptions::from_cli(&cli);
    match cli.command {
        Commands::Resolve { binary, load_flags } => {
            commands::resolve::cmd_resolve(&options, &binary, load_flags)
        }
        Commands::Bindings { contexts } => commands::bindings::cmd_bindings(&options, &contexts),
        Commands::Discover { package_dir } => {
            commands::discover::cmd_discover(&options, &package_dir)
        }
        Commands::Probe { binary } => commands::probe::cmd_probe(&options, &binary),
    }
}

/// `NATIVEPACK_LOG` takes precedence over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "nativepack=warn",
        1 => "nativepack=info",
        2 => "nativepack=debug",
        _ => "nativepack=trace",
    };
    let filter =
        EnvFilter::try_from_env("NATIVEPACK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
