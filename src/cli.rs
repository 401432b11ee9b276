use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nativepack::{BuildMode, ProcessClass};

/// nativepack - native addon resolution for desktop app builds
#[derive(Parser, Debug)]
#[command(name = "nativepack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <project root>/nativepack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root directory
    #[arg(short = 'C', long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Process the bundle runs in
    #[arg(long, value_enum, global = true)]
    pub target: Option<ProcessClass>,

    /// Build mode
    #[arg(long, value_enum, global = true)]
    pub mode: Option<BuildMode>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a direct reference to a native binary and print its loader
    Resolve {
        /// Path of the `.node` binary
        binary: PathBuf,

        /// Load with `dlopen` using these flags
        #[arg(long)]
        load_flags: Option<i64>,
    },

    /// Build the `bindings` locator module for the given contexts
    Bindings {
        /// Directories of the modules calling `bindings(...)`
        #[arg(required = true)]
        contexts: Vec<PathBuf>,
    },

    /// List the compiled binaries of a package
    Discover {
        /// Package directory (holding `binding.gyp`)
        package_dir: PathBuf,
    },

    /// Check whether the runtime can load a binary
    Probe {
        /// Path of the `.node` binary
        binary: PathBuf,
    },
}
