use clap::{Parser, Subcommand};
use savecache::commands::*;
use savecache::core::{
    command_init::{CommandInit, CommandOptions},
    error::Result,
    print_error,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "savecache")]
#[command(about = "Describe and resume game saves without reopening every file")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Active pak set, e.g. "pak64"
    #[arg(long, global = true)]
    pak: Option<String>,

    /// Cache file to read and write instead of the default
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// Config file to use instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List save files with their pak and version, newest first
    List {
        /// Directory containing save files (defaults to the configured save directory)
        dir: Option<PathBuf>,
    },
    /// Describe a single save file
    Info {
        /// Save file to describe
        file: PathBuf,
    },
    /// Print the newest save made with the active pak
    Resume {
        /// Directory containing save files (defaults to the configured save directory)
        dir: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let context = CommandInit::initialize(CommandOptions {
        config_file: cli.config,
        cache_file: cli.cache_file,
        pak: cli.pak,
    })?;

    match cli.command {
        Commands::List { dir } => execute_list(context, dir),
        Commands::Info { file } => execute_info(context, file),
        Commands::Resume { dir } => execute_resume(context, dir),
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
