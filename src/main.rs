mod commands;
mod config;
mod declarations;
mod diagnostics;
mod error;
mod grammar;
mod link;
mod locator;
mod marker;
mod resolver;
mod revision;
mod rewrite;
mod snapshot;
mod types;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Command-line interface definition.
#[derive(Parser)]
#[command(
    name = "pinref",
    version,
    about = "Rewrite @@file:symbol@@ markers into revision-pinned source links"
)]
struct Cli {
    /// Hosted repository URL (overrides `base_url` in .pinref.toml).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Subcommand to run; `render` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Documents to render when no subcommand is given; stdin when empty.
    inputs: Vec<PathBuf>,
    /// Pin links to this revision instead of the checkout's git HEAD.
    #[arg(long, global = true)]
    revision: Option<String>,
    /// Local checkout that marker paths are relative to (overrides `root`).
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve every marker without printing the document
    Check {
        /// Documents to check; stdin when none are given.
        inputs: Vec<PathBuf>,
    },
    /// Rewrite markers in documents (or stdin) to stdout
    Render {
        /// Documents to rewrite, in order; stdin when none are given.
        inputs: Vec<PathBuf>,
    },
    /// Resolve one `path[:symbol]` reference and print its link
    Resolve {
        /// Reference in marker syntax, without the `@@` delimiters.
        reference: String,
    },
    /// List the addressable declarations of a source file
    Symbols {
        /// Source file, relative to the root.
        file: String,
        /// Emit JSON instead of one line per declaration.
        #[arg(long)]
        json: bool,
    },
}

/// Send `tracing` output to stderr; stdout carries only the document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new("pinref=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    return;
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = config::Config::load(Path::new(".")).and_then(|config| {
        let config = config.with_overrides(cli.base_url, cli.revision, cli.root);
        return match cli.command.unwrap_or(Commands::Render { inputs: cli.inputs }) {
            Commands::Check { inputs } => commands::check(&config, &inputs),
            Commands::Render { inputs } => commands::render(&config, &inputs),
            Commands::Resolve { reference } => commands::resolve(&config, &reference),
            Commands::Symbols { file, json } => commands::symbols(&config, &file, json),
        };
    });

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
        Ok(()) => ExitCode::SUCCESS,
    };
}
