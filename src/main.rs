mod config;
mod data;
mod error;
mod model;
mod ui;
mod walker;

use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{ProjectConfig, Settings};
use crate::data::lister::FsLister;
use crate::ui::theme::{ColorChoice, Palette};
use crate::walker::{OnError, Walker};

#[derive(Parser)]
#[command(
    name = "dirtree",
    version,
    about = "Render a directory as a tree, directories first",
    override_help = HELP_TEXT,
)]
struct Cli {
    /// Directory to render (exactly one)
    #[arg(value_name = "DIRECTORY_PATH")]
    paths: Vec<OsString>,

    /// When to color output
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Show links to directories as plain entries instead of descending
    #[arg(long)]
    no_follow_links: bool,

    /// Keep going when a directory cannot be read
    #[arg(long)]
    skip_unreadable: bool,

    /// Config file to use instead of ./.dirtree.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

const USAGE: &str = "Usage: dirtree <directory_path>";

const HELP_TEXT: &str = "\
dirtree - Render a directory as a tree, directories first

USAGE:
  dirtree [OPTIONS] <directory_path>

OPTIONS:
  --color <WHEN>       auto, always or never [default: auto]
  --no-follow-links    Show links to directories without descending
  --skip-unreadable    Keep going when a directory cannot be read
  --config <FILE>      Config file to use instead of ./.dirtree.toml
  -h, --help           Print this help
  -V, --version        Print version

CONFIG (.dirtree.toml):
  [display]
  color = \"auto\"
  [traversal]
  follow_links = true
  on_error = \"abort\"     # or \"skip\"

Set RUST_LOG=debug for traversal logs on stderr.";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let [arg] = cli.paths.as_slice() else {
        println!("{USAGE}");
        return Ok(());
    };
    let root = root_path(arg);

    let settings = resolve_settings(&cli)?;
    let lister = FsLister::new(settings.follow_links);
    let walker = Walker::new(&lister)
        .with_palette(Palette::new(settings.color.resolve()))
        .with_on_error(settings.on_error);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match walker.render_tree(&root, &mut out) {
        Ok(_) => Ok(()),
        Err(err) if err.is_invalid_root() => {
            writeln!(out, "Error: {}", err)?;
            out.flush()?;
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("failed to render '{}'", root.display())),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_tty())
        .init();
}

/// An empty argument names the working directory.
fn root_path(arg: &OsString) -> PathBuf {
    if arg.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(arg)
    }
}

/// Defaults, then the config file, then CLI flags.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let project = match cli.config {
        Some(ref path) => config::load_config_file(path)?,
        None => match std::env::current_dir() {
            Ok(cwd) => config::load_project_config(&cwd),
            Err(err) => {
                debug!(error = %err, "working directory unavailable, using default config");
                ProjectConfig::default()
            }
        },
    };

    let mut settings = project.settings();
    if let Some(color) = cli.color {
        settings.color = color;
    }
    if cli.no_follow_links {
        settings.follow_links = false;
    }
    if cli.skip_unreadable {
        settings.on_error = OnError::Skip;
    }
    Ok(settings)
}
