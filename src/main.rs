//! dirtree - Browse a directory tree, prune it, and export the structure.
//!
//! Usage:
//!   dirtree [PATH]              Launch interactive TUI
//!   dirtree export [PATH]       Export the structure as indented text
//!   dirtree profiles            List stored exclusion profiles
//!   dirtree --help              Show help

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use dirtree_core::profile::{DEFAULT_PROFILE, PROFILES_FILE};
use dirtree_core::{PatternSet, ProfileStore, ScanConfig, render_export, write_export};
use dirtree_scan::{DirTree, TreeBuilder};
use dirtree_tui::{LOG_FILE, TuiConfig};

#[derive(Parser)]
#[command(
    name = "dirtree",
    version,
    about = "Browse a directory tree and export its structure as text",
    long_about = "dirtree shows a directory as a tree, lets you exclude entries by hand \
                  or through named pattern profiles, and exports what is left as an \
                  indented text file.\n\n\
                  Launch the interactive TUI by running `dirtree [PATH]`, or use \
                  subcommands for headless operations."
)]
struct Cli {
    /// Directory to open on startup
    path: Option<PathBuf>,

    /// Directory holding profiles, settings and the log file
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log level filter (e.g. "info", "debug", "dirtree_scan=trace")
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory and export its structure
    Export {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Profile whose patterns are applied
        #[arg(short, long, default_value = DEFAULT_PROFILE)]
        profile: String,

        /// Extra names to exclude (repeatable)
        #[arg(short, long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,
    },

    /// List stored profiles
    Profiles,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_dir = cli
        .config_dir
        .or_else(|| dirs::config_dir().map(|d| d.join("dirtree")))
        .unwrap_or_else(|| PathBuf::from("."));
    let profile_path = config_dir.join(PROFILES_FILE);

    match cli.command {
        Some(Command::Export {
            path,
            output,
            profile,
            exclude,
        }) => {
            init_stderr_logging(&cli.log_level);
            run_export(&path, output.as_deref(), &profile, exclude, &profile_path)?;
        }
        Some(Command::Profiles) => {
            init_stderr_logging(&cli.log_level);
            run_profiles(&profile_path);
        }
        None => {
            init_file_logging(&cli.log_level, &config_dir);
            let config = TuiConfig::new()
                .with_config_dir(&config_dir)
                .with_initial_path(cli.path);
            dirtree_tui::run_with_config(config)?;
        }
    }

    Ok(())
}

/// Log to stderr for headless commands.
fn init_stderr_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file so output does not draw over the TUI. Logging is skipped when
/// the file cannot be created.
fn init_file_logging(level: &str, config_dir: &Path) {
    let log_path = config_dir.join(LOG_FILE);
    let file = fs::create_dir_all(config_dir).and_then(|()| {
        File::options().create(true).append(true).open(&log_path)
    });
    let Ok(file) = file else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

/// Scan without the TUI and write the structure to a file or stdout.
fn run_export(
    path: &Path,
    output: Option<&Path>,
    profile: &str,
    exclude: Vec<String>,
    profile_path: &Path,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    let store = ProfileStore::load(profile_path);
    if !store.contains(profile) {
        bail!(
            "Unknown profile \"{profile}\" (available: {})",
            store.names().join(", ")
        );
    }
    let patterns = PatternSet::builtin()
        .union(&store.get(profile))
        .union(&exclude.into_iter().collect());

    eprintln!("Scanning {}...", path.display());

    let mut tree = DirTree::new();
    let summary = TreeBuilder::new(ScanConfig::new(&path, patterns))
        .build_into(&mut tree)
        .context("Scan failed")?;

    match output {
        Some(output) => {
            let lines = write_export(&tree, output).context("Export failed")?;
            eprintln!("Wrote {lines} line(s) to {}", output.display());
        }
        None => println!("{}", render_export(&tree)),
    }

    if summary.has_warnings() {
        eprintln!("{} directory(ies) could not be read", summary.warnings.len());
        for warning in &summary.warnings {
            eprintln!("  {}: {}", warning.path.display(), warning.message);
        }
    }

    Ok(())
}

/// Print every stored profile with its pattern count.
fn run_profiles(profile_path: &Path) {
    let store = ProfileStore::load(profile_path);
    println!("Profiles in {}:", store.path().display());
    for name in store.names() {
        let count = store.get(&name).len();
        let marker = if name == DEFAULT_PROFILE { " (read-only)" } else { "" };
        println!("  {name}: {count} pattern(s){marker}");
    }
}
