use anyhow::Result;
use clap::{ArgAction, Parser};
use file_cleaner_core::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

const EPILOG: &str = "\
defaults:
  names: __pycache__, .DS_Store
  exts:  log, tmp

notes:
  - dry-run by default. use --yes to actually delete.
  - patterns are regex applied to the file name only.
  - --max-depth 0 means only the root directory.

examples:
  file-cleaner .
  file-cleaner . --yes
  file-cleaner . --yes --no-prompt --remove-empty-dirs
  file-cleaner . --yes --max-depth 3 --ext bak,old --pattern '.*~$' --name Thumbs.db";

#[derive(Parser, Debug)]
#[command(
    name = "file-cleaner",
    version,
    about = "Find and remove junk files",
    after_help = EPILOG
)]
struct Args {
    /// Directory to clean
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Actually delete (default: dry-run)
    #[arg(long)]
    yes: bool,

    /// Skip confirmation (use with --yes)
    #[arg(long)]
    no_prompt: bool,

    /// Remove empty directories after deletion
    #[arg(long)]
    remove_empty_dirs: bool,

    /// Maximum depth (0 = root only)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Extension to delete (repeatable, comma separated)
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    exts: Vec<String>,

    /// File name regex to delete (repeatable)
    #[arg(long = "pattern", value_name = "REGEX")]
    patterns: Vec<String>,

    /// Exact file name to delete (repeatable)
    #[arg(long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// TOML file with rules and defaults
    #[arg(long, env = "FILE_CLEANER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_env("FILE_CLEANER_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Command line categories win over the config file, which wins over defaults.
fn build_config(args: &Args) -> Result<CleanerConfig> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let rules = RuleConfig::new(args.names.clone(), args.exts.clone(), args.patterns.clone())
        .or(file.rules);

    Ok(CleanerConfig::new(&args.path)
        .with_rules(rules)
        .with_max_depth(args.max_depth.or(file.max_depth))
        .with_mode(RunMode::from_flags(args.yes, args.no_prompt))
        .with_prune_empty_dirs(args.remove_empty_dirs || file.remove_empty_dirs))
}

fn ask(prompt: &str) -> bool {
    match dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
    {
        Ok(answer) => answer,
        Err(err) => {
            warn!("cannot ask for confirmation ({err}); treating as no");
            false
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let cleaner = Cleaner::new(config);
    cleaner.run(&mut ConsoleReporter::stdout(), &mut ask)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("file-cleaner: error: {err}");
            let status = err
                .downcast_ref::<CoreError>()
                .map(CoreError::exit_status)
                .unwrap_or(ExitStatusLike::Error);
            ExitCode::from(status.as_code())
        }
    }
}
