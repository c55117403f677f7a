// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing, help, and the
//! `convert` command itself.
use crate::config::{Config, LogLevel};
use crate::context::AppContext;
use crate::convert::convert_ticktick_tasks;
use crate::reader::TickTickExport;
use crate::storage::ImportStorage;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub title: Option<String>,
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
}

impl ConvertArgs {
    /// Parses everything after the `convert` subcommand. `-h`/`--help` stops
    /// parsing and sets `help`; no input file is required then.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = ConvertArgs::default();
        let mut input = None;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-o" | "--out" => parsed.out = Some(PathBuf::from(Self::value(&mut iter, arg)?)),
                "-t" | "--title" => parsed.title = Some(Self::value(&mut iter, arg)?.to_string()),
                "-r" | "--root" => parsed.root = Some(PathBuf::from(Self::value(&mut iter, arg)?)),
                "-v" | "--verbose" => parsed.verbose = true,
                "-h" | "--help" => {
                    parsed.help = true;
                    return Ok(parsed);
                }
                flag if flag.starts_with('-') => anyhow::bail!("Unknown option: {}", flag),
                path => {
                    if input.is_some() {
                        anyhow::bail!("Unexpected argument: {}", path);
                    }
                    input = Some(PathBuf::from(path));
                }
            }
        }

        parsed.input = input.ok_or_else(|| anyhow::anyhow!("Missing export file to convert"))?;
        Ok(parsed)
    }

    fn value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str> {
        iter.next()
            .map(String::as_str)
            .ok_or_else(|| anyhow::anyhow!("{} requires a value", flag))
    }
}

/// Log level for a run. `--verbose` wins; before the config is read the
/// level is `Info`.
pub fn log_filter(verbose: bool, configured: Option<LogLevel>) -> log::LevelFilter {
    if verbose {
        return log::LevelFilter::Debug;
    }
    configured.map_or(log::LevelFilter::Info, LogLevel::to_filter)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub output: PathBuf,
    pub lists: usize,
    pub tasks: usize,
    pub dangling_parents: Vec<i64>,
}

/// Reads the export, converts it, and writes the namespace either to `--out`
/// or into the context's import directory.
pub fn run_convert(ctx: &dyn AppContext, config: &Config, args: &ConvertArgs) -> Result<ConvertOutcome> {
    let raw = TickTickExport::from_path(&args.input)?;
    let title = args.title.as_deref().unwrap_or(&config.namespace_title);
    let namespace = convert_ticktick_tasks(&raw, title);

    let dangling_parents = namespace.dangling_parent_ids();
    if !dangling_parents.is_empty() {
        log::warn!(
            "{} parent reference(s) point outside the export: {:?}",
            dangling_parents.len(),
            dangling_parents
        );
    }

    let output = match &args.out {
        Some(path) => {
            ImportStorage::save_to_path(path, &namespace, config.pretty_output)?;
            path.clone()
        }
        None => ImportStorage::save(ctx, &namespace, config.pretty_output)
            .context("Failed to store converted import")?,
    };

    log::info!(
        "Imported {} tasks into {} lists",
        namespace.task_count(),
        namespace.lists.len()
    );

    Ok(ConvertOutcome {
        output,
        lists: namespace.lists.len(),
        tasks: namespace.task_count(),
        dangling_parents,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Tickport v{} - Convert TickTick exports into namespace / list / task trees",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} convert <export.json> [OPTIONS]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -o, --out <file>      Write the converted namespace to <file>.");
    println!("    -t, --title <name>    Namespace title (default from config).");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log debug output to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} convert ticktick.json", binary_name);
    println!("    {} convert ticktick.json --out import.json", binary_name);
    println!(
        "    {} convert ticktick.json --title \"Old TickTick\" --root /tmp/tp",
        binary_name
    );
}
