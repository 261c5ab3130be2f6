mod error;
mod model;
mod plugin;
mod renamer;
mod scanner;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use error::EngineError;
use model::config::AppConfig;
use model::item::Item;
use plugin::PluginRegistry;
use plugin::descriptor::OptionValue;
use plugin::runner;

#[derive(Parser)]
#[command(name = "rebatch")]
#[command(version)]
#[command(about = "Batch file renamer with a pluggable transformation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan paths into a batch and print it
    Scan(ScanArgs),
    /// List registered plugins and their options
    Plugins,
    /// Scan, run a plugin, and show source -> target without touching disk
    Preview(ApplyArgs),
    /// Scan, run a plugin, and perform the renames
    Rename(ApplyArgs),
    /// Show the effective configuration, or write it to the user config file
    Config(ConfigArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Levels to descend below a directory (negative = unlimited)
    #[arg(long)]
    depth: Option<i32>,
    /// Include directories themselves as rename candidates
    #[arg(long)]
    include_directories: bool,
    /// Only keep files with these extensions (comma-separated)
    #[arg(long, value_delimiter = ',')]
    extensions: Option<Vec<String>>,
}

#[derive(Args)]
struct ApplyArgs {
    #[command(flatten)]
    scan: ScanArgs,
    /// Plugin id or name
    #[arg(short, long)]
    plugin: String,
    /// Plugin option override, e.g. -o startAt=10 (repeatable)
    #[arg(
        short = 'o',
        long = "option",
        value_name = "NAME=VALUE",
        value_parser = parse_option
    )]
    options: Vec<(String, String)>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Write the effective configuration to the user config file
    #[arg(long)]
    init: bool,
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rebatch=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = PluginRegistry::built_in();
    let mut config = AppConfig::load()?;
    config.ensure_built_in_plugins(registry.descriptors());

    match cli.command {
        Commands::Scan(args) => cmd_scan(&config, &args),
        Commands::Plugins => cmd_plugins(&config),
        Commands::Preview(args) => cmd_preview(&config, &registry, &args),
        Commands::Rename(args) => cmd_rename(&config, &registry, &args),
        Commands::Config(args) => cmd_config(&config, &args),
    }
}

/// Scan with CLI arguments layered over the configured defaults.
fn scan_batch(config: &AppConfig, args: &ScanArgs) -> Result<Vec<Item>> {
    let depth = args.depth.unwrap_or(config.scan.depth);
    let include_directories = args.include_directories || config.scan.include_directories;
    let extensions: Vec<String> = match &args.extensions {
        Some(list) => list.clone(),
        None => config.effective_extensions().to_vec(),
    };
    scanner::scan_items(&args.paths, depth, include_directories, &extensions)
}

/// Scan, resolve the plugin, and run it over the batch through the Runner's
/// text interface; returns the batch with rewritten target paths.
fn transform_batch(
    config: &AppConfig,
    registry: &PluginRegistry,
    args: &ApplyArgs,
) -> Result<Vec<Item>> {
    let descriptor = config
        .find_plugin(&args.plugin)
        .ok_or_else(|| EngineError::UnknownPlugin(args.plugin.clone()))?;
    let routine = registry.routine_for(descriptor)?;

    let mut items = scan_batch(config, &args.scan)?;
    if items.is_empty() {
        bail!("no items matched the given paths");
    }

    let overrides: BTreeMap<String, OptionValue> = args
        .options
        .iter()
        .cloned()
        .map(|(name, value)| (name, OptionValue::String(value)))
        .collect();
    let target_paths_text = items
        .iter()
        .map(|item| item.target_path.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let rewritten = runner::run_plugin(routine, descriptor, &overrides, &items, &target_paths_text)?;
    for (item, line) in items.iter_mut().zip(runner::parse_target_paths(&rewritten)) {
        item.target_path = line.to_string();
    }
    Ok(items)
}

fn cmd_scan(config: &AppConfig, args: &ScanArgs) -> Result<()> {
    let items = scan_batch(config, args)?;
    for item in &items {
        println!("{:4} {}", item.item_type.label(), item.source_path);
    }
    tracing::info!(items = items.len(), "scan finished");
    Ok(())
}

fn cmd_plugins(config: &AppConfig) -> Result<()> {
    for descriptor in &config.plugins {
        println!("{} ({})", descriptor.name, descriptor.id);
        if !descriptor.description.is_empty() {
            println!("    {}", descriptor.description);
        }
        for option in &descriptor.options {
            println!(
                "    --option {}=<{}>  (default {})",
                option.name,
                option.option_type,
                option.default_value.describe()
            );
        }
    }
    Ok(())
}

fn cmd_preview(config: &AppConfig, registry: &PluginRegistry, args: &ApplyArgs) -> Result<()> {
    let items = transform_batch(config, registry, args)?;
    for item in &items {
        if item.source_path == item.target_path {
            println!("  {}", item.source_path);
        } else {
            println!("  {} -> {}", item.source_path, item.target_path);
        }
    }
    Ok(())
}

fn cmd_rename(config: &AppConfig, registry: &PluginRegistry, args: &ApplyArgs) -> Result<()> {
    let items = transform_batch(config, registry, args)?;
    let count = renamer::rename_items(&items)?;
    println!("performed {count} rename(s)");
    Ok(())
}

fn cmd_config(config: &AppConfig, args: &ConfigArgs) -> Result<()> {
    if args.init {
        let config_path = config.save()?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    if let Some(config_path) = AppConfig::user_config_path() {
        println!("# user config: {}", config_path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
