//! Documentation configuration CLI for the SCOS2K plugin manual.
//!
//! Entry point and error handling boundary. Resolves the manual's build
//! configuration from the Maven project descriptor and either prints it
//! or just reports whether it resolves.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use scos2k_docs::{ConfigLoader, DocsConfig, DEFAULT_DESCRIPTOR_PATH};

/// Documentation configuration for the SCOS2K plugin manual.
#[derive(Parser, Debug)]
#[command(name = "scos2k-docs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the resolved documentation configuration.
    Show(ShowArgs),

    /// Resolve the configuration and report success without printing it.
    Check(CheckArgs),
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
struct ShowArgs {
    /// Path to the Maven project descriptor.
    #[arg(long, default_value = DEFAULT_DESCRIPTOR_PATH)]
    descriptor: PathBuf,

    /// Emit the configuration as JSON instead of a summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
struct CheckArgs {
    /// Path to the Maven project descriptor.
    #[arg(long, default_value = DEFAULT_DESCRIPTOR_PATH)]
    descriptor: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Show(args) => run_show(args),
        Command::Check(args) => run_check(args),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = ConfigLoader::new(&args.descriptor)
        .load()
        .context("failed to resolve documentation configuration")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_summary(&config);
    }

    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let config = ConfigLoader::new(&args.descriptor)
        .load()
        .context("failed to resolve documentation configuration")?;

    println!(
        "ok: {} {} ({})",
        config.project,
        config.version,
        args.descriptor.display()
    );
    Ok(())
}

fn print_summary(config: &DocsConfig) {
    println!("project:    {}", config.project);
    println!("version:    {}", config.version);
    println!("release:    {}", config.release);
    println!("author:     {}", config.author);
    println!("language:   {}", config.language);
    println!("extensions: {}", config.extensions.join(", "));

    println!("extlinks:");
    for (name, link) in &config.extlinks {
        println!("  {} -> {}", name, link.url);
    }

    println!("latex ({} urls):", config.latex_show_urls);
    for doc in &config.latex_documents {
        println!(
            "  {} -> {} [{}]",
            doc.start_doc, doc.target_name, doc.doc_class
        );
    }
}
