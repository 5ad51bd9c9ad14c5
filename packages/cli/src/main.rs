mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, apply, catalog, init, pages, set, show, AddArgs, ApplyArgs, CatalogArgs, InitArgs, SetArgs,
    ShowArgs,
};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Blockpress CLI - Block-based page editor
#[derive(Parser, Debug)]
#[command(name = "blockpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and create the default pages
    Init(InitArgs),

    /// List pages
    Pages,

    /// List palette entries
    Catalog(CatalogArgs),

    /// Print a page's blocks
    Show(ShowArgs),

    /// Append a block to a page
    Add(AddArgs),

    /// Edit a block's content or settings
    Set(SetArgs),

    /// Apply a JSON mutation script to a page
    Apply(ApplyArgs),
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    // init must work even when the existing config is broken
    let config = match cli.command {
        Command::Init(_) => Config::load(cwd).unwrap_or_default(),
        _ => Config::load(cwd)?,
    };
    init_logging(&config.log_level);

    match cli.command {
        Command::Init(args) => init(args, cwd).await,
        Command::Pages => pages(&config, cwd).await,
        Command::Catalog(args) => catalog(args),
        Command::Show(args) => show(args, &config, cwd).await,
        Command::Add(args) => add(args, &config, cwd).await,
        Command::Set(args) => set(args, &config, cwd).await,
        Command::Apply(args) => apply(args, &config, cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => run(cli, &cwd.display().to_string()).await,
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
