use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use blockpress_store::PageStore;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Blockpress site...".bright_blue().bold());

    let config = Config::default();
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let store = config.open_store(cwd).await?;
    store.ensure_default_pages().await?;
    for page in store.list_pages().await? {
        println!("  {} Page {} ({})", "✓".green(), page.slug, page.status);
    }

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: blockpress catalog");
    println!("  2. Run: blockpress add {} heading --content \"Hello\"", config.initial_page);
    println!("  3. Run: blockpress show {}", config.initial_page);

    Ok(())
}
