use super::session::open_page;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Page slug
    pub slug: String,

    /// Print the blocks as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn show(args: ShowArgs, config: &Config, cwd: &str) -> Result<()> {
    let session = open_page(config, cwd, &args.slug).await?;
    let document = session
        .document()
        .ok_or_else(|| anyhow!("No document loaded for {}", args.slug))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(document.to_ordered_list())?);
        return Ok(());
    }

    if let Some(page) = session.current_page() {
        println!("{} ({})", page.title.bright_blue().bold(), page.status);
    }

    for block in document.to_ordered_list() {
        println!(
            "  {} {}",
            block.id().bright_white(),
            format!("[{}]", block.block_type()).dimmed()
        );
        if !block.content().is_empty() {
            println!("      {}", block.content());
        }

        let settings = block.settings();
        let pairs: Vec<String> = settings
            .keys()
            .iter()
            .filter_map(|key| settings.get(key).map(|value| format!("{}={}", key, value)))
            .collect();
        if !pairs.is_empty() {
            println!("      {}", pairs.join(" ").dimmed());
        }
    }

    Ok(())
}
