use crate::config::Config;
use anyhow::Result;
use blockpress_store::{PageStatus, PageStore};
use colored::Colorize;

pub async fn pages(config: &Config, cwd: &str) -> Result<()> {
    let store = config.open_store(cwd).await?;
    store.ensure_default_pages().await?;

    let pages = store.list_pages().await?;
    if pages.is_empty() {
        println!("{}", "⚠️  No pages found".yellow());
        return Ok(());
    }

    for page in pages {
        let status = match page.status {
            PageStatus::Published => page.status.to_string().green(),
            PageStatus::Draft => page.status.to_string().dimmed(),
        };
        println!(
            "  {:<16} {:<24} {:<10} {}",
            page.slug.bright_white(),
            page.title,
            status,
            page.id.dimmed()
        );
    }

    Ok(())
}
