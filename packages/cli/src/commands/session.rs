//! Helpers shared by the page-editing commands

use crate::config::Config;
use anyhow::{anyhow, bail, Result};
use blockpress_editor::{EditorSession, NoticeLevel, SaveReport, SessionOptions, SettingChange};
use clap::Args;
use colored::Colorize;

/// Content and setting edits applied to one block
#[derive(Debug, Args)]
pub struct EditArgs {
    /// New block content
    #[arg(short, long)]
    pub content: Option<String>,

    /// Setting to change, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,
}

impl EditArgs {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.settings.is_empty()
    }
}

/// Mount a session on the configured store with `slug` open
pub async fn open_page(config: &Config, cwd: &str, slug: &str) -> Result<EditorSession> {
    let store = config.open_store(cwd).await?;
    let mut session = EditorSession::new(
        store,
        SessionOptions {
            initial_page: Some(slug.to_string()),
        },
    );
    session.mount().await?;

    if session.current_page().map(|p| p.slug.as_str()) != Some(slug) {
        bail!("Unknown page: {}", slug);
    }
    if let Some(banner) = session.load_error() {
        bail!("{}", banner);
    }

    session.take_notices();
    Ok(session)
}

/// Apply content and setting edits to the block currently open
pub fn apply_edits(session: &mut EditorSession, block_id: &str, edits: &EditArgs) -> Result<()> {
    if !session.open_block(block_id) {
        bail!("Block not found: {}", block_id);
    }

    if let Some(content) = &edits.content {
        session.edit_content(content.clone());
    }

    for assignment in &edits.settings {
        let (key, value) = parse_assignment(assignment)?;
        let change = SettingChange::parse(key, value)?;
        if !session.change_setting(&change) {
            bail!("{} does not apply to block {}", key, block_id);
        }
    }

    session.close_properties();
    Ok(())
}

pub fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{}'", assignment))
}

/// Save and print the outcome; a partial failure is an error
pub async fn save_and_report(session: &mut EditorSession) -> Result<()> {
    let report = session.save().await?;
    print_notices(session);
    report_save(&report)
}

pub fn print_notices(session: &mut EditorSession) {
    for notice in session.take_notices() {
        match notice.level {
            NoticeLevel::Info => {}
            NoticeLevel::Warning => {
                eprintln!("  {} {}", "⚠️".yellow(), notice.message.yellow())
            }
            NoticeLevel::Error => eprintln!("  {} {}", "✗".red(), notice.message.red()),
        }
    }
}

fn report_save(report: &SaveReport) -> Result<()> {
    if report.is_success() {
        println!(
            "  {} Saved {} blocks to {}",
            "✓".green(),
            report.written.len(),
            report.page_id
        );
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "⚠️  Saved {} of {} blocks",
            report.written.len(),
            report.written.len() + report.failed.len()
        )
        .yellow()
    );
    for failed in &report.failed {
        println!("  {} {} - {}", "✗".red(), failed.section_id, failed.error);
    }

    Err(anyhow!("{} sections failed to save", report.failed.len()))
}
