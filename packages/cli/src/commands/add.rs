use super::session::{apply_edits, open_page, save_and_report, EditArgs};
use crate::config::Config;
use anyhow::{bail, Result};
use blockpress_editor::DropOutcome;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Page slug
    pub slug: String,

    /// Palette id of the block to append (see `blockpress catalog`)
    pub block_type: String,

    #[command(flatten)]
    pub edits: EditArgs,
}

pub async fn add(args: AddArgs, config: &Config, cwd: &str) -> Result<()> {
    let mut session = open_page(config, cwd, &args.slug).await?;

    let block_id = match session.click_palette(&args.block_type) {
        DropOutcome::Inserted { block_id, message, .. } => {
            println!("  {} {} ({})", "✓".green(), message, block_id.bright_white());
            block_id
        }
        DropOutcome::NoPageSelected { message } => bail!("{}", message),
        DropOutcome::Ignored { reason } => bail!("{}", reason),
    };
    session.take_notices();

    if !args.edits.is_empty() {
        apply_edits(&mut session, &block_id, &args.edits)?;
    }

    save_and_report(&mut session).await
}
