use super::session::{apply_edits, open_page, save_and_report, EditArgs};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Page slug
    pub slug: String,

    /// Block to edit
    pub block_id: String,

    #[command(flatten)]
    pub edits: EditArgs,
}

pub async fn set(args: SetArgs, config: &Config, cwd: &str) -> Result<()> {
    if args.edits.is_empty() {
        bail!("Nothing to change: pass --content and/or --set KEY=VALUE");
    }

    let mut session = open_page(config, cwd, &args.slug).await?;
    apply_edits(&mut session, &args.block_id, &args.edits)?;

    save_and_report(&mut session).await
}
