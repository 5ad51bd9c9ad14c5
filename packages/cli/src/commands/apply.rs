use super::session::{open_page, print_notices, save_and_report};
use crate::config::Config;
use anyhow::{bail, Context, Result};
use blockpress_editor::Mutation;
use clap::Args;
use colored::Colorize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Placeholder block id for the block inserted most recently in a script
pub const LAST_INSERTED: &str = "@last";

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page slug
    pub slug: String,

    /// JSON file holding an array of mutations
    pub script: PathBuf,
}

pub async fn apply(args: ApplyArgs, config: &Config, cwd: &str) -> Result<()> {
    let script_path = PathBuf::from(cwd).join(&args.script);
    let content = std::fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let script: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutation script {}", script_path.display()))?;

    let mut session = open_page(config, cwd, &args.slug).await?;
    let mut last_inserted: Option<String> = None;
    let mut inserted = HashSet::new();

    for (index, mutation) in script.into_iter().enumerate() {
        let mutation = resolve_last(mutation, last_inserted.as_deref())
            .and_then(|mutation| check_removal(mutation, &inserted))
            .with_context(|| format!("Mutation {}", index + 1))?;
        let name = mutation.name();
        let is_insert = matches!(mutation, Mutation::InsertBlock { .. });

        let result = session
            .apply_mutation(mutation)
            .with_context(|| format!("Mutation {} ({})", index + 1, name))?;

        println!("  {} {} {}", "✓".green(), name, result.block_id.bright_white());
        if is_insert {
            inserted.insert(result.block_id.clone());
            last_inserted = Some(result.block_id);
        }
    }
    print_notices(&mut session);

    save_and_report(&mut session).await
}

/// Only blocks inserted by the same script can be removed.
///
/// A stored block would come back on the next load, since the store keeps
/// every record it was given.
fn check_removal(mutation: Mutation, inserted: &HashSet<String>) -> Result<Mutation> {
    if let Mutation::RemoveBlock { block_id } = &mutation {
        if !inserted.contains(block_id) {
            bail!(
                "Cannot remove stored block {}: the store does not delete records",
                block_id
            );
        }
    }
    Ok(mutation)
}

fn resolve_last(mutation: Mutation, last_inserted: Option<&str>) -> Result<Mutation> {
    let resolve = |block_id: String| -> Result<String> {
        if block_id != LAST_INSERTED {
            return Ok(block_id);
        }
        match last_inserted {
            Some(id) => Ok(id.to_string()),
            None => bail!("{} used before any insertBlock", LAST_INSERTED),
        }
    };

    Ok(match mutation {
        Mutation::InsertBlock { block_type } => Mutation::InsertBlock { block_type },
        Mutation::UpdateContent { block_id, content } => Mutation::UpdateContent {
            block_id: resolve(block_id)?,
            content,
        },
        Mutation::UpdateSetting { block_id, key, value } => Mutation::UpdateSetting {
            block_id: resolve(block_id)?,
            key,
            value,
        },
        Mutation::RemoveBlock { block_id } => Mutation::RemoveBlock {
            block_id: resolve(block_id)?,
        },
    })
}
