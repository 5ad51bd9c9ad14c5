use anyhow::Result;
use blockpress_editor::{Catalog, PaletteCategory};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Palette tab to list (elements, blocks, templates)
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn catalog(args: CatalogArgs) -> Result<()> {
    let categories = match args.category {
        Some(name) => vec![name.parse::<PaletteCategory>()?],
        None => PaletteCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", category.as_str().bright_blue().bold());
        for entry in Catalog::list_types(category) {
            if entry.is_insertable() {
                println!("  {:<16} {}", entry.id.bright_white(), entry.label);
            } else {
                println!(
                    "  {:<16} {} {}",
                    entry.id.bright_white(),
                    entry.label,
                    "(listing only)".dimmed()
                );
            }
        }
    }

    Ok(())
}
