//! Print page trees of a design

use anyhow::{Context, Result};
use pagesmith_core::{Config, build};

/// Run the tree command
pub fn run(config_path: &str, design_name: &str, page: Option<usize>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let design = config
        .load_design(design_name)
        .with_context(|| format!("Failed to load design '{}'", design_name))?;

    let pages: Vec<(usize, _)> = match page {
        Some(index) => {
            let p = design.page(index).ok_or_else(|| {
                anyhow::anyhow!(
                    "Design '{}' has no page {} ({} pages)",
                    design_name,
                    index,
                    design.pages.len()
                )
            })?;
            vec![(index, p)]
        }
        None => design.pages.iter().enumerate().collect(),
    };

    for (index, page) in pages {
        let tree = build(&page.components)
            .with_context(|| format!("Page {} of '{}' is malformed", index, design_name))?;
        let label = page.name.clone().unwrap_or_else(|| index.to_string());
        println!(
            "# page {} ({} components, depth {})",
            label,
            tree.len(),
            tree.depth()
        );
        print!("{}", tree.outline());
    }

    Ok(())
}
