//! Validate configuration and designs

use anyhow::{Context, Result};
use pagesmith_codegen::{EmitOptions, emit};
use pagesmith_core::{Config, build};

/// Run the validate command
///
/// Every page of every design is built into a tree and emitted; all
/// failures are reported before the command fails.
pub fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating configuration: {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;

    tracing::info!("✓ Project: {}", config.project.name);
    tracing::info!("✓ Version: {}", config.project.version);
    tracing::info!("✓ Dialect: {:?}", config.project.emit.dialect);

    let designs = config.load_designs().context("Failed to load designs")?;
    let options = EmitOptions::from(&config.project.emit);

    let mut failures = 0usize;
    let mut pages = 0usize;
    for (name, design) in &designs {
        for (index, page) in design.pages.iter().enumerate() {
            pages += 1;
            let result = build(&page.components)
                .map_err(anyhow::Error::from)
                .and_then(|tree| {
                    emit(&tree, &options)
                        .map(|_| tree.len())
                        .map_err(anyhow::Error::from)
                });
            match result {
                Ok(count) => {
                    tracing::debug!("✓ {} page {} ({} components)", name, index, count);
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!("✗ {} page {}: {}", name, index, e);
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} pages failed validation", failures, pages);
    }

    tracing::info!("✓ {} designs, {} pages are valid", designs.len(), pages);
    Ok(())
}
