//! Initialize a new Pagesmith project

use anyhow::Result;
use pagesmith_core::config::CONFIG_FILE;
use std::fs;
use std::path::Path;

const EXAMPLE_DESIGN: &str = r##"# Example design
# Each page is a flat list of components linked by parent_id.
id: 1
title: Example
pages:
  - id: 1
    name: Home
    components:
      - id: 1
        kind: container
        name: Page
        geometry: { x: 0, y: 0, width: 800, height: 600 }
        appearance:
          fill: "#ffffff"

      - id: 2
        parent_id: 1
        kind: text
        name: Title
        order: 0
        geometry: { x: 40, y: 40, width: 720, height: 48 }
        appearance:
          text: Hello, Pagesmith!
          font_size: 32
          font_weight: bold

      - id: 3
        parent_id: 1
        kind: button
        name: Get Started
        order: 1
        geometry: { x: 40, y: 120, width: 160, height: 44 }
        appearance:
          label: Get started
          fill: "#1f6feb"
          color: "#ffffff"
          radius: 6
"##;

/// Run the init command
pub fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    // Create directory if it doesn't exist
    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    // Get absolute path for deriving name
    let abs_path = project_dir.canonicalize()?;

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    // Check if already initialized
    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE
        );
    }

    tracing::info!("Creating new Pagesmith project: {}", project_name);

    fs::create_dir_all(project_dir.join("designs"))?;

    let config = format!(
        r#"# Pagesmith Project Configuration
name: {project_name}
version: "0.1.0"

designs_dir: designs
output_dir: .pagesmith/out

emit:
  dialect: html
  indent: 2
  wrap_document: false
"#
    );
    fs::write(project_dir.join(CONFIG_FILE), config)?;
    fs::write(project_dir.join("designs/example.yaml"), EXAMPLE_DESIGN)?;

    let gitignore = r#"# Pagesmith output
.pagesmith/

# IDE
.idea/
.vscode/
*.swp
"#;
    fs::write(project_dir.join(".gitignore"), gitignore)?;

    tracing::info!(
        "✓ Created project '{}' at {}",
        project_name,
        abs_path.display()
    );
    tracing::info!("");
    tracing::info!("Next steps:");
    if path != "." {
        tracing::info!("  cd {}", project_dir.display());
    }
    tracing::info!("  pagesmith validate    # Check designs");
    tracing::info!("  pagesmith compile     # Export page code");

    Ok(())
}
