//! Compile designs to markup and stylesheets

use anyhow::{Context, Result};
use pagesmith_codegen::{CompileOptions, CompiledDesign, Compiler};
use pagesmith_core::{Config, Dialect};

/// Run the compile command
pub fn run(
    config_path: &str,
    design: Option<&str>,
    dialect: Option<Dialect>,
    stdout: bool,
) -> Result<()> {
    tracing::info!("Loading configuration from {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;

    let mut options = CompileOptions::from_config(&config);
    if let Some(dialect) = dialect {
        options.emit.dialect = dialect;
    }
    let output_dir = options.output_dir.clone();
    let compiler = Compiler::new(options);

    let results = match design {
        Some(name) => {
            let file = config
                .design_files()?
                .into_iter()
                .find(|file| file.name == name)
                .ok_or_else(|| anyhow::anyhow!("Design not found: {}", name))?;
            vec![
                compiler
                    .compile_file_as(&file.path, file.name)
                    .with_context(|| format!("Failed to compile design '{}'", name))?,
            ]
        }
        None => {
            let designs_dir = config.designs_dir();
            tracing::info!("Compiling all designs in {}", designs_dir.display());
            compiler
                .compile_all(&designs_dir)
                .context("Failed to compile designs")?
        }
    };

    for compiled in &results {
        if stdout {
            print_design(compiled);
        } else {
            let written = compiled
                .save(&output_dir)
                .with_context(|| format!("Failed to write output for '{}'", compiled.name))?;
            tracing::info!("  ✓ {} ({} files)", compiled.name, written.len());
        }
    }

    tracing::info!("Compiled {} designs", results.len());
    Ok(())
}

fn print_design(compiled: &CompiledDesign) {
    for page in &compiled.pages {
        println!("/* {}/{} */", compiled.name, page.markup_file());
        print!("{}", page.markup);
        println!();
        println!("/* {}/{} */", compiled.name, page.stylesheet_file());
        print!("{}", page.stylesheet);
        println!();
    }
}
