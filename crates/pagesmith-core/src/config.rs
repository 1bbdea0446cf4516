//! Configuration parsing and validation
//!
//! This module handles loading and validating Pagesmith project files.
//!
//! # Configuration Files
//!
//! - `pagesmith.yaml` - Project root configuration
//! - `designs/*.{json,yaml}` - Design snapshots exported by the editor

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::snapshot::{DesignFile, DesignSnapshot, discover_designs};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "pagesmith.yaml";

/// Largest accepted indentation width
pub const MAX_INDENT: usize = 8;

/// Root project configuration from `pagesmith.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Directory holding design snapshots, relative to the project root
    #[serde(default = "default_designs_dir")]
    pub designs_dir: String,

    /// Directory receiving generated code, relative to the project root
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Code generation settings
    #[serde(default)]
    pub emit: EmitConfig,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_designs_dir() -> String {
    "designs".to_string()
}

fn default_output_dir() -> String {
    ".pagesmith/out".to_string()
}

/// Markup flavour produced by the emitter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Plain HTML (`class="..."`)
    #[default]
    Html,
    /// React JSX (`className="..."`)
    Jsx,
}

impl Dialect {
    /// File extension for markup in this dialect
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Html => "html",
            Dialect::Jsx => "jsx",
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Dialect::Html),
            "jsx" => Ok(Dialect::Jsx),
            other => Err(Error::ConfigInvalid {
                message: format!("unknown dialect '{}', expected 'html' or 'jsx'", other),
            }),
        }
    }
}

/// Code generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmitConfig {
    /// Markup dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Spaces per nesting level in markup and stylesheet
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Prefix prepended to every generated class name
    #[serde(default)]
    pub class_prefix: Option<String>,

    /// Wrap markup in a complete document or module
    #[serde(default)]
    pub wrap_document: bool,
}

fn default_indent() -> usize {
    2
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            indent: default_indent(),
            class_prefix: None,
            wrap_document: false,
        }
    }
}

impl EmitConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(Error::ConfigInvalid {
                message: format!("emit.indent must be at most {}, got {}", MAX_INDENT, self.indent),
            });
        }
        if let Some(prefix) = &self.class_prefix {
            let mut chars = prefix.chars();
            let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
            let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !starts_ok || !rest_ok {
                return Err(Error::ConfigInvalid {
                    message: format!(
                        "emit.class_prefix '{}' must start with a letter and contain only letters, digits, '-' or '_'",
                        prefix
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the project directory or pagesmith.yaml file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./my-designs")?;
    /// println!("Project: {}", config.project.name);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join(CONFIG_FILE), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents)?;
        project.emit.validate()?;

        tracing::debug!("Loaded project '{}' from {}", project.name, config_path.display());

        Ok(Self { project, base_path })
    }

    /// Absolute designs directory
    pub fn designs_dir(&self) -> PathBuf {
        self.base_path.join(&self.project.designs_dir)
    }

    /// Absolute output directory
    pub fn output_dir(&self) -> PathBuf {
        self.base_path.join(&self.project.output_dir)
    }

    /// All design snapshots under the designs directory, sorted by name
    pub fn design_files(&self) -> Result<Vec<DesignFile>> {
        discover_designs(&self.designs_dir())
    }

    /// Load all design snapshots from the designs directory
    pub fn load_designs(&self) -> Result<Vec<(String, DesignSnapshot)>> {
        self.design_files()?
            .into_iter()
            .map(|file| DesignSnapshot::from_path(&file.path).map(|design| (file.name, design)))
            .collect()
    }

    /// Load one design by name (`landing` for `designs/landing.yaml`,
    /// `site/landing` for `designs/site/landing.yaml`)
    pub fn load_design(&self, name: &str) -> Result<DesignSnapshot> {
        let file = self
            .design_files()?
            .into_iter()
            .find(|file| file.name == name)
            .ok_or_else(|| Error::ConfigNotFound {
                path: self.designs_dir().join(name).display().to_string(),
            })?;
        DesignSnapshot::from_path(file.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        assert_eq!(Dialect::default(), Dialect::Html);
        assert_eq!(Dialect::Jsx.extension(), "jsx");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("JSX".parse::<Dialect>().unwrap(), Dialect::Jsx);
        assert!("svg".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
name: test-project
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "test-project");
        assert_eq!(config.version, "0.1.0");
        assert_eq!(config.designs_dir, "designs");
        assert_eq!(config.emit, EmitConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: test-project
version: "1.0.0"
designs_dir: snapshots
output_dir: build
emit:
  dialect: jsx
  indent: 4
  class_prefix: ps
  wrap_document: true
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.output_dir, "build");
        assert_eq!(config.emit.dialect, Dialect::Jsx);
        assert_eq!(config.emit.indent, 4);
        assert_eq!(config.emit.class_prefix.as_deref(), Some("ps"));
        assert!(config.emit.wrap_document);
    }

    #[test]
    fn test_validate_emit_config() {
        let mut emit = EmitConfig {
            indent: 9,
            ..Default::default()
        };
        assert!(emit.validate().is_err());

        emit.indent = 2;
        emit.class_prefix = Some("9lives".to_string());
        assert!(emit.validate().is_err());

        emit.class_prefix = Some("ps_".to_string());
        assert!(emit.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(Error::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_load_designs_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("designs")).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "name: test\n").unwrap();
        std::fs::write(
            dir.path().join("designs/b.json"),
            r#"{"id": 2, "pages": []}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("designs/a.yaml"), "id: 1\ntitle: First\n").unwrap();
        std::fs::write(dir.path().join("designs/notes.txt"), "ignored").unwrap();

        let config = Config::load(dir.path()).unwrap();
        let designs = config.load_designs().unwrap();
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].0, "a");
        assert_eq!(designs[0].1.title, "First");
        assert_eq!(designs[1].1.id, 2);

        assert_eq!(config.load_design("b").unwrap().id, 2);

        std::fs::create_dir_all(dir.path().join("designs/site")).unwrap();
        std::fs::write(dir.path().join("designs/site/a.yaml"), "id: 3\n").unwrap();
        let names: Vec<String> = config.load_designs().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b", "site/a"]);
        assert_eq!(config.load_design("site/a").unwrap().id, 3);
        assert!(config.load_design("missing").is_err());
    }
}
