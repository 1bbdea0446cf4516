//! Design and page snapshots
//!
//! A snapshot is an immutable copy of what the editor's state store holds for
//! a design: its pages, each with a flat list of components. Snapshots are
//! read from `.json` or `.yaml` files exported by the editor.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::component::{Component, PageId};
use crate::error::{Error, Result};

/// One page: a flat list of components forming a single canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Page identifier
    #[serde(alias = "_id")]
    pub id: PageId,

    /// Optional page label; the root component's name is used otherwise
    #[serde(default)]
    pub name: Option<String>,

    /// Components in any order
    #[serde(default)]
    pub components: Vec<Component>,
}

impl PageSnapshot {
    /// Create an empty page
    pub fn new(id: impl Into<PageId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            components: Vec::new(),
        }
    }

    /// Fill in `page_id` on components that omit it
    pub fn normalize(&mut self) {
        for component in &mut self.components {
            component.page_id.get_or_insert(self.id);
        }
    }
}

/// A design: an ordered collection of pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    /// Design identifier
    #[serde(alias = "_id")]
    pub id: u64,

    /// Design title
    #[serde(default = "default_title")]
    pub title: String,

    /// Pages in display order
    #[serde(default)]
    pub pages: Vec<PageSnapshot>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

impl DesignSnapshot {
    /// Load a snapshot from a `.json`, `.yaml` or `.yml` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let mut design: DesignSnapshot = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&contents)?,
            _ => {
                return Err(Error::SnapshotFormat {
                    path: path.display().to_string(),
                });
            }
        };
        design.normalize();

        tracing::debug!(
            "Loaded design '{}' with {} pages from {}",
            design.title,
            design.pages.len(),
            path.display()
        );
        Ok(design)
    }

    /// Fill in `page_id` on every page's components
    pub fn normalize(&mut self) {
        for page in &mut self.pages {
            page.normalize();
        }
    }

    /// Page at `index`
    pub fn page(&self, index: usize) -> Option<&PageSnapshot> {
        self.pages.get(index)
    }
}

/// Whether `path` has an extension [`DesignSnapshot::from_path`] understands
pub fn is_snapshot_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "json" || ext == "yaml" || ext == "yml")
}

/// A snapshot file found under a designs directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignFile {
    /// Path relative to the designs directory without extension, joined
    /// with `/` (`marketing/home` for `marketing/home.yaml`)
    pub name: String,

    /// Location on disk
    pub path: PathBuf,
}

/// Find every snapshot under `designs_dir`, subdirectories included
///
/// Results are sorted by name. Two files resolving to the same name (for
/// example `home.json` next to `home.yaml`) are an error rather than one
/// silently shadowing the other.
pub fn discover_designs(designs_dir: &Path) -> Result<Vec<DesignFile>> {
    if !designs_dir.exists() {
        return Ok(vec![]);
    }

    let mut found: Vec<DesignFile> = Vec::new();
    for entry in WalkDir::new(designs_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !is_snapshot_file(entry.path()) {
            continue;
        }
        let name = design_name(designs_dir, entry.path());
        if let Some(existing) = found.iter().find(|d| d.name == name) {
            return Err(Error::DuplicateDesign {
                name,
                first: existing.path.display().to_string(),
                second: entry.path().display().to_string(),
            });
        }
        found.push(DesignFile {
            name,
            path: entry.into_path(),
        });
    }

    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
}

fn design_name(designs_dir: &Path, path: &Path) -> String {
    path.strip_prefix(designs_dir)
        .unwrap_or(path)
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
