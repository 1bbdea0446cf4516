//! Page compiler
//!
//! Ties the pipeline together: snapshot → page tree → emitted code →
//! optional document shell, plus file loading and saving around it.

use std::path::{Path, PathBuf};

use pagesmith_core::{
    Component, Config, DesignSnapshot, Dialect, PageId, PageSnapshot, build, discover_designs,
};
use sha2::{Digest, Sha256};

use crate::document::DocumentRenderer;
use crate::emit::{EmitOptions, emit};
use crate::error::Result;
use crate::ident::IdentAllocator;

/// Options for the compiler
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Output directory for generated files
    pub output_dir: PathBuf,

    /// Emitter settings
    pub emit: EmitOptions,

    /// Wrap markup in a complete document or module
    pub wrap_document: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(".pagesmith/out"),
            emit: EmitOptions::default(),
            wrap_document: false,
        }
    }
}

impl CompileOptions {
    /// Options taken from a loaded project
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir(),
            emit: EmitOptions::from(&config.project.emit),
            wrap_document: config.project.emit.wrap_document,
        }
    }
}

/// Page compiler
pub struct Compiler {
    options: CompileOptions,
    documents: DocumentRenderer,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            documents: DocumentRenderer::new(),
        }
    }

    /// Active options
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one page's components
    pub fn compile_components(&self, components: &[Component]) -> Result<CompiledPage> {
        self.compile_named(components, None, &mut IdentAllocator::new(None))
    }

    /// Compile one page snapshot
    pub fn compile_page(&self, page: &PageSnapshot) -> Result<CompiledPage> {
        self.compile_named(
            &page.components,
            page.name.as_deref(),
            &mut IdentAllocator::new(None),
        )
    }

    /// Page name: the explicit one, else the root's name, else `page <id>`.
    /// The slug is allocated from it through `slugs`.
    fn compile_named(
        &self,
        components: &[Component],
        name: Option<&str>,
        slugs: &mut IdentAllocator,
    ) -> Result<CompiledPage> {
        let tree = build(components)?;
        let code = emit(&tree, &self.options.emit)?;

        let root = tree.component(tree.root());
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ if !root.name.trim().is_empty() => root.name.clone(),
            _ => match tree.page_id() {
                Some(page) => format!("page {}", page),
                None => "page".to_string(),
            },
        };
        let slug = slugs.allocate(&name, "page");
        let dialect = self.options.emit.dialect;

        let markup = if self.options.wrap_document {
            self.documents
                .render(dialect, &name, &stylesheet_file(&slug), &code.markup)?
        } else {
            code.markup
        };

        let page = CompiledPage {
            page_id: tree.page_id(),
            hash: content_hash(&markup, &code.stylesheet),
            name,
            slug,
            dialect,
            markup,
            stylesheet: code.stylesheet,
        };

        tracing::info!(
            "Compiled page '{}' ({} components, hash: {}...)",
            page.name,
            tree.len(),
            &page.hash[..8]
        );
        Ok(page)
    }

    /// Compile every page of a design, in page order
    ///
    /// Page slugs are made unique within the design.
    pub fn compile_design(&self, design: &DesignSnapshot) -> Result<Vec<CompiledPage>> {
        tracing::debug!("Compiling design '{}' ({} pages)", design.title, design.pages.len());

        let mut slugs = IdentAllocator::new(None);
        design
            .pages
            .iter()
            .map(|page| self.compile_named(&page.components, page.name.as_deref(), &mut slugs))
            .collect()
    }

    /// Compile a design snapshot file, named after its file stem
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<CompiledDesign> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "design".to_string());
        self.compile_file_as(path, name)
    }

    /// Compile a design snapshot file under an explicit design name
    ///
    /// The name may contain `/` and becomes the output subdirectory.
    pub fn compile_file_as(
        &self,
        path: impl AsRef<Path>,
        name: impl Into<String>,
    ) -> Result<CompiledDesign> {
        let path = path.as_ref();
        tracing::info!("Compiling design: {}", path.display());

        let design = DesignSnapshot::from_path(path)?;
        Ok(CompiledDesign {
            name: name.into(),
            title: design.title.clone(),
            pages: self.compile_design(&design)?,
        })
    }

    /// Compile all design snapshots under a directory, subdirectories
    /// included, in name order
    ///
    /// Designs are named by their path relative to `designs_dir`, so
    /// `a/home.yaml` and `b/home.yaml` stay distinct.
    pub fn compile_all(&self, designs_dir: impl AsRef<Path>) -> Result<Vec<CompiledDesign>> {
        discover_designs(designs_dir.as_ref())?
            .into_iter()
            .map(|file| self.compile_file_as(&file.path, file.name))
            .collect()
    }
}

fn stylesheet_file(slug: &str) -> String {
    format!("{}.css", slug)
}

fn content_hash(markup: &str, stylesheet: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(markup.as_bytes());
    hasher.update([0u8]);
    hasher.update(stylesheet.as_bytes());
    hex::encode(hasher.finalize())
}

/// A compiled page ready for display or export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPage {
    /// Page the components belonged to
    pub page_id: Option<PageId>,

    /// Page name (explicit, or the root component's name)
    pub name: String,

    /// File-name-safe form of the name
    pub slug: String,

    /// Markup dialect
    pub dialect: Dialect,

    /// Markup (or full document when wrapping is enabled)
    pub markup: String,

    /// Stylesheet
    pub stylesheet: String,

    /// Content hash over markup and stylesheet
    pub hash: String,
}

impl CompiledPage {
    /// File name for the markup
    pub fn markup_file(&self) -> String {
        format!("{}.{}", self.slug, self.dialect.extension())
    }

    /// File name for the stylesheet
    pub fn stylesheet_file(&self) -> String {
        stylesheet_file(&self.slug)
    }

    /// Write markup and stylesheet into `dir`, returning both paths
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let markup_path = dir.join(self.markup_file());
        let stylesheet_path = dir.join(self.stylesheet_file());
        std::fs::write(&markup_path, &self.markup)?;
        std::fs::write(&stylesheet_path, &self.stylesheet)?;

        tracing::debug!("Saved {} and {}", markup_path.display(), stylesheet_path.display());
        Ok((markup_path, stylesheet_path))
    }
}

/// All pages of one design file
#[derive(Debug, Clone)]
pub struct CompiledDesign {
    /// File stem of the snapshot
    pub name: String,

    /// Design title
    pub title: String,

    /// Compiled pages, in page order
    pub pages: Vec<CompiledPage>,
}

impl CompiledDesign {
    /// Save every page under `<output_dir>/<name>/`
    pub fn save(&self, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = output_dir.as_ref().join(&self.name);
        let mut written = Vec::with_capacity(self.pages.len() * 2);
        for page in &self.pages {
            let (markup, stylesheet) = page.save(&dir)?;
            written.push(markup);
            written.push(stylesheet);
        }
        Ok(written)
    }
}
