//! Pagesmith Core Library
//!
//! This crate provides the core functionality for Pagesmith:
//! - The persisted component model and design snapshots
//! - Page tree construction from flat component lists
//! - Project configuration parsing and validation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Snapshot   │────▶│ Tree Build  │────▶│  Page Tree  │
//! │ (JSON/YAML) │     │ (validate)  │     │   (arena)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use pagesmith_core::{Config, tree};
//!
//! let config = Config::load("./pagesmith.yaml")?;
//! for (name, design) in config.load_designs()? {
//!     for page in &design.pages {
//!         let tree = tree::build(&page.components)?;
//!         println!("{name}: {} components", tree.len());
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod component;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod tree;

pub use component::{Appearance, Component, ComponentId, Geometry, PageId};
pub use config::{Config, Dialect, EmitConfig, ProjectConfig};
pub use error::{Error, Result};
pub use snapshot::{DesignFile, DesignSnapshot, PageSnapshot, discover_designs};
pub use tree::{NodeId, PageTree, StructuralError, TreeNode, build};
