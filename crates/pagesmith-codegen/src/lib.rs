//! Pagesmith Code Generation
//!
//! This crate turns a page's component tree into code: nested markup plus a
//! stylesheet that reproduces the canvas layout.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐
//! │Components│────▶│   Tree   │────▶│    IR    │────▶│Markup+CSS│
//! │  (flat)  │     │ (build)  │     │ (lower)  │     │  (emit)  │
//! └──────────┘     └──────────┘     └──────────┘     └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use pagesmith_codegen::{CompileOptions, Compiler};
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! let page = compiler.compile_components(&components)?;
//! println!("{}\n{}", page.markup, page.stylesheet);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compiler;
pub mod document;
pub mod emit;
pub mod error;
pub mod ident;
pub mod ir;
pub mod lower;
pub mod markup;
pub mod style;

pub use compiler::{CompileOptions, CompiledDesign, CompiledPage, Compiler};
pub use emit::{EmitOptions, EmittedCode, emit};
pub use error::{EmissionError, Error, Result};
pub use ir::{ElementIR, ElementKind, NodeIR};
