//! Code identifier generation
//!
//! Every emitted element gets a class name derived from its component name.
//! Class selectors are global to the page stylesheet, so names are made
//! unique across the whole page, not only among siblings.
//!
//! # Rules
//!
//! 1. camelCase boundaries become `-`, then the name is lower-cased.
//! 2. Runs of anything other than `a-z0-9` fold into one `-`; leading and
//!    trailing `-` are trimmed.
//! 3. An empty result falls back to the element kind name.
//! 4. With a class prefix the result is `<prefix>-<name>`. Characters
//!    outside `A-Za-z0-9_-` in the prefix fold into `-`. A result starting
//!    with a digit gets a `c-` prefix.
//! 5. The first claimant keeps the name. Each later one gets `<name>-<n>`
//!    with the smallest `n >= 2` not yet taken on the page.
//!
//! Callers allocate in pre-order, so the same tree always yields the same
//! names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel pattern is valid"));

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("separator pattern is valid"));

static PREFIX_INVALID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("prefix pattern is valid"));

/// Slug of a free-form name (rules 1–2); may be empty
pub fn slugify(name: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(name, "$1-$2");
    let lower = split.to_lowercase();
    NON_ALNUM.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// Raw identifier before collision handling (rules 1–4)
pub fn raw_identifier(name: &str, fallback: &str, prefix: Option<&str>) -> String {
    let mut base = slugify(name);
    if base.is_empty() {
        base = slugify(fallback);
    }
    let ident = match prefix.and_then(class_prefix) {
        Some(prefix) => format!("{}-{}", prefix, base),
        None => base,
    };
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("c-{}", ident)
    } else {
        ident
    }
}

/// Prefix reduced to class-name characters; `None` if nothing is left
fn class_prefix(prefix: &str) -> Option<String> {
    let cleaned = PREFIX_INVALID.replace_all(prefix, "-");
    let cleaned = cleaned.trim_matches('-');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Hands out page-unique identifiers
#[derive(Debug, Default)]
pub struct IdentAllocator {
    prefix: Option<String>,
    taken: HashSet<String>,
}

impl IdentAllocator {
    /// Create an allocator with an optional class prefix
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix,
            taken: HashSet::new(),
        }
    }

    /// Allocate the identifier for the next component in traversal order
    pub fn allocate(&mut self, name: &str, fallback: &str) -> String {
        let raw = raw_identifier(name, fallback, self.prefix.as_deref());
        let mut candidate = raw.clone();
        let mut n = 2usize;
        while self.taken.contains(&candidate) {
            candidate = format!("{}-{}", raw, n);
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    /// Number of identifiers handed out
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Whether nothing has been allocated yet
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
