//! Code emission
//!
//! Walks a [`PageTree`] and produces the page's markup and stylesheet.
//!
//! Emission runs in three passes over the same pre-order walk:
//!
//! 1. lower every component to IR and allocate its class name
//! 2. write markup, nesting children inside parents
//! 3. write one stylesheet rule block per node
//!
//! Lowering finishes before any text is written, so a bad component fails the
//! whole call and no partial output escapes.

use pagesmith_core::{ComponentId, Dialect, EmitConfig, PageTree};

use crate::error::EmissionError;
use crate::ident::IdentAllocator;
use crate::ir::NodeIR;
use crate::lower::{lower_element, lower_geometry};
use crate::markup::MarkupWriter;
use crate::style::write_stylesheet;

/// Emitter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Markup dialect
    pub dialect: Dialect,

    /// Spaces per nesting level
    pub indent: usize,

    /// Prefix for every class name
    pub class_prefix: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Html,
            indent: 2,
            class_prefix: None,
        }
    }
}

impl From<&EmitConfig> for EmitOptions {
    fn from(config: &EmitConfig) -> Self {
        Self {
            dialect: config.dialect,
            indent: config.indent,
            class_prefix: config.class_prefix.clone(),
        }
    }
}

/// Markup and stylesheet for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedCode {
    /// Nested element markup
    pub markup: String,

    /// Stylesheet with one rule block per element
    pub stylesheet: String,

    /// Class name of each component, in pre-order
    pub identifiers: Vec<(ComponentId, String)>,
}

impl EmittedCode {
    /// Class name generated for `id`
    pub fn identifier(&self, id: ComponentId) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|(c, _)| *c == id)
            .map(|(_, ident)| ident.as_str())
    }
}

/// Lower every node of `tree`, returning IR indexed by arena slot
pub fn lower_tree(tree: &PageTree<'_>, options: &EmitOptions) -> Result<Vec<NodeIR>, EmissionError> {
    let mut idents = IdentAllocator::new(options.class_prefix.clone());
    let mut slots: Vec<Option<NodeIR>> = vec![None; tree.len()];

    for id in tree.preorder() {
        let component = tree.component(id);
        let element = lower_element(component)?;
        let geometry = lower_geometry(component)?;
        let ident = idents.allocate(&component.name, element.kind().name());

        slots[id.index()] = Some(NodeIR {
            id: component.id,
            ident,
            geometry,
            is_root: id == tree.root(),
            has_children: !tree.children(id).is_empty(),
            element,
        });
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Emit markup and stylesheet for a page tree
///
/// The tree is only read. Fails with [`EmissionError`] on the first
/// component (in pre-order) whose kind, appearance or geometry cannot be
/// translated.
pub fn emit(tree: &PageTree<'_>, options: &EmitOptions) -> Result<EmittedCode, EmissionError> {
    let nodes = lower_tree(tree, options)?;

    let markup = MarkupWriter::new(options.dialect, options.indent, &nodes).write(tree);
    let stylesheet = write_stylesheet(tree.preorder().map(|id| &nodes[id.index()]), options.indent);
    let identifiers = tree
        .preorder()
        .map(|id| {
            let node = &nodes[id.index()];
            (node.id, node.ident.clone())
        })
        .collect();

    tracing::debug!(
        components = nodes.len(),
        markup_bytes = markup.len(),
        stylesheet_bytes = stylesheet.len(),
        "emitted page code"
    );

    Ok(EmittedCode {
        markup,
        stylesheet,
        identifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_core::{Component, Geometry, build};

    fn example() -> Vec<Component> {
        vec![
            Component::new(1, "container")
                .with_name("Page")
                .with_geometry(Geometry::new(0.0, 0.0, 800.0, 600.0)),
            Component::new(2, "text")
                .with_parent(1)
                .with_name("Greeting")
                .with_appearance("text", "Hi"),
            Component::new(3, "text")
                .with_parent(1)
                .with_order(1)
                .with_name("Farewell")
                .with_appearance("text", "Bye"),
        ]
    }

    #[test]
    fn test_emit_example() {
        let components = example();
        let tree = build(&components).unwrap();
        let code = emit(&tree, &EmitOptions::default()).unwrap();

        assert_eq!(
            code.markup,
            "<div class=\"page\">\n  <p class=\"greeting\">Hi</p>\n  <p class=\"farewell\">Bye</p>\n</div>\n"
        );
        assert_eq!(
            code.stylesheet,
            ".page {\n  position: relative;\n  width: 800px;\n  height: 600px;\n}\n\n.greeting {\n}\n\n.farewell {\n}\n"
        );
        assert_eq!(code.identifier(ComponentId(3)), Some("farewell"));
    }

    #[test]
    fn test_emit_jsx_with_prefix() {
        let components = example();
        let tree = build(&components).unwrap();
        let options = EmitOptions {
            dialect: Dialect::Jsx,
            indent: 4,
            class_prefix: Some("ps".to_string()),
        };
        let code = emit(&tree, &options).unwrap();
        assert!(code.markup.starts_with("<div className=\"ps-page\">\n    <p className=\"ps-greeting\">Hi</p>"));
        assert!(code.stylesheet.contains(".ps-farewell {"));
    }

    #[test]
    fn test_unsafe_prefix_keeps_markup_and_stylesheet_in_step() {
        let components = vec![Component::new(1, "container")];
        let tree = build(&components).unwrap();
        let options = EmitOptions {
            class_prefix: Some("a b".to_string()),
            ..Default::default()
        };
        let code = emit(&tree, &options).unwrap();
        assert_eq!(code.markup, "<div class=\"a-b-container\"></div>\n");
        assert_eq!(code.stylesheet, ".a-b-container {\n}\n");
        assert_eq!(code.identifier(ComponentId(1)), Some("a-b-container"));
    }

    #[test]
    fn test_emit_nested_image_container() {
        let components = vec![
            Component::new(1, "image").with_appearance("src", "bg.png"),
            Component::new(2, "container").with_parent(1),
        ];
        let tree = build(&components).unwrap();
        let code = emit(&tree, &EmitOptions::default()).unwrap();
        assert_eq!(
            code.markup,
            "<div class=\"image\">\n  <div class=\"container\"></div>\n</div>\n"
        );
        assert!(code.stylesheet.contains("background-image: url(\"bg.png\");"));
    }

    #[test]
    fn test_text_with_children_keeps_text_first() {
        let components = vec![
            Component::new(1, "text").with_appearance("text", "Title"),
            Component::new(2, "button")
                .with_parent(1)
                .with_appearance("label", "Go"),
        ];
        let tree = build(&components).unwrap();
        let code = emit(&tree, &EmitOptions::default()).unwrap();
        assert_eq!(
            code.markup,
            "<div class=\"text\">\n  Title\n  <button class=\"button\" type=\"button\">Go</button>\n</div>\n"
        );
    }

    #[test]
    fn test_emit_fails_on_bad_child() {
        let components = vec![
            Component::new(1, "container"),
            Component::new(2, "text").with_parent(1),
        ];
        let tree = build(&components).unwrap();
        let err = emit(&tree, &EmitOptions::default()).unwrap_err();
        assert_eq!(err.component_id(), ComponentId(2));
        assert_eq!(err.field(), "appearance.text");
    }

    #[test]
    fn test_options_from_config() {
        let config = EmitConfig {
            dialect: Dialect::Jsx,
            indent: 3,
            class_prefix: Some("x".to_string()),
            wrap_document: true,
        };
        let options = EmitOptions::from(&config);
        assert_eq!(options.dialect, Dialect::Jsx);
        assert_eq!(options.indent, 3);
        assert_eq!(options.class_prefix.as_deref(), Some("x"));
    }
}
