//! Markup generation
//!
//! Writes the nested element structure for a page in HTML or JSX. Nesting in
//! the output mirrors nesting in the tree one-to-one: every node opens
//! exactly one element, and its children are written inside it in paint
//! order.

use pagesmith_core::{Dialect, NodeId, PageTree};

use crate::ir::{ElementIR, NodeIR};

/// Element tag for a node
pub fn tag(node: &NodeIR) -> &'static str {
    match &node.element {
        ElementIR::Container(_) => "div",
        ElementIR::Text(_) if node.has_children => "div",
        ElementIR::Text(_) => "p",
        ElementIR::Image(_) if node.has_children => "div",
        ElementIR::Image(_) => "img",
        ElementIR::Button(button) if button.href.is_some() => "a",
        ElementIR::Button(_) => "button",
    }
}

fn is_void(tag: &str) -> bool {
    tag == "img"
}

enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

/// Writes markup for a lowered page
pub struct MarkupWriter<'n> {
    dialect: Dialect,
    indent: usize,
    nodes: &'n [NodeIR],
    out: String,
}

impl<'n> MarkupWriter<'n> {
    /// `nodes` is indexed by arena slot ([`NodeId::index`])
    pub fn new(dialect: Dialect, indent: usize, nodes: &'n [NodeIR]) -> Self {
        Self {
            dialect,
            indent,
            nodes,
            out: String::new(),
        }
    }

    /// Write the whole tree and return the markup
    pub fn write(mut self, tree: &PageTree<'_>) -> String {
        let nodes = self.nodes;
        let mut stack = vec![Visit::Enter(tree.root())];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    let depth = tree.node(id).depth;
                    let children = tree.children(id);
                    if children.is_empty() {
                        self.leaf(&nodes[id.index()], depth);
                    } else {
                        self.open(&nodes[id.index()], depth);
                        stack.push(Visit::Exit(id));
                        stack.extend(children.iter().rev().map(|&c| Visit::Enter(c)));
                    }
                }
                Visit::Exit(id) => {
                    let depth = tree.node(id).depth;
                    let tag = tag(&nodes[id.index()]);
                    self.line(depth, &format!("</{}>", tag));
                }
            }
        }
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth * self.indent {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, node: &NodeIR, depth: usize) {
        let tag = tag(node);
        let start = format!("<{}{}>", tag, self.attributes(node, tag));
        self.line(depth, &start);
        if let Some(content) = self.content(node) {
            self.line(depth + 1, &content);
        }
    }

    fn leaf(&mut self, node: &NodeIR, depth: usize) {
        let tag = tag(node);
        let attrs = self.attributes(node, tag);
        let text = match (self.content(node), is_void(tag), self.dialect) {
            (_, true, Dialect::Html) => format!("<{}{}>", tag, attrs),
            (None, _, Dialect::Jsx) | (_, true, Dialect::Jsx) => format!("<{}{} />", tag, attrs),
            (None, false, Dialect::Html) => format!("<{}{}></{}>", tag, attrs, tag),
            (Some(content), false, _) => format!("<{}{}>{}</{}>", tag, attrs, content, tag),
        };
        self.line(depth, &text);
    }

    fn attributes(&self, node: &NodeIR, tag: &str) -> String {
        let class_attr = match self.dialect {
            Dialect::Html => "class",
            Dialect::Jsx => "className",
        };
        let mut attrs = format!(" {}=\"{}\"", class_attr, node.ident);

        match &node.element {
            ElementIR::Image(image) if tag == "img" => {
                attrs.push_str(&format!(" src=\"{}\"", self.escape_attr(&image.src)));
                let alt = image.alt.as_deref().unwrap_or("");
                attrs.push_str(&format!(" alt=\"{}\"", self.escape_attr(alt)));
            }
            ElementIR::Image(image) => {
                if let Some(alt) = &image.alt {
                    attrs.push_str(&format!(" role=\"img\" aria-label=\"{}\"", self.escape_attr(alt)));
                }
            }
            ElementIR::Button(button) => {
                if let Some(href) = &button.href {
                    attrs.push_str(&format!(" href=\"{}\"", self.escape_attr(href)));
                    if button.disabled {
                        attrs.push_str(" aria-disabled=\"true\"");
                    }
                } else {
                    attrs.push_str(" type=\"button\"");
                    if button.disabled {
                        attrs.push_str(" disabled");
                    }
                }
            }
            ElementIR::Container(_) | ElementIR::Text(_) => {}
        }
        attrs
    }

    fn content(&self, node: &NodeIR) -> Option<String> {
        let text = match &node.element {
            ElementIR::Text(text) => &text.text,
            ElementIR::Button(button) => &button.label,
            ElementIR::Container(_) | ElementIR::Image(_) => return None,
        };
        let br = match self.dialect {
            Dialect::Html => "<br>",
            Dialect::Jsx => "<br />",
        };
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| self.escape_text(line.trim_end_matches('\r')))
            .collect();
        Some(lines.join(br))
    }

    fn escape_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match (c, self.dialect) {
                ('&', _) => out.push_str("&amp;"),
                ('<', _) => out.push_str("&lt;"),
                ('>', _) => out.push_str("&gt;"),
                ('{', Dialect::Jsx) => out.push_str("&#123;"),
                ('}', Dialect::Jsx) => out.push_str("&#125;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn escape_attr(&self, text: &str) -> String {
        self.escape_text(text).replace('"', "&quot;")
    }
}
