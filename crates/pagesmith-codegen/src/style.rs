//! Stylesheet generation
//!
//! Each node becomes one rule block keyed by its class name. Declarations are
//! always written in [`PROPERTY_ORDER`], whatever order they were collected
//! in, so output is byte-stable.

use std::fmt::Write as _;

use crate::ir::{ElementIR, NodeIR, ObjectFit};

/// Fixed declaration order within a rule block
pub const PROPERTY_ORDER: &[&str] = &[
    "position",
    "left",
    "top",
    "width",
    "height",
    "background-color",
    "background-image",
    "background-size",
    "border",
    "border-radius",
    "opacity",
    "color",
    "font-family",
    "font-size",
    "font-weight",
    "text-align",
    "object-fit",
    "cursor",
];

/// One `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// CSS property, one of [`PROPERTY_ORDER`]
    pub property: &'static str,
    /// CSS value
    pub value: String,
}

impl Declaration {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

fn rank(property: &str) -> usize {
    PROPERTY_ORDER
        .iter()
        .position(|p| *p == property)
        .unwrap_or(PROPERTY_ORDER.len())
}

/// Declarations for one node, in [`PROPERTY_ORDER`]
pub fn declarations(node: &NodeIR) -> Vec<Declaration> {
    let mut decls = Vec::new();

    if let Some(g) = &node.geometry {
        if node.is_root {
            decls.push(Declaration::new("position", "relative"));
        } else {
            decls.push(Declaration::new("position", "absolute"));
            decls.push(Declaration::new("left", px(g.x)));
            decls.push(Declaration::new("top", px(g.y)));
        }
        decls.push(Declaration::new("width", px(g.width)));
        decls.push(Declaration::new("height", px(g.height)));
    }

    let style = node.element.box_style();
    if let Some(fill) = &style.fill {
        decls.push(Declaration::new("background-color", fill.as_str()));
    }
    if let Some(border) = &style.border {
        decls.push(Declaration::new(
            "border",
            format!("{} solid {}", px(border.width), border.color),
        ));
    }
    if let Some(radius) = style.radius {
        decls.push(Declaration::new("border-radius", px(radius)));
    }
    if let Some(opacity) = style.opacity {
        decls.push(Declaration::new("opacity", number(opacity)));
    }

    let typography = match &node.element {
        ElementIR::Text(text) => Some(&text.typography),
        ElementIR::Button(button) => Some(&button.typography),
        ElementIR::Container(_) | ElementIR::Image(_) => None,
    };
    if let Some(t) = typography {
        if let Some(color) = &t.color {
            decls.push(Declaration::new("color", color.as_str()));
        }
        if let Some(family) = &t.font_family {
            decls.push(Declaration::new("font-family", family.as_str()));
        }
        if let Some(size) = t.font_size {
            decls.push(Declaration::new("font-size", px(size)));
        }
        if let Some(weight) = &t.font_weight {
            decls.push(Declaration::new("font-weight", weight.as_str()));
        }
        if let Some(align) = t.text_align {
            decls.push(Declaration::new("text-align", align.as_css()));
        }
    }

    match &node.element {
        // Images with children render as boxes with a background image
        ElementIR::Image(image) if node.has_children => {
            decls.push(Declaration::new(
                "background-image",
                format!("url(\"{}\")", css_string(&image.src)),
            ));
            decls.push(Declaration::new(
                "background-size",
                image.fit.unwrap_or(ObjectFit::Cover).as_background_size(),
            ));
        }
        ElementIR::Image(image) => {
            if let Some(fit) = image.fit {
                decls.push(Declaration::new("object-fit", fit.as_css()));
            }
        }
        ElementIR::Button(button) => {
            let cursor = if button.disabled { "not-allowed" } else { "pointer" };
            decls.push(Declaration::new("cursor", cursor));
        }
        ElementIR::Container(_) | ElementIR::Text(_) => {}
    }

    decls.sort_by_key(|d| rank(d.property));
    decls
}

/// Write the stylesheet for `nodes`, one block per node in the given order
pub fn write_stylesheet<'a>(nodes: impl IntoIterator<Item = &'a NodeIR>, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::new();
    for (i, node) in nodes.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, ".{} {{", node.ident);
        for decl in declarations(node) {
            let _ = writeln!(out, "{}{}: {};", pad, decl.property, decl.value);
        }
        out.push_str("}\n");
    }
    out
}

/// Length in px; integers print bare, fractions keep at most two places
pub fn px(value: f64) -> String {
    let n = number(value);
    if n == "0" { n } else { format!("{}px", n) }
}

/// Unitless number with at most two decimal places
pub fn number(value: f64) -> String {
    let scaled = value * 100.0;
    let rounded = if scaled.is_finite() { scaled.round() / 100.0 } else { value };
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
