//! Document shells
//!
//! Wraps emitted markup into a complete file: an HTML document linking the
//! stylesheet, or a JSX module exporting a function component.

use minijinja::{Environment, context};
use pagesmith_core::Dialect;

const HTML_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title | e }}</title>
  <link rel="stylesheet" href="{{ stylesheet | e }}">
</head>
<body>
{{ body }}
</body>
</html>
"#;

const JSX_MODULE: &str = r#"import React from 'react';
import './{{ stylesheet }}';

export default function {{ component }}() {
  return (
{{ body }}
  );
}
"#;

/// Renders document shells around emitted markup
pub struct DocumentRenderer {
    env: Environment<'static>,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Wrap `markup` for `dialect`
    ///
    /// `title` is the page name; `stylesheet` the file name the markup
    /// should load its styles from.
    pub fn render(
        &self,
        dialect: Dialect,
        title: &str,
        stylesheet: &str,
        markup: &str,
    ) -> Result<String, minijinja::Error> {
        match dialect {
            Dialect::Html => self.env.render_str(
                HTML_DOCUMENT,
                context! {
                    title => title,
                    stylesheet => stylesheet,
                    body => indent_block(markup, 2),
                },
            ),
            Dialect::Jsx => self.env.render_str(
                JSX_MODULE,
                context! {
                    component => component_name(title),
                    stylesheet => stylesheet,
                    body => indent_block(markup, 4),
                },
            ),
        }
    }
}

/// PascalCase function name for a JSX component; `Page` if nothing usable
pub fn component_name(title: &str) -> String {
    let name: String = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    match name.chars().next() {
        None => "Page".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Page{}", name),
        Some(_) => name,
    }
}

/// Indent every non-empty line, dropping the final newline
fn indent_block(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name() {
        assert_eq!(component_name("landing page"), "LandingPage");
        assert_eq!(component_name("heroSection"), "HeroSection");
        assert_eq!(component_name("404 page"), "Page404Page");
        assert_eq!(component_name("***"), "Page");
    }

    #[test]
    fn test_render_html() {
        let renderer = DocumentRenderer::new();
        let doc = renderer
            .render(Dialect::Html, "A & B", "home.css", "<div class=\"home\"></div>\n")
            .unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>\n"));
        assert!(doc.contains("<title>A &amp; B</title>"));
        assert!(doc.contains("href=\"home.css\""));
        assert!(doc.contains("<body>\n  <div class=\"home\"></div>\n</body>"));
        assert!(doc.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_jsx() {
        let renderer = DocumentRenderer::new();
        let doc = renderer
            .render(
                Dialect::Jsx,
                "home",
                "home.css",
                "<div className=\"home\">\n  <p className=\"t\">Hi</p>\n</div>\n",
            )
            .unwrap();
        assert!(doc.contains("import './home.css';"));
        assert!(doc.contains("export default function Home() {"));
        assert!(doc.contains(
            "    <div className=\"home\">\n      <p className=\"t\">Hi</p>\n    </div>\n  );"
        ));
    }
}
