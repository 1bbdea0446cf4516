//! Component to IR lowering
//!
//! Turns a persisted [`Component`] (free-form `kind` and appearance map) into
//! a typed [`ElementIR`], validating every field the emitter will print.
//! Appearance keys are camelCase as the editor stores them; snake_case
//! spellings are accepted too.

use once_cell::sync::Lazy;
use pagesmith_core::{Component, ComponentId, Geometry};
use regex::Regex;
use serde_json::Value;

use crate::error::EmissionError;
use crate::ir::*;

type Result<T> = std::result::Result<T, EmissionError>;

/// Largest magnitude accepted for coordinates and lengths, in px
pub const MAX_MAGNITUDE: f64 = 1e9;

/// Hex, functional (`rgb()`, `hsl()` with optional angle units) or keyword
/// colors. Keywords are only checked to be a single alphabetic word, so an
/// unknown name such as `banana` passes and the browser ignores it.
static COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|(rgba?|hsla?)\(\s*[0-9.,%\s/+-]+(deg|rad|grad|turn)?[0-9.,%\s/+-]*\)|[a-zA-Z]+)$",
    )
    .expect("color pattern is valid")
});

static FONT_WEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(normal|bold|bolder|lighter|[1-9]00)$").expect("weight pattern is valid"));

/// Lower one component into its typed element
pub fn lower_element(component: &Component) -> Result<ElementIR> {
    let kind = ElementKind::parse(&component.kind).ok_or_else(|| EmissionError::UnknownKind {
        id: component.id,
        kind: component.kind.clone(),
    })?;
    let fields = Fields::new(component);

    let element = match kind {
        ElementKind::Container => ElementIR::Container(fields.box_style()?),
        ElementKind::Text => ElementIR::Text(TextElement {
            text: fields.required_string(&["text", "content"])?,
            typography: fields.typography()?,
            style: fields.box_style()?,
        }),
        ElementKind::Image => {
            let src = fields.required_string(&["src", "url", "imageUrl", "image_url"])?;
            if src.trim().is_empty() {
                return Err(EmissionError::invalid(component.id, "appearance.src", "must not be empty"));
            }
            fields.reject_css_breaking("appearance.src", &src)?;
            ElementIR::Image(ImageElement {
                src,
                alt: fields.string(&["alt"])?,
                fit: fields.object_fit()?,
                style: fields.box_style()?,
            })
        }
        ElementKind::Button => ElementIR::Button(ButtonElement {
            label: fields.required_string(&["label", "text"])?,
            href: fields.string(&["href", "link"])?,
            disabled: fields.boolean(&["disabled"])?.unwrap_or(false),
            typography: fields.typography()?,
            style: fields.box_style()?,
        }),
    };
    Ok(element)
}

/// Validate a component's geometry
///
/// Coordinates must be finite and within [`MAX_MAGNITUDE`]; width and
/// height must also not be negative.
pub fn lower_geometry(component: &Component) -> Result<Option<Geometry>> {
    let Some(geometry) = component.geometry else {
        return Ok(None);
    };
    let checks = [
        ("geometry.x", geometry.x, false),
        ("geometry.y", geometry.y, false),
        ("geometry.width", geometry.width, true),
        ("geometry.height", geometry.height, true),
    ];
    for (field, value, size) in checks {
        if !value.is_finite() {
            return Err(EmissionError::invalid(component.id, field, "must be a finite number"));
        }
        if size && value < 0.0 {
            return Err(EmissionError::invalid(component.id, field, "must not be negative"));
        }
        if value.abs() > MAX_MAGNITUDE {
            return Err(EmissionError::invalid(
                component.id,
                field,
                format!("must be at most {} in magnitude", MAX_MAGNITUDE),
            ));
        }
    }
    Ok(Some(geometry))
}

/// Typed accessors over one component's appearance map
struct Fields<'a> {
    component: &'a Component,
}

impl<'a> Fields<'a> {
    fn new(component: &'a Component) -> Self {
        Self { component }
    }

    fn id(&self) -> ComponentId {
        self.component.id
    }

    /// First present key among `keys`, with its field path
    fn lookup(&self, keys: &[&'static str]) -> Option<(String, &'a Value)> {
        keys.iter().find_map(|key| {
            self.component
                .appearance
                .get(*key)
                .filter(|v| !v.is_null())
                .map(|v| (format!("appearance.{}", key), v))
        })
    }

    fn string(&self, keys: &[&'static str]) -> Result<Option<String>> {
        match self.lookup(keys) {
            None => Ok(None),
            Some((_, Value::String(s))) => Ok(Some(s.clone())),
            Some((field, _)) => Err(EmissionError::invalid(self.id(), field, "expected a string")),
        }
    }

    fn required_string(&self, keys: &[&'static str]) -> Result<String> {
        self.string(keys)?.ok_or_else(|| EmissionError::MissingField {
            id: self.id(),
            field: format!("appearance.{}", keys[0]),
        })
    }

    fn boolean(&self, keys: &[&'static str]) -> Result<Option<bool>> {
        match self.lookup(keys) {
            None => Ok(None),
            Some((_, Value::Bool(b))) => Ok(Some(*b)),
            Some((field, _)) => Err(EmissionError::invalid(self.id(), field, "expected a boolean")),
        }
    }

    /// Number in `0..=MAX_MAGNITUDE`; numeric strings such as `"12px"` are
    /// accepted with the unit stripped
    fn length(&self, keys: &[&'static str]) -> Result<Option<f64>> {
        let Some((field, value)) = self.lookup(keys) else {
            return Ok(None);
        };
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches("px").trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(n) if n.is_finite() && (0.0..=MAX_MAGNITUDE).contains(&n) => Ok(Some(n)),
            Some(_) => Err(EmissionError::invalid(
                self.id(),
                field,
                format!("must be a number between 0 and {}", MAX_MAGNITUDE),
            )),
            None => Err(EmissionError::invalid(self.id(), field, "expected a number")),
        }
    }

    fn color(&self, keys: &[&'static str]) -> Result<Option<String>> {
        let Some((field, _)) = self.lookup(keys) else {
            return Ok(None);
        };
        let value = self.string(keys)?.unwrap_or_default();
        let value = value.trim();
        if COLOR.is_match(value) {
            Ok(Some(value.to_string()))
        } else {
            Err(EmissionError::invalid(
                self.id(),
                field,
                format!("'{}' is not a color", value),
            ))
        }
    }

    fn reject_css_breaking(&self, field: &str, value: &str) -> Result<()> {
        if value.contains([';', '{', '}', '<', '>', '\n', '\r']) {
            return Err(EmissionError::invalid(
                self.id(),
                field,
                "must not contain ';', '{', '}', '<', '>' or line breaks",
            ));
        }
        Ok(())
    }

    fn box_style(&self) -> Result<BoxStyle> {
        let border_width = self.length(&["borderWidth", "border_width"])?;
        let border_color = self.color(&["borderColor", "border_color", "stroke"])?;
        let border = match (border_width, border_color) {
            (None, None) => None,
            (Some(width), color) if width > 0.0 => Some(Border {
                width,
                color: color.unwrap_or_else(|| "currentColor".to_string()),
            }),
            (Some(_), _) => None,
            (None, Some(color)) => Some(Border { width: 1.0, color }),
        };

        let opacity = self.length(&["opacity"])?;
        if let Some(o) = opacity.filter(|o| *o > 1.0) {
            return Err(EmissionError::invalid(
                self.id(),
                "appearance.opacity",
                format!("{} is outside 0..=1", o),
            ));
        }

        Ok(BoxStyle {
            fill: self.color(&["fill", "background", "backgroundColor", "background_color"])?,
            border,
            radius: self.length(&["borderRadius", "border_radius", "radius"])?,
            opacity,
        })
    }

    fn typography(&self) -> Result<Typography> {
        let font_family = self.string(&["fontFamily", "font_family"])?;
        if let Some(family) = &font_family {
            self.reject_css_breaking("appearance.fontFamily", family)?;
        }

        let font_weight = match self.lookup(&["fontWeight", "font_weight"]) {
            None => None,
            Some((field, value)) => {
                let weight = match value {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s.trim().to_ascii_lowercase(),
                    _ => String::new(),
                };
                if !FONT_WEIGHT.is_match(&weight) {
                    return Err(EmissionError::invalid(
                        self.id(),
                        field,
                        "expected normal, bold, bolder, lighter or 100..900",
                    ));
                }
                Some(weight)
            }
        };

        let text_align = match self.keyword(&["textAlign", "text_align"])? {
            None => None,
            Some((field, keyword)) => Some(match keyword.as_str() {
                "left" | "start" => TextAlign::Left,
                "center" => TextAlign::Center,
                "right" | "end" => TextAlign::Right,
                "justify" => TextAlign::Justify,
                other => {
                    return Err(EmissionError::invalid(
                        self.id(),
                        field,
                        format!("unknown alignment '{}'", other),
                    ));
                }
            }),
        };

        Ok(Typography {
            color: self.color(&["color", "textColor", "text_color"])?,
            font_family,
            font_size: self.length(&["fontSize", "font_size"])?,
            font_weight,
            text_align,
        })
    }

    fn object_fit(&self) -> Result<Option<ObjectFit>> {
        let Some((field, keyword)) = self.keyword(&["fit", "objectFit", "object_fit"])? else {
            return Ok(None);
        };
        let fit = match keyword.as_str() {
            "cover" => ObjectFit::Cover,
            "contain" => ObjectFit::Contain,
            "fill" | "stretch" => ObjectFit::Fill,
            "none" => ObjectFit::None,
            "scale-down" | "scale_down" => ObjectFit::ScaleDown,
            other => {
                return Err(EmissionError::invalid(
                    self.id(),
                    field,
                    format!("unknown fit '{}'", other),
                ));
            }
        };
        Ok(Some(fit))
    }

    /// Lower-cased string value with its field path
    fn keyword(&self, keys: &[&'static str]) -> Result<Option<(String, String)>> {
        match self.lookup(keys) {
            None => Ok(None),
            Some((field, Value::String(s))) => Ok(Some((field, s.trim().to_ascii_lowercase()))),
            Some((field, _)) => Err(EmissionError::invalid(self.id(), field, "expected a string")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lower_container() {
        let c = Component::new(1, "rectangle")
            .with_appearance("fill", "#ff0000")
            .with_appearance("borderWidth", 2)
            .with_appearance("borderColor", "rgb(0, 0, 0)")
            .with_appearance("borderRadius", "8px")
            .with_appearance("opacity", 0.5);

        let ElementIR::Container(style) = lower_element(&c).unwrap() else {
            panic!("Expected Container");
        };
        assert_eq!(style.fill.as_deref(), Some("#ff0000"));
        assert_eq!(
            style.border,
            Some(Border {
                width: 2.0,
                color: "rgb(0, 0, 0)".to_string()
            })
        );
        assert_eq!(style.radius, Some(8.0));
        assert_eq!(style.opacity, Some(0.5));
    }

    #[test]
    fn test_border_color_only_defaults_width() {
        let c = Component::new(1, "container").with_appearance("border_color", "navy");
        let element = lower_element(&c).unwrap();
        assert_eq!(element.box_style().border.as_ref().unwrap().width, 1.0);
    }

    #[test]
    fn test_zero_border_width_drops_border() {
        let c = Component::new(1, "container")
            .with_appearance("borderWidth", 0)
            .with_appearance("borderColor", "red");
        assert!(lower_element(&c).unwrap().box_style().border.is_none());
    }

    #[test]
    fn test_lower_text() {
        let c = Component::new(2, "text")
            .with_appearance("text", "Hi")
            .with_appearance("fontSize", 16)
            .with_appearance("fontWeight", 700)
            .with_appearance("textAlign", "Center")
            .with_appearance("fontFamily", "\"Open Sans\", sans-serif");

        let ElementIR::Text(text) = lower_element(&c).unwrap() else {
            panic!("Expected Text");
        };
        assert_eq!(text.text, "Hi");
        assert_eq!(text.typography.font_size, Some(16.0));
        assert_eq!(text.typography.font_weight.as_deref(), Some("700"));
        assert_eq!(text.typography.text_align, Some(TextAlign::Center));
    }

    #[test]
    fn test_text_requires_content() {
        let c = Component::new(2, "text");
        let err = lower_element(&c).unwrap_err();
        assert_eq!(
            err,
            EmissionError::MissingField {
                id: ComponentId(2),
                field: "appearance.text".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_kind() {
        let c = Component::new(7, "video");
        let err = lower_element(&c).unwrap_err();
        assert_eq!(err.component_id(), ComponentId(7));
        assert_eq!(err.field(), "kind");
    }

    #[test]
    fn test_wrong_type() {
        let c = Component::new(3, "text").with_appearance("text", json!(["a"]));
        let err = lower_element(&c).unwrap_err();
        assert_eq!(err.field(), "appearance.text");
    }

    #[test]
    fn test_invalid_color() {
        let c = Component::new(3, "container").with_appearance("fill", "red; display: none");
        let err = lower_element(&c).unwrap_err();
        assert_eq!(err.field(), "appearance.fill");
    }

    #[test]
    fn test_invalid_opacity() {
        let c = Component::new(3, "container").with_appearance("opacity", 3);
        assert_eq!(lower_element(&c).unwrap_err().field(), "appearance.opacity");
    }

    #[test]
    fn test_invalid_font_weight() {
        let c = Component::new(3, "text")
            .with_appearance("text", "x")
            .with_appearance("fontWeight", 450);
        assert_eq!(lower_element(&c).unwrap_err().field(), "appearance.fontWeight");
    }

    #[test]
    fn test_lower_image() {
        let c = Component::new(4, "image")
            .with_appearance("src", "https://cdn.example.com/a.png")
            .with_appearance("fit", "contain");
        let ElementIR::Image(image) = lower_element(&c).unwrap() else {
            panic!("Expected Image");
        };
        assert_eq!(image.fit, Some(ObjectFit::Contain));
        assert!(image.alt.is_none());
    }

    #[test]
    fn test_image_requires_src() {
        let c = Component::new(4, "image").with_appearance("src", "  ");
        assert_eq!(lower_element(&c).unwrap_err().field(), "appearance.src");

        let c = Component::new(4, "image");
        assert!(matches!(
            lower_element(&c).unwrap_err(),
            EmissionError::MissingField { .. }
        ));
    }

    #[test]
    fn test_lower_button() {
        let c = Component::new(5, "button")
            .with_appearance("label", "Buy")
            .with_appearance("href", "/checkout")
            .with_appearance("disabled", true);
        let ElementIR::Button(button) = lower_element(&c).unwrap() else {
            panic!("Expected Button");
        };
        assert_eq!(button.label, "Buy");
        assert_eq!(button.href.as_deref(), Some("/checkout"));
        assert!(button.disabled);
    }

    #[test]
    fn test_null_appearance_is_absent() {
        let c = Component::new(1, "container").with_appearance("fill", json!(null));
        assert!(lower_element(&c).unwrap().box_style().fill.is_none());
    }

    #[test]
    fn test_lower_geometry() {
        let c = Component::new(1, "container").with_geometry(Geometry::new(-5.0, 0.0, 10.0, 10.0));
        assert!(lower_geometry(&c).unwrap().is_some());

        let c = Component::new(1, "container").with_geometry(Geometry::new(0.0, 0.0, -1.0, 10.0));
        assert_eq!(lower_geometry(&c).unwrap_err().field(), "geometry.width");

        let c = Component::new(1, "container").with_geometry(Geometry::new(f64::NAN, 0.0, 1.0, 1.0));
        assert_eq!(lower_geometry(&c).unwrap_err().field(), "geometry.x");

        assert!(lower_geometry(&Component::new(1, "container")).unwrap().is_none());
    }

    #[test]
    fn test_huge_values_rejected() {
        let c = Component::new(1, "container").with_geometry(Geometry::new(0.0, 0.0, 1e307, 10.0));
        let err = lower_geometry(&c).unwrap_err();
        assert_eq!(err.field(), "geometry.width");
        assert!(err.to_string().contains("magnitude"));

        let c = Component::new(1, "container").with_geometry(Geometry::new(-1e12, 0.0, 1.0, 1.0));
        assert_eq!(lower_geometry(&c).unwrap_err().field(), "geometry.x");

        let c = Component::new(2, "text")
            .with_appearance("text", "x")
            .with_appearance("fontSize", 1e307);
        assert_eq!(lower_element(&c).unwrap_err().field(), "appearance.fontSize");

        let c = Component::new(3, "container").with_appearance("borderRadius", "1e300px");
        assert_eq!(lower_element(&c).unwrap_err().field(), "appearance.borderRadius");

        let c = Component::new(1, "container")
            .with_geometry(Geometry::new(0.0, 0.0, MAX_MAGNITUDE, MAX_MAGNITUDE));
        assert!(lower_geometry(&c).unwrap().is_some());
    }

    #[rstest::rstest]
    #[case("#1f6feb")]
    #[case("rgb(0, 0, 0)")]
    #[case("rgba(0 0 0 / 50%)")]
    #[case("hsl(120deg, 50%, 50%)")]
    #[case("hsla(0.5turn 40% 60% / 0.2)")]
    #[case("navy")]
    fn test_color_accepted(#[case] color: &str) {
        let c = Component::new(1, "container").with_appearance("fill", color);
        assert_eq!(lower_element(&c).unwrap().box_style().fill.as_deref(), Some(color));
    }

    #[rstest::rstest]
    #[case("#12345")]
    #[case("rgb(0, 0, 0); color: red")]
    #[case("hsl(deg)")]
    #[case("url(x.png)")]
    fn test_color_rejected(#[case] color: &str) {
        let c = Component::new(1, "container").with_appearance("fill", color);
        assert_eq!(lower_element(&c).unwrap_err().field(), "appearance.fill");
    }
}
