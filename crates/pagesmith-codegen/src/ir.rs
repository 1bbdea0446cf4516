//! Intermediate Representation for page elements
//!
//! Components arrive with a free-form `kind` string and appearance map. The
//! IR is the closed, typed form each of them is lowered to before any text is
//! written: one variant per element kind, each carrying only its own
//! attributes.

use pagesmith_core::{ComponentId, Geometry};

/// Element variants the emitter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Plain rectangle / grouping box
    Container,
    /// Text block
    Text,
    /// Image
    Image,
    /// Clickable button or link
    Button,
}

impl ElementKind {
    /// Resolve a persisted `kind` string, accepting legacy aliases
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "container" | "rectangle" | "rect" | "frame" | "box" => Some(Self::Container),
            "text" | "label" | "paragraph" => Some(Self::Text),
            "image" | "img" | "picture" => Some(Self::Image),
            "button" | "link" => Some(Self::Button),
            _ => None,
        }
    }

    /// Canonical name, also the identifier fallback for unnamed components
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
        }
    }
}

/// Lowered form of one component
#[derive(Debug, Clone, PartialEq)]
pub struct NodeIR {
    /// Source component
    pub id: ComponentId,

    /// Generated code identifier (class name)
    pub ident: String,

    /// Validated geometry
    pub geometry: Option<Geometry>,

    /// Whether this is the page root
    pub is_root: bool,

    /// Whether the node has children in the tree
    pub has_children: bool,

    /// Typed element payload
    pub element: ElementIR,
}

/// Typed element payload, one variant per kind
#[derive(Debug, Clone, PartialEq)]
pub enum ElementIR {
    /// Grouping box
    Container(BoxStyle),
    /// Text block
    Text(TextElement),
    /// Image
    Image(ImageElement),
    /// Button or link
    Button(ButtonElement),
}

impl ElementIR {
    /// Variant kind
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Container(_) => ElementKind::Container,
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Button(_) => ElementKind::Button,
        }
    }

    /// Box decoration shared by all variants
    pub fn box_style(&self) -> &BoxStyle {
        match self {
            Self::Container(style) => style,
            Self::Text(text) => &text.style,
            Self::Image(image) => &image.style,
            Self::Button(button) => &button.style,
        }
    }
}

/// Box decoration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    /// Background color
    pub fill: Option<String>,

    /// Border line
    pub border: Option<Border>,

    /// Corner radius in px
    pub radius: Option<f64>,

    /// Opacity in `0.0..=1.0`
    pub opacity: Option<f64>,
}

/// Solid border line
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    /// Line width in px
    pub width: f64,

    /// Line color
    pub color: String,
}

/// Font and text settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Typography {
    /// Text color
    pub color: Option<String>,

    /// Font family list
    pub font_family: Option<String>,

    /// Font size in px
    pub font_size: Option<f64>,

    /// Font weight (`normal`, `bold`, or 100..900)
    pub font_weight: Option<String>,

    /// Horizontal alignment
    pub text_align: Option<TextAlign>,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Left aligned
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
    /// Justified
    Justify,
}

impl TextAlign {
    /// CSS keyword
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// How an image fills its box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFit {
    /// Scale to cover, cropping
    Cover,
    /// Scale to fit, letterboxing
    Contain,
    /// Stretch
    Fill,
    /// Natural size
    None,
    /// Natural size or contain, whichever is smaller
    ScaleDown,
}

impl ObjectFit {
    /// `object-fit` keyword for `<img>` elements
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::None => "none",
            Self::ScaleDown => "scale-down",
        }
    }

    /// `background-size` value for images rendered as backgrounds
    pub fn as_background_size(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain | Self::ScaleDown => "contain",
            Self::Fill => "100% 100%",
            Self::None => "auto",
        }
    }
}

/// Text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    /// Text content
    pub text: String,

    /// Font settings
    pub typography: Typography,

    /// Box decoration
    pub style: BoxStyle,
}

/// Image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    /// Image URL
    pub src: String,

    /// Alternative text
    pub alt: Option<String>,

    /// Fit mode
    pub fit: Option<ObjectFit>,

    /// Box decoration
    pub style: BoxStyle,
}

/// Button, or link when `href` is set
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonElement {
    /// Button caption
    pub label: String,

    /// Link target
    pub href: Option<String>,

    /// Rendered disabled
    pub disabled: bool,

    /// Caption font settings
    pub typography: Typography,

    /// Box decoration
    pub style: BoxStyle,
}
