//! Component records
//!
//! A component is the persisted, flat shape of one element on a page, as
//! handed over by the editor's state store. Nesting is expressed only through
//! `parent_id`; the [`tree`](crate::tree) module rebuilds it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a component, assigned at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u64);

/// Identifier of the page owning a set of components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ComponentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for PageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Appearance payload, keyed by presentation property
pub type Appearance = serde_json::Map<String, serde_json::Value>;

/// Position and size relative to the parent's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Horizontal offset from the parent's left edge
    #[serde(default)]
    pub x: f64,

    /// Vertical offset from the parent's top edge
    #[serde(default)]
    pub y: f64,

    /// Width
    #[serde(alias = "w")]
    pub width: f64,

    /// Height
    #[serde(alias = "h")]
    pub height: f64,
}

impl Geometry {
    /// Create a geometry from position and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One design element as persisted by the state store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Stable unique identifier
    #[serde(alias = "_id")]
    pub id: ComponentId,

    /// Parent reference; `None` for the page's root component
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<ComponentId>,

    /// Owning page
    #[serde(default, alias = "pageId")]
    pub page_id: Option<PageId>,

    /// Element variant (`container`, `text`, `image`, `button`, ...)
    pub kind: String,

    /// Human-assigned or generated label
    #[serde(default)]
    pub name: String,

    /// Sibling paint order, lowest first
    #[serde(default, alias = "index")]
    pub order: i64,

    /// Position and size, if the component is placed explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    /// Variant-specific presentation properties
    #[serde(default, skip_serializing_if = "Appearance::is_empty")]
    pub appearance: Appearance,
}

impl Component {
    /// Create a component with no parent, page, geometry or appearance
    pub fn new(id: impl Into<ComponentId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            page_id: None,
            kind: kind.into(),
            name: String::new(),
            order: 0,
            geometry: None,
            appearance: Appearance::new(),
        }
    }

    /// Set the parent reference
    pub fn with_parent(mut self, parent: impl Into<ComponentId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Set the owning page
    pub fn with_page(mut self, page: impl Into<PageId>) -> Self {
        self.page_id = Some(page.into());
        self
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the sibling order
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Set the geometry
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set one appearance property
    pub fn with_appearance(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.appearance.insert(key.into(), value.into());
        self
    }

    /// Whether this is a root component (no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
