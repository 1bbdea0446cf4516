//! Page tree construction
//!
//! Rebuilds the parent/child nesting of a page from its flat component list.
//!
//! The tree is an arena: every node lives in one `Vec`, addressed by
//! [`NodeId`], and holds its children as an ordered list of indices. Nodes
//! borrow their [`Component`] from the caller's snapshot, which is never
//! mutated.
//!
//! # Ordering
//!
//! Arena slots are assigned in ascending component id, and children are
//! sorted by `(order, id)`. Both are independent of input order, so any
//! permutation of the same component set builds an identical tree.

use std::collections::HashMap;
use std::fmt::Write as _;

use thiserror::Error;

use crate::component::{Component, ComponentId, PageId};

/// Reasons a component set cannot form one rooted, acyclic tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// No components were supplied
    #[error("empty component set")]
    Empty,

    /// Components belong to more than one page
    #[error("component {id} belongs to page {found:?}, expected page {expected:?}")]
    MixedPages {
        /// Offending component
        id: ComponentId,
        /// Page of the lowest-id component
        expected: Option<PageId>,
        /// Page of the offending component
        found: Option<PageId>,
    },

    /// Two components share an id
    #[error("duplicate component id {0}")]
    DuplicateId(ComponentId),

    /// No component without a parent
    #[error("no root")]
    NoRoot,

    /// More than one component without a parent
    #[error("multiple roots: {}", join_ids(.0))]
    MultipleRoots(Vec<ComponentId>),

    /// A parent reference points outside the set
    #[error("dangling parent reference: component {id} references missing parent {parent_id}")]
    DanglingParent {
        /// Offending component
        id: ComponentId,
        /// The unresolved parent id
        parent_id: ComponentId,
    },

    /// Components not reachable from the root
    #[error("cycle or orphaned subtree: {}", join_ids(.0))]
    CycleOrOrphan(Vec<ComponentId>),
}

impl StructuralError {
    /// Stable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Empty => "empty component set",
            Self::MixedPages { .. } => "mixed pages",
            Self::DuplicateId(_) => "duplicate id",
            Self::NoRoot => "no root",
            Self::MultipleRoots(_) => "multiple roots",
            Self::DanglingParent { .. } => "dangling parent reference",
            Self::CycleOrOrphan(_) => "cycle or orphaned subtree",
        }
    }

    /// The offending component, where one can be named
    pub fn component_id(&self) -> Option<ComponentId> {
        match self {
            Self::Empty | Self::NoRoot => None,
            Self::MixedPages { id, .. } | Self::DanglingParent { id, .. } => Some(*id),
            Self::DuplicateId(id) => Some(*id),
            Self::MultipleRoots(ids) | Self::CycleOrOrphan(ids) => ids.first().copied(),
        }
    }
}

fn join_ids(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena position
    pub fn index(self) -> usize {
        self.0
    }
}

/// One arena slot
#[derive(Debug, Clone)]
pub struct TreeNode<'a> {
    /// The component this node stands for
    pub component: &'a Component,

    /// Parent slot (`None` for the root)
    pub parent: Option<NodeId>,

    /// Children in paint order
    pub children: Vec<NodeId>,

    /// Nesting depth, root = 0
    pub depth: usize,
}

/// A rooted page tree over a borrowed component snapshot
#[derive(Debug, Clone)]
pub struct PageTree<'a> {
    nodes: Vec<TreeNode<'a>>,
    root: NodeId,
    page_id: Option<PageId>,
}

/// Build a page tree from a flat component list
///
/// Fails with [`StructuralError`] when the input is empty, spans several
/// pages, repeats an id, has zero or several roots, references a missing
/// parent, or contains a cycle or a subtree detached from the root.
pub fn build(components: &[Component]) -> Result<PageTree<'_>, StructuralError> {
    let mut sorted: Vec<&Component> = components.iter().collect();
    sorted.sort_by_key(|c| c.id);
    let page_id = sorted.first().ok_or(StructuralError::Empty)?.page_id;

    let mut index: HashMap<ComponentId, NodeId> = HashMap::with_capacity(sorted.len());
    for (slot, component) in sorted.iter().enumerate() {
        if component.page_id != page_id {
            return Err(StructuralError::MixedPages {
                id: component.id,
                expected: page_id,
                found: component.page_id,
            });
        }
        if index.insert(component.id, NodeId(slot)).is_some() {
            return Err(StructuralError::DuplicateId(component.id));
        }
    }

    let roots: Vec<ComponentId> = sorted
        .iter()
        .filter(|c| c.is_root())
        .map(|c| c.id)
        .collect();
    let root = match roots.as_slice() {
        [] => return Err(StructuralError::NoRoot),
        [id] => index[id],
        _ => return Err(StructuralError::MultipleRoots(roots)),
    };

    let mut nodes: Vec<TreeNode<'_>> = sorted
        .iter()
        .map(|&component| TreeNode {
            component,
            parent: None,
            children: Vec::new(),
            depth: 0,
        })
        .collect();

    for slot in 0..nodes.len() {
        let component = nodes[slot].component;
        let Some(parent_id) = component.parent_id else {
            continue;
        };
        let parent = *index
            .get(&parent_id)
            .ok_or(StructuralError::DanglingParent {
                id: component.id,
                parent_id,
            })?;
        nodes[slot].parent = Some(parent);
        nodes[parent.0].children.push(NodeId(slot));
    }

    for slot in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[slot].children);
        children.sort_by_key(|child| {
            let c = nodes[child.0].component;
            (c.order, c.id)
        });
        nodes[slot].children = children;
    }

    // Each node has one parent, so a walk from the root can only miss nodes,
    // never revisit them. Anything unvisited sits on a cycle or hangs off one.
    let mut visited = vec![false; nodes.len()];
    let mut seen = 0usize;
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if visited[node.0] || seen == nodes.len() {
            break;
        }
        visited[node.0] = true;
        seen += 1;
        nodes[node.0].depth = depth;
        stack.extend(nodes[node.0].children.iter().rev().map(|&c| (c, depth + 1)));
    }

    if seen != nodes.len() {
        let unreachable = nodes
            .iter()
            .zip(&visited)
            .filter(|(_, v)| !**v)
            .map(|(n, _)| n.component.id)
            .collect();
        return Err(StructuralError::CycleOrOrphan(unreachable));
    }

    tracing::debug!(
        components = nodes.len(),
        page = ?page_id,
        "built page tree"
    );

    Ok(PageTree {
        nodes,
        root,
        page_id,
    })
}

impl<'a> PageTree<'a> {
    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`
    pub fn node(&self, id: NodeId) -> &TreeNode<'a> {
        &self.nodes[id.0]
    }

    /// Component at `id`
    pub fn component(&self, id: NodeId) -> &'a Component {
        self.nodes[id.0].component
    }

    /// Ordered children of `id`
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a built tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Page shared by all components
    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    /// Number of levels, root only = 1
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0) + 1
    }

    /// Arena slot of a component id
    pub fn find(&self, id: ComponentId) -> Option<NodeId> {
        self.nodes
            .binary_search_by_key(&id, |n| n.component.id)
            .ok()
            .map(NodeId)
    }

    /// Depth-first, pre-order walk in paint order
    pub fn preorder(&self) -> Preorder<'_, 'a> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Indented outline, one component per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for id in self.preorder() {
            let node = self.node(id);
            let c = node.component;
            let _ = write!(out, "{}{} #{}", "  ".repeat(node.depth), c.kind, c.id);
            if !c.name.is_empty() {
                let _ = write!(out, " \"{}\"", c.name);
            }
            out.push('\n');
        }
        out
    }
}

/// Pre-order iterator over a [`PageTree`]
pub struct Preorder<'t, 'a> {
    tree: &'t PageTree<'a>,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tree: &PageTree<'_>, of: NodeId) -> Vec<u64> {
        tree.children(of)
            .iter()
            .map(|&c| tree.component(c).id.0)
            .collect()
    }

    fn page() -> Vec<Component> {
        vec![
            Component::new(1, "container"),
            Component::new(2, "text").with_parent(1).with_order(1),
            Component::new(3, "text").with_parent(1).with_order(0),
            Component::new(4, "image").with_parent(2),
        ]
    }

    #[test]
    fn test_build_orders_children() {
        let components = page();
        let tree = build(&components).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.component(tree.root()).id, ComponentId(1));
        assert_eq!(ids(&tree, tree.root()), vec![3, 2]);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_order_ties_broken_by_id() {
        let components = vec![
            Component::new(10, "container"),
            Component::new(30, "text").with_parent(10),
            Component::new(20, "text").with_parent(10),
        ];
        let tree = build(&components).unwrap();
        assert_eq!(ids(&tree, tree.root()), vec![20, 30]);
    }

    #[test]
    fn test_preorder() {
        let components = page();
        let tree = build(&components).unwrap();
        let order: Vec<u64> = tree
            .preorder()
            .map(|n| tree.component(n).id.0)
            .collect();
        assert_eq!(order, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let components = page();
        let mut reversed = components.clone();
        reversed.reverse();

        let a = build(&components).unwrap();
        let b = build(&reversed).unwrap();
        assert_eq!(a.outline(), b.outline());
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_empty() {
        assert_eq!(build(&[]).unwrap_err(), StructuralError::Empty);
    }

    #[test]
    fn test_no_root() {
        let components = vec![
            Component::new(1, "container").with_parent(2),
            Component::new(2, "container").with_parent(1),
        ];
        let err = build(&components).unwrap_err();
        assert_eq!(err, StructuralError::NoRoot);
        assert_eq!(err.reason(), "no root");
    }

    #[test]
    fn test_multiple_roots() {
        let components = vec![Component::new(2, "container"), Component::new(1, "text")];
        let err = build(&components).unwrap_err();
        assert_eq!(
            err,
            StructuralError::MultipleRoots(vec![ComponentId(1), ComponentId(2)])
        );
        assert_eq!(err.reason(), "multiple roots");
    }

    #[test]
    fn test_dangling_parent() {
        let components = vec![
            Component::new(1, "container"),
            Component::new(2, "text").with_parent(99),
        ];
        let err = build(&components).unwrap_err();
        assert_eq!(err.component_id(), Some(ComponentId(2)));
        assert_eq!(err.reason(), "dangling parent reference");
    }

    #[test]
    fn test_cycle() {
        let components = vec![
            Component::new(1, "container"),
            Component::new(2, "container").with_parent(3),
            Component::new(3, "container").with_parent(2),
        ];
        let err = build(&components).unwrap_err();
        assert_eq!(
            err,
            StructuralError::CycleOrOrphan(vec![ComponentId(2), ComponentId(3)])
        );
    }

    #[test]
    fn test_self_parent() {
        let components = vec![
            Component::new(1, "container"),
            Component::new(2, "container").with_parent(2),
        ];
        let err = build(&components).unwrap_err();
        assert_eq!(err.reason(), "cycle or orphaned subtree");
        assert_eq!(err.component_id(), Some(ComponentId(2)));
    }

    #[test]
    fn test_duplicate_id() {
        let components = vec![
            Component::new(1, "container"),
            Component::new(1, "text").with_parent(1),
        ];
        assert_eq!(
            build(&components).unwrap_err(),
            StructuralError::DuplicateId(ComponentId(1))
        );
    }

    #[test]
    fn test_mixed_pages() {
        let components = vec![
            Component::new(1, "container").with_page(1),
            Component::new(2, "text").with_parent(1).with_page(2),
        ];
        let err = build(&components).unwrap_err();
        assert!(matches!(err, StructuralError::MixedPages { .. }));
        assert_eq!(err.component_id(), Some(ComponentId(2)));
    }

    #[test]
    fn test_find_and_outline() {
        let components = vec![
            Component::new(1, "container").with_name("Page"),
            Component::new(2, "text").with_parent(1).with_name("Title"),
        ];
        let tree = build(&components).unwrap();
        let title = tree.find(ComponentId(2)).unwrap();
        assert_eq!(tree.node(title).parent, Some(tree.root()));
        assert!(tree.find(ComponentId(3)).is_none());
        assert_eq!(
            tree.outline(),
            "container #1 \"Page\"\n  text #2 \"Title\"\n"
        );
    }
}
