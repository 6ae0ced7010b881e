//! View tree: the host interface the engine talks to, and an in-memory tree
//! implementing it.

use std::collections::HashMap;
use std::fmt;

use super::direction::Direction;
use super::types::{Rect, Size};

/// Handle to a view owned by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capabilities the layout engine needs from the host's view hierarchy.
///
/// Frames are expressed in the coordinate space of the view's parent. A view
/// without a parent is a root; its frame is in root space.
pub trait ViewHost {
    fn frame(&self, view: ViewId) -> Rect;

    fn set_frame(&mut self, view: ViewId, frame: Rect);

    fn parent(&self, view: ViewId) -> Option<ViewId>;

    fn children(&self, view: ViewId) -> Vec<ViewId>;

    /// Hidden or detached views are excluded from reference lists
    fn is_eligible(&self, view: ViewId) -> bool;

    /// Measure the view's content for a proposed size; `None` when the view
    /// has no intrinsic size
    fn size_that_fits(&self, _view: ViewId, _proposed: Size) -> Option<Size> {
        None
    }

    /// Direction used when the pass is configured as `auto`
    fn locale_direction(&self) -> Direction {
        Direction::Ltr
    }

    /// Human readable name used in diagnostics
    fn describe(&self, view: ViewId) -> String {
        view.to_string()
    }
}

/// A single node in a [`ViewTree`]
#[derive(Debug, Clone)]
pub struct ViewNode {
    pub name: String,
    pub frame: Rect,
    pub parent: Option<ViewId>,
    pub children: Vec<ViewId>,
    pub hidden: bool,
    /// Intrinsic content size reported by `size_that_fits`
    pub content_size: Option<Size>,
}

/// Arena-backed view hierarchy with unique view names
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
    by_name: HashMap<String, ViewId>,
    locale: Direction,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direction reported to `auto` passes
    pub fn with_locale(mut self, locale: Direction) -> Self {
        self.locale = locale;
        self
    }

    /// Add a view. Returns `None` if the name is taken or the parent is unknown.
    pub fn add(&mut self, name: impl Into<String>, frame: Rect, parent: Option<ViewId>) -> Option<ViewId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return None;
        }
        if let Some(p) = parent {
            self.nodes.get(p.0)?;
        }
        let id = ViewId(self.nodes.len());
        self.nodes.push(ViewNode {
            name: name.clone(),
            frame,
            parent,
            children: vec![],
            hidden: false,
            content_size: None,
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        self.by_name.insert(name, id);
        Some(id)
    }

    pub fn add_root(&mut self, name: impl Into<String>, frame: Rect) -> Option<ViewId> {
        self.add(name, frame, None)
    }

    pub fn add_child(&mut self, parent: ViewId, name: impl Into<String>, frame: Rect) -> Option<ViewId> {
        self.add(name, frame, Some(parent))
    }

    pub fn node(&self, view: ViewId) -> Option<&ViewNode> {
        self.nodes.get(view.0)
    }

    pub fn node_mut(&mut self, view: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(view.0)
    }

    pub fn find(&self, name: &str) -> Option<ViewId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, view: ViewId) -> Option<&str> {
        self.node(view).map(|n| n.name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    pub fn set_hidden(&mut self, view: ViewId, hidden: bool) {
        if let Some(node) = self.node_mut(view) {
            node.hidden = hidden;
        }
    }

    pub fn set_content_size(&mut self, view: ViewId, size: Size) {
        if let Some(node) = self.node_mut(view) {
            node.content_size = Some(size);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All views in depth-first order, roots in insertion order
    pub fn depth_first(&self) -> Vec<(ViewId, usize)> {
        fn visit(tree: &ViewTree, id: ViewId, depth: usize, out: &mut Vec<(ViewId, usize)>) {
            out.push((id, depth));
            for &child in &tree.nodes[id.0].children {
                visit(tree, child, depth + 1, out);
            }
        }
        let mut out = Vec::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if node.parent.is_none() {
                visit(self, ViewId(i), 0, &mut out);
            }
        }
        out
    }
}

impl ViewHost for ViewTree {
    fn frame(&self, view: ViewId) -> Rect {
        self.node(view).map(|n| n.frame).unwrap_or_default()
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.node_mut(view) {
            node.frame = frame;
        }
    }

    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).and_then(|n| n.parent)
    }

    fn children(&self, view: ViewId) -> Vec<ViewId> {
        self.node(view).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn is_eligible(&self, view: ViewId) -> bool {
        self.node(view).is_some_and(|n| !n.hidden)
    }

    fn size_that_fits(&self, view: ViewId, _proposed: Size) -> Option<Size> {
        self.node(view).and_then(|n| n.content_size)
    }

    fn locale_direction(&self) -> Direction {
        self.locale
    }

    fn describe(&self, view: ViewId) -> String {
        self.name(view)
            .map(str::to_string)
            .unwrap_or_else(|| view.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find() {
        let mut tree = ViewTree::new();
        let root = tree.add_root("root", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let child = tree.add_child(root, "child", Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();

        assert_eq!(tree.find("child"), Some(child));
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.children(root), vec![child]);
        assert_eq!(tree.describe(child), "child");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut tree = ViewTree::new();
        tree.add_root("a", Rect::zero()).unwrap();
        assert!(tree.add_root("a", Rect::zero()).is_none());
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut tree = ViewTree::new();
        assert!(tree.add("a", Rect::zero(), Some(ViewId(3))).is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_hidden_views_not_eligible() {
        let mut tree = ViewTree::new();
        let a = tree.add_root("a", Rect::zero()).unwrap();
        assert!(tree.is_eligible(a));
        tree.set_hidden(a, true);
        assert!(!tree.is_eligible(a));
        assert!(!tree.is_eligible(ViewId(42)));
    }

    #[test]
    fn test_content_size_measurement() {
        let mut tree = ViewTree::new();
        let a = tree.add_root("a", Rect::zero()).unwrap();
        assert_eq!(tree.size_that_fits(a, Size::new(10.0, 10.0)), None);
        tree.set_content_size(a, Size::new(40.0, 12.0));
        assert_eq!(tree.size_that_fits(a, Size::new(10.0, 10.0)), Some(Size::new(40.0, 12.0)));
    }

    #[test]
    fn test_depth_first_order() {
        let mut tree = ViewTree::new();
        let root = tree.add_root("root", Rect::zero()).unwrap();
        let a = tree.add_child(root, "a", Rect::zero()).unwrap();
        let other = tree.add_root("other", Rect::zero()).unwrap();
        let b = tree.add_child(a, "b", Rect::zero()).unwrap();

        assert_eq!(
            tree.depth_first(),
            vec![(root, 0), (a, 1), (b, 2), (other, 0)]
        );
    }
}
