//! Visual tree - the uniform node abstraction the scanner walks.
//!
//! A `VisualTree` holds the measured content subtree: every node exposes its
//! role, direct text, computed visual style, and bounding box, independent of
//! whichever layout engine produced the geometry. The layout bridge fills one
//! in from a solved taffy tree; tests build them by hand.
//!
//! The tree is a shared handle (cheap to clone). Structural and text
//! mutations bump a revision counter and notify registered listeners, which
//! is what drives the controller's re-scans.
//!
//! # Example
//!
//! ```
//! use skeleton_tui::tree::{VisualTree, VisualNode, Role};
//! use skeleton_tui::types::Rect;
//!
//! let tree = VisualTree::new();
//! let root = tree.insert(VisualNode::block().with_rect(Rect::new(0, 0, 40, 10)), None);
//! tree.set_root(root);
//!
//! let child = tree.insert(VisualNode::text("Hello"), Some(root));
//! assert_eq!(tree.children(root), vec![child]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{BorderStyle, Cleanup, Radius, Rect, Rgba, Shadow};

// =============================================================================
// Node identity and roles
// =============================================================================

/// Index of a node within its tree.
pub type NodeId = usize;

/// What kind of element a node stands for.
///
/// The atomic roles (everything but `Block`) mirror leaf-like visual units:
/// pictures, form controls, buttons. They always pulse while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Role {
    /// Generic element. Classification depends on text and styling.
    #[default]
    Block = 0,
    /// Picture/canvas-like content.
    Image = 1,
    /// Clickable button.
    Button = 2,
    /// Text input field.
    Input = 3,
    /// Select/dropdown field.
    Select = 4,
}

impl Role {
    /// Atomic roles are leaf-like visual units that always pulse.
    #[inline]
    pub const fn is_atomic(&self) -> bool {
        !matches!(self, Self::Block)
    }

    /// Interactive roles produce hit regions when content is live.
    #[inline]
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Button | Self::Input | Self::Select)
    }
}

// =============================================================================
// Computed visual style
// =============================================================================

/// Display mode of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Participates in layout and painting.
    #[default]
    Flex,
    /// Removed entirely: no geometry, traversal does not descend.
    None,
}

/// Computed-style snapshot of a node, as the host engine resolved it.
///
/// Only the properties the classifier and the container clone care about.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualStyle {
    /// Display mode. `None` excludes the whole subtree.
    pub display: Display,
    /// Background fill. Transparent means "no visible background".
    pub background: Rgba,
    /// Border style. `BorderStyle::None` means no border.
    pub border: BorderStyle,
    /// Border color. A fully transparent color disables the border.
    pub border_color: Rgba,
    /// Corner radius as computed by the host styling.
    pub corner_radius: Radius,
    /// Optional drop shadow.
    pub shadow: Option<Shadow>,
    /// Foreground color for direct text.
    pub fg: Rgba,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            display: Display::Flex,
            background: Rgba::TRANSPARENT,
            border: BorderStyle::None,
            border_color: Rgba::TERMINAL_DEFAULT,
            corner_radius: Radius::ZERO,
            shadow: None,
            fg: Rgba::TERMINAL_DEFAULT,
        }
    }
}

impl VisualStyle {
    /// True when the node paints a visible background.
    #[inline]
    pub fn has_background(&self) -> bool {
        !self.background.is_transparent() && !self.background.is_terminal_default()
    }

    /// True when the node paints a visible border.
    #[inline]
    pub fn has_border(&self) -> bool {
        self.border != BorderStyle::None && !self.border_color.is_transparent()
    }

    /// True when the node casts a shadow.
    #[inline]
    pub fn has_shadow(&self) -> bool {
        self.shadow.is_some()
    }
}

// =============================================================================
// VisualNode
// =============================================================================

/// One element of the measured subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualNode {
    /// Element kind.
    pub role: Role,
    /// Direct text content (text nodes immediately inside this element,
    /// not text from descendants).
    pub text: Option<String>,
    /// Computed style snapshot.
    pub style: VisualStyle,
    /// Bounding box in absolute cell coordinates, as measured by the host
    /// layout engine.
    pub rect: Rect,
}

impl VisualNode {
    /// Generic block element.
    pub fn block() -> Self {
        Self::default()
    }

    /// Element with direct text content.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::default()
        }
    }

    /// Picture-like element.
    pub fn image() -> Self {
        Self {
            role: Role::Image,
            ..Self::default()
        }
    }

    /// Button element with a label.
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            role: Role::Button,
            text: Some(label.into()),
            ..Self::default()
        }
    }

    /// Input field element.
    pub fn input() -> Self {
        Self {
            role: Role::Input,
            ..Self::default()
        }
    }

    /// Set the style (builder style).
    pub fn with_style(mut self, style: VisualStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the bounding box (builder style).
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

// =============================================================================
// VisualTree
// =============================================================================

struct TreeNode {
    node: VisualNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct TreeInner {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    revision: u64,
    listeners: Vec<(u64, Rc<dyn Fn()>)>,
    next_listener_id: u64,
}

/// Shared handle to a visual tree.
///
/// Cloning the handle shares the underlying tree. Structural mutations
/// (insert/remove) and text changes notify mutation listeners; style and
/// geometry updates only bump the revision, matching how the host layout
/// pass rewrites every rect without spamming notifications.
#[derive(Clone)]
pub struct VisualTree {
    inner: Rc<RefCell<TreeInner>>,
}

impl Default for VisualTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualTree {
    /// Create an empty, unrooted tree.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TreeInner {
                nodes: Vec::new(),
                root: None,
                revision: 0,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Check whether two handles point at the same underlying tree.
    pub fn same_tree(&self, other: &VisualTree) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert a node, optionally attaching it to a parent.
    ///
    /// Notifies mutation listeners when the node lands under a parent.
    pub fn insert(&self, node: VisualNode, parent: Option<NodeId>) -> NodeId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.nodes.len();
            inner.nodes.push(TreeNode {
                node,
                parent,
                children: Vec::new(),
            });
            if let Some(p) = parent {
                inner.nodes[p].children.push(id);
            }
            inner.revision += 1;
            id
        };
        if parent.is_some() {
            self.notify();
        }
        id
    }

    /// Mark a node as the scan root.
    pub fn set_root(&self, id: NodeId) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.root = Some(id);
            inner.revision += 1;
        }
        self.notify();
    }

    /// The scan root, if the tree is mounted.
    pub fn root(&self) -> Option<NodeId> {
        self.inner.borrow().root
    }

    /// Detach a node (and its whole subtree) from its parent.
    ///
    /// The subtree becomes unreachable from the root; ids stay valid.
    pub fn remove(&self, id: NodeId) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(parent) = inner.nodes[id].parent.take() {
                inner.nodes[parent].children.retain(|&c| c != id);
            }
            if inner.root == Some(id) {
                inner.root = None;
            }
            inner.revision += 1;
        }
        self.notify();
    }

    /// Child ids of a node, in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.inner.borrow().nodes[id].children.clone()
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.inner.borrow().nodes[id].parent
    }

    /// Number of nodes ever inserted (detached subtrees included).
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// True when no node was ever inserted.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().nodes.is_empty()
    }

    // =========================================================================
    // Node data access
    // =========================================================================

    /// Element role.
    pub fn role(&self, id: NodeId) -> Role {
        self.inner.borrow().nodes[id].node.role
    }

    /// Direct text content.
    pub fn text(&self, id: NodeId) -> Option<String> {
        self.inner.borrow().nodes[id].node.text.clone()
    }

    /// Computed style snapshot.
    pub fn style(&self, id: NodeId) -> VisualStyle {
        self.inner.borrow().nodes[id].node.style.clone()
    }

    /// Bounding box in absolute cell coordinates.
    pub fn rect(&self, id: NodeId) -> Rect {
        self.inner.borrow().nodes[id].node.rect
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace the direct text of a node. Notifies listeners.
    pub fn set_text(&self, id: NodeId, text: Option<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.nodes[id].node.text = text;
            inner.revision += 1;
        }
        self.notify();
    }

    /// Replace the computed style of a node.
    ///
    /// Style changes do not notify: the scan snapshots styles at scan time,
    /// and observation covers structure and text only.
    pub fn set_style(&self, id: NodeId, style: VisualStyle) {
        let mut inner = self.inner.borrow_mut();
        inner.nodes[id].node.style = style;
        inner.revision += 1;
    }

    /// Replace the bounding box of a node.
    ///
    /// Geometry updates do not notify: the layout pass rewrites every rect
    /// and the resize watcher is the signal for geometry changes.
    pub fn set_rect(&self, id: NodeId, rect: Rect) {
        let mut inner = self.inner.borrow_mut();
        inner.nodes[id].node.rect = rect;
        inner.revision += 1;
    }

    /// Monotonic revision counter, bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    // =========================================================================
    // Mutation listeners
    // =========================================================================

    /// Register a mutation listener.
    ///
    /// Fires on structural changes (insert under a parent, remove, root
    /// change) and on text changes. Returns an unsubscribe closure.
    pub fn on_mutate(&self, listener: Rc<dyn Fn()>) -> Cleanup {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener));
            id
        };

        let inner = Rc::downgrade(&self.inner);
        Box::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Number of live mutation listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    // Listeners are cloned out before invocation so a callback may read
    // (or even mutate) the tree without re-entrant borrow panics.
    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            (*listener)();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    #[test]
    fn test_insert_and_structure() {
        let tree = VisualTree::new();
        let root = tree.insert(VisualNode::block(), None);
        tree.set_root(root);
        let a = tree.insert(VisualNode::text("a"), Some(root));
        let b = tree.insert(VisualNode::image(), Some(root));

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.children(root), vec![a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.role(b), Role::Image);
        assert_eq!(tree.text(a).as_deref(), Some("a"));
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let tree = VisualTree::new();
        let root = tree.insert(VisualNode::block(), None);
        tree.set_root(root);
        let a = tree.insert(VisualNode::block(), Some(root));
        let _a_child = tree.insert(VisualNode::text("x"), Some(a));

        tree.remove(a);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_listener_fires_on_structure_and_text() {
        let tree = VisualTree::new();
        let root = tree.insert(VisualNode::block(), None);
        tree.set_root(root);

        let fired = Rc::new(StdCell::new(0));
        let fired_clone = fired.clone();
        let unsub = tree.on_mutate(Rc::new(move || {
            fired_clone.set(fired_clone.get() + 1);
        }));

        let a = tree.insert(VisualNode::block(), Some(root));
        assert_eq!(fired.get(), 1);

        tree.set_text(a, Some("hi".to_string()));
        assert_eq!(fired.get(), 2);

        // Style and geometry are silent
        tree.set_style(a, VisualStyle::default());
        tree.set_rect(a, Rect::new(0, 0, 5, 5));
        assert_eq!(fired.get(), 2);

        unsub();
        tree.insert(VisualNode::block(), Some(root));
        assert_eq!(fired.get(), 2);
        assert_eq!(tree.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_read_tree() {
        let tree = VisualTree::new();
        let root = tree.insert(VisualNode::block(), None);
        tree.set_root(root);

        let seen = Rc::new(StdCell::new(0usize));
        let seen_clone = seen.clone();
        let tree_clone = tree.clone();
        let _unsub = tree.on_mutate(Rc::new(move || {
            // Reading the tree inside a notification must not panic
            seen_clone.set(tree_clone.len());
        }));

        tree.insert(VisualNode::block(), Some(root));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_revision_bumps() {
        let tree = VisualTree::new();
        let r0 = tree.revision();
        let root = tree.insert(VisualNode::block(), None);
        assert!(tree.revision() > r0);
        tree.set_rect(root, Rect::new(0, 0, 1, 1));
        assert!(tree.revision() > r0 + 1);
    }

    #[test]
    fn test_style_predicates() {
        let mut style = VisualStyle::default();
        assert!(!style.has_background());
        assert!(!style.has_border());
        assert!(!style.has_shadow());

        style.background = Rgba::rgb(40, 40, 40);
        assert!(style.has_background());

        style.background = Rgba::TERMINAL_DEFAULT;
        assert!(!style.has_background());

        style.border = BorderStyle::Single;
        assert!(style.has_border());
        style.border_color = Rgba::TRANSPARENT;
        assert!(!style.has_border());

        style.shadow = Some(Shadow::default());
        assert!(style.has_shadow());
    }
}
