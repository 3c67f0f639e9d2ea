//! Taffy bridge - turns declarative element specs into a measured tree.
//!
//! This is the host-layout adapter: element specs become taffy styles, taffy
//! computes W3C flexbox layout, and the results come back as a [`VisualTree`]
//! with absolute cell rects. The scanner itself never touches taffy; it only
//! reads the geometry this bridge (or any other host) wrote into the tree.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display as TaffyDisplay,
    FlexDirection as TaffyFlexDirection, LengthPercentage, LengthPercentageAuto,
    NodeId as TaffyNodeId, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::tree::{Display, NodeId, VisualNode, VisualStyle, VisualTree};
use crate::types::{Dimension, Rect};

// =============================================================================
// Element spec
// =============================================================================

/// Flex main-axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

/// Layout-facing properties of an element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutStyle {
    pub width: Dimension,
    pub height: Dimension,
    pub direction: FlexDirection,
    /// Padding on all sides, in cells.
    pub padding: u16,
    /// Margin on all sides, in cells.
    pub margin: u16,
    /// Gap between children, in cells.
    pub gap: u16,
}

/// Declarative element: visual identity plus layout intent plus children.
///
/// # Example
///
/// ```
/// use skeleton_tui::layout::{solve, Element};
/// use skeleton_tui::types::Dimension;
///
/// let card = Element::block()
///     .with_size(Dimension::Cells(40), Dimension::Auto)
///     .with_child(Element::image(12, 6))
///     .with_child(Element::text("Caption"));
///
/// let tree = solve(&card, 80, 24);
/// assert!(tree.root().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Role, direct text, and computed-style snapshot.
    pub node: VisualNode,
    /// Layout intent handed to taffy.
    pub layout: LayoutStyle,
    /// Child elements, in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Wrap an already-built visual node.
    pub fn new(node: VisualNode) -> Self {
        Self {
            node,
            ..Self::default()
        }
    }

    /// Generic block element.
    pub fn block() -> Self {
        Self::new(VisualNode::block())
    }

    /// Text-bearing element.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(VisualNode::text(content))
    }

    /// Picture-like element with a fixed size.
    pub fn image(width: u16, height: u16) -> Self {
        let mut element = Self::new(VisualNode::image());
        element.layout.width = Dimension::Cells(width);
        element.layout.height = Dimension::Cells(height);
        element
    }

    /// Labeled button element.
    pub fn button(label: impl Into<String>) -> Self {
        Self::new(VisualNode::button(label))
    }

    /// Input field element.
    pub fn input() -> Self {
        Self::new(VisualNode::input())
    }

    /// Set explicit dimensions.
    pub fn with_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.layout.width = width;
        self.layout.height = height;
        self
    }

    /// Set the flex direction for children.
    pub fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.layout.direction = direction;
        self
    }

    /// Set padding on all sides.
    pub fn with_padding(mut self, padding: u16) -> Self {
        self.layout.padding = padding;
        self
    }

    /// Set the gap between children.
    pub fn with_gap(mut self, gap: u16) -> Self {
        self.layout.gap = gap;
        self
    }

    /// Set the visual style.
    pub fn with_visual(mut self, style: VisualStyle) -> Self {
        self.node.style = style;
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
    }
}

/// Build a Taffy style from one element spec.
fn build_style(element: &Element) -> Style {
    Style {
        display: match element.node.style.display {
            Display::Flex => TaffyDisplay::Flex,
            Display::None => TaffyDisplay::None,
        },
        flex_direction: to_taffy_direction(element.layout.direction),
        size: Size {
            width: to_taffy_dimension(element.layout.width),
            height: to_taffy_dimension(element.layout.height),
        },
        margin: TaffyRect {
            top: LengthPercentageAuto::Length(element.layout.margin as f32),
            right: LengthPercentageAuto::Length(element.layout.margin as f32),
            bottom: LengthPercentageAuto::Length(element.layout.margin as f32),
            left: LengthPercentageAuto::Length(element.layout.margin as f32),
        },
        padding: TaffyRect {
            top: LengthPercentage::Length(element.layout.padding as f32),
            right: LengthPercentage::Length(element.layout.padding as f32),
            bottom: LengthPercentage::Length(element.layout.padding as f32),
            left: LengthPercentage::Length(element.layout.padding as f32),
        },
        gap: Size {
            width: LengthPercentage::Length(element.layout.gap as f32),
            height: LengthPercentage::Length(element.layout.gap as f32),
        },
        ..Default::default()
    }
}

// =============================================================================
// Text measurement
// =============================================================================

/// Intrinsic single-line width of direct text, in cells.
fn text_width(text: &str) -> u16 {
    text.chars().count().min(u16::MAX as usize) as u16
}

/// Measure function for text leaves: wrap to the available width.
fn measure_text(
    intrinsic_width: u16,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    if intrinsic_width == 0 {
        return Size::ZERO;
    }

    let avail_width = match available_space.width {
        AvailableSpace::Definite(w) => w.max(1.0) as u16,
        AvailableSpace::MinContent => intrinsic_width,
        AvailableSpace::MaxContent => u16::MAX,
    };

    let width = known_dimensions
        .width
        .unwrap_or_else(|| intrinsic_width.min(avail_width) as f32);
    let lines = (intrinsic_width as f32 / width.max(1.0)).ceil().max(1.0);
    let height = known_dimensions.height.unwrap_or(lines);

    Size { width, height }
}

// =============================================================================
// Solve
// =============================================================================

/// Lay out an element spec and produce the measured visual tree.
///
/// `available_width`/`available_height` bound the root, the way a terminal
/// viewport bounds a mounted component. Every node's rect comes back in
/// absolute cell coordinates.
pub fn solve(root: &Element, available_width: u16, available_height: u16) -> VisualTree {
    let tree = VisualTree::new();
    let mut taffy: TaffyTree<u16> = TaffyTree::new();

    let root_ids = build_node(root, None, &tree, &mut taffy);
    tree.set_root(root_ids.0);

    let available = Size {
        width: AvailableSpace::Definite(available_width as f32),
        height: AvailableSpace::Definite(available_height as f32),
    };

    let _ = taffy.compute_layout_with_measure(
        root_ids.1,
        available,
        |known_dimensions, available_space, _node_id, context, _style| match context {
            Some(&mut intrinsic) => measure_text(intrinsic, known_dimensions, available_space),
            None => Size::ZERO,
        },
    );

    // Taffy locations are parent-relative; accumulate to absolute coords
    apply_layout(root_ids.0, root_ids.1, (0, 0), &tree, &taffy);

    tree
}

fn build_node(
    element: &Element,
    parent: Option<NodeId>,
    tree: &VisualTree,
    taffy: &mut TaffyTree<u16>,
) -> (NodeId, TaffyNodeId) {
    let id = tree.insert(element.node.clone(), parent);

    let style = build_style(element);
    let is_text_leaf = element.children.is_empty()
        && element
            .node
            .text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());

    let taffy_id = if is_text_leaf {
        let intrinsic = text_width(element.node.text.as_deref().unwrap_or(""));
        taffy
            .new_leaf_with_context(style, intrinsic)
            .expect("taffy leaf")
    } else {
        taffy.new_leaf(style).expect("taffy leaf")
    };

    for child in &element.children {
        let (_, child_taffy) = build_node(child, Some(id), tree, taffy);
        let _ = taffy.add_child(taffy_id, child_taffy);
    }

    (id, taffy_id)
}

fn apply_layout(
    id: NodeId,
    taffy_id: TaffyNodeId,
    parent_origin: (u16, u16),
    tree: &VisualTree,
    taffy: &TaffyTree<u16>,
) {
    let Ok(layout) = taffy.layout(taffy_id) else {
        return;
    };

    let x = parent_origin.0 + layout.location.x.round().max(0.0) as u16;
    let y = parent_origin.1 + layout.location.y.round().max(0.0) as u16;
    let width = layout.size.width.round().max(0.0) as u16;
    let height = layout.size.height.round().max(0.0) as u16;
    tree.set_rect(id, Rect::new(x, y, width, height));

    let children = tree.children(id);
    let taffy_children = taffy.children(taffy_id).unwrap_or_default();
    for (child, child_taffy) in children.into_iter().zip(taffy_children) {
        apply_layout(child, child_taffy, (x, y), tree, taffy);
    }
}

// =============================================================================
// Tests
// =============================================================================
