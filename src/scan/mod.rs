//! Layout scanner - traversal, measurement, and shape production.
//!
//! One scan is a single synchronous pass: walk the content subtree in
//! document order, classify every element, capture geometry relative to the
//! scan root, and emit a fresh shape list. The previous list is always
//! discarded wholesale; keys are sequential per scan and carry no identity
//! across scans.
//!
//! The scanner only reads geometry the host layout engine already computed.
//! It never lays anything out itself.

pub mod classify;

pub use classify::{classify, has_direct_text, Classification};

use crate::config::SkeletonConfig;
use crate::shape::{ContainerSnapshot, SkeletonShape};
use crate::tree::{Display, NodeId, Role, VisualStyle, VisualTree};
use crate::types::{Radius, Rect};

// =============================================================================
// Radius precedence
// =============================================================================

/// Per-role default radius for primitives whose own style is square.
const fn role_default_radius(role: Role) -> Radius {
    match role {
        Role::Button => Radius::Cells(6),
        _ => Radius::Cells(4),
    }
}

/// Resolve the effective radius of one shape.
///
/// Precedence: explicit config override, then the element's own captured
/// radius, then (for primitives only) the per-role default.
fn resolve_radius(
    config: &SkeletonConfig,
    role: Role,
    style: &VisualStyle,
    classification: Classification,
) -> Radius {
    if let Some(radius) = config.border_radius {
        return radius;
    }
    match classification {
        Classification::Primitive => {
            if style.corner_radius.is_zero() {
                role_default_radius(role)
            } else {
                style.corner_radius
            }
        }
        _ => style.corner_radius,
    }
}

// =============================================================================
// Scan
// =============================================================================

/// Scan the content subtree and produce a fresh shape list.
///
/// An unrooted tree is "not measurable yet": the scan is a no-op returning
/// an empty list, never an error. A rooted tree that classifies nothing but
/// still measures a nonzero box falls back to one full-size primitive, so a
/// loading state over real content is never visually empty.
pub fn scan(tree: &VisualTree, config: &SkeletonConfig) -> Vec<SkeletonShape> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let origin = tree.rect(root);
    let mut shapes = Vec::new();

    // The root is the coordinate origin, never a shape itself
    for child in tree.children(root) {
        walk(tree, child, origin, config, &mut shapes);
    }

    // Nothing classified but the root has real size: a single full-size
    // pulse keeps the loading state visible
    if shapes.is_empty() && (origin.width > 0 || origin.height > 0) {
        shapes.push(SkeletonShape::primitive(
            0,
            Rect::new(0, 0, origin.width, origin.height),
            config.border_radius.unwrap_or(Radius::Cells(4)),
        ));
    }

    shapes
}

/// Pre-order filtered walk.
///
/// Non-displayed subtrees are rejected outright. Recorded elements keep
/// descending: a decorated card still contributes the image and text shapes
/// nested inside it, painted later and therefore on top.
fn walk(
    tree: &VisualTree,
    id: NodeId,
    origin: Rect,
    config: &SkeletonConfig,
    out: &mut Vec<SkeletonShape>,
) {
    let style = tree.style(id);
    if style.display == Display::None {
        return;
    }

    let role = tree.role(id);
    let text = tree.text(id);
    let classification = classify(role, text.as_deref(), &style);

    if classification != Classification::Ignored {
        let rect = tree.rect(id).relative_to(origin);
        let radius = resolve_radius(config, role, &style, classification);
        let key = out.len();

        let shape = match classification {
            Classification::Primitive => SkeletonShape::primitive(key, rect, radius),
            Classification::Container => SkeletonShape::container(
                key,
                rect,
                radius,
                ContainerSnapshot {
                    background: style.background,
                    border: style.border,
                    border_color: style.border_color,
                    radius: style.corner_radius,
                    shadow: style.shadow,
                },
            ),
            Classification::Ignored => unreachable!(),
        };
        out.push(shape);
    }

    for child in tree.children(id) {
        walk(tree, child, origin, config, out);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;
    use crate::tree::VisualNode;
    use crate::types::{BorderStyle, Rgba};

    fn styled(background: Rgba) -> VisualStyle {
        VisualStyle {
            background,
            ..VisualStyle::default()
        }
    }

    /// Root wrapper at (0,0) sized 100x50 with no styling of its own.
    fn rooted_tree() -> (VisualTree, NodeId) {
        let tree = VisualTree::new();
        let root = tree.insert(
            VisualNode::block().with_rect(Rect::new(0, 0, 100, 50)),
            None,
        );
        tree.set_root(root);
        (tree, root)
    }

    #[test]
    fn test_unrooted_tree_scans_empty() {
        let tree = VisualTree::new();
        tree.insert(VisualNode::text("floating"), None);
        assert!(scan(&tree, &SkeletonConfig::default()).is_empty());
    }

    #[test]
    fn test_fallback_for_unstyled_wrappers() {
        let (tree, root) = rooted_tree();
        let a = tree.insert(VisualNode::block().with_rect(Rect::new(0, 0, 100, 20)), Some(root));
        tree.insert(VisualNode::block().with_rect(Rect::new(0, 0, 100, 10)), Some(a));

        let shapes = scan(&tree, &SkeletonConfig::default());
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind, ShapeKind::Primitive);
        assert_eq!(shapes[0].rect, Rect::new(0, 0, 100, 50));
    }

    #[test]
    fn test_no_fallback_for_zero_size_root() {
        let tree = VisualTree::new();
        let root = tree.insert(VisualNode::block(), None);
        tree.set_root(root);
        tree.insert(VisualNode::block(), Some(root));

        assert!(scan(&tree, &SkeletonConfig::default()).is_empty());
    }

    #[test]
    fn test_positions_are_root_relative() {
        let tree = VisualTree::new();
        let root = tree.insert(
            VisualNode::block().with_rect(Rect::new(10, 5, 80, 40)),
            None,
        );
        tree.set_root(root);
        tree.insert(
            VisualNode::image().with_rect(Rect::new(14, 8, 20, 10)),
            Some(root),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].rect, Rect::new(4, 3, 20, 10));
    }

    #[test]
    fn test_ignored_wrapper_descendants_still_appear() {
        let (tree, root) = rooted_tree();
        let wrapper = tree.insert(
            VisualNode::block().with_rect(Rect::new(0, 0, 100, 50)),
            Some(root),
        );
        tree.insert(
            VisualNode::text("Title").with_rect(Rect::new(2, 1, 30, 1)),
            Some(wrapper),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        // The wrapper itself is invisible; only the text shape is captured
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind, ShapeKind::Primitive);
        assert_eq!(shapes[0].rect, Rect::new(2, 1, 30, 1));
    }

    #[test]
    fn test_container_nests_primitives() {
        let (tree, root) = rooted_tree();
        let card = tree.insert(
            VisualNode::block()
                .with_style(styled(Rgba::rgb(30, 30, 46)))
                .with_rect(Rect::new(0, 0, 60, 20)),
            Some(root),
        );
        tree.insert(
            VisualNode::image().with_rect(Rect::new(2, 2, 10, 5)),
            Some(card),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        assert_eq!(shapes.len(), 2);
        // Document order: container first, nested primitive after (on top)
        assert_eq!(shapes[0].kind, ShapeKind::Container);
        assert_eq!(shapes[1].kind, ShapeKind::Primitive);
        assert_eq!(shapes[0].key, 0);
        assert_eq!(shapes[1].key, 1);
    }

    #[test]
    fn test_display_none_subtree_is_rejected() {
        let (tree, root) = rooted_tree();
        let hidden = tree.insert(
            VisualNode::block()
                .with_style(VisualStyle {
                    display: Display::None,
                    ..VisualStyle::default()
                })
                .with_rect(Rect::new(0, 0, 50, 50)),
            Some(root),
        );
        // A would-be primitive inside a non-displayed subtree
        tree.insert(
            VisualNode::text("invisible").with_rect(Rect::new(1, 1, 9, 1)),
            Some(hidden),
        );
        tree.insert(
            VisualNode::text("visible").with_rect(Rect::new(0, 40, 7, 1)),
            Some(root),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].rect, Rect::new(0, 40, 7, 1));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let (tree, root) = rooted_tree();
        tree.insert(
            VisualNode::image().with_rect(Rect::new(0, 0, 60, 30)),
            Some(root),
        );
        tree.insert(
            VisualNode::text("Headline").with_rect(Rect::new(0, 30, 40, 1)),
            Some(root),
        );

        let config = SkeletonConfig::default();
        let first = scan(&tree, &config);
        let second = scan(&tree, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_radius_beats_computed_percent() {
        let (tree, root) = rooted_tree();
        tree.insert(
            VisualNode::image()
                .with_style(VisualStyle {
                    corner_radius: Radius::Percent(50.0),
                    ..VisualStyle::default()
                })
                .with_rect(Rect::new(0, 0, 20, 20)),
            Some(root),
        );

        let config = SkeletonConfig::default().with_border_radius(Radius::Cells(10));
        let shapes = scan(&tree, &config);
        assert_eq!(shapes[0].radius, Radius::Cells(10));
    }

    #[test]
    fn test_role_default_radii() {
        let (tree, root) = rooted_tree();
        tree.insert(
            VisualNode::button("Go").with_rect(Rect::new(0, 0, 10, 3)),
            Some(root),
        );
        tree.insert(
            VisualNode::image().with_rect(Rect::new(0, 4, 10, 10)),
            Some(root),
        );
        tree.insert(
            VisualNode::text("plain").with_rect(Rect::new(0, 15, 5, 1)),
            Some(root),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        assert_eq!(shapes[0].radius, Radius::Cells(6)); // button
        assert_eq!(shapes[1].radius, Radius::Cells(4)); // image
        assert_eq!(shapes[2].radius, Radius::Cells(4)); // generic text
    }

    #[test]
    fn test_own_radius_beats_role_default() {
        let (tree, root) = rooted_tree();
        tree.insert(
            VisualNode::image()
                .with_style(VisualStyle {
                    corner_radius: Radius::Cells(2),
                    ..VisualStyle::default()
                })
                .with_rect(Rect::new(0, 0, 20, 20)),
            Some(root),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        assert_eq!(shapes[0].radius, Radius::Cells(2));
    }

    #[test]
    fn test_container_snapshot_is_frozen() {
        let (tree, root) = rooted_tree();
        let card_bg = Rgba::rgb(24, 24, 37);
        let card = tree.insert(
            VisualNode::block()
                .with_style(VisualStyle {
                    background: card_bg,
                    border: BorderStyle::Rounded,
                    border_color: Rgba::GRAY,
                    ..VisualStyle::default()
                })
                .with_rect(Rect::new(0, 0, 40, 12)),
            Some(root),
        );

        let shapes = scan(&tree, &SkeletonConfig::default());
        let snapshot = shapes[0].snapshot.clone().unwrap();
        assert_eq!(snapshot.background, card_bg);
        assert_eq!(snapshot.border, BorderStyle::Rounded);

        // Restyle the live element: captured shapes must not move
        tree.set_style(card, styled(Rgba::rgb(200, 0, 0)));
        assert_eq!(shapes[0].snapshot.as_ref().unwrap().background, card_bg);
    }
}
