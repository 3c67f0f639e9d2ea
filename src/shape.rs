//! Skeleton shapes - the measured output of a scan.
//!
//! A scan turns the content subtree into a flat list of positioned shapes.
//! Every scan produces the list from scratch; nothing is diffed or patched
//! against the previous list, and keys are only stable within one scan.

use crate::types::{BorderStyle, Radius, Rect, Rgba, Shadow};

// =============================================================================
// Shape kind
// =============================================================================

/// How a captured element is rendered while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Atomic/text unit: rendered as a pulsing placeholder block.
    Primitive,
    /// Structural wrapper with visible decoration: rendered as a static
    /// styled clone of its captured background/border/shadow.
    Container,
}

// =============================================================================
// Container snapshot
// =============================================================================

/// Point-in-time clone of a container's visible decoration.
///
/// Frozen at scan time; later style changes on the live element do not
/// update shapes already produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSnapshot {
    pub background: Rgba,
    pub border: BorderStyle,
    pub border_color: Rgba,
    pub radius: Radius,
    pub shadow: Option<Shadow>,
}

// =============================================================================
// SkeletonShape
// =============================================================================

/// One positioned placeholder unit produced by a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonShape {
    /// Sequential index within this scan. Not stable across scans.
    pub key: usize,
    /// Primitive (pulsing) or Container (static clone).
    pub kind: ShapeKind,
    /// Geometry relative to the scan root.
    pub rect: Rect,
    /// Effective corner radius after precedence resolution.
    pub radius: Radius,
    /// Frozen decoration for `Container` shapes; `None` for primitives.
    pub snapshot: Option<ContainerSnapshot>,
}

impl SkeletonShape {
    /// Shorthand used by the scanner for primitive shapes.
    pub fn primitive(key: usize, rect: Rect, radius: Radius) -> Self {
        Self {
            key,
            kind: ShapeKind::Primitive,
            rect,
            radius,
            snapshot: None,
        }
    }

    /// Shorthand used by the scanner for container shapes.
    pub fn container(key: usize, rect: Rect, radius: Radius, snapshot: ContainerSnapshot) -> Self {
        Self {
            key,
            kind: ShapeKind::Container,
            rect,
            radius,
            snapshot: Some(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_constructors() {
        let p = SkeletonShape::primitive(0, Rect::new(1, 2, 3, 4), Radius::Cells(4));
        assert_eq!(p.kind, ShapeKind::Primitive);
        assert!(p.snapshot.is_none());

        let snap = ContainerSnapshot {
            background: Rgba::rgb(30, 30, 30),
            border: BorderStyle::Single,
            border_color: Rgba::GRAY,
            radius: Radius::Cells(1),
            shadow: None,
        };
        let c = SkeletonShape::container(1, Rect::new(0, 0, 10, 5), Radius::Cells(1), snap.clone());
        assert_eq!(c.kind, ShapeKind::Container);
        assert_eq!(c.snapshot, Some(snap));
    }
}
