//! Layer painting - real content and the placeholder overlay.
//!
//! The controller stacks two layers at the scan root's position: the real
//! content (always painted from the live tree, with an opacity that drops to
//! zero while loading) and, only while loading, the overlay of captured
//! shapes. Shapes paint in scan order, so primitives nested inside a
//! container land after it and sit on top, the same stacking the revealed
//! content will have.

use crate::primitive::draw_placeholder;
use crate::render::{FrameBuffer, HitRegion};
use crate::shape::{ShapeKind, SkeletonShape};
use crate::tree::{Display, NodeId, VisualTree};
use crate::types::{Attr, Rect, Rgba};

// =============================================================================
// Content layer
// =============================================================================

/// Paint the live content tree.
///
/// `opacity` 255 paints content as styled; 0 suppresses all visual output
/// while the tree itself stays mounted and measurable. Hit regions for
/// interactive nodes are collected only when a sink is provided; the
/// controller withholds the sink while loading, which is what makes
/// suppressed content non-interactive.
pub fn paint_content(
    fb: &mut FrameBuffer,
    tree: &VisualTree,
    opacity: u8,
    mut regions: Option<&mut Vec<HitRegion>>,
) {
    let Some(root) = tree.root() else {
        return;
    };
    paint_node(fb, tree, root, opacity, &mut regions);
}

fn paint_node(
    fb: &mut FrameBuffer,
    tree: &VisualTree,
    id: NodeId,
    opacity: u8,
    regions: &mut Option<&mut Vec<HitRegion>>,
) {
    let style = tree.style(id);
    if style.display == Display::None {
        return;
    }

    let rect = tree.rect(id);

    if opacity > 0 && !rect.is_empty() {
        if let Some(shadow) = style.shadow {
            fb.fill_rect(
                offset_signed(rect, shadow.dx, shadow.dy),
                scale_alpha(shadow.color, opacity),
            );
        }
        if style.has_background() {
            fb.fill_rounded_rect(
                rect,
                style.corner_radius.resolve(rect),
                scale_alpha(style.background, opacity),
            );
        }
        if style.has_border() {
            fb.draw_border(
                rect,
                style.border,
                scale_alpha(style.border_color, opacity),
                !style.corner_radius.is_zero(),
            );
        }
        if let Some(text) = tree.text(id) {
            if !text.trim().is_empty() {
                let inset = if style.has_border() { 1 } else { 0 };
                fb.draw_text(
                    rect.x + inset,
                    rect.y + inset,
                    &text,
                    scale_alpha(style.fg, opacity),
                    Attr::NONE,
                    Some(rect.width.saturating_sub(inset * 2)),
                );
            }
        }
    }

    if let Some(sink) = regions.as_deref_mut() {
        if tree.role(id).is_interactive() {
            sink.push(HitRegion { rect, node: id });
        }
    }

    for child in tree.children(id) {
        paint_node(fb, tree, child, opacity, regions);
    }
}

// =============================================================================
// Overlay layer
// =============================================================================

/// Paint the captured shapes over the (suppressed) content.
///
/// `origin` is the scan root's absolute rect; shape geometry is root-relative
/// and translates back here. Primitives pulse between `color` and
/// `highlight`; containers replay their frozen snapshot.
pub fn paint_overlay(
    fb: &mut FrameBuffer,
    origin: Rect,
    shapes: &[SkeletonShape],
    color: Rgba,
    highlight: Rgba,
) {
    for shape in shapes {
        let rect = shape.rect.offset(origin.x, origin.y);
        if rect.is_empty() {
            continue;
        }
        match shape.kind {
            ShapeKind::Primitive => {
                draw_placeholder(fb, rect, shape.radius.resolve(rect), color, highlight);
            }
            ShapeKind::Container => {
                let Some(snapshot) = shape.snapshot.as_ref() else {
                    continue;
                };
                if let Some(shadow) = snapshot.shadow {
                    fb.fill_rect(offset_signed(rect, shadow.dx, shadow.dy), shadow.color);
                }
                if !snapshot.background.is_transparent()
                    && !snapshot.background.is_terminal_default()
                {
                    fb.fill_rounded_rect(rect, shape.radius.resolve(rect), snapshot.background);
                }
                fb.draw_border(
                    rect,
                    snapshot.border,
                    snapshot.border_color,
                    !shape.radius.is_zero(),
                );
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Shift a rect by a signed offset, clamping at the buffer origin.
fn offset_signed(rect: Rect, dx: i16, dy: i16) -> Rect {
    Rect {
        x: (rect.x as i32 + dx as i32).max(0) as u16,
        y: (rect.y as i32 + dy as i32).max(0) as u16,
        width: rect.width,
        height: rect.height,
    }
}

/// Scale a color's alpha by a content opacity (0-255).
fn scale_alpha(color: Rgba, opacity: u8) -> Rgba {
    if opacity == 255 || color.is_terminal_default() {
        return color;
    }
    let a = (color.a as i32 * opacity as i32 / 255) as i16;
    Rgba { a, ..color }
}

// =============================================================================
// Tests
// =============================================================================
