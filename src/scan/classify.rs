//! Classification policy - one pure function.
//!
//! The heuristics that decide how an element is mirrored (atomic role list,
//! text sniffing, decoration checks) live here and nowhere else, so they can
//! be extended without touching traversal or rendering.

use crate::tree::{Role, VisualStyle};

// =============================================================================
// Classification
// =============================================================================

/// How one element participates in the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Leaf-like visual unit: atomic role or direct text. Always pulses.
    Primitive,
    /// No direct text, but a visible background, border, or shadow:
    /// mirrored as a static styled clone.
    Container,
    /// Transparent wrapper: produces no shape, children still visited.
    Ignored,
}

/// True when the element carries direct, non-whitespace text.
#[inline]
pub fn has_direct_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

/// Classify one element.
///
/// The order matters and is part of the contract:
/// 1. Atomic roles (images, inputs, buttons, selects) always pulse.
/// 2. Direct non-whitespace text always pulses, whatever else is styled.
/// 3. Visible decoration without text makes a structural container.
/// 4. Anything else is an invisible wrapper.
///
/// `display: none` never reaches this function; the walk rejects those
/// subtrees before classification.
pub fn classify(role: Role, text: Option<&str>, style: &VisualStyle) -> Classification {
    // 1. Atomic content (always pulse)
    if role.is_atomic() {
        return Classification::Primitive;
    }

    // 2. Text content (always pulse)
    if has_direct_text(text) {
        return Classification::Primitive;
    }

    // 3. Structural container (static clone)
    if style.has_background() || style.has_border() || style.has_shadow() {
        return Classification::Container;
    }

    Classification::Ignored
}

// =============================================================================
// Tests
// =============================================================================
