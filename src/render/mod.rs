//! Frame buffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells representing what should be
//! displayed. The overlay paints into it; the terminal renderer diffs it
//! out. Flat row-major storage (`index = y * width + x`) for cache
//! efficiency; fills alpha-blend against whatever is already in the cell.

pub mod term;

pub use term::TermRenderer;

use crate::tree::NodeId;
use crate::types::{Attr, BorderStyle, Cell, Rect, Rgba};

// =============================================================================
// HitRegion
// =============================================================================

/// An interactive rectangle contributed by live content.
///
/// While content is suppressed behind the skeleton overlay, no regions are
/// produced at all, which is what makes the hidden content non-interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    /// Absolute cell rectangle.
    pub rect: Rect,
    /// The content node this region belongs to.
    pub node: NodeId,
}

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) to flat index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a background color.
    ///
    /// The fill covers previous content (the glyph resets to a space) and
    /// alpha-blends the color over the existing background. A fully
    /// transparent fill is a no-op. Out-of-bounds cells are clipped.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if color.is_transparent() || rect.is_empty() {
            return;
        }
        let x2 = (rect.x + rect.width).min(self.width);
        let y2 = (rect.y + rect.height).min(self.height);
        for y in rect.y..y2 {
            for x in rect.x..x2 {
                let idx = self.index(x, y);
                let cell = &mut self.cells[idx];
                cell.char = b' ' as u32;
                cell.bg = Rgba::blend(color, cell.bg);
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Fill a rectangle, softening the four corner cells when `radius > 0`.
    ///
    /// Terminal cells cannot carry true arcs; the corner cells render the
    /// fill as a quadrant glyph over the underlying background instead,
    /// which reads as a rounded corner at cell resolution.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: u16, color: Rgba) {
        if color.is_transparent() || rect.is_empty() {
            return;
        }
        if radius == 0 || rect.width < 2 || rect.height < 2 {
            self.fill_rect(rect, color);
            return;
        }

        self.fill_rect(rect, color);

        let left = rect.x;
        let right = rect.x + rect.width - 1;
        let top = rect.y;
        let bottom = rect.y + rect.height - 1;

        // (x, y, quadrant glyph pointing into the shape)
        let corners = [
            (left, top, '▗'),
            (right, top, '▖'),
            (left, bottom, '▝'),
            (right, bottom, '▘'),
        ];
        for (x, y, glyph) in corners {
            if let Some(cell) = self.get_mut(x, y) {
                cell.char = glyph as u32;
                cell.fg = color;
                cell.bg = Rgba::TERMINAL_DEFAULT;
            }
        }
    }

    /// Draw a border along the rect perimeter.
    ///
    /// `rounded` swaps in rounded corner glyphs regardless of the base
    /// style. Degenerate rects (single row or column) draw a line.
    pub fn draw_border(&mut self, rect: Rect, style: BorderStyle, color: Rgba, rounded: bool) {
        if style == BorderStyle::None || color.is_transparent() || rect.is_empty() {
            return;
        }

        let (h, v, tl, tr, br, bl) = style.chars();
        let (tl, tr, br, bl) = if rounded && style != BorderStyle::Ascii {
            let (_, _, rtl, rtr, rbr, rbl) = BorderStyle::Rounded.chars();
            (rtl, rtr, rbr, rbl)
        } else {
            (tl, tr, br, bl)
        };

        let left = rect.x;
        let right = rect.x + rect.width - 1;
        let top = rect.y;
        let bottom = rect.y + rect.height - 1;

        let mut put = |fb: &mut Self, x: u16, y: u16, glyph: char| {
            if let Some(cell) = fb.get_mut(x, y) {
                cell.char = glyph as u32;
                cell.fg = color;
            }
        };

        if rect.height == 1 {
            for x in left..=right.min(self.width.saturating_sub(1)) {
                put(self, x, top, h);
            }
            return;
        }
        if rect.width == 1 {
            for y in top..=bottom.min(self.height.saturating_sub(1)) {
                put(self, left, y, v);
            }
            return;
        }

        for x in (left + 1)..right {
            put(self, x, top, h);
            put(self, x, bottom, h);
        }
        for y in (top + 1)..bottom {
            put(self, left, y, v);
            put(self, right, y, v);
        }
        put(self, left, top, tl);
        put(self, right, top, tr);
        put(self, right, bottom, br);
        put(self, left, bottom, bl);
    }

    /// Write a line of text starting at (x, y), clipped to the buffer and
    /// to an optional max width.
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        attrs: Attr,
        max_width: Option<u16>,
    ) {
        if y >= self.height {
            return;
        }
        let limit = match max_width {
            Some(w) => (x + w).min(self.width),
            None => self.width,
        };
        let mut cx = x;
        for ch in text.chars() {
            if cx >= limit {
                break;
            }
            let idx = self.index(cx, y);
            let cell = &mut self.cells[idx];
            cell.char = ch as u32;
            cell.fg = fg;
            cell.attrs = attrs;
            cx += 1;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
