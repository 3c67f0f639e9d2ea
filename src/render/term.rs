//! Differential terminal renderer.
//!
//! Compares the current frame to the previous one and only emits cells that
//! changed, batched into a single write. Terminal state (cursor position,
//! colors, attributes) is tracked so redundant escape sequences are skipped.
//!
//! # Algorithm
//!
//! 1. For each cell in the new frame: skip if identical to the previous frame
//! 2. Queue a cursor move only when the cell is not adjacent to the last one
//! 3. Queue color/attribute changes only when they differ from the last cell
//! 4. Flush the accumulated bytes in one write
//! 5. Store the frame for the next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use super::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Convert a color to what the terminal understands.
///
/// Terminal default and fully transparent both fall back to the terminal's
/// own colors.
fn to_term_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

// =============================================================================
// TermRenderer
// =============================================================================

/// Differential renderer writing through crossterm.
///
/// Keeps the previous frame to enable diff-based rendering.
pub struct TermRenderer {
    previous: Option<FrameBuffer>,
    out: Vec<u8>,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Option<Attr>,
    last_pos: Option<(u16, u16)>,
}

impl TermRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            previous: None,
            out: Vec::with_capacity(16384),
            last_fg: None,
            last_bg: None,
            last_attrs: None,
            last_pos: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were emitted.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        self.reset_state();

        let width = buffer.width();
        let height = buffer.height();
        let mut has_changes = false;

        for y in 0..height {
            for x in 0..width {
                let cell = buffer.get(x, y).unwrap();

                let changed = match &self.previous {
                    Some(prev) if prev.width() == width && prev.height() == height => {
                        prev.get(x, y) != Some(cell)
                    }
                    _ => true, // No previous or size changed
                };

                if changed {
                    has_changes = true;
                    self.emit_cell(x, y, cell)?;
                }
            }
        }

        self.flush_stdout()?;
        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Force a full redraw (no diffing).
    ///
    /// Use after a resize or when the screen is corrupted.
    pub fn render_full(&mut self, buffer: &FrameBuffer) -> io::Result<()> {
        self.invalidate();
        self.render(buffer)?;
        Ok(())
    }

    /// Invalidate the previous frame; the next render is a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if a previous frame exists to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer, hidden cursor).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.flush_stdout()?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        self.flush_stdout()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn reset_state(&mut self) {
        self.last_fg = None;
        self.last_bg = None;
        self.last_attrs = None;
        self.last_pos = None;
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Cursor move, skipped when writing the adjacent cell
        if self.last_pos != Some((x, y)) {
            queue!(self.out, MoveTo(x, y))?;
        }

        // Attribute changes force a reset and a color re-emit
        if self.last_attrs != Some(cell.attrs) {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            for (flag, attr) in [
                (Attr::BOLD, Attribute::Bold),
                (Attr::DIM, Attribute::Dim),
                (Attr::ITALIC, Attribute::Italic),
                (Attr::UNDERLINE, Attribute::Underlined),
            ] {
                if cell.attrs.contains(flag) {
                    queue!(self.out, SetAttribute(attr))?;
                }
            }
            self.last_attrs = Some(cell.attrs);
            self.last_fg = None;
            self.last_bg = None;
        }

        if self.last_fg != Some(cell.fg) {
            queue!(self.out, SetForegroundColor(to_term_color(cell.fg)))?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            queue!(self.out, SetBackgroundColor(to_term_color(cell.bg)))?;
            self.last_bg = Some(cell.bg);
        }

        let glyph = char::from_u32(cell.char).unwrap_or(' ');
        queue!(self.out, Print(glyph))?;
        self.last_pos = Some((x + 1, y));
        Ok(())
    }

    fn flush_stdout(&mut self) -> io::Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.out)?;
        stdout.flush()?;
        self.out.clear();
        Ok(())
    }
}

impl Default for TermRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
