//! Theme system for skeleton palettes.
//!
//! A skeleton pulses between a base color and a highlight color. The pair
//! resolves in order: explicit config colors, then the selected light/dark
//! theme pair from the palette table below, then the ambient defaults.
//!
//! When a `Light` or `Dark` theme is selected, render output carries a
//! discoverable marker value (`"light"`/`"dark"`) so surrounding chrome can
//! align with it. `Auto` emits no marker and defers to ambient styling.

use crate::config::SkeletonConfig;
use crate::types::Rgba;

// =============================================================================
// Ambient defaults
// =============================================================================

/// Default base color when neither config nor theme provides one.
pub const DEFAULT_COLOR: Rgba = Rgba::rgb(238, 238, 238);

/// Default highlight color when neither config nor theme provides one.
pub const DEFAULT_HIGHLIGHT: Rgba = Rgba::rgb(245, 245, 245);

// =============================================================================
// SkeletonTheme
// =============================================================================

/// Themed palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkeletonTheme {
    /// Light surfaces: pale gray pulsing slightly paler.
    Light,
    /// Dark surfaces: deep gray pulsing slightly lighter.
    Dark,
    /// No explicit theme: ambient defaults, no marker emitted.
    #[default]
    Auto,
}

impl SkeletonTheme {
    /// Parse from string (case-insensitive). Unknown values fall back to
    /// `Auto`, matching the "malformed config never surfaces" contract.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::Auto,
        }
    }

    /// The discoverable marker value for this theme.
    ///
    /// `Auto` intentionally produces no marker.
    pub const fn marker(&self) -> Option<&'static str> {
        match self {
            Self::Light => Some("light"),
            Self::Dark => Some("dark"),
            Self::Auto => None,
        }
    }

    /// The themed (base, highlight) pair, if this theme names one.
    pub const fn palette(&self) -> Option<(Rgba, Rgba)> {
        match self {
            Self::Light => Some((Rgba::rgb(238, 238, 238), Rgba::rgb(245, 245, 245))),
            Self::Dark => Some((Rgba::rgb(43, 43, 43), Rgba::rgb(61, 61, 61))),
            Self::Auto => None,
        }
    }
}

// =============================================================================
// Palette resolution
// =============================================================================

/// Resolve the effective (base, highlight) pulse pair for a config.
///
/// Explicit config colors always win; the theme pair covers whichever side
/// the config leaves unset; ambient defaults cover the rest.
pub fn resolve_palette(config: &SkeletonConfig) -> (Rgba, Rgba) {
    let themed = config.theme.palette();
    let color = config
        .color
        .or(themed.map(|(c, _)| c))
        .unwrap_or(DEFAULT_COLOR);
    let highlight = config
        .highlight_color
        .or(themed.map(|(_, h)| h))
        .unwrap_or(DEFAULT_HIGHLIGHT);
    (color, highlight)
}

// =============================================================================
// Tests
// =============================================================================
