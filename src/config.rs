//! Skeleton configuration - caller-supplied overrides.
//!
//! Pure configuration with no owned state. The controller reads it on every
//! scan and render; missing fields silently fall back to theme defaults.

use crate::theme::SkeletonTheme;
use crate::types::{Radius, Rgba};

/// Optional overrides for skeleton rendering.
///
/// # Example
///
/// ```
/// use skeleton_tui::config::SkeletonConfig;
/// use skeleton_tui::theme::SkeletonTheme;
/// use skeleton_tui::types::{Radius, Rgba};
///
/// let config = SkeletonConfig::default()
///     .with_colors(Rgba::rgb(50, 50, 50), Rgba::rgb(70, 70, 70))
///     .with_border_radius(Radius::Cells(2))
///     .with_theme(SkeletonTheme::Dark);
/// assert_eq!(config.theme, SkeletonTheme::Dark);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkeletonConfig {
    /// Base color of pulsing primitives. `None` resolves via the theme.
    pub color: Option<Rgba>,
    /// Pulse highlight color. `None` resolves via the theme.
    pub highlight_color: Option<Rgba>,
    /// Corner radius override applied to every shape, winning over captured
    /// and per-role radii.
    pub border_radius: Option<Radius>,
    /// Themed palette selection. `Auto` defers to ambient defaults and emits
    /// no theme marker.
    pub theme: SkeletonTheme,
}

impl SkeletonConfig {
    /// Override both pulse colors.
    pub fn with_colors(mut self, color: Rgba, highlight: Rgba) -> Self {
        self.color = Some(color);
        self.highlight_color = Some(highlight);
        self
    }

    /// Override the corner radius of every shape.
    pub fn with_border_radius(mut self, radius: Radius) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Select a themed palette.
    pub fn with_theme(mut self, theme: SkeletonTheme) -> Self {
        self.theme = theme;
        self
    }
}
