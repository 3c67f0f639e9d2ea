//! # skeleton-tui
//!
//! Automatic skeleton screens for terminal UIs.
//!
//! Wrap a measured content subtree in an [`AutoSkeleton`] and flip a loading
//! flag: while loading, the real content stays mounted but invisible and a
//! position-correct overlay of placeholder shapes pulses in its place. The
//! overlay is produced by scanning the content's real geometry, so it mirrors
//! whatever layout the host engine computed - no hand-drawn skeleton needed.
//!
//! ## Architecture
//!
//! ```text
//! Element spec → layout::solve (taffy) → VisualTree
//!                                           │
//!                     resize/mutation notifications
//!                                           ▼
//!                   controller::AutoSkeleton → scan → SkeletonShapes
//!                                           │
//!                                overlay painting → FrameBuffer → TermRenderer
//! ```
//!
//! Every element of the tree is classified by one pure policy function:
//! atomic content and text pulse as placeholder primitives, decorated
//! wrappers become static styled clones, transparent wrappers vanish while
//! their children are still mirrored. Scans re-run on mount, resize, and
//! subtree mutation, each time replacing the shape list wholesale.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Rect, Radius, Cell, etc.)
//! - [`tree`] - The host-agnostic visual tree the scanner walks
//! - [`scan`] - Traversal, classification, and shape production
//! - [`controller`] - Lifecycle, observation, and the two render layers
//! - [`primitive`] - Pulsing placeholder with shared clocks
//! - [`layout`] - Taffy bridge from element specs to measured trees
//! - [`render`] - Frame buffer and differential terminal output

pub mod config;
pub mod controller;
pub mod layout;
pub mod observe;
pub mod overlay;
pub mod primitive;
pub mod render;
pub mod scan;
pub mod shape;
pub mod theme;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::SkeletonConfig;

pub use controller::{AutoSkeleton, RenderPass};

pub use layout::{solve, Element, FlexDirection, LayoutStyle};

pub use observe::{ManualObserver, MutationWatcher, ResizeWatcher, ScanObserver};

pub use primitive::{
    draw_placeholder, get_pulse_phase, pulse_color, pulse_factor, subscribe_to_pulse,
    PULSE_PERIOD_MS,
};

pub use render::{FrameBuffer, HitRegion, TermRenderer};

pub use scan::{classify, scan, Classification};

pub use shape::{ContainerSnapshot, ShapeKind, SkeletonShape};

pub use theme::{resolve_palette, SkeletonTheme, DEFAULT_COLOR, DEFAULT_HIGHLIGHT};

pub use tree::{Display, NodeId, Role, VisualNode, VisualStyle, VisualTree};
