//! Overlay controller - owns the scan lifecycle and the two render layers.
//!
//! `AutoSkeleton` wraps a measured content tree. While mounted it keeps the
//! content present (geometry stays measurable) and, whenever loading is on,
//! paints a placeholder overlay assembled from the latest scan. Scans re-run
//! on mount, on every resize notification, and on every subtree mutation;
//! each run fully replaces the previous shape list.
//!
//! Observation handles are owned here: they are established on mount and
//! torn down before being re-established whenever `loading` flips or the
//! content identity changes, and destroyed for good on unmount. Nothing
//! observes after teardown.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use skeleton_tui::controller::AutoSkeleton;
//! use skeleton_tui::config::SkeletonConfig;
//! use skeleton_tui::observe::ManualObserver;
//! use skeleton_tui::tree::{VisualNode, VisualTree};
//! use skeleton_tui::types::Rect;
//!
//! let tree = VisualTree::new();
//! let root = tree.insert(VisualNode::block().with_rect(Rect::new(0, 0, 40, 10)), None);
//! tree.set_root(root);
//! tree.insert(VisualNode::text("Ready").with_rect(Rect::new(0, 0, 5, 1)), Some(root));
//!
//! let resize = Rc::new(ManualObserver::new());
//! let mut skeleton = AutoSkeleton::new(tree, SkeletonConfig::default());
//! skeleton.mount(vec![resize.clone()]);
//! skeleton.set_loading(true);
//!
//! assert_eq!(skeleton.shapes().len(), 1);
//! skeleton.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::config::SkeletonConfig;
use crate::observe::{MutationWatcher, ScanObserver};
use crate::overlay::{paint_content, paint_overlay};
use crate::primitive::{subscribe_to_pulse, PULSE_PERIOD_MS};
use crate::render::{FrameBuffer, HitRegion};
use crate::scan::scan;
use crate::shape::SkeletonShape;
use crate::theme::resolve_palette;
use crate::tree::VisualTree;
use crate::types::Cleanup;

// =============================================================================
// RenderPass
// =============================================================================

/// What one render produced besides the painted cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderPass {
    /// Interactive regions from the content layer. Empty while loading:
    /// suppressed content takes no input, and the overlay never takes any.
    pub hit_regions: Vec<HitRegion>,
    /// Discoverable theme marker (`"light"`/`"dark"`), absent for auto.
    pub theme_marker: Option<&'static str>,
}

// =============================================================================
// AutoSkeleton
// =============================================================================

/// Skeleton overlay controller for one content subtree.
pub struct AutoSkeleton {
    tree: VisualTree,
    config: Rc<RefCell<SkeletonConfig>>,
    loading: Signal<bool>,
    shapes: Signal<Vec<SkeletonShape>>,
    observers: Vec<Rc<dyn ScanObserver>>,
    teardowns: Vec<Cleanup>,
    pulse_unsub: Option<Cleanup>,
    mounted: bool,
}

impl AutoSkeleton {
    /// Create a controller over a content tree. Nothing observes until
    /// [`AutoSkeleton::mount`].
    pub fn new(tree: VisualTree, config: SkeletonConfig) -> Self {
        Self {
            tree,
            config: Rc::new(RefCell::new(config)),
            loading: signal(false),
            shapes: signal(Vec::new()),
            observers: Vec::new(),
            teardowns: Vec::new(),
            pulse_unsub: None,
            mounted: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mount the controller: run the initial scan and establish observation.
    ///
    /// `observers` are the injected notification sources (typically one
    /// resize watcher; fakes in tests). A watcher for the content tree's own
    /// mutations is always created internally alongside them.
    pub fn mount(&mut self, observers: Vec<Rc<dyn ScanObserver>>) {
        self.observers = observers;
        self.mounted = true;
        self.reset_observation();
    }

    /// Toggle the loading state.
    ///
    /// Turning loading on starts the shared pulse clock subscription;
    /// turning it off releases it. Either flip tears down and re-establishes
    /// observation, then re-scans.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading.get() == loading {
            return;
        }
        self.loading.set(loading);

        if loading {
            if self.pulse_unsub.is_none() {
                self.pulse_unsub = Some(subscribe_to_pulse(PULSE_PERIOD_MS));
            }
        } else if let Some(unsub) = self.pulse_unsub.take() {
            unsub();
        }

        if self.mounted {
            self.reset_observation();
        }
    }

    /// Swap the content subtree (identity change).
    ///
    /// Prior observation is torn down before the new tree is observed.
    pub fn set_content(&mut self, tree: VisualTree) {
        self.tree = tree;
        if self.mounted {
            self.reset_observation();
        }
    }

    /// Replace the configuration and re-scan with it.
    pub fn set_config(&mut self, config: SkeletonConfig) {
        *self.config.borrow_mut() = config;
        self.rescan();
    }

    /// Unmount: tear down every observation handle and stop pulsing.
    pub fn unmount(&mut self) {
        for teardown in self.teardowns.drain(..) {
            teardown();
        }
        if let Some(unsub) = self.pulse_unsub.take() {
            unsub();
        }
        self.mounted = false;
    }

    // Teardown-before-resubscribe is the contract: after this runs, only
    // handles created here are live, and a scan has seen the current state.
    fn reset_observation(&mut self) {
        for teardown in self.teardowns.drain(..) {
            teardown();
        }

        let notify = self.make_rescan();

        // Subtree mutations always follow the current content identity
        let mutations = MutationWatcher::new(self.tree.clone());
        self.teardowns.push(mutations.observe(notify.clone()));

        for observer in &self.observers {
            self.teardowns.push(observer.observe(notify.clone()));
        }

        (*notify)();
    }

    fn make_rescan(&self) -> Rc<dyn Fn()> {
        let tree = self.tree.clone();
        let config = self.config.clone();
        let shapes = self.shapes.clone();
        Rc::new(move || {
            let fresh = scan(&tree, &config.borrow());
            shapes.set(fresh);
        })
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Current loading state.
    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    /// Reactive handle to the loading state.
    pub fn loading_signal(&self) -> Signal<bool> {
        self.loading.clone()
    }

    /// The latest scan's shape list.
    pub fn shapes(&self) -> Vec<SkeletonShape> {
        self.shapes.get()
    }

    /// Reactive handle to the shape list, refreshed by every scan.
    pub fn shapes_signal(&self) -> Signal<Vec<SkeletonShape>> {
        self.shapes.clone()
    }

    /// The content tree under observation.
    pub fn tree(&self) -> &VisualTree {
        &self.tree
    }

    /// Run one scan now. Idempotent; replaces the shape list wholesale.
    pub fn rescan(&self) {
        let fresh = scan(&self.tree, &self.config.borrow());
        self.shapes.set(fresh);
    }

    /// The discoverable theme marker, if an explicit theme is configured.
    pub fn theme_marker(&self) -> Option<&'static str> {
        self.config.borrow().theme.marker()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Paint both layers into a frame buffer.
    ///
    /// The content layer is always painted (suppressed to zero opacity while
    /// loading, never removed); the overlay is painted on top only while
    /// loading. Returns the hit regions and theme marker for this pass.
    pub fn render(&self, fb: &mut FrameBuffer) -> RenderPass {
        let loading = self.loading.get();
        let mut hit_regions = Vec::new();

        if loading {
            paint_content(fb, &self.tree, 0, None);

            let config = self.config.borrow();
            let (color, highlight) = resolve_palette(&config);
            drop(config);

            if let Some(root) = self.tree.root() {
                let origin = self.tree.rect(root);
                paint_overlay(fb, origin, &self.shapes.get(), color, highlight);
            }
        } else {
            paint_content(fb, &self.tree, 255, Some(&mut hit_regions));
        }

        RenderPass {
            hit_regions,
            theme_marker: self.theme_marker(),
        }
    }
}

impl Drop for AutoSkeleton {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Tests
// =============================================================================
