//! End-to-end scenarios: element specs through taffy layout, scanning,
//! lifecycle, and overlay painting.

use std::rc::Rc;

use skeleton_tui::config::SkeletonConfig;
use skeleton_tui::controller::AutoSkeleton;
use skeleton_tui::layout::{solve, Element};
use skeleton_tui::observe::ManualObserver;
use skeleton_tui::render::FrameBuffer;
use skeleton_tui::shape::ShapeKind;
use skeleton_tui::theme::{SkeletonTheme, DEFAULT_COLOR, DEFAULT_HIGHLIGHT};
use skeleton_tui::tree::{VisualNode, VisualStyle};
use skeleton_tui::types::{BorderStyle, Dimension, Radius, Rect, Rgba};

/// A wrapper div holding a 60x60 image and a text heading.
fn image_and_heading() -> Element {
    Element::block()
        .with_size(Dimension::Cells(100), Dimension::Auto)
        .with_child(Element::image(60, 60))
        .with_child(Element::text("Section title"))
}

#[test]
fn image_and_heading_become_two_primitives() {
    let tree = solve(&image_and_heading(), 120, 100);

    let mut skeleton = AutoSkeleton::new(tree, SkeletonConfig::default());
    skeleton.mount(vec![]);
    skeleton.set_loading(true);

    let shapes = skeleton.shapes();
    assert_eq!(shapes.len(), 2);

    // The untextured, unstyled wrapper contributes no shape of its own
    assert!(shapes.iter().all(|s| s.kind == ShapeKind::Primitive));

    // Image at its measured position and size
    assert_eq!(shapes[0].rect, Rect::new(0, 0, 60, 60));
    // Heading below the image, one line tall
    assert_eq!(shapes[1].rect.y, 60);
    assert_eq!(shapes[1].rect.height, 1);

    // Real content is suppressed: the heading glyphs are nowhere on screen
    let mut fb = FrameBuffer::new(120, 100);
    let pass = skeleton.render(&mut fb);
    assert!(pass.hit_regions.is_empty());
    for y in 0..100 {
        for x in 0..120 {
            assert_ne!(fb.get(x, y).unwrap().char, 'S' as u32);
        }
    }
}

#[test]
fn visibility_toggles_with_loading() {
    let spec = Element::block()
        .with_size(Dimension::Cells(40), Dimension::Auto)
        .with_child(Element::text("Profile"))
        .with_child(Element::button("Follow"));
    let tree = solve(&spec, 80, 24);

    let mut skeleton = AutoSkeleton::new(tree, SkeletonConfig::default());
    skeleton.mount(vec![]);

    // Live content paints and is interactive
    let mut fb = FrameBuffer::new(40, 5);
    let pass = skeleton.render(&mut fb);
    assert_eq!(fb.get(0, 0).unwrap().char, 'P' as u32);
    assert_eq!(pass.hit_regions.len(), 1);

    // Loading: suppressed and non-interactive, overlay present
    skeleton.set_loading(true);
    let mut fb = FrameBuffer::new(40, 5);
    let pass = skeleton.render(&mut fb);
    assert_eq!(fb.get(0, 0).unwrap().char, b' ' as u32);
    assert!(pass.hit_regions.is_empty());
    assert!(!skeleton.shapes().is_empty());

    // Back to live
    skeleton.set_loading(false);
    let mut fb = FrameBuffer::new(40, 5);
    let pass = skeleton.render(&mut fb);
    assert_eq!(fb.get(0, 0).unwrap().char, 'P' as u32);
    assert_eq!(pass.hit_regions.len(), 1);
}

#[test]
fn unstyled_wrappers_fall_back_to_one_full_size_shape() {
    let spec = Element::block()
        .with_size(Dimension::Cells(100), Dimension::Cells(50))
        .with_child(Element::block().with_child(Element::block()));
    let tree = solve(&spec, 120, 60);

    let mut skeleton = AutoSkeleton::new(tree, SkeletonConfig::default());
    skeleton.mount(vec![]);

    let shapes = skeleton.shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].kind, ShapeKind::Primitive);
    assert_eq!(shapes[0].rect, Rect::new(0, 0, 100, 50));
}

#[test]
fn config_radius_overrides_computed_percent() {
    let spec = Element::block()
        .with_size(Dimension::Cells(40), Dimension::Auto)
        .with_child(Element::image(20, 20).with_visual(VisualStyle {
            corner_radius: Radius::Percent(50.0),
            ..VisualStyle::default()
        }));
    let tree = solve(&spec, 80, 40);

    let config = SkeletonConfig::default().with_border_radius(Radius::Cells(10));
    let mut skeleton = AutoSkeleton::new(tree, config);
    skeleton.mount(vec![]);

    assert_eq!(skeleton.shapes()[0].radius, Radius::Cells(10));
}

#[test]
fn decorated_card_is_cloned_behind_its_children() {
    let card_bg = Rgba::rgb(30, 30, 46);
    let spec = Element::block()
        .with_size(Dimension::Cells(50), Dimension::Auto)
        .with_child(
            Element::block()
                .with_size(Dimension::Cells(40), Dimension::Auto)
                .with_padding(2)
                .with_visual(VisualStyle {
                    background: card_bg,
                    border: BorderStyle::Rounded,
                    border_color: Rgba::GRAY,
                    ..VisualStyle::default()
                })
                .with_child(Element::image(10, 4))
                .with_child(Element::text("Card title")),
        );
    let tree = solve(&spec, 80, 40);

    let mut skeleton = AutoSkeleton::new(tree, SkeletonConfig::default());
    skeleton.mount(vec![]);

    let shapes = skeleton.shapes();
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].kind, ShapeKind::Container);
    assert_eq!(shapes[1].kind, ShapeKind::Primitive);
    assert_eq!(shapes[2].kind, ShapeKind::Primitive);

    // The clone froze the card's decoration
    let snapshot = shapes[0].snapshot.as_ref().unwrap();
    assert_eq!(snapshot.background, card_bg);
    assert_eq!(snapshot.border, BorderStyle::Rounded);

    // Nested primitives sit inside the card's padded area
    assert_eq!(shapes[1].rect, Rect::new(2, 2, 10, 4));
}

#[test]
fn theme_marker_round_trip() {
    let tree = solve(&image_and_heading(), 120, 100);
    let mut fb = FrameBuffer::new(10, 10);

    let mut dark = AutoSkeleton::new(
        tree.clone(),
        SkeletonConfig::default().with_theme(SkeletonTheme::Dark),
    );
    dark.mount(vec![]);
    assert_eq!(dark.render(&mut fb).theme_marker, Some("dark"));

    let mut light = AutoSkeleton::new(
        tree.clone(),
        SkeletonConfig::default().with_theme(SkeletonTheme::Light),
    );
    light.mount(vec![]);
    assert_eq!(light.render(&mut fb).theme_marker, Some("light"));

    let mut auto = AutoSkeleton::new(
        tree.clone(),
        SkeletonConfig::default().with_theme(SkeletonTheme::Auto),
    );
    auto.mount(vec![]);
    assert_eq!(auto.render(&mut fb).theme_marker, None);

    let mut unconfigured = AutoSkeleton::new(tree, SkeletonConfig::default());
    unconfigured.mount(vec![]);
    assert_eq!(unconfigured.render(&mut fb).theme_marker, None);
}

#[test]
fn dark_theme_paints_dark_placeholders() {
    let tree = solve(&image_and_heading(), 120, 100);
    let mut skeleton = AutoSkeleton::new(
        tree,
        SkeletonConfig::default().with_theme(SkeletonTheme::Dark),
    );
    skeleton.mount(vec![]);
    skeleton.set_loading(true);

    let mut fb = FrameBuffer::new(120, 100);
    skeleton.render(&mut fb);

    let (dark_base, dark_highlight) = SkeletonTheme::Dark.palette().unwrap();
    let bg = fb.get(30, 30).unwrap().bg;
    assert!(bg.r >= dark_base.r && bg.r <= dark_highlight.r);
    // Far from the light defaults
    assert!(bg.r < DEFAULT_COLOR.r);
}

#[test]
fn rescans_follow_mutations_and_announced_resizes() {
    let tree = solve(&image_and_heading(), 120, 100);
    let resize = Rc::new(ManualObserver::new());
    let mut skeleton = AutoSkeleton::new(tree.clone(), SkeletonConfig::default());
    skeleton.mount(vec![resize.clone()]);
    assert_eq!(skeleton.shapes().len(), 2);

    // Subtree mutation: a new row appears
    let root = tree.root().unwrap();
    tree.insert(
        VisualNode::text("caption").with_rect(Rect::new(0, 61, 7, 1)),
        Some(root),
    );
    assert_eq!(skeleton.shapes().len(), 3);

    // Geometry-only change stays invisible until the resize source fires
    let image = tree.children(root)[0];
    tree.set_rect(image, Rect::new(0, 0, 30, 30));
    assert_eq!(skeleton.shapes()[0].rect.width, 60);
    resize.fire();
    assert_eq!(skeleton.shapes()[0].rect.width, 30);

    // Scans are idempotent: nothing changed, nothing differs
    let before = skeleton.shapes();
    skeleton.rescan();
    assert_eq!(skeleton.shapes(), before);
}

#[test]
fn pulse_ramp_stays_between_palette_endpoints() {
    let (base, highlight) = (DEFAULT_COLOR, DEFAULT_HIGHLIGHT);
    for phase in [0.0f32, 0.1, 0.25, 0.5, 0.75, 0.9] {
        let factor = skeleton_tui::primitive::eased_factor(phase);
        let color = skeleton_tui::primitive::pulse_color(base, highlight, factor);
        assert!(color.r >= base.r && color.r <= highlight.r);
    }
}
