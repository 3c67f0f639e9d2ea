//! Card skeleton demo.
//!
//! A profile card loads for a few seconds behind an automatic skeleton,
//! then reveals. Space toggles loading, `q` quits.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};

use skeleton_tui::config::SkeletonConfig;
use skeleton_tui::controller::AutoSkeleton;
use skeleton_tui::layout::{solve, Element, FlexDirection};
use skeleton_tui::observe::ResizeWatcher;
use skeleton_tui::render::{FrameBuffer, TermRenderer};
use skeleton_tui::theme::SkeletonTheme;
use skeleton_tui::tree::VisualStyle;
use skeleton_tui::types::{BorderStyle, Dimension, Radius, Rgba, Shadow};

fn card_spec() -> Element {
    let card_visual = VisualStyle {
        background: Rgba::rgb(30, 30, 46),
        border: BorderStyle::Rounded,
        border_color: Rgba::rgb(88, 91, 112),
        corner_radius: Radius::Cells(1),
        shadow: Some(Shadow::default()),
        ..VisualStyle::default()
    };

    Element::block()
        .with_size(Dimension::Cells(46), Dimension::Auto)
        .with_child(
            Element::block()
                .with_size(Dimension::Cells(44), Dimension::Auto)
                .with_padding(2)
                .with_gap(1)
                .with_visual(card_visual)
                .with_child(
                    Element::block()
                        .with_direction(FlexDirection::Row)
                        .with_gap(2)
                        .with_child(Element::image(10, 5))
                        .with_child(
                            Element::block()
                                .with_gap(1)
                                .with_child(Element::text("Robin Fairbanks"))
                                .with_child(Element::text("Terminal gardener")),
                        ),
                )
                .with_child(Element::text(
                    "Grows reactive interfaces in 80 columns of soil.",
                ))
                .with_child(Element::button(" Follow ")),
        )
}

fn main() -> std::io::Result<()> {
    enable_raw_mode()?;
    let mut renderer = TermRenderer::new();
    renderer.enter_fullscreen()?;

    let (mut width, mut height) = size()?;

    let resize = Rc::new(ResizeWatcher::new());
    let mut skeleton = AutoSkeleton::new(
        solve(&card_spec(), width, height),
        SkeletonConfig::default().with_theme(SkeletonTheme::Dark),
    );
    skeleton.mount(vec![resize.clone()]);
    skeleton.set_loading(true);

    let started = Instant::now();

    loop {
        // Simulated fetch completes after three seconds
        if skeleton.loading() && started.elapsed() > Duration::from_secs(3) {
            skeleton.set_loading(false);
        }

        if let Some(event) = resize.poll(Duration::from_millis(33))? {
            match event {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        let loading = skeleton.loading();
                        skeleton.set_loading(!loading);
                    }
                    _ => {}
                },
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    // The host relayouts; the skeleton follows the new tree
                    skeleton.set_content(solve(&card_spec(), width, height));
                    renderer.invalidate();
                }
                _ => {}
            }
        }

        let mut fb = FrameBuffer::new(width, height);
        skeleton.render(&mut fb);
        fb.draw_text(
            0,
            height.saturating_sub(1),
            "space: toggle loading   q: quit",
            Rgba::rgb(128, 128, 128),
            skeleton_tui::types::Attr::DIM,
            None,
        );
        renderer.render(&fb)?;
    }

    renderer.exit_fullscreen()?;
    disable_raw_mode()?;
    Ok(())
}
