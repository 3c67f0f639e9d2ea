//! Theme demo: cycle the skeleton palette while loading.
//!
//! `t` cycles light/dark/auto, space toggles loading, `q` quits. The status
//! line shows the theme marker the current config exposes.

use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};

use skeleton_tui::config::SkeletonConfig;
use skeleton_tui::controller::AutoSkeleton;
use skeleton_tui::layout::{solve, Element, FlexDirection};
use skeleton_tui::observe::ResizeWatcher;
use skeleton_tui::render::{FrameBuffer, TermRenderer};
use skeleton_tui::theme::SkeletonTheme;
use skeleton_tui::types::{Attr, Dimension, Rgba};

fn gallery_spec() -> Element {
    let row = |caption: &str| {
        Element::block()
            .with_direction(FlexDirection::Row)
            .with_gap(2)
            .with_child(Element::image(8, 4))
            .with_child(
                Element::block()
                    .with_gap(1)
                    .with_child(Element::text(caption.to_string()))
                    .with_child(Element::text("Lorem ipsum dolor sit amet")),
            )
    };

    Element::block()
        .with_size(Dimension::Cells(50), Dimension::Auto)
        .with_gap(1)
        .with_child(row("First result"))
        .with_child(row("Second result"))
        .with_child(row("Third result"))
}

fn main() -> std::io::Result<()> {
    enable_raw_mode()?;
    let mut renderer = TermRenderer::new();
    renderer.enter_fullscreen()?;

    let (mut width, mut height) = size()?;
    let themes = [SkeletonTheme::Light, SkeletonTheme::Dark, SkeletonTheme::Auto];
    let mut theme_index = 1;

    let resize = Rc::new(ResizeWatcher::new());
    let mut skeleton = AutoSkeleton::new(
        solve(&gallery_spec(), width, height),
        SkeletonConfig::default().with_theme(themes[theme_index]),
    );
    skeleton.mount(vec![resize.clone()]);
    skeleton.set_loading(true);

    loop {
        if let Some(event) = resize.poll(Duration::from_millis(33))? {
            match event {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('t') => {
                        theme_index = (theme_index + 1) % themes.len();
                        skeleton.set_config(
                            SkeletonConfig::default().with_theme(themes[theme_index]),
                        );
                    }
                    KeyCode::Char(' ') => {
                        let loading = skeleton.loading();
                        skeleton.set_loading(!loading);
                    }
                    _ => {}
                },
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    skeleton.set_content(solve(&gallery_spec(), width, height));
                    renderer.invalidate();
                }
                _ => {}
            }
        }

        let mut fb = FrameBuffer::new(width, height);
        let pass = skeleton.render(&mut fb);

        let status = format!(
            "theme marker: {:<5}   t: cycle theme   space: toggle   q: quit",
            pass.theme_marker.unwrap_or("none"),
        );
        fb.draw_text(
            0,
            height.saturating_sub(1),
            &status,
            Rgba::rgb(128, 128, 128),
            Attr::DIM,
            None,
        );

        renderer.render(&fb)?;
    }

    renderer.exit_fullscreen()?;
    disable_raw_mode()?;
    Ok(())
}
