//! confirmkit demo - ask before "deleting" things
//!
//! Keys: `d` asks to delete (slow action), `f` asks with an action that fails,
//! `q` quits. Logs go to `confirm-demo.log`; set `RUST_LOG=confirmkit=debug`
//! to see the dialog's state transitions.

use anyhow::{Context as _, Result};
use confirmkit::{
    component::Component,
    components::confirm_dialog::{ConfirmDialog, ConfirmDialogStore, ConfirmRequest},
    components::{ButtonOverrides, Icon},
    context::RenderContext,
    event::{Event, EventHandler, EventPoller, Key},
    layout::Rect,
    Renderer, Theme,
};
use futures_util::future;
use std::cell::Cell;
use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;
use std::task::Poll;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Resolves once `duration` has passed; polled by the UI loop every frame
fn delay(duration: Duration) -> impl std::future::Future<Output = ()> {
    let deadline = Instant::now() + duration;
    future::poll_fn(move |_| {
        if Instant::now() >= deadline {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    })
}

fn init_logging() -> Result<()> {
    let file = File::create("confirm-demo.log").context("creating log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let mut renderer = Renderer::new()?;
    let caps = renderer.context().capabilities;
    let theme = Theme::new(caps);
    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;
    renderer.clear()?;

    let events = EventPoller::new()?;

    let store = ConfirmDialogStore::new();
    let mut dialog = ConfirmDialog::new(store.clone()).with_class_name("demo");
    let items = Rc::new(Cell::new(3u32));

    let ctx = RenderContext::new(&theme);
    let mut needs_clear = true;

    loop {
        let pending = dialog.poll_action();

        if needs_clear || dialog.is_dirty() || pending {
            renderer.begin_frame()?;
            renderer.clear()?;
            let geometry = renderer.context().geometry;
            renderer.move_cursor(0, 0)?;
            renderer.write_text(&format!(
                "{} items. d: delete  f: failing delete  q: quit",
                items.get()
            ))?;
            dialog.render(&mut renderer, Rect::fullscreen(geometry.cols, geometry.rows), &ctx)?;
            renderer.end_frame()?;
            needs_clear = false;
        }

        let Some(event) = events.poll(Duration::from_millis(50))? else {
            continue;
        };

        if let Event::Resize(..) = event {
            renderer.refresh_geometry()?;
            needs_clear = true;
        }
        if dialog.handle_event(&event) {
            continue;
        }

        match event {
            Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c')) => break,
            Event::Key(Key::Char('d')) => {
                let items = items.clone();
                let count = items.get();
                store.open(
                    ConfirmRequest::new()
                        .message(format!("Delete {} items?", count))
                        .label_ok("Delete")
                        .icon(Icon::material("delete").big())
                        .ok_button(ButtonOverrides::new().class_name("danger"))
                        .on_confirm(move || {
                            let items = items.clone();
                            async move {
                                delay(Duration::from_secs(2)).await;
                                items.set(0);
                                tracing::info!("items deleted");
                                Ok(())
                            }
                        }),
                );
            }
            Event::Key(Key::Char('f')) => {
                store.open(
                    ConfirmRequest::new()
                        .message("Try deleting from a read-only volume?")
                        .on_confirm(|| async {
                            delay(Duration::from_secs(1)).await;
                            Err(anyhow::anyhow!("volume is read-only"))
                        }),
                );
            }
            _ => {}
        }
    }

    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;
    Ok(())
}
