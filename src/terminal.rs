use std::io::{stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use cloud_gallery::grid::{GridContent, GridView};
use cloud_gallery::lightbox::LightboxFrame;
use cloud_gallery::{GalleryPage, ImageRepository, Key, PageEvent};

use crate::GenError;

pub(crate) fn render_grid(view: &GridView) -> String {
    let mut out = format!("🖼  {} [{}]\n", view.title, view.tag);
    match &view.content {
        GridContent::Loading { message } | GridContent::Empty { message } => {
            out.push_str(&format!("\t{}\n", message));
        }
        GridContent::Cards(cards) => {
            for card in cards {
                out.push_str(&format!("\t{:>3}. {}\n", card.index + 1, card.alt));
                out.push_str(&format!("\t     thumbnail: {}\n", card.thumbnail_url));
                out.push_str(&format!("\t     download:  {} ({})\n", card.download_url, card.download_name));
            }
        }
    }
    out
}

pub(crate) fn render_frame(frame: &LightboxFrame) -> String {
    format!(
        "[{}] {}\r\n  {}\r\n  download: {} ({})\r\n  ← previous   → next   esc close\r\n",
        frame.caption, frame.alt, frame.image_url, frame.download_url, frame.download_name
    )
}

pub(crate) fn map_key(event: KeyEvent) -> Key {
    match event.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc | KeyCode::Char('q') => Key::Escape,
        // raw mode swallows the interrupt signal
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Escape,
        _ => Key::Other,
    }
}

/// Title of `tag`, or an error when the config does not list it.
pub(crate) fn configured_title<R: ImageRepository>(page: &GalleryPage<R>, tag: &str) -> Result<String, GenError> {
    match page.config().tag(tag) {
        Some(t) => Ok(t.display_title().to_string()),
        None => Err(GenError::from(format!("Gallery {} is not configured", tag))),
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> crossterm::Result<RawMode> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Opens `tag` in the lightbox and drives it from the keyboard until it is dismissed.
pub(crate) fn browse<R: ImageRepository>(page: &mut GalleryPage<R>, tag: &str) -> Result<(), GenError> {
    configured_title(page, tag)?;
    let view = page.handle(PageEvent::OpenGallery(tag.to_string()));
    if let Some(grid) = &view.grid {
        print!("{}", render_grid(grid));
    }

    let mut frame = match page.handle(PageEvent::SelectThumbnail(0)).lightbox {
        Some(frame) => frame,
        None => return Ok(()),
    };

    let _raw = RawMode::enable()?;
    let mut out = stdout();
    loop {
        write!(out, "\r\n{}", render_frame(&frame))?;
        out.flush()?;

        let key = match event::read()? {
            Event::Key(key) => map_key(key),
            _ => continue,
        };
        match page.handle(PageEvent::Key(key)).lightbox {
            Some(next) => frame = next,
            None => break,
        }
    }

    Ok(())
}
