//! The session a dialog runs in: render surface, event source, options,
//! and which dialog is the top-level one.

use anyhow::{Context, Result};
use log::debug;
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::{
    dialog::{Dialog, DialogContent, DialogId},
    error::DialogError,
};

mod labels;
mod options;
mod source;
mod terminal;

pub use labels::{ButtonLabel, LabelCatalog, default_catalog};
pub use options::DialogOptions;
pub use source::{EventSource, InputSource, TickSource};
pub use terminal::{TerminalEvents, TerminalGuard};

/// Something dialogs can be drawn onto.
pub trait Surface {
    fn area(&self) -> Result<Rect>;

    /// Paints one frame; `paint` receives a buffer covering `area()`.
    fn draw(&mut self, paint: &mut dyn FnMut(&mut Buffer)) -> Result<()>;
}

impl<B: Backend> Surface for Terminal<B> {
    fn area(&self) -> Result<Rect> {
        let size = self.size().context("failed to query terminal size")?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn draw(&mut self, paint: &mut dyn FnMut(&mut Buffer)) -> Result<()> {
        Terminal::draw(self, |frame| paint(frame.buffer_mut()))
            .context("failed to draw frame")?;
        Ok(())
    }
}

/// Frozen rendering of a dialog that has a child open over it.
struct Backdrop {
    buffer: Buffer,
    /// Area of the dialog it shows; its child is placed relative to it.
    area: Rect,
}

pub struct Ui {
    surface: Box<dyn Surface>,
    events: Box<dyn EventSource>,
    options: DialogOptions,
    top: Option<DialogId>,
    backdrops: Vec<Backdrop>,
}

impl Ui {
    pub fn new(
        surface: impl Surface + 'static,
        events: impl EventSource + 'static,
        options: DialogOptions,
    ) -> Self {
        Self {
            surface: Box::new(surface),
            events: Box::new(events),
            options,
            top: None,
            backdrops: Vec::new(),
        }
    }

    /// Takes over the terminal. It is restored when the `Ui` is dropped.
    pub fn terminal(options: DialogOptions) -> Result<Self> {
        let guard = TerminalGuard::new(options.mouse_capture)?;
        let events = TerminalEvents::new(guard.reports_key_release());
        Ok(Self::new(guard, events, options))
    }

    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    pub fn events(&self) -> &dyn EventSource {
        self.events.as_ref()
    }

    pub fn events_mut(&mut self) -> &mut dyn EventSource {
        self.events.as_mut()
    }

    pub fn pointer_position(&self) -> Option<Position> {
        self.events.pointer_position()
    }

    /// Makes `dialog` the root of the dialog tree.
    pub fn make_top<C: DialogContent>(&mut self, dialog: &Dialog<C>) -> Result<(), DialogError> {
        if dialog.parent().is_some() {
            return Err(DialogError::ParentedTopLevel(dialog.id()));
        }
        debug!("dialog {} is now top-level", dialog.id());
        self.top = Some(dialog.id());
        Ok(())
    }

    pub fn top(&self) -> Option<DialogId> {
        self.top
    }

    /// Number of dialogs currently shown beneath the active one.
    pub fn depth(&self) -> usize {
        self.backdrops.len()
    }

    /// Draws the dialogs beneath the active one, then `active` over them.
    pub fn redraw<C: DialogContent>(&mut self, active: &mut Dialog<C>) -> Result<()> {
        let screen = self.surface.area()?;
        let backdrop = self.backdrops.last();
        let parent = backdrop.map_or(screen, |backdrop| backdrop.area);
        self.surface.draw(&mut |buf: &mut Buffer| {
            if let Some(backdrop) = backdrop {
                blit(&backdrop.buffer, buf);
            }
            active.render(parent, buf);
        })
    }

    /// Freezes `dialog`, as drawn over the current backdrops, so a child can
    /// be drawn on top of it.
    pub(crate) fn push_backdrop<C: DialogContent>(&mut self, dialog: &mut Dialog<C>) -> Result<()> {
        let screen = self.surface.area()?;
        let mut buffer = Buffer::empty(screen);
        let parent = match self.backdrops.last() {
            Some(below) => {
                blit(&below.buffer, &mut buffer);
                below.area
            }
            None => screen,
        };
        dialog.render(parent, &mut buffer);
        self.backdrops.push(Backdrop {
            buffer,
            area: dialog.area(),
        });
        Ok(())
    }

    pub(crate) fn pop_backdrop(&mut self) {
        self.backdrops.pop();
    }
}

/// Copies the overlapping cells of `src` into `dst`.
fn blit(src: &Buffer, dst: &mut Buffer) {
    let overlap = src.area.intersection(dst.area);
    for position in overlap.positions() {
        if let (Some(from), Some(to)) = (src.cell(position), dst.cell_mut(position)) {
            *to = from.clone();
        }
    }
}
