//! Modal dialogs.
//!
//! A [`Dialog`] owns its handler lists, key-repeat state and fade mask. The
//! dialog-specific part (what it draws, which handlers it installs, what it
//! returns) lives in a [`DialogContent`] implementation.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Result;
use log::trace;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Clear, Widget},
};

use crate::{
    event::{Category, KeyId},
    ui::{DialogOptions, TickSource, Ui},
};

mod dispatch;
mod handlers;
mod mask;
mod modal;
mod placement;
mod repeat;

pub use dispatch::Dispatch;
pub use handlers::{DEFAULT_PRIORITY, Flow, Handler};
pub use mask::{DEFAULT_FADE_STYLE, FadeMask};
pub use placement::{Anchor, Placement};
pub use repeat::{KeyRepeat, RepeatState};

use handlers::HandlerRegistry;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The part of a dialog that varies between dialog kinds.
pub trait DialogContent: Sized + 'static {
    /// Value handed back by [`Dialog::show`].
    type Output: 'static;

    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Builds the overlay used while the dialog is faded. Override to keep
    /// parts of the dialog fully visible.
    fn make_fade_mask(&self, area: Rect) -> FadeMask {
        FadeMask::uniform(area.width, area.height)
    }

    /// Runs before the next draw after [`Dialog::mark_rebuild`].
    fn rebuild(dialog: &mut Dialog<Self>, ui: &Ui) -> Result<()> {
        let _ = (dialog, ui);
        Ok(())
    }

    /// Runs at the start of [`Dialog::show`].
    fn on_show(dialog: &mut Dialog<Self>) {
        let _ = dialog;
    }
}

pub struct Dialog<C: DialogContent> {
    id: DialogId,
    parent: Option<DialogId>,
    placement: Placement,
    area: Rect,
    background: Style,
    /// Set through `set_fade_style`; otherwise the `Ui` options decide.
    fade_style: Option<Style>,
    default_fade_style: Style,
    visible: bool,
    faded: bool,
    needs_remask: bool,
    needs_rebuild: bool,
    fade_mask: Option<FadeMask>,
    handlers: HandlerRegistry<C>,
    repeat: KeyRepeat,
    needs_timer: Option<bool>,
    content: C,
}

impl<C: DialogContent> Dialog<C> {
    pub fn new(parent: Option<DialogId>, content: C) -> Self {
        // Top-level dialogs paint over whatever was on screen before.
        let background = if parent.is_none() {
            Style::new().bg(Color::Black)
        } else {
            Style::new()
        };
        Self {
            id: DialogId::next(),
            parent,
            placement: Placement::default(),
            area: Rect::default(),
            background,
            fade_style: None,
            default_fade_style: DEFAULT_FADE_STYLE,
            visible: false,
            faded: false,
            needs_remask: true,
            needs_rebuild: true,
            fade_mask: None,
            handlers: HandlerRegistry::default(),
            repeat: KeyRepeat::default(),
            needs_timer: None,
            content,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.set_placement(placement);
        self
    }

    pub fn with_background(mut self, background: Style) -> Self {
        self.background = background;
        self
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub fn parent(&self) -> Option<DialogId> {
        self.parent
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_faded(&self) -> bool {
        self.faded
    }

    pub fn set_faded(&mut self, faded: bool) {
        self.faded = faded;
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        if placement != self.placement {
            self.placement = placement;
            self.needs_remask = true;
        }
    }

    /// Area covered by the dialog at its last draw.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn needs_remask(&self) -> bool {
        self.needs_remask
    }

    /// Overrides the fade style from [`DialogOptions`] for this dialog.
    pub fn set_fade_style(&mut self, style: Style) {
        self.fade_style = Some(style);
    }

    pub fn mark_rebuild(&mut self) {
        self.needs_rebuild = true;
    }

    pub fn repeat(&self) -> &KeyRepeat {
        &self.repeat
    }

    pub fn add_handler(&mut self, category: Category, handler: Handler<C>, priority: i32) {
        self.handlers.add(category, handler, priority);
    }

    /// [`Dialog::add_handler`] at [`DEFAULT_PRIORITY`].
    pub fn add_handler_default(&mut self, category: Category, handler: Handler<C>) {
        self.add_handler(category, handler, DEFAULT_PRIORITY);
    }

    pub fn remove_handler(&mut self, category: Category, handler: &Handler<C>) {
        self.handlers.remove(category, handler);
    }

    pub fn add_key_handler(&mut self, key: KeyId, handler: Handler<C>, priority: i32) {
        self.handlers.add_key(key, handler, priority);
    }

    pub fn add_key_handler_default(&mut self, key: KeyId, handler: Handler<C>) {
        self.add_key_handler(key, handler, DEFAULT_PRIORITY);
    }

    pub fn remove_key_handler(&mut self, key: KeyId, handler: &Handler<C>) {
        self.handlers.remove_key(key, handler);
    }

    pub fn has_handlers(&self, category: Category) -> bool {
        self.handlers.has(category)
    }

    /// Returns the cached fade mask, rebuilding it first if it is stale.
    pub fn fade_mask(&mut self) -> &FadeMask {
        if self.needs_remask {
            self.needs_remask = false;
            self.fade_mask = None;
        }
        let (id, area, content) = (self.id, self.area, &self.content);
        self.fade_mask.get_or_insert_with(|| {
            trace!("rebuilding fade mask for dialog {id}");
            content.make_fade_mask(area)
        })
    }

    /// Greys the dialog out while it is faded.
    pub fn do_mask(&mut self, buf: &mut Buffer) {
        if !self.faded {
            return;
        }
        let area = self.area;
        let style = self.fade_style.unwrap_or(self.default_fade_style);
        self.fade_mask().apply(area, style, buf);
    }

    /// Draws the dialog inside `parent` and masks it if faded.
    pub fn render(&mut self, parent: Rect, buf: &mut Buffer) {
        let area = self.placement.resolve(parent);
        if area != self.area {
            self.area = area;
            self.needs_remask = true;
        }
        Clear.render(area, buf);
        buf.set_style(area, self.background);
        self.content.render(area, buf);
        self.do_mask(buf);
    }

    /// Arms the tick source if this dialog has tick handlers or `force` is
    /// set. Whether tick handlers exist is looked up once and cached.
    pub fn start_timer(&mut self, ui: &mut Ui, force: bool) {
        let needs_timer = *self
            .needs_timer
            .get_or_insert_with(|| self.handlers.has(Category::Tick));
        if needs_timer || force {
            let fps = ui.options().fps;
            ui.events_mut().arm(fps);
        }
    }

    pub fn stop_timer(&mut self, ui: &mut Ui) {
        ui.events_mut().disarm();
    }

    pub fn reset_timer(&mut self, ui: &mut Ui) {
        self.stop_timer(ui);
        self.start_timer(ui, false);
    }

    pub(crate) fn adopt_options(&mut self, options: &DialogOptions) {
        self.default_fade_style = options.fade_style;
    }
}

impl<C: DialogContent + fmt::Debug> fmt::Debug for Dialog<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("area", &self.area)
            .field("visible", &self.visible)
            .field("faded", &self.faded)
            .field("repeat", &self.repeat)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}
