use anyhow::Result;
use log::{debug, trace};

use crate::{
    error::DialogError,
    event::{Category, DialogEvent, EventKind},
    ui::{InputSource, Ui},
};

use super::{Dialog, DialogContent, Flow, handlers::Entry};

/// Outcome of feeding one event to a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<R> {
    /// Nothing asked the dialog to close.
    Pending,
    /// A handler exited the dialog, with or without a value.
    Exit(Option<R>),
}

impl<C: DialogContent> Dialog<C> {
    /// Runs `event` through every applicable handler in priority order.
    ///
    /// The handler list is captured before the first handler runs; handlers
    /// added or removed while it is being walked take effect from the next
    /// event on.
    pub fn handle(&mut self, ui: &mut Ui, event: &DialogEvent) -> Result<Dispatch<C::Output>> {
        let handlers = match event {
            DialogEvent::PointerMove { primary_held, .. } => {
                // Queued motion is stale by now; handlers read the live
                // position from the Ui instead.
                let period = ui.options().frame_period();
                ui.events_mut().settle(period);
                ui.events_mut().discard(EventKind::PointerMove)?;
                if *primary_held {
                    self.handlers
                        .snapshot(&[Category::PointerMove, Category::Drag], &[])
                } else {
                    self.handlers.snapshot(&[Category::PointerMove], &[])
                }
            }
            DialogEvent::Tick => {
                ui.events_mut().discard(EventKind::Tick)?;
                let handlers = self.handlers.snapshot(&[Category::Tick], &[]);
                let interval = ui.options().repeat_interval;
                if let Some(press) = self.repeat.tick(interval) {
                    trace!("repeating {:?} in dialog {}", press.code, self.id);
                    if let Dispatch::Exit(value) = self.handle(ui, &DialogEvent::KeyDown(press))? {
                        return Ok(Dispatch::Exit(value));
                    }
                }
                handlers
            }
            DialogEvent::KeyDown(press) => {
                if !press.synthetic && ui.events().reports_key_release() {
                    self.repeat.press(press.clone(), ui.options().repeat_delay);
                    self.start_timer(ui, true);
                }
                self.handlers
                    .snapshot(&[Category::Key, Category::KeyDown], &press.identities(true))
            }
            DialogEvent::KeyUp(press) => {
                self.repeat.release();
                self.reset_timer(ui);
                // Releases carry no character, only the key code.
                self.handlers
                    .snapshot(&[Category::Key, Category::KeyUp], &press.identities(false))
            }
            DialogEvent::PointerUp { .. } => self.handlers.snapshot(&[Category::Click], &[]),
            DialogEvent::Resize { .. } => {
                self.needs_remask = true;
                Vec::new()
            }
            DialogEvent::Quit => {
                debug!("quit requested while dialog {} was active", self.id);
                return Err(DialogError::Quit.into());
            }
            DialogEvent::Other => Vec::new(),
        };

        self.invoke(ui, event, handlers)
    }

    fn invoke(
        &mut self,
        ui: &mut Ui,
        event: &DialogEvent,
        handlers: Vec<Entry<C>>,
    ) -> Result<Dispatch<C::Output>> {
        for entry in handlers {
            match entry.handler.call(self, ui, event)? {
                Flow::Continue => {}
                Flow::Handled => break,
                Flow::Exit(value) => return Ok(Dispatch::Exit(value)),
            }
        }
        Ok(Dispatch::Pending)
    }
}
