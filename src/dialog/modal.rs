use anyhow::Result;
use log::debug;

use crate::ui::{InputSource, Ui};

use super::{Dialog, DialogContent, Dispatch};

impl<C: DialogContent> Dialog<C> {
    /// Shows the dialog and runs its event loop until a handler exits it.
    ///
    /// Returns the value the exiting handler supplied, or `None` when it
    /// exited without one.
    pub fn show(&mut self, ui: &mut Ui) -> Result<Option<C::Output>> {
        if self.parent.is_none() && ui.top().is_none() {
            ui.make_top(self)?;
        }
        debug!("showing dialog {}", self.id);
        self.adopt_options(ui.options());
        self.visible = true;
        self.repeat.release();
        C::on_show(self);
        self.start_timer(ui, false);

        let result = self.run_loop(ui);

        // Also reached when a handler or rebuild fails.
        self.visible = false;
        self.repeat.release();
        self.stop_timer(ui);
        debug!("dialog {} closed", self.id);
        result
    }

    fn run_loop(&mut self, ui: &mut Ui) -> Result<Option<C::Output>> {
        loop {
            if self.needs_rebuild {
                self.needs_rebuild = false;
                C::rebuild(self, ui)?;
            }
            ui.redraw(self)?;
            let event = ui.events_mut().wait()?;
            if let Dispatch::Exit(value) = self.handle(ui, &event)? {
                return Ok(value);
            }
        }
    }

    /// Shows `child` on top of this dialog, which stays on screen faded out
    /// until the child closes.
    pub fn show_child<D: DialogContent>(
        &mut self,
        ui: &mut Ui,
        child: &mut Dialog<D>,
    ) -> Result<Option<D::Output>> {
        let was_faded = self.faded;
        self.set_faded(true);
        ui.push_backdrop(self)?;

        let result = child.show(ui);

        ui.pop_backdrop();
        self.set_faded(was_faded);
        // The child's loop left the tick source disarmed.
        self.repeat.release();
        self.reset_timer(ui);
        result
    }
}
