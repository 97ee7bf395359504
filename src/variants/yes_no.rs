use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{buffer::Buffer, layout::Rect};

use super::text::{TextBody, click_buttons, text_dialog};
use crate::{
    dialog::{
        Anchor, DEFAULT_PRIORITY, Dialog, DialogContent, DialogId, Flow, Handler, Placement,
    },
    event::{Category, KeyId},
    ui::Ui,
    widgets::{ExitButton, rebind_hotkey},
};

pub type YesNoDialog = Dialog<YesNo>;

/// A question answered with `true` (yes) or `false` (no).
///
/// Enter answers yes and Escape answers no, unless inverted.
pub struct YesNo {
    pub body: TextBody,
    pub yes_button: ExitButton<bool>,
    pub no_button: ExitButton<bool>,
    pub invert_enter: bool,
    pub invert_escape: bool,
    yes_type: String,
    no_type: String,
    press_yes: Handler<YesNo>,
    press_no: Handler<YesNo>,
    bound_hotkeys: (Option<char>, Option<char>),
}

impl YesNo {
    pub fn dialog(parent: Option<DialogId>, text: impl Into<String>) -> YesNoDialog {
        let press_yes = Handler::new(|dialog: &mut YesNoDialog, _, _| {
            Ok(dialog.content().yes_button.activated())
        });
        let press_no = Handler::new(|dialog: &mut YesNoDialog, _, _| {
            Ok(dialog.content().no_button.activated())
        });
        let content = YesNo {
            body: TextBody::new(text),
            yes_button: ExitButton::new(
                Placement::new((0.1, 1.0), (0.3, 0.1), Anchor::BottomLeft),
                Some(true),
            ),
            no_button: ExitButton::new(
                Placement::new((0.9, 1.0), (0.3, 0.1), Anchor::BottomRight),
                Some(false),
            ),
            invert_enter: false,
            invert_escape: false,
            yes_type: "yes".to_string(),
            no_type: "no".to_string(),
            press_yes,
            press_no,
            bound_hotkeys: (None, None),
        };

        let mut dialog = text_dialog(parent, content);
        dialog.add_key_handler(
            KeyId::Code(KeyCode::Enter),
            Handler::new(|dialog: &mut YesNoDialog, _, _| Ok(dialog.content().on_return())),
            DEFAULT_PRIORITY,
        );
        dialog.add_key_handler(
            KeyId::Code(KeyCode::Esc),
            Handler::new(|dialog: &mut YesNoDialog, _, _| Ok(dialog.content().on_escape())),
            DEFAULT_PRIORITY,
        );
        dialog.add_handler(
            Category::Click,
            click_buttons(|yes_no: &YesNo| vec![&yes_no.yes_button, &yes_no.no_button]),
            DEFAULT_PRIORITY,
        );
        dialog
    }

    fn on_return(&self) -> Flow<bool> {
        if self.invert_enter {
            self.no_button.activated()
        } else {
            self.yes_button.activated()
        }
    }

    fn on_escape(&self) -> Flow<bool> {
        if self.invert_escape {
            self.yes_button.activated()
        } else {
            self.no_button.activated()
        }
    }
}

impl Dialog<YesNo> {
    pub fn set_yes_type(&mut self, yes_type: impl Into<String>) {
        self.content_mut().yes_type = yes_type.into();
        self.mark_rebuild();
    }

    pub fn set_no_type(&mut self, no_type: impl Into<String>) {
        self.content_mut().no_type = no_type.into();
        self.mark_rebuild();
    }

    /// Makes Enter answer no.
    pub fn set_invert_enter(&mut self, invert: bool) {
        self.content_mut().invert_enter = invert;
    }

    /// Makes Escape answer yes.
    pub fn set_invert_escape(&mut self, invert: bool) {
        self.content_mut().invert_escape = invert;
    }
}

impl DialogContent for YesNo {
    type Output = bool;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.body.render(area, buf);
        self.yes_button.render(area, buf);
        self.no_button.render(area, buf);
    }

    fn rebuild(dialog: &mut Dialog<Self>, ui: &Ui) -> Result<()> {
        let labels = ui.options().labels();
        let content = dialog.content_mut();
        let yes = labels.get(&content.yes_type)?;
        let no = labels.get(&content.no_type)?;
        content.yes_button.apply_label(yes);
        content.no_button.apply_label(no);

        let (press_yes, press_no) = (content.press_yes.clone(), content.press_no.clone());
        let (old_yes, old_no) =
            std::mem::replace(&mut content.bound_hotkeys, (yes.hotkey, no.hotkey));
        rebind_hotkey(dialog, &press_yes, old_yes, yes.hotkey);
        rebind_hotkey(dialog, &press_no, old_no, no.hotkey);
        Ok(())
    }
}
