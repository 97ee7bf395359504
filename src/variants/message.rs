use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{buffer::Buffer, layout::Rect};

use super::text::{TextBody, click_buttons, text_dialog};
use crate::{
    dialog::{Anchor, DEFAULT_PRIORITY, Dialog, DialogContent, DialogId, Handler, Placement},
    event::{Category, KeyId},
    ui::Ui,
    widgets::{ExitButton, rebind_hotkey},
};

pub type MessageDialog = Dialog<Message>;

/// A message with a single button; Enter and Escape press it too.
pub struct Message {
    pub body: TextBody,
    pub ok_button: ExitButton<()>,
    ok_type: String,
    activate: Handler<Message>,
    bound_hotkey: Option<char>,
}

impl Message {
    pub fn dialog(parent: Option<DialogId>, text: impl Into<String>) -> MessageDialog {
        let activate = Handler::new(|dialog: &mut MessageDialog, _, _| {
            Ok(dialog.content().ok_button.activated())
        });
        let content = Message {
            body: TextBody::new(text),
            ok_button: ExitButton::new(
                Placement::new((0.5, 1.0), (0.3, 0.1), Anchor::BottomCenter),
                None,
            ),
            ok_type: "ok".to_string(),
            activate: activate.clone(),
            bound_hotkey: None,
        };
        let mut dialog = text_dialog(parent, content);
        dialog.add_key_handler(KeyId::Code(KeyCode::Enter), activate.clone(), DEFAULT_PRIORITY);
        dialog.add_key_handler(KeyId::Code(KeyCode::Esc), activate, DEFAULT_PRIORITY);
        dialog.add_handler(
            Category::Click,
            click_buttons(|message: &Message| vec![&message.ok_button]),
            DEFAULT_PRIORITY,
        );
        dialog
    }

    pub fn ok_type(&self) -> &str {
        &self.ok_type
    }
}

impl Dialog<Message> {
    /// Selects the catalog label used for the button, e.g. `"continue"`.
    pub fn set_ok_type(&mut self, ok_type: impl Into<String>) {
        self.content_mut().ok_type = ok_type.into();
        self.mark_rebuild();
    }
}

impl DialogContent for Message {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.body.render(area, buf);
        self.ok_button.render(area, buf);
    }

    fn rebuild(dialog: &mut Dialog<Self>, ui: &Ui) -> Result<()> {
        let labels = ui.options().labels();
        let content = dialog.content_mut();
        let label = labels.get(&content.ok_type)?;
        content.ok_button.apply_label(label);
        let handler = content.activate.clone();
        let previous = std::mem::replace(&mut content.bound_hotkey, label.hotkey);
        rebind_hotkey(dialog, &handler, previous, label.hotkey);
        Ok(())
    }
}
