use crossterm::event::KeyCode;
use ratatui::{buffer::Buffer, layout::Rect};

use super::text::{TextBody, text_dialog};
use crate::{
    dialog::{Anchor, DEFAULT_PRIORITY, Dialog, DialogContent, DialogId, Flow, Handler, Placement},
    event::{Category, DialogEvent, KeyId},
    widgets::TextField,
};

pub type TextEntryDialog = Dialog<TextEntry>;

const FIELD_PLACEMENT: Placement = Placement::new((0.5, 1.0), (1.0, 0.5), Anchor::BottomCenter);

/// Prompt for a line of text. Enter returns the text, Escape an empty string.
pub struct TextEntry {
    pub body: TextBody,
    pub field: TextField,
    pub default_text: String,
}

impl TextEntry {
    pub fn dialog(parent: Option<DialogId>, text: impl Into<String>) -> TextEntryDialog {
        let content = TextEntry {
            body: TextBody::new(text),
            field: TextField::default(),
            default_text: String::new(),
        };
        let mut dialog = text_dialog(parent, content).with_placement(Placement::new(
            (0.5, 0.1),
            (0.5, 0.4),
            Anchor::TopCenter,
        ));
        dialog.add_handler(
            Category::KeyDown,
            Handler::new(|dialog: &mut TextEntryDialog, _, event: &DialogEvent| {
                let DialogEvent::KeyDown(press) = event else {
                    return Ok(Flow::Continue);
                };
                if dialog.content_mut().field.handle_key(press) {
                    Ok(Flow::Handled)
                } else {
                    Ok(Flow::Continue)
                }
            }),
            DEFAULT_PRIORITY,
        );
        dialog.add_key_handler(
            KeyId::Code(KeyCode::Enter),
            Handler::new(|dialog: &mut TextEntryDialog, _, _| {
                Ok(Flow::Exit(Some(dialog.content().field.text.clone())))
            }),
            DEFAULT_PRIORITY,
        );
        dialog.add_key_handler(
            KeyId::Code(KeyCode::Esc),
            Handler::new(|_: &mut TextEntryDialog, _, _| Ok(Flow::Exit(Some(String::new())))),
            DEFAULT_PRIORITY,
        );
        dialog
    }
}

impl Dialog<TextEntry> {
    /// Text the field is reset to every time the dialog is shown.
    pub fn set_default_text(&mut self, text: impl Into<String>) {
        self.content_mut().default_text = text.into();
    }
}

impl DialogContent for TextEntry {
    type Output = String;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.body.render(area, buf);
        self.field.render(FIELD_PLACEMENT.resolve(area), buf);
    }

    fn on_show(dialog: &mut Dialog<Self>) {
        let content = dialog.content_mut();
        let default_text = content.default_text.clone();
        content.field.set_text(default_text);
    }
}
