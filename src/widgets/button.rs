use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::{
    dialog::{DEFAULT_PRIORITY, Dialog, DialogContent, Flow, Handler, Placement},
    event::KeyId,
    ui::ButtonLabel,
};

/// Button that closes its dialog with a fixed exit code.
#[derive(Debug, Clone)]
pub struct ExitButton<R> {
    pub text: String,
    pub hotkey: Option<char>,
    pub placement: Placement,
    exit_code: Option<R>,
}

impl<R: Clone> ExitButton<R> {
    pub fn new(placement: Placement, exit_code: Option<R>) -> Self {
        Self {
            text: String::new(),
            hotkey: None,
            placement,
            exit_code,
        }
    }

    /// What pressing the button does: exit with its code.
    pub fn activated(&self) -> Flow<R> {
        Flow::Exit(self.exit_code.clone())
    }

    pub fn exit_code(&self) -> Option<&R> {
        self.exit_code.as_ref()
    }

    pub fn apply_label(&mut self, label: &ButtonLabel) {
        self.text = label.text.clone();
        self.hotkey = label.hotkey;
    }

    pub fn area(&self, dialog_area: Rect) -> Rect {
        self.placement.resolve(dialog_area)
    }

    pub fn contains(&self, dialog_area: Rect, position: Position) -> bool {
        self.area(dialog_area).contains(position)
    }

    pub fn render(&self, dialog_area: Rect, buf: &mut Buffer) {
        let area = self.area(dialog_area);
        let paragraph = Paragraph::new(self.caption()).centered();
        if area.height >= 3 {
            paragraph.block(Block::bordered()).render(area, buf);
        } else {
            paragraph
                .style(Style::new().add_modifier(Modifier::REVERSED))
                .render(area, buf);
        }
    }

    /// Caption with the hotkey letter highlighted.
    fn caption(&self) -> Line<'static> {
        let hotkey_at = self.hotkey.and_then(|hotkey| {
            self.text
                .char_indices()
                .find(|(_, ch)| ch.eq_ignore_ascii_case(&hotkey))
        });
        let Some((index, ch)) = hotkey_at else {
            return Line::from(self.text.clone());
        };
        let after = index + ch.len_utf8();
        Line::from(vec![
            Span::raw(self.text[..index].to_string()),
            Span::styled(
                ch.to_string(),
                Style::new()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            ),
            Span::raw(self.text[after..].to_string()),
        ])
    }
}

/// Moves `handler` from the `previous` hotkey to `next`.
///
/// Both cases of a letter are bound, so the hotkey works with or without
/// shift.
pub fn rebind_hotkey<C: DialogContent>(
    dialog: &mut Dialog<C>,
    handler: &Handler<C>,
    previous: Option<char>,
    next: Option<char>,
) {
    if let Some(key) = previous {
        for id in hotkey_ids(key) {
            dialog.remove_key_handler(id, handler);
        }
    }
    if let Some(key) = next {
        for id in hotkey_ids(key) {
            dialog.add_key_handler(id, handler.clone(), DEFAULT_PRIORITY);
        }
    }
}

fn hotkey_ids(key: char) -> Vec<KeyId> {
    let lower = key.to_ascii_lowercase();
    let upper = key.to_ascii_uppercase();
    if lower == upper {
        vec![KeyId::Char(lower)]
    } else {
        vec![KeyId::Char(lower), KeyId::Char(upper)]
    }
}
