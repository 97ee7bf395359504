use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::event::KeyPress;

/// Single-line editable text with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub cursor_pos: usize,
}

impl TextField {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_pos = self.text.chars().count();
    }

    /// Applies an editing key. Returns false for keys it does not use.
    pub fn handle_key(&mut self, press: &KeyPress) -> bool {
        let len = self.text.chars().count();
        self.cursor_pos = self.cursor_pos.min(len);
        match press.code {
            KeyCode::Backspace => {
                if self.cursor_pos == 0 {
                    return false;
                }
                self.cursor_pos -= 1;
                let at = self.byte_offset(self.cursor_pos);
                self.text.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.cursor_pos == len {
                    return false;
                }
                let at = self.byte_offset(self.cursor_pos);
                self.text.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(len);
                true
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                true
            }
            KeyCode::End => {
                self.cursor_pos = len;
                true
            }
            _ => match press.text {
                Some(ch) => {
                    let at = self.byte_offset(self.cursor_pos);
                    self.text.insert(at, ch);
                    self.cursor_pos += 1;
                    true
                }
                None => false,
            },
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let inner = block.inner(area);
        Paragraph::new(self.text.as_str())
            .block(block)
            .render(area, buf);

        let before = &self.text[..self.byte_offset(self.cursor_pos)];
        let column = inner.x.saturating_add(before.width() as u16);
        if inner.height > 0 && column < inner.right() {
            buf.set_style(
                Rect::new(column, inner.y, 1, 1),
                Style::new().add_modifier(Modifier::REVERSED),
            );
        }
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(index, _)| index)
    }
}
