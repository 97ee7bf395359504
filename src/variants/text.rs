use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};
use textwrap::wrap;

use crate::{
    dialog::{Anchor, Dialog, DialogContent, DialogId, Flow, Handler, Placement},
    event::DialogEvent,
    widgets::ExitButton,
};

pub(crate) const TEXT_DIALOG_PLACEMENT: Placement =
    Placement::new((0.5, 0.1), (0.5, 0.5), Anchor::TopCenter);

/// Rows kept free under the text for buttons or an input field.
const FOOTER_ROWS: u16 = 3;

/// Wrapped message shown at the top of a text dialog.
#[derive(Debug, Clone, Default)]
pub struct TextBody {
    pub text: String,
}

impl TextBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let inner = block.inner(area);
        block.render(area, buf);
        let text_area = Rect {
            height: inner.height.saturating_sub(FOOTER_ROWS),
            ..inner
        };
        if text_area.width == 0 || text_area.height == 0 {
            return;
        }
        let lines: Vec<Line<'static>> = wrap(&self.text, usize::from(text_area.width))
            .into_iter()
            .map(|line| Line::from(line.into_owned()))
            .collect();
        Paragraph::new(lines).render(text_area, buf);
    }
}

pub(crate) fn text_dialog<C: DialogContent>(parent: Option<DialogId>, content: C) -> Dialog<C> {
    Dialog::new(parent, content)
        .with_placement(TEXT_DIALOG_PLACEMENT)
        .with_background(Style::new().bg(Color::Black))
}

/// Click handler activating whichever of `buttons` was released over.
pub(crate) fn click_buttons<C, F>(buttons: F) -> Handler<C>
where
    C: DialogContent,
    C::Output: Clone,
    F: Fn(&C) -> Vec<&ExitButton<C::Output>> + 'static,
{
    Handler::new(move |dialog: &mut Dialog<C>, _ui, event: &DialogEvent| {
        let Some(position) = event.position() else {
            return Ok(Flow::Continue);
        };
        Ok(pressed(buttons(dialog.content()), dialog.area(), position)
            .map_or(Flow::Continue, ExitButton::activated))
    })
}

fn pressed<R: Clone>(
    buttons: Vec<&ExitButton<R>>,
    area: Rect,
    position: Position,
) -> Option<&ExitButton<R>> {
    buttons
        .into_iter()
        .find(|button| button.contains(area, position))
}
