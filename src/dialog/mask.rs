use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
};

/// Style painted over masked cells. Approximates a black overlay at 175/255
/// opacity on a terminal: contents stay legible but clearly inactive.
pub const DEFAULT_FADE_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .bg(Color::Black)
    .add_modifier(Modifier::DIM);

/// Cell coverage of a faded dialog, relative to the dialog's own area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FadeMask {
    width: u16,
    height: u16,
    cells: Vec<bool>,
}

impl FadeMask {
    /// Covers every cell of a `width` x `height` area.
    pub fn uniform(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![true; usize::from(width) * usize::from(height)],
        }
    }

    /// Leaves `region` (relative to the mask origin) unmasked.
    pub fn clear(mut self, region: Rect) -> Self {
        let bounds = Rect::new(0, 0, self.width, self.height);
        let region = region.intersection(bounds);
        for position in region.positions() {
            let index = self.index(position);
            self.cells[index] = false;
        }
        self
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn covers(&self, column: u16, row: u16) -> bool {
        column < self.width && row < self.height && self.cells[self.index(Position::new(column, row))]
    }

    /// Paints `style` over every covered cell, with the mask origin at
    /// `area`'s top-left corner.
    pub fn apply(&self, area: Rect, style: Style, buf: &mut Buffer) {
        let target = Rect::new(area.x, area.y, self.width, self.height).intersection(buf.area);
        for position in target.positions() {
            if !self.covers(position.x - area.x, position.y - area.y) {
                continue;
            }
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_style(style);
            }
        }
    }

    fn index(&self, position: Position) -> usize {
        usize::from(position.y) * usize::from(self.width) + usize::from(position.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_region_is_left_alone() {
        let mask = FadeMask::uniform(6, 3).clear(Rect::new(1, 1, 2, 5));
        assert_eq!((mask.width(), mask.height()), (6, 3));
        assert!(mask.covers(0, 0));
        assert!(!mask.covers(1, 1));
        assert!(!mask.covers(2, 2));
        assert!(mask.covers(3, 1));
        assert!(!mask.covers(6, 0), "outside the mask is never covered");
    }

    #[test]
    fn apply_only_touches_covered_cells() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 4));
        let mask = FadeMask::uniform(4, 2).clear(Rect::new(0, 0, 1, 1));
        mask.apply(Rect::new(2, 1, 4, 2), DEFAULT_FADE_STYLE, &mut buf);

        assert_eq!(buf[(2, 1)].bg, Color::Reset, "cleared corner");
        assert_eq!(buf[(3, 1)].bg, Color::Black);
        assert!(buf[(5, 2)].modifier.contains(Modifier::DIM));
        assert_eq!(buf[(6, 2)].bg, Color::Reset, "right of the dialog");
        assert_eq!(buf[(1, 1)].bg, Color::Reset, "left of the dialog");
    }
}
