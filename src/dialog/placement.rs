use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Fraction of the width/height that lies before the anchor point.
    fn offsets(self) -> (f32, f32) {
        let horizontal = match self {
            Anchor::TopLeft | Anchor::MidLeft | Anchor::BottomLeft => 0.0,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => 0.5,
            Anchor::TopRight | Anchor::MidRight | Anchor::BottomRight => 1.0,
        };
        let vertical = match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => 0.0,
            Anchor::MidLeft | Anchor::Center | Anchor::MidRight => 0.5,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => 1.0,
        };
        (horizontal, vertical)
    }
}

/// Position and size as fractions of the parent area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: (f32, f32),
    pub size: (f32, f32),
    pub anchor: Anchor,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            pos: (0.5, 0.1),
            size: (1.0, 0.9),
            anchor: Anchor::TopCenter,
        }
    }
}

impl Placement {
    pub const fn new(pos: (f32, f32), size: (f32, f32), anchor: Anchor) -> Self {
        Self { pos, size, anchor }
    }

    pub const fn full() -> Self {
        Self::new((0.0, 0.0), (1.0, 1.0), Anchor::TopLeft)
    }

    /// Resolves to absolute cells inside `parent`, clamped to it.
    pub fn resolve(&self, parent: Rect) -> Rect {
        let width = scale(parent.width, self.size.0);
        let height = scale(parent.height, self.size.1);
        let (before_x, before_y) = self.anchor.offsets();
        let anchor_x = f32::from(parent.x) + f32::from(parent.width) * self.pos.0;
        let anchor_y = f32::from(parent.y) + f32::from(parent.height) * self.pos.1;
        let x = clamp_start(anchor_x - f32::from(width) * before_x, parent.x, parent.width, width);
        let y = clamp_start(anchor_y - f32::from(height) * before_y, parent.y, parent.height, height);
        Rect::new(x, y, width, height)
    }
}

fn scale(extent: u16, fraction: f32) -> u16 {
    (f32::from(extent) * fraction.clamp(0.0, 1.0)).round() as u16
}

fn clamp_start(start: f32, origin: u16, extent: u16, length: u16) -> u16 {
    let max = origin.saturating_add(extent.saturating_sub(length));
    (start.round().max(0.0) as u16).clamp(origin, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_placement_hangs_from_the_top_center() {
        let area = Placement::default().resolve(Rect::new(0, 0, 80, 20));
        assert_eq!(area, Rect::new(0, 2, 80, 18));
    }

    #[test]
    fn bottom_right_anchor_ends_at_the_anchor_point() {
        let placement = Placement::new((0.9, 1.0), (0.3, 0.1), Anchor::BottomRight);
        let area = placement.resolve(Rect::new(10, 5, 40, 30));
        assert_eq!(area, Rect::new(34, 32, 12, 3));
    }

    #[test]
    fn overflow_is_clamped_to_the_parent() {
        let placement = Placement::new((0.0, 0.0), (0.5, 0.5), Anchor::Center);
        let area = placement.resolve(Rect::new(4, 4, 20, 10));
        assert_eq!(area, Rect::new(4, 4, 10, 5));
    }
}
