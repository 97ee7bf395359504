use std::{sync::Arc, time::Duration};

use ratatui::style::Style;

use super::labels::{self, LabelCatalog};
use crate::dialog::DEFAULT_FADE_STYLE;

#[derive(Debug, Clone)]
pub struct DialogOptions {
    /// Frame rate; also the tick rate while ticks are armed.
    pub fps: u32,
    /// Ticks a key must be held before it starts repeating.
    pub repeat_delay: u32,
    /// Ticks between repeats once repeating.
    pub repeat_interval: u32,
    pub fade_style: Style,
    pub mouse_capture: bool,
    pub(crate) labels: Arc<LabelCatalog>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            repeat_delay: 10,
            repeat_interval: 5,
            fade_style: DEFAULT_FADE_STYLE,
            mouse_capture: true,
            labels: labels::default_catalog(),
        }
    }
}

impl DialogOptions {
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    pub fn with_repeat(mut self, delay: u32, interval: u32) -> Self {
        self.repeat_delay = delay;
        self.repeat_interval = interval.max(1);
        self
    }

    pub fn with_fade_style(mut self, style: Style) -> Self {
        self.fade_style = style;
        self
    }

    pub fn with_mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    pub fn with_labels(mut self, labels: LabelCatalog) -> Self {
        self.labels = Arc::new(labels);
        self
    }

    pub fn labels(&self) -> Arc<LabelCatalog> {
        Arc::clone(&self.labels)
    }

    /// Duration of one frame at the configured rate.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
