use std::time::Duration;

use anyhow::Result;
use ratatui::layout::Position;

use crate::event::{DialogEvent, EventKind};

/// Where a modal loop gets its input from.
pub trait InputSource {
    /// Blocks until the next event is available.
    fn wait(&mut self) -> Result<DialogEvent>;

    /// Drops every queued event of `kind`.
    fn discard(&mut self, kind: EventKind) -> Result<()>;

    /// Live pointer position, if the pointer has been seen at all.
    fn pointer_position(&self) -> Option<Position>;

    /// Gives the source a moment to batch up a burst of events.
    fn settle(&mut self, period: Duration) {
        std::thread::sleep(period);
    }

    /// Whether key releases are delivered. Key repeat is synthesized only
    /// when they are, since nothing would ever stop it otherwise.
    fn reports_key_release(&self) -> bool {
        true
    }
}

/// Periodic `DialogEvent::Tick` generator.
pub trait TickSource {
    fn arm(&mut self, ticks_per_second: u32);

    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

pub trait EventSource: InputSource + TickSource {}

impl<T: InputSource + TickSource> EventSource for T {}
