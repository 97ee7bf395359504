//! In-memory surface and scripted event source for driving dialogs without
//! a terminal.

use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

use anyhow::{Result, anyhow};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::{
    event::{DialogEvent, EventKind},
    ui::{InputSource, Surface, TickSource},
};

/// Surface that keeps the last drawn frame.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    frame: Rc<RefCell<Buffer>>,
    draws: Rc<RefCell<usize>>,
}

impl MemorySurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            frame: Rc::new(RefCell::new(Buffer::empty(Rect::new(0, 0, width, height)))),
            draws: Rc::new(RefCell::new(0)),
        }
    }

    /// Copy of the last frame. Clones of the surface share it.
    pub fn frame(&self) -> Buffer {
        self.frame.borrow().clone()
    }

    pub fn draws(&self) -> usize {
        *self.draws.borrow()
    }
}

impl Surface for MemorySurface {
    fn area(&self) -> Result<Rect> {
        Ok(self.frame.borrow().area)
    }

    fn draw(&mut self, paint: &mut dyn FnMut(&mut Buffer)) -> Result<()> {
        let mut frame = self.frame.borrow_mut();
        frame.reset();
        paint(&mut *frame);
        *self.draws.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Script {
    queue: VecDeque<DialogEvent>,
    pointer: Option<Position>,
    armed: Option<u32>,
    arm_count: usize,
    discarded: Vec<EventKind>,
    key_release: bool,
}

/// Plays back a fixed list of events. Clones share the same script, so a
/// test can keep one to inspect what the dialog did with it.
#[derive(Debug, Clone)]
pub struct ScriptedEvents {
    script: Rc<RefCell<Script>>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = DialogEvent>) -> Self {
        let script = Script {
            queue: events.into_iter().collect(),
            key_release: true,
            ..Script::default()
        };
        Self {
            script: Rc::new(RefCell::new(script)),
        }
    }

    pub fn without_key_release(self) -> Self {
        self.script.borrow_mut().key_release = false;
        self
    }

    pub fn push(&self, event: DialogEvent) {
        self.script.borrow_mut().queue.push_back(event);
    }

    pub fn set_pointer(&self, column: u16, row: u16) {
        self.script.borrow_mut().pointer = Some(Position::new(column, row));
    }

    /// Tick rate the source is armed with, if armed.
    pub fn armed(&self) -> Option<u32> {
        self.script.borrow().armed
    }

    pub fn arm_count(&self) -> usize {
        self.script.borrow().arm_count
    }

    pub fn discarded(&self) -> Vec<EventKind> {
        self.script.borrow().discarded.clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().queue.len()
    }
}

impl InputSource for ScriptedEvents {
    fn wait(&mut self) -> Result<DialogEvent> {
        self.script
            .borrow_mut()
            .queue
            .pop_front()
            .ok_or_else(|| anyhow!("event script exhausted"))
    }

    fn discard(&mut self, kind: EventKind) -> Result<()> {
        let mut script = self.script.borrow_mut();
        script.queue.retain(|event| event.kind() != kind);
        script.discarded.push(kind);
        Ok(())
    }

    fn pointer_position(&self) -> Option<Position> {
        self.script.borrow().pointer
    }

    fn settle(&mut self, _period: Duration) {}

    fn reports_key_release(&self) -> bool {
        self.script.borrow().key_release
    }
}

impl TickSource for ScriptedEvents {
    fn arm(&mut self, ticks_per_second: u32) {
        let mut script = self.script.borrow_mut();
        script.armed = Some(ticks_per_second);
        script.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.script.borrow_mut().armed = None;
    }

    fn is_armed(&self) -> bool {
        self.script.borrow().armed.is_some()
    }
}
