#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use modalui::{
    Dialog, DialogContent, DialogEvent, DialogOptions, Flow, Handler, Ui,
    testing::{MemorySurface, ScriptedEvents},
};
use ratatui::{buffer::Buffer, layout::Rect};

pub const SCREEN: (u16, u16) = (80, 24);

pub struct Harness {
    pub ui: Ui,
    pub events: ScriptedEvents,
    pub surface: MemorySurface,
}

pub fn harness(script: impl IntoIterator<Item = DialogEvent>) -> Harness {
    harness_with(ScriptedEvents::new(script), DialogOptions::default())
}

pub fn harness_with(events: ScriptedEvents, options: DialogOptions) -> Harness {
    let surface = MemorySurface::new(SCREEN.0, SCREEN.1);
    let ui = Ui::new(surface.clone(), events.clone(), options);
    Harness {
        ui,
        events,
        surface,
    }
}

/// Content that draws nothing and returns a label.
#[derive(Debug, Default)]
pub struct Blank {
    pub answers: Vec<Option<bool>>,
}

impl DialogContent for Blank {
    type Output = &'static str;

    fn render(&self, _area: Rect, _buf: &mut Buffer) {}
}

pub type Log = Rc<RefCell<Vec<&'static str>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<&'static str> {
    log.borrow().clone()
}

/// Handler that records `name` and then answers with `flow`.
pub fn recorder(log: &Log, name: &'static str, flow: Flow<&'static str>) -> Handler<Blank> {
    let log = Rc::clone(log);
    Handler::new(move |_: &mut Dialog<Blank>, _, _| {
        log.borrow_mut().push(name);
        Ok(flow.clone())
    })
}

pub fn exit_with(value: &'static str) -> Handler<Blank> {
    Handler::new(move |_: &mut Dialog<Blank>, _, _| Ok(Flow::Exit(Some(value))))
}

pub fn blank() -> Dialog<Blank> {
    Dialog::new(None, Blank::default())
}

/// Text of row `y` between columns `from` and `to`.
pub fn row_text(buf: &Buffer, y: u16, from: u16, to: u16) -> String {
    (from..to).map(|x| buf[(x, y)].symbol().to_string()).collect()
}
