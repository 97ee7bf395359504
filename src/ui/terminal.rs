use std::{
    collections::VecDeque,
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    sync::{
        Once,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{debug, warn};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Position, Rect},
};

use super::{
    Surface,
    source::{InputSource, TickSource},
};
use crate::event::{DialogEvent, EventKind, KeyPress};

static PANIC_HOOK: Once = Once::new();
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

/// Raw-mode alternate screen that is restored on drop and on panic.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    key_release: bool,
}

impl TerminalGuard {
    pub fn new(mouse_capture: bool) -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        if mouse_capture {
            execute!(stdout, EnableMouseCapture).context("failed to enable mouse capture")?;
        }
        let key_release = match supports_keyboard_enhancement() {
            Ok(true) => {
                execute!(
                    stdout,
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )
                .context("failed to enable key release reporting")?;
                KEYBOARD_ENHANCED.store(true, Ordering::SeqCst);
                true
            }
            Ok(false) => false,
            Err(err) => {
                warn!("could not query keyboard enhancement support: {err}");
                false
            }
        };
        debug!("terminal ready (key release reporting: {key_release})");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        install_panic_hook();
        Ok(Self {
            terminal,
            key_release,
        })
    }

    /// Whether the terminal reports key releases, which key repeat needs.
    pub fn reports_key_release(&self) -> bool {
        self.key_release
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore_terminal();
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Surface for TerminalGuard {
    fn area(&self) -> Result<Rect> {
        Surface::area(&self.terminal)
    }

    fn draw(&mut self, paint: &mut dyn FnMut(&mut Buffer)) -> Result<()> {
        Surface::draw(&mut self.terminal, paint)
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore_terminal();
            previous(panic_info);
        }));
    });
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show);
}

/// crossterm-backed input with ticks generated from poll timeouts.
#[derive(Debug)]
pub struct TerminalEvents {
    queue: VecDeque<DialogEvent>,
    tick_period: Option<Duration>,
    next_tick: Option<Instant>,
    pointer: Option<Position>,
    key_release: bool,
}

impl TerminalEvents {
    pub fn new(key_release: bool) -> Self {
        Self {
            queue: VecDeque::new(),
            tick_period: None,
            next_tick: None,
            pointer: None,
            key_release,
        }
    }

    fn translate(&mut self, raw: Event) -> Option<DialogEvent> {
        match raw {
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c' | 'C'))
                {
                    return (key.kind == KeyEventKind::Press).then_some(DialogEvent::Quit);
                }
                match key.kind {
                    KeyEventKind::Press => Some(DialogEvent::KeyDown(KeyPress::from(key))),
                    KeyEventKind::Release => Some(DialogEvent::KeyUp(KeyPress::from(key))),
                    // With releases reported, repeats are synthesized from
                    // ticks; otherwise the terminal's own repeats stand in.
                    KeyEventKind::Repeat if self.key_release => None,
                    KeyEventKind::Repeat => Some(DialogEvent::KeyDown(KeyPress::from(key))),
                }
            }
            Event::Mouse(mouse) => {
                self.pointer = Some(Position::new(mouse.column, mouse.row));
                let (column, row) = (mouse.column, mouse.row);
                let event = match mouse.kind {
                    MouseEventKind::Moved => DialogEvent::PointerMove {
                        column,
                        row,
                        primary_held: false,
                    },
                    MouseEventKind::Drag(button) => DialogEvent::PointerMove {
                        column,
                        row,
                        primary_held: button == MouseButton::Left,
                    },
                    MouseEventKind::Up(button) => DialogEvent::PointerUp {
                        column,
                        row,
                        button,
                    },
                    _ => DialogEvent::Other,
                };
                Some(event)
            }
            Event::Resize(width, height) => Some(DialogEvent::Resize { width, height }),
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => Some(DialogEvent::Other),
        }
    }

    /// Moves everything crossterm already has buffered into the queue.
    fn drain_pending(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
            let raw = event::read().context("failed to read terminal event")?;
            if let Some(event) = self.translate(raw) {
                self.queue.push_back(event);
            }
        }
        Ok(())
    }

    /// Emits the due tick, plus one catch-up tick when at least a whole
    /// period was missed, and schedules the next tick on the period grid.
    fn fire_tick(&mut self, due: Instant, period: Duration, now: Instant) -> DialogEvent {
        let late = now.saturating_duration_since(due);
        let period_nanos = period.as_nanos().max(1);
        if late.as_nanos() >= period_nanos {
            self.queue.push_back(DialogEvent::Tick);
        }
        let into_period = Duration::from_nanos((late.as_nanos() % period_nanos) as u64);
        self.next_tick = Some(now + period - into_period);
        DialogEvent::Tick
    }
}

impl InputSource for TerminalEvents {
    fn wait(&mut self) -> Result<DialogEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(event);
            }
            let raw = match (self.next_tick, self.tick_period) {
                (Some(due), Some(period)) => {
                    let now = Instant::now();
                    if now >= due {
                        return Ok(self.fire_tick(due, period, now));
                    }
                    if !event::poll(due - now).context("failed to poll terminal events")? {
                        continue;
                    }
                    event::read().context("failed to read terminal event")?
                }
                _ => event::read().context("failed to read terminal event")?,
            };
            if let Some(event) = self.translate(raw) {
                return Ok(event);
            }
        }
    }

    fn discard(&mut self, kind: EventKind) -> Result<()> {
        self.drain_pending()?;
        self.queue.retain(|event| event.kind() != kind);
        Ok(())
    }

    fn pointer_position(&self) -> Option<Position> {
        self.pointer
    }

    fn reports_key_release(&self) -> bool {
        self.key_release
    }
}

impl TickSource for TerminalEvents {
    fn arm(&mut self, ticks_per_second: u32) {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        self.tick_period = Some(period);
        self.next_tick = Some(Instant::now() + period);
    }

    fn disarm(&mut self) {
        self.tick_period = None;
        self.next_tick = None;
        self.queue.retain(|event| *event != DialogEvent::Tick);
    }

    fn is_armed(&self) -> bool {
        self.tick_period.is_some()
    }
}
