use crate::event::KeyPress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatState {
    Idle,
    /// Waiting out the initial delay.
    KeyHeld,
    Repeating,
}

/// Tick-driven key repeat.
///
/// The counter starts at `-delay` when a key goes down and climbs by one per
/// tick. Whenever it reaches `interval` it drops back to zero and the held
/// press is re-delivered, so a key held for `delay + interval * k` ticks
/// yields exactly `k` repeats.
#[derive(Debug, Clone, Default)]
pub struct KeyRepeat {
    held: Option<KeyPress>,
    counter: i32,
}

impl KeyRepeat {
    pub fn press(&mut self, press: KeyPress, delay: u32) {
        self.held = Some(press);
        self.counter = -to_i32(delay);
    }

    pub fn release(&mut self) {
        self.held = None;
        self.counter = 0;
    }

    /// Advances one tick; returns the press to re-deliver when one is due.
    pub fn tick(&mut self, interval: u32) -> Option<KeyPress> {
        let held = self.held.as_ref()?;
        self.counter += 1;
        if self.counter >= to_i32(interval) {
            self.counter = 0;
            return Some(held.repeated());
        }
        None
    }

    pub fn held(&self) -> Option<&KeyPress> {
        self.held.as_ref()
    }

    pub fn counter(&self) -> i32 {
        self.counter
    }

    pub fn state(&self) -> RepeatState {
        match self.held {
            None => RepeatState::Idle,
            Some(_) if self.counter < 0 => RepeatState::KeyHeld,
            Some(_) => RepeatState::Repeating,
        }
    }
}

fn to_i32(ticks: u32) -> i32 {
    i32::try_from(ticks).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyModifiers;

    fn held_for(ticks: u32) -> usize {
        let mut repeat = KeyRepeat::default();
        repeat.press(KeyPress::new(KeyCode::Down, KeyModifiers::NONE), 10);
        (0..ticks).filter_map(|_| repeat.tick(5)).count()
    }

    #[test]
    fn repeats_follow_delay_then_interval() {
        assert_eq!(held_for(14), 0);
        assert_eq!(held_for(15), 1);
        assert_eq!(held_for(19), 1);
        assert_eq!(held_for(20), 2);
        assert_eq!(held_for(35), 5);
    }

    #[test]
    fn states_track_the_counter() {
        let mut repeat = KeyRepeat::default();
        assert_eq!(repeat.state(), RepeatState::Idle);
        assert_eq!(repeat.tick(5), None);

        repeat.press(KeyPress::char('x'), 2);
        assert_eq!(repeat.counter(), -2);
        assert_eq!(repeat.state(), RepeatState::KeyHeld);
        repeat.tick(5);
        repeat.tick(5);
        assert_eq!(repeat.counter(), 0);
        assert_eq!(repeat.state(), RepeatState::Repeating);

        repeat.release();
        assert_eq!(repeat.state(), RepeatState::Idle);
        assert_eq!(repeat.counter(), 0);
        assert!(repeat.held().is_none());
    }

    #[test]
    fn repeated_press_is_synthetic() {
        let mut repeat = KeyRepeat::default();
        repeat.press(KeyPress::char('x'), 0);
        let again = (0..5).find_map(|_| repeat.tick(5)).expect("repeat due");
        assert!(again.synthetic);
        assert_eq!(again.text, Some('x'));
        assert!(!repeat.held().expect("still held").synthetic);
    }
}
