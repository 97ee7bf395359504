mod common;

use std::{cell::Cell, rc::Rc};

use common::{Blank, entries, harness, harness_with, log, blank, recorder};
use crossterm::event::KeyCode;
use modalui::{
    Category, DEFAULT_PRIORITY, Dialog, DialogEvent, DialogOptions, Dispatch, Flow, Handler, KeyId,
    KeyPress, dialog::RepeatState, testing::ScriptedEvents,
};

fn ticks(dialog: &mut Dialog<Blank>, ui: &mut modalui::Ui, count: usize) {
    for _ in 0..count {
        dialog.handle(ui, &DialogEvent::Tick).expect("tick");
    }
}

#[test]
fn held_key_repeats_after_the_delay_then_every_interval() {
    let mut h = harness([]);
    let calls = log();
    let mut dialog = blank();
    dialog.add_key_handler(KeyId::Char('x'), recorder(&calls, "x", Flow::Continue), DEFAULT_PRIORITY);

    dialog
        .handle(&mut h.ui, &DialogEvent::KeyDown(KeyPress::char('x')))
        .expect("press");
    assert_eq!(dialog.repeat().state(), RepeatState::KeyHeld);

    ticks(&mut dialog, &mut h.ui, 14);
    assert_eq!(entries(&calls).len(), 1);
    ticks(&mut dialog, &mut h.ui, 1);
    assert_eq!(entries(&calls).len(), 2);
    ticks(&mut dialog, &mut h.ui, 20);
    assert_eq!(entries(&calls).len(), 6);
    assert_eq!(dialog.repeat().state(), RepeatState::Repeating);
}

#[test]
fn release_stops_repeating_and_a_new_press_restarts_the_delay() {
    let mut h = harness([]);
    let calls = log();
    let mut dialog = blank();
    dialog.add_handler(Category::KeyDown, recorder(&calls, "down", Flow::Continue), 1);

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::Down))
        .expect("press");
    ticks(&mut dialog, &mut h.ui, 12);
    dialog
        .handle(&mut h.ui, &DialogEvent::key_up(KeyCode::Down))
        .expect("release");
    assert_eq!(dialog.repeat().state(), RepeatState::Idle);
    ticks(&mut dialog, &mut h.ui, 30);
    assert_eq!(entries(&calls).len(), 1);

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::Down))
        .expect("press again");
    ticks(&mut dialog, &mut h.ui, 14);
    assert_eq!(entries(&calls).len(), 2, "delay starts over on a new press");
    ticks(&mut dialog, &mut h.ui, 1);
    assert_eq!(entries(&calls).len(), 3);
}

#[test]
fn custom_repeat_timing_is_honoured() {
    let events = ScriptedEvents::new([]);
    let mut h = harness_with(events, DialogOptions::default().with_repeat(2, 1));
    let calls = log();
    let mut dialog = blank();
    dialog.add_handler(Category::KeyDown, recorder(&calls, "down", Flow::Continue), 1);

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::Up))
        .expect("press");
    ticks(&mut dialog, &mut h.ui, 5);
    assert_eq!(entries(&calls).len(), 1 + 3);
}

#[test]
fn repeated_presses_reach_character_handlers() {
    let mut h = harness([]);
    let calls = log();
    let mut dialog = blank();
    dialog.add_key_handler(KeyId::Char('Y'), recorder(&calls, "Y", Flow::Continue), 1);

    dialog
        .handle(&mut h.ui, &DialogEvent::KeyDown(KeyPress::char('Y')))
        .expect("press");
    ticks(&mut dialog, &mut h.ui, 15);
    assert_eq!(entries(&calls), vec!["Y", "Y"]);
}

#[test]
fn repeated_presses_are_marked_and_do_not_rearm() {
    let mut h = harness([]);
    let seen = Rc::new(Cell::new(0));
    let mut dialog = blank();
    let synthetic = Rc::clone(&seen);
    dialog.add_handler(
        Category::KeyDown,
        Handler::new(move |_: &mut Dialog<Blank>, _, event: &DialogEvent| {
            if let DialogEvent::KeyDown(press) = event
                && press.synthetic
            {
                synthetic.set(synthetic.get() + 1);
            }
            Ok(Flow::Continue)
        }),
        1,
    );

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::Right))
        .expect("press");
    ticks(&mut dialog, &mut h.ui, 25);
    assert_eq!(seen.get(), 3);
    assert_eq!(h.events.arm_count(), 1);
}

#[test]
fn exit_from_a_repeated_key_closes_the_dialog() {
    let mut h = harness([]);
    let presses = Rc::new(Cell::new(0));
    let mut dialog = blank();
    let counter = Rc::clone(&presses);
    dialog.add_key_handler(
        KeyId::Code(KeyCode::PageDown),
        Handler::new(move |_: &mut Dialog<Blank>, _, _| {
            counter.set(counter.get() + 1);
            if counter.get() == 3 {
                Ok(Flow::Exit(Some("bottom")))
            } else {
                Ok(Flow::Continue)
            }
        }),
        DEFAULT_PRIORITY,
    );

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::PageDown))
        .expect("press");
    let mut outcome = Dispatch::Pending;
    for _ in 0..20 {
        outcome = dialog.handle(&mut h.ui, &DialogEvent::Tick).expect("tick");
        if outcome != Dispatch::Pending {
            break;
        }
    }
    assert_eq!(outcome, Dispatch::Exit(Some("bottom")));
    assert_eq!(presses.get(), 3);
}

#[test]
fn key_press_arms_the_timer_and_release_disarms_it() {
    let mut h = harness([]);
    let mut dialog = blank();
    assert_eq!(h.events.armed(), None);

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::Left))
        .expect("press");
    assert_eq!(h.events.armed(), Some(30));

    dialog
        .handle(&mut h.ui, &DialogEvent::key_up(KeyCode::Left))
        .expect("release");
    assert_eq!(h.events.armed(), None, "no tick handlers, so no timer");
}

#[test]
fn tick_handlers_keep_the_timer_running() {
    let mut h = harness([DialogEvent::key_up(KeyCode::Left), DialogEvent::key_down(KeyCode::Esc)]);
    let calls = log();
    let mut dialog = blank();
    dialog.add_handler(Category::Tick, recorder(&calls, "tick", Flow::Continue), 1);
    dialog.add_key_handler(KeyId::Code(KeyCode::Esc), common::exit_with("esc"), 1);

    dialog.show(&mut h.ui).expect("show");
    assert_eq!(h.events.arm_count(), 3, "show, release, escape press");
    assert_eq!(h.events.armed(), None, "closing stops the timer");
}

#[test]
fn without_key_release_there_is_no_repeat() {
    let events = ScriptedEvents::new([]).without_key_release();
    let mut h = harness_with(events, DialogOptions::default());
    let calls = log();
    let mut dialog = blank();
    dialog.add_handler(Category::KeyDown, recorder(&calls, "down", Flow::Continue), 1);

    dialog
        .handle(&mut h.ui, &DialogEvent::key_down(KeyCode::Down))
        .expect("press");
    assert_eq!(dialog.repeat().state(), RepeatState::Idle);
    ticks(&mut dialog, &mut h.ui, 40);
    assert_eq!(entries(&calls).len(), 1);
    assert_eq!(h.events.arm_count(), 0);
}
