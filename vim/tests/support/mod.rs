#![allow(dead_code)]

pub mod mock_keyboard;
pub mod recording_observer;

use mock_keyboard::MockKeyboard;
use vim_hid::{Engine, KeyCode, KeyEvent, ModeObserver};

pub fn press<O: ModeObserver>(eng: &mut Engine<O>, kb: &mut MockKeyboard, code: KeyCode) -> bool {
    let event = KeyEvent::press(code, kb.now);
    eng.handle_event(kb, event)
}

pub fn release<O: ModeObserver>(eng: &mut Engine<O>, kb: &mut MockKeyboard, code: KeyCode) -> bool {
    let event = KeyEvent::release(code, kb.now);
    eng.handle_event(kb, event)
}

/// Press and immediately release `code`.
pub fn tap<O: ModeObserver>(eng: &mut Engine<O>, kb: &mut MockKeyboard, code: KeyCode) -> bool {
    let consumed = press(eng, kb, code);
    release(eng, kb, code);
    consumed
}

/// Tap `code` with left shift held around it.
pub fn tap_shifted<O: ModeObserver>(eng: &mut Engine<O>, kb: &mut MockKeyboard, code: KeyCode) {
    press(eng, kb, KeyCode::LSHIFT);
    tap(eng, kb, code);
    release(eng, kb, KeyCode::LSHIFT);
}

/// Tap the mode key to latch command mode and forget the output so far.
pub fn enter_command<O: ModeObserver>(eng: &mut Engine<O>, kb: &mut MockKeyboard) {
    tap(eng, kb, KeyCode::MODE_KEY);
    kb.out.clear();
}

/// Command mode, then `v`.
pub fn enter_visual<O: ModeObserver>(eng: &mut Engine<O>, kb: &mut MockKeyboard) {
    enter_command(eng, kb);
    tap(eng, kb, KeyCode::V);
    kb.out.clear();
}
