use crate::key::{KeyCode, Modifiers};
use crate::types::Mode;

/// Tapping term used when the firmware does not override it, in milliseconds.
pub const DEFAULT_TAPPING_TERM: u16 = 200;

/// Output side of the firmware: injects synthesized keys into the HID report.
pub trait KeySink {
    /// Press and release `code` with `mods` held around it.
    fn tap(&mut self, mods: Modifiers, code: KeyCode);
    /// Register `mods` and then `code`.
    fn press(&mut self, mods: Modifiers, code: KeyCode);
    /// Unregister `code` and then `mods`.
    fn release(&mut self, mods: Modifiers, code: KeyCode);
    /// Drop every key and modifier currently in the report.
    fn clear_keyboard(&mut self);
}

/// The firmware the engine is embedded in.
pub trait Keyboard: KeySink {
    /// Modifiers genuinely held on the keyboard right now.
    fn modifiers(&self) -> Modifiers;

    // tap vs hold threshold for the mode key
    fn tapping_term(&self, _code: KeyCode) -> u16 {
        DEFAULT_TAPPING_TERM
    }
}

/// Notified after every mode change, e.g. to drive indicator LEDs.
pub trait ModeObserver {
    fn mode_changed(&mut self, _mode: Mode) {}
}

impl ModeObserver for () {}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ModeObserver for NoopObserver {}

impl<O: ModeObserver + ?Sized> ModeObserver for &mut O {
    fn mode_changed(&mut self, mode: Mode) {
        (**self).mode_changed(mode)
    }
}
