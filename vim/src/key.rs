/// A raw keycode as seen by the firmware.
///
/// Values below `0x100` are USB HID keyboard usages. Anything above that is
/// a firmware-defined code (custom keys, layer keys, the mode key). The
/// engine only interprets the HID usages listed as constants here; every
/// other value is either passed through or left inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const NO: KeyCode = KeyCode(0x00);

    pub const A: KeyCode = KeyCode(0x04);
    pub const B: KeyCode = KeyCode(0x05);
    pub const C: KeyCode = KeyCode(0x06);
    pub const D: KeyCode = KeyCode(0x07);
    pub const E: KeyCode = KeyCode(0x08);
    pub const F: KeyCode = KeyCode(0x09);
    pub const G: KeyCode = KeyCode(0x0A);
    pub const H: KeyCode = KeyCode(0x0B);
    pub const I: KeyCode = KeyCode(0x0C);
    pub const J: KeyCode = KeyCode(0x0D);
    pub const K: KeyCode = KeyCode(0x0E);
    pub const L: KeyCode = KeyCode(0x0F);
    pub const M: KeyCode = KeyCode(0x10);
    pub const N: KeyCode = KeyCode(0x11);
    pub const O: KeyCode = KeyCode(0x12);
    pub const P: KeyCode = KeyCode(0x13);
    pub const Q: KeyCode = KeyCode(0x14);
    pub const R: KeyCode = KeyCode(0x15);
    pub const S: KeyCode = KeyCode(0x16);
    pub const T: KeyCode = KeyCode(0x17);
    pub const U: KeyCode = KeyCode(0x18);
    pub const V: KeyCode = KeyCode(0x19);
    pub const W: KeyCode = KeyCode(0x1A);
    pub const X: KeyCode = KeyCode(0x1B);
    pub const Y: KeyCode = KeyCode(0x1C);
    pub const Z: KeyCode = KeyCode(0x1D);
    pub const N1: KeyCode = KeyCode(0x1E);
    pub const N2: KeyCode = KeyCode(0x1F);
    pub const N3: KeyCode = KeyCode(0x20);
    pub const N4: KeyCode = KeyCode(0x21);
    pub const N5: KeyCode = KeyCode(0x22);
    pub const N6: KeyCode = KeyCode(0x23);
    pub const N7: KeyCode = KeyCode(0x24);
    pub const N8: KeyCode = KeyCode(0x25);
    pub const N9: KeyCode = KeyCode(0x26);
    pub const N0: KeyCode = KeyCode(0x27);
    pub const ENTER: KeyCode = KeyCode(0x28);
    pub const ESCAPE: KeyCode = KeyCode(0x29);
    pub const BACKSPACE: KeyCode = KeyCode(0x2A);
    pub const TAB: KeyCode = KeyCode(0x2B);
    pub const SPACE: KeyCode = KeyCode(0x2C);

    pub const HOME: KeyCode = KeyCode(0x4A);
    pub const PAGE_UP: KeyCode = KeyCode(0x4B);
    pub const DELETE: KeyCode = KeyCode(0x4C);
    pub const END: KeyCode = KeyCode(0x4D);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x4E);
    pub const RIGHT: KeyCode = KeyCode(0x4F);
    pub const LEFT: KeyCode = KeyCode(0x50);
    pub const DOWN: KeyCode = KeyCode(0x51);
    pub const UP: KeyCode = KeyCode(0x52);

    pub const LCTRL: KeyCode = KeyCode(0xE0);
    pub const LSHIFT: KeyCode = KeyCode(0xE1);
    pub const LALT: KeyCode = KeyCode(0xE2);
    pub const LGUI: KeyCode = KeyCode(0xE3);
    pub const RCTRL: KeyCode = KeyCode(0xE4);
    pub const RSHIFT: KeyCode = KeyCode(0xE5);
    pub const RALT: KeyCode = KeyCode(0xE6);
    pub const RGUI: KeyCode = KeyCode(0xE7);

    /// First firmware-defined code; the default mode key.
    pub const MODE_KEY: KeyCode = KeyCode(0x7E00);

    /// Returns true for the eight HID modifier usages.
    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::LCTRL.0 && self.0 <= Self::RGUI.0
    }

    /// The modifier bit this key drives, if it is a modifier key.
    pub fn modifier_bit(self) -> Option<Modifiers> {
        if self.is_modifier() {
            Modifiers::from_bits(1 << (self.0 - Self::LCTRL.0))
        } else {
            None
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifier state, laid out like the HID report modifier byte.
    ///
    /// Left and right variants are tracked separately; use [`Modifiers::CTRL`]
    /// and friends to test for either side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const LCTRL  = 0b0000_0001;
        const LSHIFT = 0b0000_0010;
        const LALT   = 0b0000_0100;
        const LGUI   = 0b0000_1000;
        const RCTRL  = 0b0001_0000;
        const RSHIFT = 0b0010_0000;
        const RALT   = 0b0100_0000;
        const RGUI   = 0b1000_0000;

        const CTRL  = Self::LCTRL.bits() | Self::RCTRL.bits();
        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const ALT   = Self::LALT.bits() | Self::RALT.bits();
        const GUI   = Self::LGUI.bits() | Self::RGUI.bits();
    }
}

/// A single key transition delivered by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that changed state.
    pub code: KeyCode,
    /// True on key-down, false on key-up.
    pub pressed: bool,
    /// Firmware timer in milliseconds. Wraps at `u16::MAX`.
    pub time: u16,
}

impl KeyEvent {
    pub fn press(code: KeyCode, time: u16) -> Self {
        Self {
            code,
            pressed: true,
            time,
        }
    }

    pub fn release(code: KeyCode, time: u16) -> Self {
        Self {
            code,
            pressed: false,
            time,
        }
    }
}

/// Physical keys that can carry a vim binding.
///
/// The discriminants follow HID usage order from `A` to `Escape`, so a key's
/// index into the dispatch tables is its usage minus `0x04`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    N8,
    N9,
    N0,
    Enter,
    Escape,
}

impl Key {
    /// Number of bindable keys; the length of every dispatch table.
    pub const COUNT: usize = 38;

    #[rustfmt::skip]
    const ALL: [Key; Key::COUNT] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::N1, Key::N2, Key::N3, Key::N4, Key::N5, Key::N6, Key::N7, Key::N8,
        Key::N9, Key::N0, Key::Enter, Key::Escape,
    ];

    /// Maps a raw keycode to a bindable key. Codes outside `A..=Escape`
    /// return `None`.
    pub fn from_code(code: KeyCode) -> Option<Key> {
        let index = code.0.checked_sub(KeyCode::A.0)? as usize;
        Self::ALL.get(index).copied()
    }

    pub const fn code(self) -> KeyCode {
        KeyCode(self as u16 + KeyCode::A.0)
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("keycode {0:#06x} has no vim binding slot")]
    NotMapped(u16),
}

impl TryFrom<KeyCode> for Key {
    type Error = KeyError;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        Key::from_code(code).ok_or(KeyError::NotMapped(code.0))
    }
}
