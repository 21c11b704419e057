use vim_hid::{DEFAULT_TAPPING_TERM, KeyCode, KeySink, Keyboard, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    Tap(Modifiers, KeyCode),
    Press(Modifiers, KeyCode),
    Release(Modifiers, KeyCode),
    Clear,
}

/// Records everything the engine sends to the host.
#[derive(Debug, Clone)]
pub struct MockKeyboard {
    /// Modifiers reported as physically held.
    pub mods: Modifiers,
    pub tapping_term: u16,
    /// Timestamp stamped on events built by the test helpers.
    pub now: u16,
    pub out: Vec<Emitted>,
}

impl Default for MockKeyboard {
    fn default() -> Self {
        Self {
            mods: Modifiers::empty(),
            tapping_term: DEFAULT_TAPPING_TERM,
            now: 0,
            out: Vec::new(),
        }
    }
}

impl MockKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Emitted> {
        std::mem::take(&mut self.out)
    }

    pub fn advance(&mut self, ms: u16) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl KeySink for MockKeyboard {
    fn tap(&mut self, mods: Modifiers, code: KeyCode) {
        self.out.push(Emitted::Tap(mods, code));
    }

    fn press(&mut self, mods: Modifiers, code: KeyCode) {
        self.out.push(Emitted::Press(mods, code));
    }

    fn release(&mut self, mods: Modifiers, code: KeyCode) {
        self.out.push(Emitted::Release(mods, code));
    }

    fn clear_keyboard(&mut self) {
        self.out.push(Emitted::Clear);
    }
}

impl Keyboard for MockKeyboard {
    fn modifiers(&self) -> Modifiers {
        self.mods
    }

    fn tapping_term(&self, _code: KeyCode) -> u16 {
        self.tapping_term
    }
}
