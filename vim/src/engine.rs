use log::{debug, trace};

use crate::buffer::{CommandBuffer, DEFAULT_BUFFER_CAPACITY};
use crate::key::{Key, KeyCode, KeyEvent, Modifiers};
use crate::table;
use crate::traits::{KeySink, Keyboard, ModeObserver};
use crate::types::{Action, ActionMods, Mode, Primitive, SendType, VimKeyState};

/// A modifier chord the engine has pressed and not yet released.
pub type Chord = (Modifiers, KeyCode);

/// What an action's operator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Motion(Modifiers, KeyCode),
    Selection,
    Nothing,
}

fn target_of(primitive: Primitive) -> Target {
    let none = Modifiers::empty();
    let ctrl = Modifiers::LCTRL;
    match primitive {
        Primitive::Left => Target::Motion(none, KeyCode::LEFT),
        Primitive::Down => Target::Motion(none, KeyCode::DOWN),
        Primitive::Up => Target::Motion(none, KeyCode::UP),
        Primitive::Right => Target::Motion(none, KeyCode::RIGHT),
        Primitive::LineStart => Target::Motion(none, KeyCode::HOME),
        Primitive::LineEnd => Target::Motion(none, KeyCode::END),
        Primitive::WordStart => Target::Motion(ctrl, KeyCode::LEFT),
        Primitive::WordEnd => Target::Motion(ctrl, KeyCode::RIGHT),
        Primitive::DocumentStart => Target::Motion(ctrl, KeyCode::HOME),
        Primitive::DocumentEnd => Target::Motion(ctrl, KeyCode::END),
        Primitive::PageUp => Target::Motion(none, KeyCode::PAGE_UP),
        Primitive::PageDown => Target::Motion(none, KeyCode::PAGE_DOWN),
        Primitive::Selection => Target::Selection,
        // handled before mapping, or no key at all
        Primitive::None
        | Primitive::Line
        | Primitive::Paste
        | Primitive::Undo
        | Primitive::CommandMode
        | Primitive::VisualMode => Target::Nothing,
    }
}

// Same as the firmware's 16-bit timer_expired: true once `now` reaches
// `deadline`, tolerating wrap-around.
fn timer_expired(now: u16, deadline: u16) -> bool {
    now.wrapping_sub(deadline) < u16::MAX / 2
}

fn send<S: KeySink>(
    sink: &mut S,
    mods: Modifiers,
    code: KeyCode,
    send_type: SendType,
) -> Option<Chord> {
    debug!(target: "vim", "{:?} mods={:?} code={:#04x}", send_type, mods, code.0);
    match send_type {
        SendType::Tap => {
            sink.tap(mods, code);
            None
        }
        SendType::Press => {
            sink.press(mods, code);
            Some((mods, code))
        }
        SendType::Release => {
            sink.release(mods, code);
            None
        }
    }
}

/// Selects `target` (unless it is the existing selection) and applies the
/// clipboard shortcut `Ctrl+clip` to it. Returns false if there was nothing
/// to act on.
fn operate<S: KeySink>(sink: &mut S, target: Target, clip: KeyCode) -> bool {
    match target {
        Target::Nothing => return false,
        Target::Motion(mods, code) => {
            send(sink, mods | Modifiers::LSHIFT, code, SendType::Tap);
        }
        Target::Selection => {}
    }
    send(sink, Modifiers::LCTRL, clip, SendType::Tap);
    true
}

#[derive(Debug, Clone)]
pub struct Engine<O: ModeObserver = (), const N: usize = DEFAULT_BUFFER_CAPACITY> {
    mode: Mode,
    // real modifiers get rewritten by our own output, so track them here
    shadow_mods: Modifiers,
    buffer: CommandBuffer<N>,
    mode_key: KeyCode,
    mode_key_state: VimKeyState,
    mode_key_deadline: u16,
    held: [Option<Chord>; Key::COUNT],
    observer: O,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub shadow_mods: Modifiers,
    pub pending: Option<Key>,
    pub mode_key: VimKeyState,
}

pub struct EngineBuilder<O = ()> {
    mode: Mode,
    mode_key: KeyCode,
    observer: O,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            mode: Mode::Insert,
            mode_key: KeyCode::MODE_KEY,
            observer: (),
        }
    }
}

impl<O: ModeObserver> EngineBuilder<O> {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// The key that toggles between insert and command mode.
    pub fn mode_key(mut self, code: KeyCode) -> Self {
        self.mode_key = code;
        self
    }

    pub fn observer<P: ModeObserver>(self, observer: P) -> EngineBuilder<P> {
        EngineBuilder {
            mode: self.mode,
            mode_key: self.mode_key,
            observer,
        }
    }

    pub fn build(self) -> Engine<O> {
        self.build_with_capacity()
    }

    /// Like [`build`](Self::build) with a command buffer holding `N` keys.
    pub fn build_with_capacity<const N: usize>(self) -> Engine<O, N> {
        Engine {
            mode: self.mode,
            shadow_mods: Modifiers::empty(),
            buffer: CommandBuffer::new(),
            mode_key: self.mode_key,
            mode_key_state: VimKeyState::None,
            mode_key_deadline: 0,
            held: [None; Key::COUNT],
            observer: self.observer,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ModeObserver, const N: usize> Engine<O, N> {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            shadow_mods: self.shadow_mods,
            pending: self.buffer.tail(),
            mode_key: self.mode_key_state,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Entry point for every key event. Returns `true` when the event was
    /// consumed and must not be forwarded to the host.
    pub fn handle_event<K: Keyboard>(&mut self, kb: &mut K, event: KeyEvent) -> bool {
        if event.code == self.mode_key {
            self.handle_mode_key(kb, event);
            return true;
        }

        if self.mode == Mode::Insert {
            return false;
        }

        debug!(
            target: "vim",
            "{:?} shadow_mods={:?} code={:#04x} pressed={}",
            self.mode, self.shadow_mods, event.code.0, event.pressed
        );

        if let Some(bit) = event.code.modifier_bit() {
            self.shadow_mods.set(bit, event.pressed);
            return true;
        }

        if event.pressed && self.mode_key_state == VimKeyState::Tap {
            self.mode_key_state = VimKeyState::Held;
        }

        let before = self.mode;
        match Key::from_code(event.code) {
            Some(key) => self.dispatch(kb, key, event.pressed),
            None if event.pressed => {
                trace!(target: "vim", "no binding for {:#04x}", event.code.0);
                self.buffer.clear();
            }
            None => {}
        }

        // a mode switch made while the mode key is down consumes the key
        if self.mode != before {
            self.mode_key_state = VimKeyState::None;
        }
        true
    }

    /// Whether `code` does something in the current mode with the current
    /// modifiers. Meant for per-key indicator lighting.
    pub fn is_active_key(&self, code: KeyCode) -> bool {
        if self.mode == Mode::Insert {
            return false;
        }
        Key::from_code(code).is_some_and(|key| table::is_mapped(self.mode, self.shadow_mods, key))
    }

    fn handle_mode_key<K: Keyboard>(&mut self, kb: &mut K, event: KeyEvent) {
        if event.pressed {
            debug!(target: "vim", "mode key pressed");
            self.mode_key_deadline = event.time.wrapping_add(kb.tapping_term(event.code));
            if self.mode == Mode::Insert {
                self.enter_command_mode(kb, false);
                self.mode_key_state = VimKeyState::Tap;
            } else {
                self.enter_insert_mode(kb);
                self.mode_key_state = VimKeyState::None;
            }
            return;
        }

        debug!(target: "vim", "mode key released state={:?}", self.mode_key_state);
        match self.mode_key_state {
            VimKeyState::Tap if !timer_expired(event.time, self.mode_key_deadline) => {}
            VimKeyState::Tap | VimKeyState::Held => self.enter_insert_mode(kb),
            VimKeyState::None => {}
        }
        self.mode_key_state = VimKeyState::None;
    }

    fn dispatch<K: Keyboard>(&mut self, kb: &mut K, key: Key, pressed: bool) {
        if !pressed {
            if let Some((mods, code)) = self.held[key.index()].take() {
                send(kb, mods, code, SendType::Release);
            }
            return;
        }

        let Some(entry) = table::lookup(self.mode, self.shadow_mods, key) else {
            trace!(target: "vim", "no binding for {:?} in {:?}", key, self.mode);
            self.buffer.clear();
            return;
        };

        if entry.buffer_then_act {
            if self.buffer.tail() == Some(key) {
                self.buffer.clear();
                self.perform(kb, entry.action, SendType::Tap);
            } else {
                self.buffer.append(key);
            }
            return;
        }

        let send_type = if entry.repeating {
            SendType::Press
        } else {
            SendType::Tap
        };
        if let Some(chord) = self.perform(kb, entry.action, send_type) {
            self.held[key.index()] = Some(chord);
        }
    }

    /// Executes `action` and returns the chord left pressed, if any.
    ///
    /// A pending `c`, `d` or `y` prefix in the command buffer turns the action
    /// into change, delete or yank and forces it to a tap.
    ///
    /// A returned chord is still down on the host and the engine does not
    /// track it. The caller must send its release. Key events routed through
    /// [`handle_event`](Self::handle_event) do this automatically.
    pub fn perform<K: Keyboard>(
        &mut self,
        kb: &mut K,
        mut action: Action,
        mut send_type: SendType,
    ) -> Option<Chord> {
        debug!(target: "vim", "perform {:?} {:?}", action, send_type);

        match action.primitive {
            Primitive::Paste => {
                self.buffer.clear();
                return send(kb, Modifiers::LCTRL, KeyCode::V, send_type);
            }
            Primitive::Undo => {
                self.buffer.clear();
                return send(kb, Modifiers::LCTRL, KeyCode::Z, send_type);
            }
            Primitive::CommandMode => {
                self.enter_command_mode(kb, true);
                return None;
            }
            Primitive::VisualMode => {
                self.enter_visual_mode();
                return None;
            }
            Primitive::Line => {
                send(kb, Modifiers::empty(), KeyCode::HOME, SendType::Tap);
                action.primitive = Primitive::LineEnd;
                send_type = SendType::Tap;
            }
            _ => {}
        }

        let operator = match self.buffer.tail() {
            Some(Key::C) => ActionMods::CHANGE,
            Some(Key::D) => ActionMods::DELETE,
            Some(Key::Y) => ActionMods::YANK,
            _ => ActionMods::empty(),
        };
        if !operator.is_empty() {
            action = action.with(operator);
            send_type = SendType::Tap;
        }
        self.buffer.clear();

        let mut target = target_of(action.primitive);
        if action.mods == ActionMods::DELETE {
            // backspace and delete erase on their own, no select+cut needed
            let erase = match action.primitive {
                Primitive::Left => Some(KeyCode::BACKSPACE),
                Primitive::Right => Some(KeyCode::DELETE),
                _ => None,
            };
            if let Some(code) = erase {
                target = Target::Motion(Modifiers::empty(), code);
                action.mods.remove(ActionMods::DELETE);
            }
        }

        let mut pressed = None;
        let mut cut = false;
        if action.mods.intersects(ActionMods::DELETE | ActionMods::CHANGE) {
            cut = operate(kb, target, KeyCode::X);
        } else if action.mods.contains(ActionMods::YANK) {
            operate(kb, target, KeyCode::C);
        } else if let Target::Motion(mods, code) = target {
            let mods = if action.mods.contains(ActionMods::SELECT) {
                mods | Modifiers::LSHIFT
            } else {
                mods
            };
            pressed = send(kb, mods, code, send_type);
        }

        if action.mods.intersects(ActionMods::CHANGE | ActionMods::INSERT_AFTER) {
            self.enter_insert_mode(kb);
        } else if action.mods.contains(ActionMods::VISUAL_AFTER) {
            self.enter_visual_mode();
        } else if action.mods.contains(ActionMods::COMMAND_AFTER) {
            // a cut already removed the selection, nothing left to collapse
            self.enter_command_mode(kb, !cut);
        }

        if self.mode == Mode::Insert
            && let Some((mods, code)) = pressed.take()
        {
            send(kb, mods, code, SendType::Release);
        }
        pressed
    }

    fn enter_insert_mode<K: Keyboard>(&mut self, kb: &mut K) {
        if self.mode == Mode::Insert {
            return;
        }
        debug!(target: "vim", "entering insert mode");
        self.mode = Mode::Insert;
        self.shadow_mods = Modifiers::empty();
        self.buffer.clear();
        self.release_held(kb);
        kb.clear_keyboard();
        self.observer.mode_changed(self.mode);
    }

    fn enter_command_mode<K: Keyboard>(&mut self, kb: &mut K, collapse_selection: bool) {
        if self.mode == Mode::Command {
            return;
        }
        match self.mode {
            Mode::Visual if collapse_selection => {
                // a held Shift+motion would turn the collapse into an extend
                self.release_held(kb);
                send(kb, Modifiers::empty(), KeyCode::LEFT, SendType::Tap);
            }
            Mode::Insert => {
                self.shadow_mods = kb.modifiers();
                // key-ups of keys pressed in insert mode are swallowed from here on
                kb.clear_keyboard();
            }
            _ => {}
        }
        debug!(target: "vim", "entering command mode shadow_mods={:?}", self.shadow_mods);
        self.mode = Mode::Command;
        self.buffer.clear();
        self.observer.mode_changed(self.mode);
    }

    fn release_held<K: Keyboard>(&mut self, kb: &mut K) {
        for slot in self.held.iter_mut() {
            if let Some((mods, code)) = slot.take() {
                send(kb, mods, code, SendType::Release);
            }
        }
    }

    fn enter_visual_mode(&mut self) {
        if self.mode == Mode::Visual {
            return;
        }
        debug!(target: "vim", "entering visual mode");
        self.mode = Mode::Visual;
        self.buffer.clear();
        self.observer.mode_changed(self.mode);
    }
}
