//! Static key-to-action tables, one per mode and modifier class.

use crate::key::{Key, Modifiers};
use crate::types::{Action, ActionMods, Mode, Primitive};

use ActionMods as M;
use DispatchEntry as E;
use Primitive as P;

/// A table slot: what a key does and how it is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    pub action: Action,
    /// Sent as press on key-down and release on key-up, so holding the key
    /// repeats at the host's rate. Otherwise the action is a single tap.
    pub repeating: bool,
    /// The first press only records the key; pressing it again performs the
    /// action (`gg`, `dd`). Any other key in between consumes the prefix.
    pub buffer_then_act: bool,
}

impl DispatchEntry {
    const fn once(action: Action) -> Self {
        Self {
            action,
            repeating: false,
            buffer_then_act: false,
        }
    }

    const fn repeat(action: Action) -> Self {
        Self {
            action,
            repeating: true,
            buffer_then_act: false,
        }
    }

    const fn buffered(action: Action) -> Self {
        Self {
            action,
            repeating: false,
            buffer_then_act: true,
        }
    }
}

/// Which sub-table a modifier combination selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierClass {
    Plain,
    Shift,
    Ctrl,
}

impl ModifierClass {
    /// Ctrl wins over Shift, and Alt or GUI held alongside either is ignored.
    /// Ctrl+Shift together and Alt or GUI alone select no table.
    pub fn of(mods: Modifiers) -> Option<ModifierClass> {
        let ctrl = mods.intersects(Modifiers::CTRL);
        let shift = mods.intersects(Modifiers::SHIFT);
        match (ctrl, shift) {
            (true, true) => None,
            (true, false) => Some(ModifierClass::Ctrl),
            (false, true) => Some(ModifierClass::Shift),
            (false, false) if mods.is_empty() => Some(ModifierClass::Plain),
            (false, false) => None,
        }
    }
}

type Table = [Option<DispatchEntry>; Key::COUNT];

const fn table(entries: &[(Key, DispatchEntry)]) -> Table {
    let mut table = [None; Key::COUNT];
    let mut i = 0;
    while i < entries.len() {
        let (key, entry) = entries[i];
        table[key.index()] = Some(entry);
        i += 1;
    }
    table
}

const fn act(primitive: Primitive) -> Action {
    Action::new(primitive)
}

#[rustfmt::skip]
static COMMAND: Table = table(&[
    (Key::A, E::once(act(P::Right).with(M::INSERT_AFTER))),
    (Key::B, E::repeat(act(P::WordStart))),
    (Key::C, E::buffered(act(P::Line).with(M::CHANGE))),
    (Key::D, E::buffered(act(P::Line).with(M::DELETE))),
    (Key::E, E::repeat(act(P::WordEnd))),
    (Key::G, E::buffered(act(P::DocumentStart))),
    (Key::H, E::repeat(act(P::Left))),
    (Key::I, E::once(act(P::None).with(M::INSERT_AFTER))),
    (Key::J, E::repeat(act(P::Down))),
    (Key::K, E::repeat(act(P::Up))),
    (Key::L, E::repeat(act(P::Right))),
    (Key::P, E::repeat(act(P::Paste))),
    (Key::S, E::once(act(P::Right).with(M::CHANGE))),
    (Key::U, E::repeat(act(P::Undo))),
    (Key::V, E::once(act(P::VisualMode))),
    (Key::W, E::repeat(act(P::WordEnd))),
    (Key::X, E::repeat(act(P::Right).with(M::DELETE))),
    (Key::Y, E::buffered(act(P::Line).with(M::YANK))),
    (Key::N0, E::once(act(P::LineStart))),
]);

#[rustfmt::skip]
static COMMAND_SHIFT: Table = table(&[
    (Key::A, E::once(act(P::LineEnd).with(M::INSERT_AFTER))),
    (Key::B, E::repeat(act(P::WordStart))),
    (Key::C, E::once(act(P::LineEnd).with(M::CHANGE))),
    (Key::D, E::once(act(P::LineEnd).with(M::DELETE))),
    (Key::E, E::repeat(act(P::WordEnd))),
    (Key::G, E::repeat(act(P::DocumentEnd))),
    (Key::I, E::once(act(P::LineStart).with(M::INSERT_AFTER))),
    (Key::P, E::repeat(act(P::Paste))),
    (Key::S, E::once(act(P::Line).with(M::CHANGE))),
    (Key::V, E::once(act(P::Line).with(M::SELECT.union(M::VISUAL_AFTER)))),
    (Key::W, E::repeat(act(P::WordEnd))),
    (Key::X, E::repeat(act(P::Left).with(M::DELETE))),
    (Key::Y, E::once(act(P::Line).with(M::YANK))),
    (Key::N4, E::repeat(act(P::LineEnd))),   // $
    (Key::N6, E::repeat(act(P::LineStart))), // ^
]);

#[rustfmt::skip]
static COMMAND_CTRL: Table = table(&[
    (Key::B, E::repeat(act(P::PageUp))),
    (Key::F, E::repeat(act(P::PageDown))),
]);

// Cutting or copying a selection (x, D, X, Y included) ends visual mode.
#[rustfmt::skip]
static VISUAL: Table = table(&[
    (Key::B, E::repeat(act(P::WordStart).with(M::SELECT))),
    (Key::C, E::once(act(P::Selection).with(M::CHANGE))),
    (Key::D, E::once(act(P::Selection).with(M::DELETE.union(M::COMMAND_AFTER)))),
    (Key::E, E::repeat(act(P::WordEnd).with(M::SELECT))),
    (Key::G, E::buffered(act(P::DocumentStart).with(M::SELECT))),
    (Key::H, E::repeat(act(P::Left).with(M::SELECT))),
    (Key::J, E::repeat(act(P::Down).with(M::SELECT))),
    (Key::K, E::repeat(act(P::Up).with(M::SELECT))),
    (Key::L, E::repeat(act(P::Right).with(M::SELECT))),
    (Key::P, E::repeat(act(P::Paste))),
    (Key::S, E::once(act(P::Selection).with(M::CHANGE))),
    (Key::V, E::once(act(P::CommandMode))),
    (Key::W, E::repeat(act(P::WordEnd).with(M::SELECT))),
    (Key::X, E::once(act(P::Selection).with(M::DELETE.union(M::COMMAND_AFTER)))),
    (Key::Y, E::once(act(P::Selection).with(M::YANK.union(M::COMMAND_AFTER)))),
    (Key::N0, E::once(act(P::LineStart).with(M::SELECT))),
    (Key::Escape, E::once(act(P::CommandMode))),
]);

#[rustfmt::skip]
static VISUAL_SHIFT: Table = table(&[
    (Key::C, E::once(act(P::Line).with(M::CHANGE))),
    (Key::D, E::once(act(P::Line).with(M::DELETE.union(M::COMMAND_AFTER)))),
    (Key::V, E::once(act(P::Line).with(M::SELECT))),
    (Key::X, E::once(act(P::Line).with(M::DELETE.union(M::COMMAND_AFTER)))),
    (Key::Y, E::once(act(P::Line).with(M::YANK.union(M::COMMAND_AFTER)))),
]);

fn table_for(mode: Mode, class: ModifierClass) -> Option<&'static Table> {
    match (mode, class) {
        (Mode::Insert, _) => None,
        (Mode::Command, ModifierClass::Plain) => Some(&COMMAND),
        (Mode::Command, ModifierClass::Shift) => Some(&COMMAND_SHIFT),
        (Mode::Command, ModifierClass::Ctrl) => Some(&COMMAND_CTRL),
        (Mode::Visual, ModifierClass::Plain) => Some(&VISUAL),
        (Mode::Visual, ModifierClass::Shift) => Some(&VISUAL_SHIFT),
        (Mode::Visual, ModifierClass::Ctrl) => None,
    }
}

/// Finds the binding of `key` in `mode` with the shadow modifiers `mods`.
pub fn lookup(mode: Mode, mods: Modifiers, key: Key) -> Option<&'static DispatchEntry> {
    let class = ModifierClass::of(mods)?;
    table_for(mode, class)?[key.index()].as_ref()
}

/// True when `key` has a non-empty binding. Shares [`lookup`] with dispatch.
pub fn is_mapped(mode: Mode, mods: Modifiers, key: Key) -> bool {
    lookup(mode, mods, key).is_some_and(|entry| !entry.action.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_mode_has_no_table() {
        assert_eq!(lookup(Mode::Insert, Modifiers::empty(), Key::H), None);
        assert!(!is_mapped(Mode::Insert, Modifiers::empty(), Key::H));
    }

    #[test]
    fn modifier_class_precedence() {
        assert_eq!(ModifierClass::of(Modifiers::empty()), Some(ModifierClass::Plain));
        assert_eq!(ModifierClass::of(Modifiers::RSHIFT), Some(ModifierClass::Shift));
        assert_eq!(ModifierClass::of(Modifiers::SHIFT), Some(ModifierClass::Shift));
        assert_eq!(ModifierClass::of(Modifiers::LCTRL), Some(ModifierClass::Ctrl));
        assert_eq!(ModifierClass::of(Modifiers::LCTRL | Modifiers::LSHIFT), None);
        assert_eq!(ModifierClass::of(Modifiers::RCTRL | Modifiers::LSHIFT), None);
        assert_eq!(ModifierClass::of(Modifiers::LALT), None);
        assert_eq!(ModifierClass::of(Modifiers::GUI), None);
        assert_eq!(
            ModifierClass::of(Modifiers::LSHIFT | Modifiers::LGUI),
            Some(ModifierClass::Shift)
        );
        assert_eq!(
            ModifierClass::of(Modifiers::LCTRL | Modifiers::RALT),
            Some(ModifierClass::Ctrl)
        );
    }

    #[test]
    fn command_tables() {
        let g = lookup(Mode::Command, Modifiers::empty(), Key::G).unwrap();
        assert!(g.buffer_then_act);
        assert_eq!(g.action, Action::new(Primitive::DocumentStart));

        let dollar = lookup(Mode::Command, Modifiers::LSHIFT, Key::N4).unwrap();
        assert!(dollar.repeating);
        assert_eq!(dollar.action.primitive, Primitive::LineEnd);

        let page = lookup(Mode::Command, Modifiers::RCTRL, Key::F).unwrap();
        assert_eq!(page.action.primitive, Primitive::PageDown);

        assert_eq!(lookup(Mode::Command, Modifiers::LCTRL, Key::H), None);
        assert_eq!(lookup(Mode::Command, Modifiers::empty(), Key::Escape), None);
    }

    #[test]
    fn visual_has_no_ctrl_table() {
        assert_eq!(lookup(Mode::Visual, Modifiers::LCTRL, Key::B), None);
        let esc = lookup(Mode::Visual, Modifiers::empty(), Key::Escape).unwrap();
        assert_eq!(esc.action.primitive, Primitive::CommandMode);
    }

    #[test]
    fn insert_only_entry_counts_as_mapped() {
        // `i` has no motion but still switches mode
        assert!(is_mapped(Mode::Command, Modifiers::empty(), Key::I));
        assert!(!is_mapped(Mode::Command, Modifiers::empty(), Key::Q));
    }
}
