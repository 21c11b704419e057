/// The current mode of the vim engine.
///
/// Only one mode is active at a time. The engine starts in `Insert`, where
/// every key except the mode key reaches the host untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pass-through mode - keys reach the host unmodified.
    #[default]
    Insert,
    /// Command mode - keys are motions, operators and mode switches.
    Command,
    /// Visual mode - motions extend the host's selection.
    Visual,
}

/// The primitive part of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Primitive {
    #[default]
    None,

    Left,
    Down,
    Up,
    Right,

    DocumentStart,
    DocumentEnd,
    LineStart,
    LineEnd,
    /// The whole current line. Rewritten to `Home` followed by `LineEnd`.
    Line,
    PageUp,
    PageDown,
    WordStart,
    WordEnd,
    /// Whatever the host currently has selected. Operators on it skip the
    /// motion and act on the selection directly.
    Selection,

    Paste,
    Undo,
    CommandMode,
    VisualMode,
}

bitflags::bitflags! {
    /// Modifiers that change what an action does with its motion.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ActionMods: u8 {
        const CHANGE        = 0b0000_0001;
        const DELETE        = 0b0000_0010;
        const SELECT        = 0b0000_0100;
        const YANK          = 0b0000_1000;
        const INSERT_AFTER  = 0b0001_0000;
        const VISUAL_AFTER  = 0b0010_0000;
        const COMMAND_AFTER = 0b0100_0000;
    }
}

/// An editing action: a primitive plus the modifiers applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Action {
    pub primitive: Primitive,
    pub mods: ActionMods,
}

impl Action {
    pub const NONE: Action = Action::new(Primitive::None);

    pub const fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            mods: ActionMods::empty(),
        }
    }

    /// Returns this action with `mods` added.
    pub const fn with(self, mods: ActionMods) -> Self {
        Self {
            primitive: self.primitive,
            mods: self.mods.union(mods),
        }
    }

    /// True when the action neither moves nor modifies anything.
    pub fn is_none(&self) -> bool {
        self.primitive == Primitive::None && self.mods.is_empty()
    }
}

/// How a synthesized key is delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendType {
    Tap,
    Press,
    Release,
}

/// Tracks the mode key across one press/release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VimKeyState {
    /// Not pressed, or its press was already consumed by a mode switch.
    #[default]
    None,
    /// Pressed, nothing else touched yet.
    Tap,
    /// Pressed and used together with another key.
    Held,
}
