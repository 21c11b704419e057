pub mod buffer;
pub mod engine;
pub mod key;
pub mod table;
pub mod traits;
pub mod types;

pub use crate::buffer::{CommandBuffer, DEFAULT_BUFFER_CAPACITY};
pub use crate::engine::{Chord, Engine, EngineBuilder, EngineSnapshot};
pub use crate::key::{Key, KeyCode, KeyError, KeyEvent, Modifiers};
pub use crate::table::{DispatchEntry, ModifierClass};
pub use crate::traits::{DEFAULT_TAPPING_TERM, KeySink, Keyboard, ModeObserver, NoopObserver};
pub use crate::types::{Action, ActionMods, Mode, Primitive, SendType, VimKeyState};
