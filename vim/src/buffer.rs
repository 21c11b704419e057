use log::{debug, warn};

use crate::key::Key;

/// Default number of keys the command buffer holds before it gives up.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10;

/// Prefix keys of a command that is still waiting for its second key,
/// e.g. the first `d` of `dd` or the `g` of `gg`.
///
/// Appending to a full buffer forgets everything in it rather than growing
/// or dropping the oldest key.
#[derive(Debug, Clone)]
pub struct CommandBuffer<const N: usize = DEFAULT_BUFFER_CAPACITY> {
    keys: [Option<Key>; N],
    len: usize,
}

impl<const N: usize> Default for CommandBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandBuffer<N> {
    pub const fn new() -> Self {
        Self {
            keys: [None; N],
            len: 0,
        }
    }

    pub fn append(&mut self, key: Key) {
        if self.len == N {
            warn!(target: "vim", "ran out of command buffer space, discarding {:?}", self.as_slice());
            self.len = 0;
            return;
        }
        self.keys[self.len] = Some(key);
        self.len += 1;
        debug!(target: "vim", "command buffer: {:?}", self.as_slice());
    }

    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!(target: "vim", "cleared command buffer");
        }
        self.len = 0;
    }

    /// The most recently appended key.
    pub fn tail(&self) -> Option<Key> {
        self.len.checked_sub(1).and_then(|i| self.keys[i])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[Option<Key>] {
        &self.keys[..self.len]
    }
}
