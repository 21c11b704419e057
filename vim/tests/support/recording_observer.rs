use vim_hid::{Mode, ModeObserver};

#[derive(Default, Debug, Clone)]
pub struct RecordingObserver {
    pub modes: Vec<Mode>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModeObserver for RecordingObserver {
    fn mode_changed(&mut self, mode: Mode) {
        self.modes.push(mode);
    }
}
