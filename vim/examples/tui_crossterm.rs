//! Terminal demo of the vim engine using crossterm.
//!
//! Every key typed into the terminal is fed to the engine as a press and an
//! immediate release. Whatever the engine would send to the host is printed
//! instead. Tab plays the mode key, Ctrl+C quits.
//!
//! Run with: cargo run --example tui_crossterm

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Stdout, Write};
use std::time::Instant;
use vim_hid::{EngineBuilder, KeyCode, KeyEvent, KeySink, Keyboard, Mode, ModeObserver, Modifiers};

/// Stands in for the USB host: prints every report the engine produces.
struct PrintingHost {
    out: Stdout,
}

impl PrintingHost {
    fn line(&mut self, text: String) {
        // raw mode needs the carriage return
        let _ = execute!(self.out, Print(text), Print("\r\n"));
    }
}

impl KeySink for PrintingHost {
    fn tap(&mut self, mods: Modifiers, code: KeyCode) {
        self.line(format!("  tap     {}", chord_name(mods, code)));
    }

    fn press(&mut self, mods: Modifiers, code: KeyCode) {
        self.line(format!("  press   {}", chord_name(mods, code)));
    }

    fn release(&mut self, mods: Modifiers, code: KeyCode) {
        self.line(format!("  release {}", chord_name(mods, code)));
    }

    fn clear_keyboard(&mut self) {
        self.line("  clear".to_string());
    }
}

impl Keyboard for PrintingHost {
    // modifiers arrive bundled with each terminal key, never held across keys
    fn modifiers(&self) -> Modifiers {
        Modifiers::empty()
    }
}

struct StatusLine;

impl ModeObserver for StatusLine {
    fn mode_changed(&mut self, mode: Mode) {
        let label = match mode {
            Mode::Insert => "-- INSERT --",
            Mode::Command => "-- COMMAND --",
            Mode::Visual => "-- VISUAL --",
        };
        let _ = execute!(io::stdout(), Print(label), Print("\r\n"));
    }
}

fn chord_name(mods: Modifiers, code: KeyCode) -> String {
    let mut name = String::new();
    for (flag, label) in [
        (Modifiers::CTRL, "Ctrl+"),
        (Modifiers::SHIFT, "Shift+"),
        (Modifiers::ALT, "Alt+"),
        (Modifiers::GUI, "Gui+"),
    ] {
        if mods.intersects(flag) {
            name.push_str(label);
        }
    }
    let key = match code {
        KeyCode::LEFT => "Left".to_string(),
        KeyCode::RIGHT => "Right".to_string(),
        KeyCode::UP => "Up".to_string(),
        KeyCode::DOWN => "Down".to_string(),
        KeyCode::HOME => "Home".to_string(),
        KeyCode::END => "End".to_string(),
        KeyCode::PAGE_UP => "PageUp".to_string(),
        KeyCode::PAGE_DOWN => "PageDown".to_string(),
        KeyCode::DELETE => "Delete".to_string(),
        KeyCode::BACKSPACE => "Backspace".to_string(),
        KeyCode(c @ 0x04..=0x1D) => char::from(b'A' + (c - 0x04) as u8).to_string(),
        KeyCode(other) => format!("{other:#04x}"),
    };
    name.push_str(&key);
    name
}

/// Translates one terminal key into the HID codes a keyboard would report,
/// modifiers first.
fn convert_crossterm_event(event: CKeyEvent) -> Option<(Vec<KeyCode>, KeyCode)> {
    let mut mods = Vec::new();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods.push(KeyCode::LCTRL);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods.push(KeyCode::LALT);
    }

    let code = match event.code {
        CKeyCode::Tab => KeyCode::MODE_KEY,
        CKeyCode::Esc => KeyCode::ESCAPE,
        CKeyCode::Enter => KeyCode::ENTER,
        CKeyCode::Backspace => KeyCode::BACKSPACE,
        CKeyCode::Left => KeyCode::LEFT,
        CKeyCode::Right => KeyCode::RIGHT,
        CKeyCode::Up => KeyCode::UP,
        CKeyCode::Down => KeyCode::DOWN,
        CKeyCode::Char(' ') => KeyCode::SPACE,
        CKeyCode::Char(c) => {
            let (shifted, code) = char_code(c)?;
            if shifted || event.modifiers.contains(KeyModifiers::SHIFT) {
                mods.push(KeyCode::LSHIFT);
            }
            code
        }
        _ => return None,
    };
    Some((mods, code))
}

// US layout: the HID usage for a character and whether it needs shift.
fn char_code(c: char) -> Option<(bool, KeyCode)> {
    let usage = |offset: u8| KeyCode(u16::from(offset));
    match c {
        'a'..='z' => Some((false, usage(0x04 + (c as u8 - b'a')))),
        'A'..='Z' => Some((true, usage(0x04 + (c as u8 - b'A')))),
        '1'..='9' => Some((false, usage(0x1E + (c as u8 - b'1')))),
        '0' => Some((false, KeyCode::N0)),
        '$' => Some((true, KeyCode::N4)),
        '^' => Some((true, KeyCode::N6)),
        _ => None,
    }
}

fn main() -> Result<(), io::Error> {
    let mut host = PrintingHost { out: io::stdout() };
    let mut engine = EngineBuilder::default().observer(StatusLine).build();
    let start = Instant::now();
    // the firmware timer is 16 bits wide and wraps
    let now = || start.elapsed().as_millis() as u16;

    enable_raw_mode()?;
    host.line("Tab toggles command mode, Ctrl+C quits.".to_string());

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }
        let Some((mods, code)) = convert_crossterm_event(key) else {
            continue;
        };

        for &m in &mods {
            engine.handle_event(&mut host, KeyEvent::press(m, now()));
        }
        let consumed = engine.handle_event(&mut host, KeyEvent::press(code, now()));
        engine.handle_event(&mut host, KeyEvent::release(code, now()));
        for &m in mods.iter().rev() {
            engine.handle_event(&mut host, KeyEvent::release(m, now()));
        }

        if !consumed {
            host.line(format!("  host    {}", chord_name(Modifiers::empty(), code)));
        }
    }

    disable_raw_mode()?;
    io::stdout().flush()
}
