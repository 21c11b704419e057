//! Benchmarks for per-keystroke cost of the vim engine.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;
use vim_hid::{Engine, KeyCode, KeyEvent, KeySink, Keyboard, Modifiers};

/// Keyboard that only counts what it is asked to send.
#[derive(Default)]
struct CountingKeyboard {
    sent: usize,
}

impl KeySink for CountingKeyboard {
    fn tap(&mut self, mods: Modifiers, code: KeyCode) {
        black_box((mods, code));
        self.sent += 1;
    }

    fn press(&mut self, mods: Modifiers, code: KeyCode) {
        black_box((mods, code));
        self.sent += 1;
    }

    fn release(&mut self, mods: Modifiers, code: KeyCode) {
        black_box((mods, code));
        self.sent += 1;
    }

    fn clear_keyboard(&mut self) {
        self.sent += 1;
    }
}

impl Keyboard for CountingKeyboard {
    fn modifiers(&self) -> Modifiers {
        Modifiers::empty()
    }
}

fn tap(engine: &mut Engine, kb: &mut CountingKeyboard, code: KeyCode) {
    engine.handle_event(kb, black_box(KeyEvent::press(code, 0)));
    engine.handle_event(kb, black_box(KeyEvent::release(code, 0)));
}

fn command_engine(kb: &mut CountingKeyboard) -> Engine {
    let mut engine = Engine::new();
    tap(&mut engine, kb, KeyCode::MODE_KEY);
    engine
}

fn benchmark_insert_pass_through(c: &mut Criterion) {
    let mut kb = CountingKeyboard::default();
    let mut engine = Engine::new();

    c.bench_function("insert pass-through", |b| {
        b.iter(|| {
            for code in [KeyCode::H, KeyCode::E, KeyCode::L, KeyCode::L, KeyCode::O] {
                tap(&mut engine, &mut kb, code);
            }
        });
    });
}

fn benchmark_simple_movements(c: &mut Criterion) {
    let mut kb = CountingKeyboard::default();
    let mut engine = command_engine(&mut kb);

    c.bench_function("simple movements (hjkl)", |b| {
        b.iter(|| {
            for code in [KeyCode::J, KeyCode::J, KeyCode::L, KeyCode::L, KeyCode::H, KeyCode::K] {
                tap(&mut engine, &mut kb, code);
            }
        });
    });
}

fn benchmark_delete_operations(c: &mut Criterion) {
    let mut kb = CountingKeyboard::default();
    let mut engine = command_engine(&mut kb);

    c.bench_function("delete operations (dw, dd)", |b| {
        b.iter(|| {
            for code in [KeyCode::D, KeyCode::W, KeyCode::D, KeyCode::D] {
                tap(&mut engine, &mut kb, code);
            }
        });
    });
}

fn benchmark_visual_selection(c: &mut Criterion) {
    let mut kb = CountingKeyboard::default();
    let mut engine = command_engine(&mut kb);

    c.bench_function("visual selection", |b| {
        b.iter(|| {
            tap(&mut engine, &mut kb, KeyCode::V);
            for _ in 0..5 {
                tap(&mut engine, &mut kb, KeyCode::W);
            }
            tap(&mut engine, &mut kb, KeyCode::Y);
        });
    });
}

fn benchmark_mode_round_trip(c: &mut Criterion) {
    let mut kb = CountingKeyboard::default();
    let mut engine = Engine::new();

    c.bench_function("mode key round trip", |b| {
        b.iter(|| {
            // latch command mode, then toggle back
            tap(&mut engine, &mut kb, KeyCode::MODE_KEY);
            tap(&mut engine, &mut kb, KeyCode::MODE_KEY);
        });
    });
    black_box(kb.sent);
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(100);
    targets = benchmark_insert_pass_through,
              benchmark_simple_movements,
              benchmark_delete_operations,
              benchmark_visual_selection,
              benchmark_mode_round_trip
}
criterion_main!(benches);
