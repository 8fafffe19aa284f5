use criterion::{Criterion, criterion_group, criterion_main};
use std::time::{Duration, Instant};

use common::GameSettings;
use common::game::{GameSession, GridSize, InputEvent, NullSoundPlayer, SessionRng};

fn run_session_ticks(tick_count: u32) {
    let start = Instant::now();
    let settings = GameSettings {
        walls_enabled: false,
        ..GameSettings::default()
    };
    let mut session = GameSession::new(
        GridSize::new(40, 30),
        settings,
        SessionRng::from_random(),
        start,
    );
    session.handle_input(InputEvent::Confirm, start);

    let mut sounds = NullSoundPlayer;
    for i in 1..=tick_count {
        let now = start + Duration::from_millis(u64::from(i) * 200);
        session.tick(now, &mut sounds);
    }
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("1000_ticks", |b| b.iter(|| run_session_ticks(1000)));

    group.bench_function("10000_ticks", |b| b.iter(|| run_session_ticks(10_000)));

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
