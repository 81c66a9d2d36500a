use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use dipjudge::board::order::{Order, OrderType};
use dipjudge::board::state::State;
use dipjudge::classical::{self, ENGLAND, FRANCE, GERMANY, RUSSIA, TURKEY};
use dipjudge::resolve::advance_all;

/// A common opening: every nation moves out, a few supports and a convoy.
fn opening() -> State {
    let mut state = classical::start();
    let orders = [
        Order::move_to("vie", "gal"),
        Order::move_to("bud", "ser"),
        Order::move_to("tri", "alb"),
        Order::move_to("lon", "nth"),
        Order::move_to("edi", "nwg"),
        Order::move_to("lvp", "yor"),
        Order::move_to("par", "bur"),
        Order::move_to("mar", "spa"),
        Order::move_to("bre", "mid"),
        Order::move_to("kie", "den"),
        Order::move_to("ber", "kie"),
        Order::move_to("mun", "ruh"),
        Order::move_to("ven", "tyr"),
        Order::move_to("rom", "apu"),
        Order::move_to("nap", "ion"),
        Order::move_to("stp", "bot"),
        Order::move_to("mos", "ukr"),
        Order::move_to("war", "gal"),
        Order::move_to("sev", "bla"),
        Order::move_to("ank", "bla"),
        Order::move_to("con", "bul"),
        Order::move_to("smy", "arm"),
    ];
    state
        .set_orders(orders.into_iter().map(|o| (o.source().clone(), o)))
        .unwrap();
    state
}

fn bench_opening_turn(c: &mut Criterion) {
    let state = opening();
    c.bench_function("opening_turn", |b| {
        b.iter_batched(
            || state.clone(),
            |mut s| {
                s.next().unwrap();
                s
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_year_of_holds(c: &mut Criterion) {
    c.bench_function("full_year_holds", |b| {
        b.iter_batched(
            classical::start,
            |mut s| {
                for _ in 0..5 {
                    s.next().unwrap();
                }
                s
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_options(c: &mut Criterion) {
    let state = classical::start();
    let mut group = c.benchmark_group("options");
    for nation in [ENGLAND, FRANCE, GERMANY, RUSSIA, TURKEY] {
        group.bench_function(nation.as_str().to_string(), |b| {
            b.iter(|| black_box(&state).options(&OrderType::ALL, black_box(&nation)))
        });
    }
    group.finish();
}

fn bench_advance_all(c: &mut Criterion) {
    let games: Vec<State> = (0..16).map(|_| opening()).collect();
    c.bench_function("advance_16_games", |b| {
        b.iter_batched(
            || games.clone(),
            |mut gs| {
                advance_all(&mut gs);
                gs
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_state_clone(c: &mut Criterion) {
    let state = opening();
    c.bench_function("state_clone", |b| b.iter(|| black_box(&state).clone()));
}

criterion_group!(
    benches,
    bench_opening_turn,
    bench_full_year_of_holds,
    bench_options,
    bench_advance_all,
    bench_state_clone,
);
criterion_main!(benches);
