//! Session benchmarks — parse, rebuild, and cached-query paths.

use rematch::prelude::*;

fn main() {
    divan::main();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════════

const LITERAL: &str = r"/this is (a|an) (\S+)\./g";

const TARGET: &str = "this is an apple. I am hungry. this is a pen. I should study. \
    this is a cup. this is a smartphone. this is an orange. this is a keyboard. \
    this is a chair. this is an umbrella. this is a lamp. this is a notebook.";

fn bound_session() -> MatchSession {
    MatchSession::from_pair(LITERAL, TARGET).expect("fixture binds")
}

// ═══════════════════════════════════════════════════════════════════════════════
// Benches
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn parse_literal() -> Option<PatternSpec> {
    PatternSpec::parse(divan::black_box(LITERAL))
}

#[divan::bench]
fn reject_plain_string() -> Option<PatternSpec> {
    PatternSpec::parse(divan::black_box(TARGET))
}

#[divan::bench]
fn bind_and_rebuild() -> MatchSession {
    MatchSession::from_pair(divan::black_box(LITERAL), divan::black_box(TARGET))
        .expect("fixture binds")
}

#[divan::bench]
fn rebind_target(bencher: divan::Bencher) {
    let mut session = bound_session();
    bencher.bench_local(move || {
        session
            .supply(divan::black_box(TARGET))
            .map(|_| ())
            .expect("fixture binds")
    });
}

#[divan::bench]
fn cached_group_queries(bencher: divan::Bencher) {
    let session = bound_session();
    bencher.bench_local(move || {
        let mut total = 0;
        for i in 0..session.match_count().expect("bound") {
            total += session
                .find(divan::black_box(i))
                .expect("in range")
                .whole()
                .len();
        }
        total
    });
}

#[divan::bench]
fn group_iteration(bencher: divan::Bencher) {
    let session = bound_session();
    bencher.bench_local(move || {
        session
            .group_iter(2)
            .expect("slot in range")
            .flatten()
            .map(str::len)
            .sum::<usize>()
    });
}

#[divan::bench]
fn replace_all(bencher: divan::Bencher) {
    let session = bound_session();
    bencher.bench_local(move || session.replace_all(divan::black_box("<$2>")).expect("bound"));
}
