//! Benchmark – `jsontape::Parser`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jsontape::{Parser, ParserOptions, Token};

/// Produce a deterministic JSON document whose textual representation is
/// exactly `target_len` bytes, so every scenario operates on the same amount
/// of data: a flat array of small objects plus string padding.
fn make_json_payload(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 32);
    s.push('[');
    let mut i = 0u32;
    while s.len() + 40 < target_len {
        if i > 0 {
            s.push(',');
        }
        s.push_str("{\"i\":");
        s.push_str(&i.to_string());
        s.push_str(",\"on\":true}");
        i += 1;
    }
    s.push_str(",\"");
    while s.len() + 2 < target_len {
        s.push('x');
    }
    s.push('"');
    s.push(']');
    assert_eq!(s.len(), target_len);
    s
}

/// Tokenize `payload` by growing the visible prefix in `parts` steps, the
/// way a streaming caller would. Returns the token count for black-boxing.
fn run_incremental(payload: &[u8], parts: usize, tokens: &mut [Token]) -> usize {
    assert!(parts > 0);
    let chunk = payload.len().div_ceil(parts);

    let mut parser = Parser::new(ParserOptions::default());
    let mut len = 0;
    loop {
        len = (len + chunk).min(payload.len());
        match parser.parse(&payload[..len], tokens) {
            Ok(used) => return used,
            Err(err) if err.is_partial() && len < payload.len() => {}
            Err(err) => panic!("tokenize failed: {err}"),
        }
    }
}

fn bench_tokenize(c: &mut Criterion) {
    let payload = make_json_payload(10_000);
    let bytes = payload.as_bytes();

    let mut counter = Parser::new(ParserOptions::default());
    let needed = counter.count(bytes).expect("payload is valid");
    let mut tokens = vec![Token::default(); needed];

    let mut group = c.benchmark_group("tokenize_split");
    for &parts in &[1usize, 10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &parts| {
            b.iter(|| {
                let used = run_incremental(black_box(bytes), parts, &mut tokens);
                black_box(used);
            });
        });
    }
    group.finish();

    c.bench_function("count_only", |b| {
        b.iter(|| {
            let mut parser = Parser::new(ParserOptions::default());
            black_box(parser.count(black_box(bytes)).expect("payload is valid"));
        });
    });
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(5))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_tokenize }
criterion_main!(benches);
