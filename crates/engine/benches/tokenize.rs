use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Cursor;
use tally_core::Granularity;
use tally_engine::count::count_chunks;
use tally_engine::tokenizer::Tokens;

fn sample() -> Vec<u8> {
    "the quick brown fox\tjumps over\r\nthe lazy dog\n".repeat(4096).into_bytes()
}

fn benchmark_tokenize(c: &mut Criterion) {
    let data = sample();
    for granularity in [Granularity::Line, Granularity::Word, Granularity::Byte] {
        c.bench_function(&format!("tokens_{granularity:?}"), |b| {
            b.iter(|| Tokens::new(Cursor::new(black_box(&data)), granularity).count());
        });
    }
}

fn benchmark_count_chunks(c: &mut Criterion) {
    let data = sample();
    c.bench_function("count_chunks_line", |b| {
        b.iter(|| {
            let mut total = 0;
            count_chunks(&mut Cursor::new(black_box(&data)), Granularity::Line, &mut total).unwrap();
            total
        });
    });
}

criterion_group!(benches, benchmark_tokenize, benchmark_count_chunks);
criterion_main!(benches);
