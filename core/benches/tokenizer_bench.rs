use checker_core::tokenizer::{StemmingTokenizer, Tokenizer};
use criterion::{criterion_group, criterion_main, Criterion};

const TEXT: &str = "It was the best of times, it was the worst of times, it was the age of wisdom, \
it was the age of foolishness, it was the epoch of belief, it was the epoch of incredulity, \
it was the season of Light, it was the season of Darkness, it was the spring of hope, \
it was the winter of despair.";

fn bench_tokenize(c: &mut Criterion) {
    let text = TEXT.repeat(50);
    let tokenizer = StemmingTokenizer::new();
    c.bench_function("tokenize_paragraphs", |b| b.iter(|| tokenizer.tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
