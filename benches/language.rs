use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use cfg_kit::{Grammar, Language, SymbolTable};

fn bench_bounded_language(c: &mut Criterion) {
    let mut symbols = SymbolTable::new();
    let grammar = Grammar::parse(
        "G(S):\nS -> a B | b A\nA -> a | a S | b A A\nB -> b | b S | a B B\n",
        &mut symbols,
    )
    .unwrap();

    c.bench_function("language_max_len_8", |b| {
        b.iter(|| Language::of(black_box(&grammar), black_box(8)))
    });

    c.bench_function("deletable_fixpoint", |b| {
        let mut symbols = SymbolTable::new();
        let grammar = Grammar::parse(
            "G(S):\nS -> A B C\nA -> B B | eps\nB -> C C | a\nC -> A A | b\n",
            &mut symbols,
        )
        .unwrap();
        b.iter(|| black_box(&grammar).deletable_nonterminals())
    });
}

criterion_group!(benches, bench_bounded_language);
criterion_main!(benches);
