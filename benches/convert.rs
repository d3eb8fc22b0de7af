//! Performance benchmarks for span recovery.
//!
//! Benchmarks conversion of synthetic documents of growing size, where every
//! paragraph must be re-found inside its sibling window.

use asciispan::convert;
use asciispan::source::{Paragraph, SourceBlock, SourceDocument};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Build `count` paragraphs separated by blank lines and comment lines.
fn synthetic(count: usize) -> (String, SourceDocument) {
    let mut text = String::new();
    let mut blocks = Vec::with_capacity(count);
    let mut line = 1;
    for i in 0..count {
        let first = format!("Paragraph {i} opens here.");
        let second = format!("And closes with word {i}.");
        text.push_str(&format!("{first}\n// note {i}\n{second}\n\n"));
        blocks.push(SourceBlock::Paragraph(Paragraph {
            lineno: Some(line),
            source: format!("{first}\n{second}"),
            lines: vec![first, second],
        }));
        line += 4;
    }
    (
        text,
        SourceDocument {
            header: None,
            blocks,
        },
    )
}

/// Benchmark whole-document conversion by paragraph count.
fn bench_document_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_size");

    for count in [10, 100, 1000] {
        let (text, tree) = synthetic(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("convert", count),
            &(text, tree),
            |b, (text, tree)| {
                b.iter(|| convert(black_box(text), black_box(tree)));
            },
        );
    }

    group.finish();
}

/// Benchmark a wide window, where list items inherit the parent's bounds.
fn bench_inherited_window(c: &mut Criterion) {
    let items: Vec<String> = (0..500).map(|i| format!("* item number {i}")).collect();
    let text = items.join("\n");
    let tree: SourceDocument = serde_json::from_value(serde_json::json!({
        "blocks": [{
            "context": "ulist",
            "lineno": 1,
            "blocks": (0..500)
                .map(|i| serde_json::json!({
                    "context": "list_item",
                    "lineno": i + 1,
                    "text": format!("item number {i}"),
                }))
                .collect::<Vec<_>>(),
        }]
    }))
    .unwrap();

    let mut group = c.benchmark_group("inherited_window");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("list_500_items", |b| {
        b.iter(|| convert(black_box(&text), black_box(&tree)));
    });
    group.finish();
}

criterion_group!(benches, bench_document_size, bench_inherited_window);
criterion_main!(benches);
