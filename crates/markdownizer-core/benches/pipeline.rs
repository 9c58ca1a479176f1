//! Benchmarks for the rendering pipeline stages.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use markdownizer_core::{
    CodeBlockExtractor, LineNumbers, Markdownizer, PlainHighlighter, RenderOptions,
    shift_headings,
};

/// Generate a document with `sections` headings, each followed by a code block.
fn generate_document(sections: usize, code_lines: usize) -> String {
    let mut md = String::with_capacity(sections * (120 + code_lines * 30));
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\nSee #method_{i} below.\n\n"));
        md.push_str("{% code ruby %}\n");
        md.push_str(&format!("{{% caption 'Example {i}' %}}\n"));
        md.push_str("{% highlight (1..3) %}\n");
        for j in 0..code_lines {
            md.push_str(&format!("# step {j}\nputs \"line {j}\"\n"));
        }
        md.push_str("{% endcode %}\n\n");
    }
    md
}

fn bench_extract(c: &mut Criterion) {
    let document = generate_document(10, 10);
    let options = RenderOptions::default();

    c.bench_function("extract_10_blocks", |b| {
        b.iter(|| {
            let mut extractor = CodeBlockExtractor::new(&PlainHighlighter, &options);
            extractor.process(black_box(&document))
        });
    });
}

fn bench_shift_headings(c: &mut Criterion) {
    let document = generate_document(50, 2);

    c.bench_function("shift_headings_50_sections", |b| {
        b.iter(|| shift_headings(black_box(&document), 2));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let markdownizer = Markdownizer::plain();
    let options = RenderOptions::new().with_line_numbers(LineNumbers::Table);

    let mut group = c.benchmark_group("render_by_size");

    for (sections, code_lines) in [(5, 5), (20, 10), (50, 20)] {
        let document = generate_document(sections, code_lines);

        group.throughput(Throughput::Bytes(document.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("document", format!("{sections}s_{code_lines}l")),
            &document,
            |b, text| b.iter(|| markdownizer.render(text, 1, &options)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract,
    bench_shift_headings,
    bench_render_varying_sizes
);
criterion_main!(benches);
