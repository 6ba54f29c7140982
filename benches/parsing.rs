//! Performance benchmarks for ferropdf
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample Markdown documents of various sizes
mod samples {
    pub const TINY: &str = "Hello, world!";

    pub const SMALL: &str = r#"# Heading

This is a paragraph with a few words in it.

- Item 1
- Item 2
- Item 3
"#;

    pub const MEDIUM: &str = r#"# Project README

This is a sample README file that demonstrates the supported blocks.

## Features

- Line-local parsing
- Paginated output
- Fenced code

### Code Example

```rust
fn main() {
    println!("Hello, world!");
}
```

## Steps

1. Install
2. Configure
3. Build

> This is a blockquote
> spanning two lines.

## Conclusion

Thank you for reading!
"#;

    /// Generate a large document by repeating sections
    pub fn large() -> String {
        let section = r#"
## Section Title

This paragraph spans
several source lines that
join into one block.

- First bullet point
- Second bullet point
- Third point

> A blockquote that spans
> multiple lines.

```rust
fn example() {
    let x = 42;
    println!("{}", x);
}
```

1. one
2. two
"#;
        section.repeat(200)
    }

    /// Many lines that look like ordered items but are not
    pub fn near_miss_markers() -> String {
        "3.5. not a list\n12345678901. too long\n".repeat(2000)
    }

    /// A single paragraph of many lines
    pub fn long_paragraph() -> String {
        "word word word word word word word word\n".repeat(5000)
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, input) in [
        ("tiny", samples::TINY),
        ("small", samples::SMALL),
        ("medium", samples::MEDIUM),
    ] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(name, |b| b.iter(|| ferropdf::parse(black_box(input))));
    }

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| b.iter(|| ferropdf::parse(black_box(&large))));

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let markers = samples::near_miss_markers();
    group.throughput(Throughput::Bytes(markers.len() as u64));
    group.bench_function("near_miss_markers", |b| {
        b.iter(|| ferropdf::parse(black_box(&markers)))
    });

    let paragraph = samples::long_paragraph();
    group.throughput(Throughput::Bytes(paragraph.len() as u64));
    group.bench_function("long_paragraph", |b| {
        b.iter(|| ferropdf::parse(black_box(&paragraph)))
    });

    group.finish();
}

fn bench_story(c: &mut Criterion) {
    let mut group = c.benchmark_group("story");

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("append_markdown", |b| {
        b.iter(|| {
            let mut story = ferropdf::Story::new();
            story.append_markdown(black_box(&large), "bench.md", &Default::default());
            story
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_pathological, bench_story);
criterion_main!(benches);
