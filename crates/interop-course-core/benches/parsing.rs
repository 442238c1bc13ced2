use criterion::{black_box, criterion_group, criterion_main, Criterion};

use interop_course_core::content::BUILTIN_CONTENT;
use interop_course_core::parser::{parse_content_str, validate_content};

fn bench_parse_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("content");
    let path = std::path::Path::new("course.toml");

    group.bench_function("parse/builtin", |b| {
        b.iter(|| parse_content_str(black_box(BUILTIN_CONTENT), path))
    });

    let content = parse_content_str(BUILTIN_CONTENT, path).expect("builtin content parses");
    group.bench_function("validate/builtin", |b| {
        b.iter(|| validate_content(black_box(&content)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_content);
criterion_main!(benches);
