use criterion::{Criterion, criterion_group, criterion_main};
use demyst_log::LogParser;

/// Build a synthetic build log with `tests` distinct specs, one retry each,
/// and `body_lines` of plain output per attempt.
fn synthetic_log(tests: usize, body_lines: usize) -> String {
    let mut text = String::new();
    for i in 0..tests {
        for attempt in 0..2 {
            text.push_str(&format!(
                "> Enter [It] case{i} - suite path case{i} @ 01/02/24 10:{:02}:00.000\n",
                (i * 2 + attempt) % 60
            ));
            for j in 0..body_lines {
                text.push_str(&format!("level=info msg=\"step {j} of case{i}\"\n"));
            }
            text.push_str(&format!(
                "< Exit [It] suite path case{i} - file.go:1 @ 01/02/24 10:{:02}:30.000 (30s)\n",
                (i * 2 + attempt) % 60
            ));
        }
    }
    text
}

fn parse_benchmarks(c: &mut Criterion) {
    let parser = LogParser::new("It").expect("parser should build");
    let small = synthetic_log(10, 20);
    let large = synthetic_log(100, 200);

    let mut group = c.benchmark_group("parse");

    group.bench_function("parse_small_log", |b| {
        b.iter(|| parser.parse(&small).expect("parse failed"))
    });

    group.bench_function("parse_large_log", |b| {
        b.iter(|| parser.parse(&large).expect("parse failed"))
    });

    group.finish();
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);
