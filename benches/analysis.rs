use std::fmt::Write as _;
use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use csv_analyzer::ingestion::csv::ingest_csv_from_reader;
use csv_analyzer::pipeline::{AnalysisConfig, analyze};

const ROWS: usize = 50_000;

fn synthetic_csv(rows: usize) -> String {
    let cities = ["Oslo", "Rome", "Lima", "Kyiv"];
    let mut s = String::from("id,age,income,city\n");
    for i in 0..rows {
        // every 17th income is missing
        let income = if i % 17 == 0 {
            String::new()
        } else {
            format!("{:.2}", (i % 997) as f64 * 13.5)
        };
        let _ = writeln!(s, "{i},{},{income},{}", 18 + i % 60, cities[i % cities.len()]);
    }
    s
}

fn load_and_analyze(c: &mut Criterion) {
    let input = synthetic_csv(ROWS);
    let source = Path::new("synthetic.csv");

    let mut group = c.benchmark_group("analysis");
    group.sample_size(10);
    group.throughput(Throughput::Elements(ROWS as u64));

    group.bench_function("load", |b| {
        b.iter(|| ingest_csv_from_reader(black_box(input.as_bytes()), b',', source).unwrap())
    });

    let ds = ingest_csv_from_reader(input.as_bytes(), b',', source).unwrap();
    group.bench_function("analyze_all_numeric", |b| {
        b.iter(|| analyze(black_box(&ds), source, &AnalysisConfig::default()))
    });

    let config = AnalysisConfig {
        columns: Some(vec!["city".to_string(), "income".to_string()]),
        ..Default::default()
    };
    group.bench_function("analyze_mixed_columns", |b| {
        b.iter(|| analyze(black_box(&ds), source, &config))
    });

    group.finish();
}

criterion_group!(benches, load_and_analyze);
criterion_main!(benches);
