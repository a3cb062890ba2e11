//! Benchmarks for poremetrics extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the extraction pipeline on synthetic reports.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use poremetrics::{Extractor, GridTable, ReportInput, TableGrid};

/// Creates a synthetic text report with the given number of distribution rows.
fn create_text_report(rows: usize) -> String {
    let mut content = String::new();

    content.push_str("比表面积分析报告\n");
    for value in [512.3, 530.1, 705.4, 35.2, 495.0, 610.7, 640.1] {
        content.push_str(&format!("{:.2} (m^2/g)\n", value));
    }
    content.push_str("孔体积分析报告\n");
    content.push_str(&format!("最高单点吸附总孔体积: {:.4} (cm^3/g)\n", rows as f64 * 0.01));
    content.push_str("孔径分析报告\n");
    content.push_str("单点总孔吸附平均孔直径: 7.81 (nm)\n");
    content.push_str(&"-".repeat(60));
    content.push_str("\n最可几孔径: 2.0 (nm)\n");

    content.push_str("NLDFT详细数据\n");
    for i in 0..rows {
        let low = 0.5 + i as f64 * 0.1;
        content.push_str(&format!(
            "{:.2}-{:.2} {:.4} 0.0100 {:.4}\n",
            low,
            low + 0.1,
            low + 0.05,
            (i + 1) as f64 * 0.01
        ));
    }
    content.push_str("BJH详细数据\n");

    content
}

/// Creates a synthetic grid report split over tables of 40 rows.
fn create_grid_report(rows: usize) -> TableGrid {
    let mut tables = TableGrid::new();
    tables.add_table(GridTable::from_rows(
        0,
        0,
        [
            vec!["Pore Volume".to_string(), String::new()],
            vec![
                "Single point adsorption total pore volume".to_string(),
                format!("{:.4}", rows as f64 * 0.01),
            ],
        ],
    ));

    for (page, chunk) in (0..rows).collect::<Vec<_>>().chunks(40).enumerate() {
        let mut table_rows = vec![
            vec!["NLDFT".to_string(), String::new(), String::new()],
            vec!["P/Po".to_string(), "平均孔直径".to_string(), "孔积分体积".to_string()],
        ];
        for &i in chunk {
            table_rows.push(vec![
                format!("{:.4}", 0.001 * (i + 1) as f64),
                format!("{:.4}", 0.55 + i as f64 * 0.1),
                format!("{:.6}", (i + 1) as f64 * 0.01),
            ]);
        }
        tables.add_table(GridTable::from_rows(page + 1, 0, table_rows));
    }

    tables
}

/// Benchmark text-report extraction at various table sizes.
fn bench_text_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_extraction");
    let extractor = Extractor::new();

    for rows in [10, 100, 500].iter() {
        let input = ReportInput::text(&create_text_report(*rows));

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| extractor.extract(black_box(&input)));
        });
    }

    group.finish();
}

/// Benchmark grid-report extraction at various table sizes.
fn bench_grid_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_extraction");
    let extractor = Extractor::new();

    for rows in [10, 100, 500].iter() {
        let input = ReportInput::grid(create_grid_report(*rows));

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| extractor.extract(black_box(&input)));
        });
    }

    group.finish();
}

/// Benchmark parallel batch extraction.
fn bench_batch(c: &mut Criterion) {
    let extractor = Extractor::new();
    let inputs: Vec<ReportInput> = (0..32)
        .map(|_| ReportInput::text(&create_text_report(100)))
        .collect();

    c.bench_function("batch_32_reports", |b| {
        b.iter(|| extractor.extract_batch(black_box(&inputs)));
    });
}

criterion_group!(
    benches,
    bench_text_extraction,
    bench_grid_extraction,
    bench_batch,
);
criterion_main!(benches);
