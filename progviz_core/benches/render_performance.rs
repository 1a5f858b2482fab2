//! Performance benchmarks for bar rendering
//!
//! Measures line formatting on its own and the per-item overhead of the
//! iteration driver against a terminal that discards output.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use progviz_core::{
    BarConfig, CursorPosition, ProgressSnapshot, ProgressVisualizer, Renderer, SystemClock,
    Terminal, VisualizeOptions, format_duration,
};
use std::hint::black_box;
use std::time::Duration;

/// Terminal that accepts everything and always reports the same cursor
struct SinkTerminal {
    bytes: usize,
}

impl Terminal for SinkTerminal {
    fn write_str(&mut self, text: &str) -> progviz_core::Result<()> {
        self.bytes += text.len();
        Ok(())
    }

    fn flush(&mut self) -> progviz_core::Result<()> {
        Ok(())
    }

    fn cursor_position(&mut self) -> progviz_core::Result<CursorPosition> {
        Ok(CursorPosition::new(1, 1))
    }
}

/// Benchmark a single line render at different bar lengths
fn benchmark_render_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_line");

    for bar_length in [10, 50, 200, 1_000] {
        let renderer = Renderer::new(BarConfig::default().with_bar_length(bar_length));
        let snapshot = ProgressSnapshot::new(4_321, 10_000, Duration::from_secs(42));

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(bar_length),
            &bar_length,
            |b, _| {
                b.iter(|| black_box(renderer.render_line(black_box(&snapshot), "Bench", true)))
            },
        );
    }

    group.finish();
}

fn benchmark_format_duration(c: &mut Criterion) {
    c.bench_function("format_duration", |b| {
        b.iter(|| black_box(format_duration(black_box(40_000_000))))
    });
}

/// Benchmark the driver with and without throttling
fn benchmark_visualize(c: &mut Criterion) {
    let mut group = c.benchmark_group("visualize");
    let count = 10_000usize;
    group.throughput(Throughput::Elements(count as u64));

    let cases = [
        ("unthrottled", Duration::ZERO),
        ("default_throttle", Duration::from_millis(80)),
    ];

    for (name, interval) in cases {
        let options = VisualizeOptions::new("Bench").with_throttle_interval(interval);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut visualizer = ProgressVisualizer::new(
                    BarConfig::default(),
                    SinkTerminal { bytes: 0 },
                    SystemClock,
                )
                .expect("default config is valid");
                let sum: usize = visualizer
                    .visualize(0..count, &options)
                    .expect("sink terminal never fails")
                    .map(|item| item.expect("sink terminal never fails"))
                    .sum();
                black_box((sum, visualizer.terminal().bytes));
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_render_line,
    benchmark_format_duration,
    benchmark_visualize
);
criterion_main!(benches);
