use criterion::{criterion_group, criterion_main, Criterion};
use scrawl::{
    DeflateCompressor, OverlaySession, OverlaySettings, PathStyle, PixelCanvas, SnapshotRing,
    StrokePoint, StrokeRenderer, ToolConfig,
};

/// Swallows primitives so only the geometry work is measured.
struct NullRenderer;

impl StrokeRenderer for NullRenderer {
    fn draw_segment(&mut self, _from: StrokePoint, _to: StrokePoint, _width: f32) {}
    fn draw_arc(&mut self, _center: StrokePoint, _radius: f32, _start_deg: f32, _end_deg: f32) {}
}

fn wavy_stroke(n: usize) -> Vec<StrokePoint> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.8;
            StrokePoint::new(t, (t * 0.05).sin() * 40.0, 4.0)
        })
        .collect()
}

fn bench_finish_stroke(c: &mut Criterion) {
    let session = OverlaySession::new(OverlaySettings::default());
    let stroke = wavy_stroke(2_000);

    let smoothed = ToolConfig {
        style: PathStyle::Smoothed,
        ..ToolConfig::default()
    };
    c.bench_function("finish_stroke_smoothed_2k", |b| {
        b.iter(|| session.finish_stroke(stroke.clone(), &smoothed, &mut NullRenderer))
    });

    let orthogonal = ToolConfig {
        style: PathStyle::Orthogonal,
        ..ToolConfig::default()
    };
    c.bench_function("finish_stroke_orthogonal_2k", |b| {
        b.iter(|| session.finish_stroke(stroke.clone(), &orthogonal, &mut NullRenderer))
    });
}

fn bench_snapshot_ring(c: &mut Criterion) {
    let canvas = PixelCanvas::new(1920, 1080, scrawl::Color::rgba(0, 0, 0, 0));
    c.bench_function("snapshot_1080p", |b| {
        let mut ring = SnapshotRing::new(100, DeflateCompressor::new());
        b.iter(|| ring.snapshot(&canvas).expect("snapshot"))
    });
}

criterion_group!(benches, bench_finish_stroke, bench_snapshot_ring);
criterion_main!(benches);
