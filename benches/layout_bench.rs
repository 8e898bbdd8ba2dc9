use chart3d::api::{ChartConfig, ChartController};
use chart3d::core::{
    BarDataArray, BarLayout, BarSeriesMargin, BarSpecs, ChartKind, FloorNormalization,
    ScalingInputs, SceneScaling, Series,
};
use chart3d::render::{NullRenderer, RendererCapabilities, SceneRenderer};
use criterion::{Criterion, criterion_group, criterion_main};
use glam::Vec2;
use std::hint::black_box;

fn grid(rows: usize, columns: usize) -> BarDataArray {
    let values = (0..rows)
        .map(|row| {
            (0..columns)
                .map(|column| ((row * 31 + column * 17) % 200) as f32 - 50.0)
                .collect()
        })
        .collect();
    BarDataArray::from_values(values).expect("generated grid is rectangular")
}

fn bench_bar_layout_200x200(c: &mut Criterion) {
    let data = grid(200, 200);
    let specs = BarSpecs::default();
    let dimensions = specs.dimensions();
    let layout = BarLayout {
        scaling: SceneScaling::compute(ScalingInputs {
            row_count: 200,
            column_count: 200,
            dimensions,
            series_margin: Vec2::ZERO,
            requested_margin: -1.0,
        }),
        floor: FloorNormalization::compute(-50.0, 149.0, 0.0, false),
        spacing: dimensions.spacing,
        series_margin: BarSeriesMargin::default(),
        first_row: 0,
        first_column: 0,
    };

    c.bench_function("bar_layout_200x200", |b| {
        b.iter(|| {
            let items = layout.layout_series(black_box(&data), 0, 1);
            black_box(items.len());
        })
    });
}

fn bench_floor_normalization(c: &mut Criterion) {
    c.bench_function("floor_normalization_recompute", |b| {
        b.iter(|| {
            let floor = FloorNormalization::compute(
                black_box(-12.5),
                black_box(87.0),
                black_box(3.0),
                black_box(false),
            );
            black_box(floor.bar_height(black_box(42.0)));
        })
    });
}

fn bench_sync_after_data_edit(c: &mut Criterion) {
    let mut chart = ChartController::new(ChartConfig::bars()).expect("valid config");
    chart.attach_renderer(SceneRenderer::new(
        ChartKind::Bars,
        RendererCapabilities::default(),
    ));
    let id = chart
        .add_series(Series::bars("bench", grid(50, 50)))
        .expect("bar series");
    chart.synchronize();

    c.bench_function("sync_after_visibility_toggle_50x50", |b| {
        let mut visible = true;
        b.iter(|| {
            visible = !visible;
            chart
                .set_series_visible(id, visible)
                .expect("attached series");
            black_box(chart.synchronize());
        })
    });
}

fn bench_idle_sync(c: &mut Criterion) {
    let mut chart = ChartController::new(ChartConfig::bars()).expect("valid config");
    chart.attach_renderer(NullRenderer::default());
    chart.synchronize();

    c.bench_function("idle_sync", |b| {
        b.iter(|| black_box(chart.synchronize()))
    });
}

criterion_group!(
    benches,
    bench_bar_layout_200x200,
    bench_floor_normalization,
    bench_sync_after_data_edit,
    bench_idle_sync
);
criterion_main!(benches);
