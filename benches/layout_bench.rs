use chart_editor::api::{LayoutPolicy, ResponsiveLayoutEngine, compute_layout};
use chart_editor::core::{ChartConfiguration, ContainerSize, HostFacts, RenderModeRequest, Viewport};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_compute_layout(c: &mut Criterion) {
    let policy = LayoutPolicy::default();
    let viewport = Viewport::resolve(
        ContainerSize::new(1280.0, 720.0).expect("valid size"),
        RenderModeRequest::embed(),
        HostFacts::default(),
    );

    c.bench_function("compute_layout", |b| {
        b.iter(|| {
            let _ = compute_layout(black_box(&policy), black_box(viewport));
        })
    });
}

fn bench_resize_sweep_1k(c: &mut Criterion) {
    let sizes: Vec<ContainerSize> = (0..1_000)
        .map(|i| {
            let t = f64::from(i);
            ContainerSize::new(320.0 + t, 240.0 + t * 0.75).expect("valid generated size")
        })
        .collect();

    c.bench_function("resize_sweep_1k", |b| {
        b.iter(|| {
            let mut engine = ResponsiveLayoutEngine::new(
                LayoutPolicy::default(),
                sizes[0],
                RenderModeRequest::page(),
                &HostFacts::default(),
            )
            .expect("engine init");
            for size in &sizes {
                engine.set_container(*size).expect("valid size");
                let _ = black_box(engine.layout());
            }
        })
    });
}

fn bench_config_round_trip(c: &mut Criterion) {
    let input = r#"{
        "id": 42,
        "chart-name": "Life expectancy",
        "chart-type": "ScatterPlot",
        "x-axis": [],
        "y-axis": {"axis-label": "Years"},
        "chart-dimensions": "[{\"property\":\"x\",\"variableId\":1},{\"property\":\"y\",\"variableId\":2}]",
        "selected-countries": [{"id": 1, "name": "France"}, {"id": "2", "name": "Chile"}]
    }"#;

    c.bench_function("config_json_round_trip", |b| {
        b.iter(|| {
            let config = ChartConfiguration::from_json_str(black_box(input)).expect("parse");
            let _ = config.to_json_string().expect("serialize");
        })
    });
}

criterion_group!(
    benches,
    bench_compute_layout,
    bench_resize_sweep_1k,
    bench_config_round_trip
);
criterion_main!(benches);
