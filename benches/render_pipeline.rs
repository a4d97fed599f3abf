use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use rootbasin::{
    BasinRequest, FunctionCatalog, IterationConfig, IterationRequest, Method, NeverCancel, render_basins,
};

fn bench_basin_render(c: &mut Criterion) {
    let catalog = FunctionCatalog::new();
    let mut group = c.benchmark_group("basin_render");
    group.sample_size(20);

    for method in [Method::Newton, Method::Secant] {
        let request = BasinRequest {
            method,
            width: 200,
            height: 200,
            ..BasinRequest::default()
        };
        let algorithm = request.compile(&catalog).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(method), &algorithm, |b, algorithm| {
            b.iter(|| render_basins(black_box(algorithm), &NeverCancel, |_| {}).unwrap());
        });
    }

    group.finish();
}

fn bench_root_iteration(c: &mut Criterion) {
    let catalog = FunctionCatalog::new();
    let mut group = c.benchmark_group("root_iteration");

    for method in Method::ALL {
        let request = IterationRequest::new(
            "x^3 - 2*x - 5",
            IterationConfig {
                method: *method,
                lambda: 0.5,
                max_steps: Some(200),
                ..IterationConfig::default()
            },
        );

        group.bench_function(BenchmarkId::from_parameter(method), |b| {
            b.iter(|| {
                let mut engine = request.build(&catalog).unwrap();
                for _ in 0..200 {
                    if engine.step().is_terminal() {
                        break;
                    }
                }
                black_box(engine.last_step())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_basin_render, bench_root_iteration);
criterion_main!(benches);
