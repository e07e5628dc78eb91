use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use magnet2d::config::MagnetConfig;
use magnet2d::fields::{BarMagnet, FieldDifferentiator, MagnetizationField, PotentialIntegrator};
use magnet2d::grid::{GridBuilder, Grids};

fn build_grids(config: &MagnetConfig) -> Grids {
    GridBuilder::from_config(config).build().expect("valid grid configuration")
}

fn bench_potential(c: &mut Criterion) {
    let mut group = c.benchmark_group("potential_integration");
    group.sample_size(10);
    for n in [10usize, 20, 30] {
        let config = MagnetConfig::default().with_magnet_resolution(n);
        let grids = build_grids(&config);
        let magnetization =
            MagnetizationField::from_strategy(&grids.magnet, &BarMagnet::new(config.width, config.length));

        group.bench_function(BenchmarkId::new("bar_magnet", n), |b| {
            b.iter(|| {
                PotentialIntegrator::new(&grids.field, &grids.magnet)
                    .expect("valid grids")
                    .integrate(&magnetization)
                    .expect("shapes match")
            })
        });
    }
    group.finish();
}

fn bench_curl(c: &mut Criterion) {
    let config = MagnetConfig::default();
    let grids = build_grids(&config);
    let magnetization =
        MagnetizationField::from_strategy(&grids.magnet, &BarMagnet::new(config.width, config.length));
    let potential = PotentialIntegrator::new(&grids.field, &grids.magnet)
        .expect("valid grids")
        .integrate(&magnetization)
        .expect("shapes match");

    let mut group = c.benchmark_group("field_differentiation");
    for smooth in [3usize, 4, 6] {
        group.bench_function(BenchmarkId::new("median_curl", smooth), |b| {
            b.iter_batched(
                || FieldDifferentiator::new(&grids.field, smooth).expect("valid smooth"),
                |diff| diff.curl(&potential).expect("shapes match"),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_potential, bench_curl);
criterion_main!(benches);
