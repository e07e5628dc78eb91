use approx::assert_relative_eq;
use magnet2d::prelude::*;

#[test]
fn reference_square_magnet_end_to_end() {
    let config = MagnetConfig::new(1.0, 1.0)
        .with_magnet_resolution(30)
        .with_plot_points(16)
        .with_skip(5)
        .with_smooth(4);
    let solution = MagnetSimulation::new(config).unwrap().run().unwrap();

    assert_eq!(solution.field_grid().size(), 90);
    assert_eq!(solution.potential().shape(), (90, 90));
    assert_eq!(solution.field().shape(), (90, 90));
    assert_eq!(solution.field().interior(), 4..86);

    let field = solution.field();
    for j in 4..86 {
        for i in 4..86 {
            let b = field.get(j, i).expect("interior value");
            assert!(b.x.is_finite() && b.y.is_finite());
        }
    }
    assert!(solution.potential().az.iter().all(|v| v.is_finite()));

    let sampled = solution.sampled();
    assert_eq!(sampled.len(), 16);
    assert_eq!(sampled.bx.shape(), (16, 16));
    assert_eq!(sampled.x.shape(), (16, 16));
    assert!(solution.arrow_scale() > 0.0);
    assert_relative_eq!(
        solution.arrow_scale(),
        sampled.magnitude().max() * 16.0,
        max_relative = 1.0e-12
    );

    let m = solution.magnetization_magnitude();
    assert_eq!(m.shape(), (30, 30));
    assert!(m.iter().all(|&v| v == 0.0 || v == 1.0));
}

#[test]
fn sampled_points_sit_on_fine_grid() {
    let solution = MagnetSimulation::new(MagnetConfig::default().with_magnet_resolution(10))
        .unwrap()
        .run()
        .unwrap();
    let grid = solution.field_grid();
    let sampled = solution.sampled();
    // start = (90 − 80)/2 + 2 = 7, step 5
    assert_eq!(sampled.x[(0, 0)], grid.x()[(7, 7)]);
    assert_eq!(sampled.y[(15, 3)], grid.y()[(82, 22)]);
    assert_eq!(sampled.bx[(2, 1)], solution.field().bx[(17, 12)]);
}

#[test]
fn zero_magnetization_gives_zero_potential_and_field() {
    let config = MagnetConfig::default().with_plot_points(6).with_skip(4).with_magnet_resolution(12);
    let solution = MagnetSimulation::new(config)
        .unwrap()
        .with_strategy(|_x: Scalar, _y: Scalar| R2::zeros())
        .run()
        .unwrap();

    assert!(solution.potential().az.iter().all(|&v| v == 0.0));
    let field = solution.field();
    for j in field.interior() {
        for i in field.interior() {
            assert_eq!(field.bx[(j, i)], 0.0);
            assert_eq!(field.by[(j, i)], 0.0);
        }
    }
    assert_eq!(solution.arrow_scale(), 0.0);
}

#[test]
fn smooth_of_two_or_less_is_rejected() {
    for smooth in [0, 1, 2] {
        let err = MagnetSimulation::new(MagnetConfig::default().with_smooth(smooth)).unwrap_err();
        assert_eq!(err.stage(), Stage::Configuration);
        match err {
            Magnet2dError::Config { source: ConfigError::TooSmall { parameter, .. }, .. } => {
                assert_eq!(parameter, "smooth");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    let grid = ComputationGrid::new(40, 1.0);
    assert!(FieldDifferentiator::new(&grid, 2).is_err());
}

#[test]
fn stages_compose_without_the_pipeline() {
    let config = MagnetConfig::default().with_plot_points(5).with_skip(4).with_magnet_resolution(8);
    let grids = GridBuilder::from_config(&config).build().unwrap();
    let magnetization = MagnetizationField::from_strategy(&grids.magnet, &BarMagnet::new(1.0, 1.0));
    let potential = PotentialIntegrator::new(&grids.field, &grids.magnet)
        .unwrap()
        .integrate(&magnetization)
        .unwrap();
    let field = FieldDifferentiator::new(&grids.field, config.smooth)
        .unwrap()
        .curl(&potential)
        .unwrap();
    let sampled = Sampler::new(config.n_plot, config.skip).sample(&grids.field, &field).unwrap();

    let solution = MagnetSimulation::new(config).unwrap().run().unwrap();
    assert_eq!(&potential, solution.potential());
    assert_eq!(sampled.arrow_scale, solution.arrow_scale());
}

#[test]
fn repeated_runs_are_bit_identical() {
    let sim = MagnetSimulation::new(MagnetConfig::default().with_plot_points(6).with_skip(4)).unwrap();
    let first = sim.run().unwrap();
    let second = sim.run().unwrap();
    let bits = |g: &Grid2| g.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first.field().bx), bits(&second.field().bx));
    assert_eq!(bits(&first.field().by), bits(&second.field().by));
}
