mod common;

use common::*;
use massccs::core::models::probe::{AnisotropicPolarizability, ProbeSite, ProbeState};
use massccs::core::spatial::grid::{GridSpec, SpatialGrid};
use massccs::engine::averaging::{DiatomicModel, OrientationAverager};
use massccs::engine::evaluator::Evaluator;
use massccs::engine::model::{Acceleration, InteractionModel, TermSet};

const PRESETS: [TermSet; 10] = [
    TermSet::lennard_jones(),
    TermSet::lennard_jones_central(),
    TermSet::coulomb(),
    TermSet::lennard_jones_coulomb(),
    TermSet::lennard_jones_coulomb_central(),
    TermSet::lennard_jones_induced_dipole(),
    TermSet::coulomb_induced_dipole_isotropic(),
    TermSet::coulomb_induced_dipole_anisotropic(),
    TermSet::lennard_jones_coulomb_induced_dipole_isotropic_central(),
    TermSet::lennard_jones_coulomb_induced_dipole_anisotropic_central(),
];

fn grid_specs() -> [GridSpec; 3] {
    let base = GridSpec::for_cutoffs(LJ_CUTOFF, COUL_CUTOFF);
    [base, base.with_cell_size(2.5), base.with_cell_size(4.0)]
}

#[test]
fn cell_list_matches_brute_force_on_random_targets() {
    let mut rng = rng(0x5eed_0001);

    for trial in 0..4 {
        let target = random_target(&mut rng, 80, 9.0);
        let config = common::config(1.74);

        for spec in grid_specs() {
            let grid = SpatialGrid::build(&target, spec).unwrap();
            let evaluator = Evaluator::new(&target, &grid, config).unwrap();
            let (low, high) = grid.bounds();

            let mut checked = 0;
            while checked < 25 {
                let point = random_point(&mut rng, 22.0);
                if !grid.contains(&point) || clearance(&target, &point) < 2.0 {
                    continue;
                }
                assert!(point.x >= low.x && point.x < high.x);

                let axis = random_unit(&mut rng);
                let probe = ProbeState::new(vec![
                    ProbeSite::new(point, rng_charge(checked)),
                    ProbeSite::new(point - axis * 1.16, 0.0),
                ])
                .unwrap()
                .with_anisotropy(AnisotropicPolarizability::new(2.26, 1.45).unwrap());

                for terms in PRESETS {
                    let brute = evaluator
                        .evaluate(&probe, 0, InteractionModel::brute_force(terms))
                        .unwrap();
                    let cells = evaluator
                        .evaluate(&probe, 0, InteractionModel::cell_list(terms))
                        .unwrap();
                    assert!(
                        approx_equal(brute.energy, cells.energy, 1e-10),
                        "trial {trial}, {terms}: {} vs {}",
                        brute.energy,
                        cells.energy
                    );
                    for k in 0..3 {
                        assert!(
                            approx_equal(brute.force[k], cells.force[k], 1e-10),
                            "trial {trial}, {terms}, force[{k}]"
                        );
                    }
                }
                checked += 1;
            }
        }
    }
}

#[test]
fn averaged_diatomics_match_between_acceleration_modes() {
    let mut rng = rng(0x5eed_0002);
    let target = random_target(&mut rng, 60, 7.0);
    let config = common::config(1.74);
    let grid = SpatialGrid::build(&target, GridSpec::for_cutoffs(LJ_CUTOFF, COUL_CUTOFF)).unwrap();
    let evaluator = Evaluator::new(&target, &grid, config).unwrap();

    let mut checked = 0;
    while checked < 30 {
        let center = random_point(&mut rng, 18.0);
        if clearance(&target, &center) < 3.0 {
            continue;
        }
        let probe = ProbeState::diatomic_center(center, 0.6512, 2.32)
            .unwrap()
            .with_anisotropy(AnisotropicPolarizability::new(2.9, 1.3).unwrap());

        for model in [
            DiatomicModel::nitrogen(),
            DiatomicModel::carbon_dioxide(),
            DiatomicModel::nitrogen_anisotropic(),
            DiatomicModel::carbon_dioxide_anisotropic(),
        ] {
            let brute = OrientationAverager::new(&evaluator, model, Acceleration::BruteForce)
                .average_detailed(&probe)
                .unwrap();
            let cells = OrientationAverager::new(&evaluator, model, Acceleration::CellList)
                .average_detailed(&probe)
                .unwrap();

            assert!(approx_equal(brute.averaged.energy, cells.averaged.energy, 1e-9));
            for k in 0..3 {
                assert!(approx_equal(
                    brute.averaged.force[k],
                    cells.averaged.force[k],
                    1e-9
                ));
            }
            for (a, b) in brute.weights.iter().zip(cells.weights) {
                assert!((a - b).abs() < 1e-9);
            }
        }
        checked += 1;
    }
}

fn rng_charge(i: usize) -> f64 {
    [1.0, -1.0, 0.0, 0.5, -0.25][i % 5]
}
