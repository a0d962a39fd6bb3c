mod common;

use common::*;
use massccs::core::forcefield::constants::PhysicalConstants;
use massccs::core::forcefield::term::ForceEnergy;
use massccs::core::models::probe::{AnisotropicPolarizability, ProbeSite, ProbeState};
use massccs::core::models::target::{TargetAtom, TargetModel};
use massccs::engine::averaging::{boltzmann_average, boltzmann_weights};
use massccs::engine::evaluator::Evaluator;
use massccs::engine::model::{InteractionModel, TermSet};
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use rand::Rng;

fn oriented_probe(
    center: Point3<f64>,
    axis: Vector3<f64>,
    anisotropy: AnisotropicPolarizability,
) -> ProbeState {
    ProbeState::new(vec![
        ProbeSite::new(center, 0.0),
        ProbeSite::new(center - axis * 1.1, 0.0),
    ])
    .unwrap()
    .with_anisotropy(anisotropy)
}

fn rotated_about(
    target: &TargetModel,
    pivot: &Point3<f64>,
    rotation: &Rotation3<f64>,
) -> TargetModel {
    let atoms = target
        .atoms()
        .iter()
        .map(|atom| TargetAtom {
            position: pivot + rotation * (atom.position - pivot),
            ..atom.clone()
        })
        .collect();
    TargetModel::new(atoms).unwrap()
}

#[test]
fn anisotropic_energy_is_invariant_under_joint_rotation() {
    let mut rng = rng(0x5eed_0004);
    let target = random_target(&mut rng, 30, 5.0);
    let config = config(0.0);
    let anisotropy = AnisotropicPolarizability::new(2.9, 1.3).unwrap();
    let model = InteractionModel::brute_force(TermSet::coulomb_induced_dipole_anisotropic());

    let mut checked = 0;
    while checked < 20 {
        let center = random_point(&mut rng, 9.0);
        if clearance(&target, &center) < 2.5 {
            continue;
        }
        let axis = random_unit(&mut rng);
        let rotation = Rotation3::from_axis_angle(
            &Unit::new_normalize(random_unit(&mut rng)),
            rng.gen_range(0.0..std::f64::consts::TAU),
        );

        let before = Evaluator::brute_force(&target, config)
            .evaluate(&oriented_probe(center, axis, anisotropy), 0, model)
            .unwrap();

        let rotated_target = rotated_about(&target, &center, &rotation);
        let after = Evaluator::brute_force(&rotated_target, config)
            .evaluate(&oriented_probe(center, rotation * axis, anisotropy), 0, model)
            .unwrap();

        assert!(
            approx_equal(before.energy, after.energy, 1e-9),
            "{} vs {}",
            before.energy,
            after.energy
        );
        let tolerance = 1e-8 * before.force.norm().max(1.0);
        assert!((rotation * before.force - after.force).norm() < tolerance);
        checked += 1;
    }
}

#[test]
fn equal_components_match_the_isotropic_model_exactly() {
    let mut rng = rng(0x5eed_0005);
    let target = random_target(&mut rng, 30, 5.0);
    let alpha = 1.7;
    let evaluator = Evaluator::brute_force(&target, config(alpha));
    let anisotropy = AnisotropicPolarizability::new(alpha, alpha).unwrap();

    for _ in 0..10 {
        let center = random_point(&mut rng, 12.0);
        let probe = oriented_probe(center, random_unit(&mut rng), anisotropy);
        let iso = evaluator
            .evaluate(
                &probe,
                0,
                InteractionModel::brute_force(TermSet::coulomb_induced_dipole_isotropic()),
            )
            .unwrap();
        let aniso = evaluator
            .evaluate(
                &probe,
                0,
                InteractionModel::brute_force(TermSet::coulomb_induced_dipole_anisotropic()),
            )
            .unwrap();
        assert_eq!(iso.energy, aniso.energy);
        assert_eq!(iso.force, aniso.force);
    }
}

#[test]
fn boltzmann_weights_form_a_distribution() {
    let mut rng = rng(0x5eed_0006);
    let kt = PhysicalConstants::default().thermal_energy();

    for _ in 0..200 {
        let scale = 10f64.powf(rng.gen_range(-3.0..4.0));
        let energies = [
            rng.gen_range(-1.0..1.0) * scale,
            rng.gen_range(-1.0..1.0) * scale,
            rng.gen_range(-1.0..1.0) * scale,
        ];
        let weights = boltzmann_weights(&energies, kt);
        assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        let candidates = energies.map(|u| ForceEnergy::new(Vector3::zeros(), u));
        let averaged = boltzmann_average(&candidates, kt).energy;
        let min = energies.iter().copied().fold(f64::INFINITY, f64::min);
        let max = energies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let slack = 1e-12 * scale;
        assert!(averaged >= min - slack && averaged <= max + slack);
    }
}
