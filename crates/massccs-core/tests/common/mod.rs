#![allow(dead_code)]

use massccs::core::models::target::{LennardJones, TargetAtom, TargetModel};
use massccs::engine::config::{EvaluatorConfig, EvaluatorConfigBuilder};
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const LJ_CUTOFF: f64 = 6.0;
pub const COUL_CUTOFF: f64 = 10.0;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn config(alpha: f64) -> EvaluatorConfig {
    EvaluatorConfigBuilder::new()
        .lj_cutoff(LJ_CUTOFF)
        .coul_cutoff(COUL_CUTOFF)
        .alpha(alpha)
        .build()
        .unwrap()
}

/// A random neutral-ish cluster of `count` atoms inside a cube of half-width `half_width`.
pub fn random_target(rng: &mut StdRng, count: usize, half_width: f64) -> TargetModel {
    let atoms = (0..count)
        .map(|_| {
            let position = random_point(rng, half_width);
            let lj = LennardJones::new(rng.gen_range(0.02..0.2), rng.gen_range(2.5..3.8));
            let central = LennardJones::new(rng.gen_range(0.05..0.3), rng.gen_range(2.8..4.0));
            TargetAtom::new(position, rng.gen_range(-0.6..0.6), lj).with_central(central)
        })
        .collect();
    TargetModel::new(atoms).unwrap()
}

pub fn random_point(rng: &mut StdRng, half_width: f64) -> Point3<f64> {
    Point3::new(
        rng.gen_range(-half_width..half_width),
        rng.gen_range(-half_width..half_width),
        rng.gen_range(-half_width..half_width),
    )
}

pub fn random_unit(rng: &mut StdRng) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let norm = v.norm();
        if norm > 0.1 && norm <= 1.0 {
            return v / norm;
        }
    }
}

/// Distance from `point` to the nearest target atom.
pub fn clearance(target: &TargetModel, point: &Point3<f64>) -> f64 {
    target
        .atoms()
        .iter()
        .map(|atom| (atom.position - point).norm())
        .fold(f64::INFINITY, f64::min)
}

pub fn approx_equal(a: f64, b: f64, relative: f64) -> bool {
    (a - b).abs() <= relative * a.abs().max(b.abs()).max(1.0)
}
