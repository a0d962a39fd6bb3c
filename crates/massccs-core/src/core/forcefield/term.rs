use nalgebra::Vector3;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Force acting on a probe (kcal/(mol·Å)) together with its potential energy (kcal/mol).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceEnergy {
    pub force: Vector3<f64>,
    pub energy: f64,
}

impl ForceEnergy {
    pub fn new(force: Vector3<f64>, energy: f64) -> Self {
        Self { force, energy }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            force: Vector3::zeros(),
            energy: 0.0,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.energy == 0.0 && self.force == Vector3::zeros()
    }
}

impl Default for ForceEnergy {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for ForceEnergy {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            force: self.force + rhs.force,
            energy: self.energy + rhs.energy,
        }
    }
}

impl AddAssign for ForceEnergy {
    fn add_assign(&mut self, rhs: Self) {
        self.force += rhs.force;
        self.energy += rhs.energy;
    }
}

impl Mul<f64> for ForceEnergy {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            force: self.force * rhs,
            energy: self.energy * rhs,
        }
    }
}

impl Sum for ForceEnergy {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, term| acc + term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_has_no_force_and_no_energy() {
        let term = ForceEnergy::zero();
        assert!(term.is_zero());
        assert_eq!(term.energy, 0.0);
        assert_eq!(term.force, Vector3::zeros());
    }

    #[test]
    fn add_sums_force_and_energy() {
        let a = ForceEnergy::new(Vector3::new(1.0, 2.0, 3.0), -1.5);
        let b = ForceEnergy::new(Vector3::new(-1.0, 0.5, 0.0), 2.0);
        assert_eq!(a + b, ForceEnergy::new(Vector3::new(0.0, 2.5, 3.0), 0.5));
    }

    #[test]
    fn add_assign_accumulates() {
        let mut a = ForceEnergy::new(Vector3::new(1.0, 0.0, 0.0), 1.0);
        a += ForceEnergy::new(Vector3::new(0.0, 1.0, 0.0), 1.0);
        assert_eq!(a, ForceEnergy::new(Vector3::new(1.0, 1.0, 0.0), 2.0));
    }

    #[test]
    fn mul_scales_both_components() {
        let a = ForceEnergy::new(Vector3::new(2.0, -4.0, 6.0), 8.0) * 0.5;
        assert_eq!(a, ForceEnergy::new(Vector3::new(1.0, -2.0, 3.0), 4.0));
    }

    #[test]
    fn sum_of_empty_iterator_is_zero() {
        let total: ForceEnergy = std::iter::empty().sum();
        assert!(total.is_zero());
    }
}
