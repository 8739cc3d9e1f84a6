//! Kinetic and potential energy bookkeeping
//!
//! Potential energy is computed without softening, unlike the force law in
//! `forces`. Close encounters can therefore make PE spike while the
//! acceleration stays bounded.

use crate::simulation::states::NVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energies {
    pub kinetic: f64,
    pub potential: f64,
}

impl Energies {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// KE = 1/2 sum m |v|^2, PE = sum_{i<j} -G m_i m_j / |r_ij|
///
/// A pair at zero distance adds nothing to PE.
#[allow(non_snake_case)]
pub fn compute_energies(positions: &[NVec3], velocities: &[NVec3], masses: &[f64], G: f64) -> Energies {
    let kinetic = 0.5 * velocities
        .iter()
        .zip(masses)
        .map(|(v, m)| m * v.norm_squared())
        .sum::<f64>();

    let n = positions.len();
    let mut potential = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let dist = (positions[j] - positions[i]).norm();
            let inv_r = if dist > 0.0 { dist.recip() } else { 0.0 };
            potential += -G * masses[i] * masses[j] * inv_r;
        }
    }

    Energies { kinetic, potential }
}
