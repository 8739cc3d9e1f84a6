//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait the integrator is generic over and the
//! direct-summation softened Newtonian gravity that implements it.

use crate::simulation::states::{System3, NVec3};

/// Trait for acceleration sources operating on [`System3`]
/// Implementations overwrite `out[i]` with the acceleration of body `i`
pub trait Acceleration {
    fn acceleration(&self, sys: &System3, out: &mut [NVec3]);
}

/// Newtonian gravity with Plummer-style softening, O(N^2) direct sum
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps: f64, // softening length
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System3, out: &mut [NVec3]) {
        let positions = sys.positions();
        let masses = sys.masses();
        accumulate_accelerations(&positions, &masses, self.G, self.eps, out);
    }
}

/// Pairwise softened gravitational accelerations.
///
/// For every pair the squared separation is `|r_j - r_i|^2 + eps^2` and the
/// pair is scaled by `d2^(-3/2)`. A pair with `d2 == 0` (coincident bodies
/// and no softening) contributes nothing, so the result is always finite.
#[allow(non_snake_case)]
pub fn compute_accelerations(positions: &[NVec3], masses: &[f64], G: f64, eps: f64) -> Vec<NVec3> {
    let mut out = vec![NVec3::zeros(); positions.len()];
    accumulate_accelerations(positions, masses, G, eps, &mut out);
    out
}

#[allow(non_snake_case)]
fn accumulate_accelerations(positions: &[NVec3], masses: &[f64], G: f64, eps: f64, out: &mut [NVec3]) {
    debug_assert_eq!(positions.len(), masses.len());
    debug_assert_eq!(positions.len(), out.len());

    for a in out.iter_mut() {
        *a = NVec3::zeros();
    }

    let n = positions.len();
    let eps2 = eps * eps;

    // Each unordered pair (i, j), i < j, is visited once and applied to both
    // bodies with opposite sign. The self pair has zero displacement and is
    // skipped, so self-force is exactly zero.
    for i in 0..n {
        let xi = positions[i];
        let mi = masses[i];

        for j in (i + 1)..n {
            // displacement from i to j
            let r = positions[j] - xi;

            // softened squared distance
            let d2 = r.x * r.x + r.y * r.y + r.z * r.z + eps2;
            if d2 <= 0.0 {
                continue;
            }

            // d2^(-3/2)
            let inv_r3 = d2.powf(-1.5);
            let coef = G * inv_r3;

            // a_i +=  G m_j r / d^3, a_j -= G m_i r / d^3
            out[i] += coef * masses[j] * r;
            out[j] -= coef * mi * r;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_body_feels_nothing() {
        let acc = compute_accelerations(&[NVec3::new(1.0, 2.0, 3.0)], &[5.0], 1.0, 0.1);
        assert_eq!(acc, vec![NVec3::zeros()]);
    }

    #[test]
    fn coincident_without_softening_is_zero_not_nan() {
        let p = NVec3::new(0.5, 0.5, 0.5);
        let acc = compute_accelerations(&[p, p], &[1.0, 1.0], 1.0, 0.0);
        assert!(acc.iter().all(|a| a.norm() == 0.0));
    }

    #[test]
    fn matches_closed_form_for_a_pair() {
        // separation 2 along x, eps = 0: |a_0| = G m_1 / 4
        let pos = [NVec3::new(-1.0, 0.0, 0.0), NVec3::new(1.0, 0.0, 0.0)];
        let acc = compute_accelerations(&pos, &[1.0, 3.0], 1.0, 0.0);
        assert!((acc[0].x - 0.75).abs() < 1e-12);
        assert!((acc[1].x + 0.25).abs() < 1e-12);
        assert_eq!(acc[0].y, 0.0);
    }

    #[test]
    fn trait_and_free_function_agree() {
        use crate::simulation::states::Body3;

        let sys = System3 {
            bodies: vec![
                Body3 { x: NVec3::new(0.0, 0.0, 0.0), v: NVec3::zeros(), m: 1.0 },
                Body3 { x: NVec3::new(0.0, 1.0, 0.5), v: NVec3::zeros(), m: 2.0 },
                Body3 { x: NVec3::new(-1.0, 0.3, 0.0), v: NVec3::zeros(), m: 0.5 },
            ],
            t: 0.0,
        };
        let gravity = NewtonianGravity { G: 1.0, eps: 0.1 };
        let mut out = vec![NVec3::new(9.0, 9.0, 9.0); 3];
        gravity.acceleration(&sys, &mut out);

        let direct = compute_accelerations(&sys.positions(), &sys.masses(), 1.0, 0.1);
        assert_eq!(out, direct);
    }
}
