//! Fixed-step leapfrog (kick-drift-kick) integrator
//!
//! The caller owns the acceleration buffer. On entry it must hold a_n for the
//! current positions; on exit it holds a_n+1, ready for the next step. That
//! gives one force evaluation per step while still using the old acceleration
//! for the first kick and the new one for the second.

use super::forces::Acceleration;
use super::states::{System3, NVec3};

/// Advance `sys` by one step of size `dt`.
/// `accel` is read as a_n and overwritten with a_n+1.
pub fn leapfrog_step<F>(sys: &mut System3, accel: &mut [NVec3], forces: &F, dt: f64)
where
    F: Acceleration + ?Sized,
{
    debug_assert_eq!(sys.bodies.len(), accel.len());
    if sys.bodies.is_empty() { // no bodies, only time moves
        sys.t += dt;
        return;
    }

    let half_dt = 0.5 * dt; // half step dt/2

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(accel.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // a_n+1 from x_n+1
    forces.acceleration(&*sys, accel);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(accel.iter()) {
        b.v += half_dt * *a;
    }

    // advance time: t_n+1 = t_n + dt
    sys.t += dt;
}
