//! Velocity-rescaling thermostat (Berendsen weak coupling)
//!
//! Once per tick the ensemble temperature is measured from the velocities of
//! the dynamic bodies, a single factor `sqrt(alpha)` is derived from the gap
//! to the target, and every dynamic body's velocity is multiplied by it.

use crate::simulation::params::{BOLTZMANN, VELOCITY_TO_SI};
use crate::simulation::species::SpeciesTable;
use crate::simulation::states::System;

/// Total kinetic energy (J) of the non-kinematic bodies, and how many there are
pub fn kinetic_energy(sys: &System, species: &SpeciesTable) -> (f64, usize) {
    sys.bodies
        .iter()
        .filter(|b| !b.is_kinematic())
        .fold((0.0, 0), |(ke, n), b| {
            let v = b.v.norm() * VELOCITY_TO_SI;
            (ke + 0.5 * species.get(b.species).mass_kg() * v * v, n + 1)
        })
}

/// Equipartition temperature T = 2 KE / (3 N k_B); zero for an empty ensemble
pub fn temperature_from_kinetic(kinetic: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    2.0 * kinetic / (3.0 * n as f64 * BOLTZMANN)
}

/// Current ensemble temperature (K)
pub fn instantaneous_temperature(sys: &System, species: &SpeciesTable) -> f64 {
    let (ke, n) = kinetic_energy(sys, species);
    temperature_from_kinetic(ke, n)
}

/// `sqrt(1 + coupling * (T_desired / T_current - 1))`.
///
/// `coupling` is dt/tau clamped to [0, 1]; 1 rescales straight to the target.
/// A zero current temperature yields infinity (or NaN when the target is also
/// zero); callers must check the result with [`apply`].
pub fn rescale_factor(current_temperature: f64, desired_temperature: f64, coupling: f64) -> f64 {
    if coupling <= 0.0 {
        return 1.0;
    }
    let ratio = desired_temperature / current_temperature;
    let alpha = 1.0 + coupling.min(1.0) * (ratio - 1.0);
    if alpha.is_nan() {
        return f64::NAN;
    }
    alpha.max(0.0).sqrt()
}

/// Multiply every dynamic velocity by `factor`.
///
/// Does nothing when the factor is not finite or the system holds at most one
/// body. Returns whether the rescale was applied.
pub fn apply(sys: &mut System, factor: f64) -> bool {
    if !factor.is_finite() || sys.bodies.len() <= 1 {
        return false;
    }
    for b in sys.bodies.iter_mut().filter(|b| !b.is_kinematic()) {
        b.v *= factor;
    }
    true
}
