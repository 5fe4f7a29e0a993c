//! Momentum integration for the headless host
//!
//! In an interactive build the game engine's rigid-body solver plays this
//! role; [`MomentumIntegrator`] is the seam. The driver only submits forces
//! (into `Body::force`) and overwrites velocities; the integrator turns the
//! submitted forces into motion afterwards.

use super::species::SpeciesTable;
use super::states::{NVec3, System};

pub trait MomentumIntegrator {
    /// Advance `sys` by `dt` and consume every submitted force
    fn integrate(&mut self, sys: &mut System, species: &SpeciesTable, dt: f64);
}

/// Semi-implicit (symplectic) Euler, the scheme rigid-body engines step with:
/// v_n+1 = v_n + dt F/m, then x_n+1 = x_n + dt v_n+1
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl MomentumIntegrator for SemiImplicitEuler {
    fn integrate(&mut self, sys: &mut System, species: &SpeciesTable, dt: f64) {
        for b in sys.bodies.iter_mut() {
            // kinematic bodies are moved by hand, pending forces are dropped
            if !b.is_kinematic() {
                let m = species.get(b.species).engine_mass();
                // Kick
                b.v += dt * b.force / m;
                // Drift
                b.x += dt * b.v;
            }
            b.force = NVec3::zeros();
        }
        sys.t += dt;
    }
}
