//! Core state types for the atom sandbox.
//!
//! - `Body`   one atom: species, position, velocity, hold and containment state
//! - `System` the collection of bodies and the current simulation time `t`
//!
//! Positions are in Angstroms, velocities in Angstroms per picosecond.

use nalgebra::Vector3;

use crate::simulation::species::SpeciesId;

pub type NVec3 = Vector3<f64>;

/// Stable handle for a body, never reused within one `System`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

/// How a body takes part in the dynamics.
/// `Pinned` and `Held` are both kinematic: forces, thermostat and containment skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Dynamic,
    Pinned, // anchored by the scenario
    Held,   // grabbed by the user
}

/// Per-body containment state, recomputed every tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Containment {
    #[default]
    Free,
    Reflecting { velocity: NVec3 },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub species: SpeciesId,
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub motion: Motion,
    pub containment: Containment,
    pub force: NVec3, // force submitted this tick, consumed by the integrator
}

impl Body {
    pub fn new(id: BodyId, species: SpeciesId, x: NVec3, v: NVec3) -> Self {
        Self {
            id,
            species,
            x,
            v,
            motion: Motion::Dynamic,
            containment: Containment::Free,
            force: NVec3::zeros(),
        }
    }

    pub fn is_kinematic(&self) -> bool {
        matches!(self.motion, Motion::Pinned | Motion::Held)
    }

    pub fn is_held(&self) -> bool {
        self.motion == Motion::Held
    }

    pub fn is_reflecting(&self) -> bool {
        matches!(self.containment, Containment::Reflecting { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // all live atoms
    pub t: f64,            // time (ps)
    next_id: u64,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a body and hand back its id
    pub fn push(&mut self, species: SpeciesId, x: NVec3, v: NVec3) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(id, species, x, v));
        id
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let i = self.index_of(id)?;
        Some(self.bodies.remove(i))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn held(&self) -> Option<BodyId> {
        self.bodies.iter().find(|b| b.is_held()).map(|b| b.id)
    }
}
