//! Soft spherical containment
//!
//! A body that leaves the sphere has its velocity mirrored about the inward
//! radial direction at the crossing point. While it stays outside, the same
//! reflected velocity is re-applied every tick, so a perturbation cannot push
//! it further out. Coming back inside clears the state.
//! Kinematic bodies are left alone, so a held atom can be dragged outside.
//! Letting go of one resets it to `Free` (see `Simulation::release`).

use crate::simulation::states::{Body, Containment, NVec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: NVec3,
    pub radius: f64,
}

/// What a single check did to the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainmentEvent {
    Unchanged,
    Reflected, // Free -> Reflecting
    Held,      // Reflecting -> Reflecting
    Released,  // Reflecting -> Free
    Exempt,    // kinematic, no transition
}

/// Mirror `v` about the plane with unit normal `n`
pub fn reflect(v: &NVec3, n: &NVec3) -> NVec3 {
    v - n * (2.0 * v.dot(n))
}

pub fn check(body: &mut Body, sphere: &Sphere) -> ContainmentEvent {
    if body.is_kinematic() {
        return ContainmentEvent::Exempt;
    }

    let outward = body.x - sphere.center;
    if outward.norm() <= sphere.radius {
        return match body.containment {
            Containment::Reflecting { .. } => {
                body.containment = Containment::Free;
                ContainmentEvent::Released
            }
            Containment::Free => ContainmentEvent::Unchanged,
        };
    }

    match body.containment {
        Containment::Reflecting { velocity } => {
            body.v = velocity;
            ContainmentEvent::Held
        }
        Containment::Free => {
            // outside a positive radius, so the offset is never zero
            let inward = match (-outward).try_normalize(f64::EPSILON) {
                Some(n) => n,
                None => return ContainmentEvent::Unchanged,
            };
            let velocity = reflect(&body.v, &inward);
            log::debug!("body {:?} crossed the containment sphere, reflecting", body.id);
            body.containment = Containment::Reflecting { velocity };
            body.v = velocity;
            ContainmentEvent::Reflected
        }
    }
}
