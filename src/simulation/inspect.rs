//! Read-only report on one atom: identity, position, bonds and bond angles.

use crate::error::{Result, SimError};
use crate::simulation::driver::Simulation;
use crate::simulation::states::{BodyId, NVec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub other: BodyId,
    pub distance: f64, // Angstrom
}

#[derive(Debug, Clone, PartialEq)]
pub struct BondAngle {
    pub first: BodyId,
    pub second: BodyId,
    pub degrees: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomReport {
    pub id: BodyId,
    pub name: String,
    pub symbol: String,
    pub position: NVec3,
    pub bonds: Vec<Bond>,
    pub angles: Vec<BondAngle>, // one per pair of bonds
}

/// Every other atom closer than `bond_distance` counts as bonded
pub fn inspect(sim: &Simulation, id: BodyId, bond_distance: f64) -> Result<AtomReport> {
    let body = sim.body(id).ok_or(SimError::UnknownBody(id))?;
    let species = sim.species().get(body.species);

    let bonded: Vec<(BodyId, NVec3)> = sim
        .system
        .bodies
        .iter()
        .filter(|o| o.id != id && (o.x - body.x).norm() < bond_distance)
        .map(|o| (o.id, o.x - body.x))
        .collect();

    let bonds = bonded
        .iter()
        .map(|(other, r)| Bond {
            other: *other,
            distance: r.norm(),
        })
        .collect();

    let mut angles = Vec::new();
    for (i, (a, ra)) in bonded.iter().enumerate() {
        for (b, rb) in &bonded[i + 1..] {
            angles.push(BondAngle {
                first: *a,
                second: *b,
                degrees: ra.angle(rb).to_degrees(),
            });
        }
    }

    Ok(AtomReport {
        id,
        name: species.name.clone(),
        symbol: species.symbol.clone(),
        position: body.x,
        bonds,
        angles,
    })
}
