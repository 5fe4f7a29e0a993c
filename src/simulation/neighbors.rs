//! Neighbor search within a cutoff radius
//!
//! Two strategies return the same neighbor sets:
//! - direct scan over every other body, O(N^2) per tick
//! - a uniform cell grid keyed by integer cell coordinates, built once per
//!   tick with cell size equal to the largest cutoff, so every neighbor of a
//!   body lies in its own cell or one of the 26 around it
//!
//! The grid is a hash map rather than a dense array because atoms are not
//! confined to a fixed box (they can be dragged anywhere). Bodies too far out
//! for an exact integer cell key (or with non-finite positions) are kept in a
//! separate list; they are checked against every query, and a query from one
//! of them falls back to the direct scan.

use std::collections::HashMap;

use crate::simulation::states::{NVec3, System};

type CellKey = [i64; 3];

/// Largest cell coordinate binned by key (2^40). Below it the quotient is
/// accurate enough that two bodies within one cell size land in adjacent cells.
const MAX_CELL: f64 = 1_099_511_627_776.0;

/// Indices of every other body strictly closer than `cutoff` to body `i`
pub fn neighbors_direct(sys: &System, i: usize, cutoff: f64) -> Vec<usize> {
    let xi = sys.bodies[i].x;
    let cutoff2 = cutoff * cutoff;
    sys.bodies
        .iter()
        .enumerate()
        .filter(|&(j, bj)| j != i && (bj.x - xi).norm_squared() < cutoff2)
        .map(|(j, _)| j)
        .collect()
}

/// Spatial hash over body positions.
pub struct CellGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
    far: Vec<usize>,
}

impl CellGrid {
    /// Bin every body of `sys`. `cell_size` must be at least the largest cutoff
    /// that will be queried.
    pub fn build(sys: &System, cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        let mut far = Vec::new();
        for (i, b) in sys.bodies.iter().enumerate() {
            match cell_of(&b.x, cell_size) {
                Some(key) => cells.entry(key).or_default().push(i),
                None => far.push(i),
            }
        }
        if !far.is_empty() {
            log::debug!("{} body(ies) outside the cell grid range", far.len());
        }
        Self { cell_size, cells, far }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Same result as [`neighbors_direct`], in ascending index order
    pub fn neighbors(&self, sys: &System, i: usize, cutoff: f64) -> Vec<usize> {
        let xi = sys.bodies[i].x;
        let cutoff2 = cutoff * cutoff;
        let Some([cx, cy, cz]) = cell_of(&xi, self.cell_size) else {
            return neighbors_direct(sys, i, cutoff);
        };
        let within = |j: usize| j != i && (sys.bodies[j].x - xi).norm_squared() < cutoff2;

        let mut out: Vec<usize> = self.far.iter().copied().filter(|&j| within(j)).collect();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(members) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    out.extend(members.iter().copied().filter(|&j| within(j)));
                }
            }
        }
        out.sort_unstable();
        out
    }
}

/// `None` when any coordinate is beyond the exact range of the key
fn cell_of(x: &NVec3, cell_size: f64) -> Option<CellKey> {
    let mut key = [0i64; 3];
    for (k, c) in key.iter_mut().zip(x.iter()) {
        let cell = (c / cell_size).floor();
        if !cell.is_finite() || cell.abs() > MAX_CELL {
            return None;
        }
        *k = cell as i64;
    }
    Some(key)
}
