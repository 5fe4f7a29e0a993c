//! High-level runtime engine settings
//!
//! Selects the neighbor search strategy used when building and running a
//! `Simulation`.

use serde::Deserialize;

/// How the driver finds the bodies inside each cutoff sphere
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    #[serde(rename = "direct")] // scan every other body, O(N^2), fine for a few dozen atoms
    #[default]
    Direct,

    #[serde(rename = "cell_list")] // uniform grid sized to the largest cutoff
    CellList,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    pub neighbor_search: NeighborSearch,
}
