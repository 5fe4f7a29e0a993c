//! Error types for the simulation core.

use thiserror::Error;

use crate::simulation::states::BodyId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    #[error("species registered twice: {0}")]
    DuplicateSpecies(String),

    #[error("species id {0} was registered after the sigma table was built")]
    SpeciesNotInTable(usize),

    #[error("unknown body: {0:?}")]
    UnknownBody(BodyId),

    #[error("body {0:?} is not held")]
    NotHeld(BodyId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
