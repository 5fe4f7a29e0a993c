//! Numerical and physical parameters for the simulation
//!
//! `SimulationConfig` holds the settings a user can change while the
//! simulation runs (cutoff, target temperature, time scale, containment,
//! pause). It is handed to every `tick` instead of living in a global.
//!
//! Engine units: length 1 Angstrom, time 1 picosecond, mass 100 amu.

use crate::error::{Result, SimError};
use crate::simulation::states::NVec3;

pub const ANGSTROMS_TO_METERS: f64 = 1.0e-10;
pub const BOLTZMANN: f64 = 1.380649e-23; // J/K
pub const AMU_TO_KG: f64 = 1.66053907e-27;
pub const MASS_100AMU_TO_KG: f64 = 100.0 * AMU_TO_KG;
/// Turns an acceleration in m/s^2 into Angstrom/ps^2
pub const EYE_ADJUSTMENT: f64 = 1.0e-14;
/// Angstrom/ps -> m/s
pub const VELOCITY_TO_SI: f64 = 100.0;
/// Gain applied to the pointer flick when a held atom is let go
pub const FLING_GAIN: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub cutoff_multiplier: f64,   // neighbor cutoff in units of the body's own sigma
    pub desired_temperature: f64, // K
    pub time_scale: f64,          // multiplies the host dt
    pub containment_radius: f64,  // Angstrom
    pub containment_center: NVec3,
    pub paused: bool,
    pub thermostat_tau: f64, // Berendsen coupling time (ps), 0 = rescale fully every tick
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cutoff_multiplier: 2.5,
            desired_temperature: 300.0,
            time_scale: 1.0,
            containment_radius: 15.0,
            containment_center: NVec3::zeros(),
            paused: false,
            thermostat_tau: 0.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, msg: &str| {
            if ok {
                Ok(())
            } else {
                Err(SimError::InvalidConfig(msg.to_string()))
            }
        };
        check(
            self.cutoff_multiplier.is_finite() && self.cutoff_multiplier > 0.0,
            "cutoff_multiplier must be > 0",
        )?;
        check(
            self.desired_temperature.is_finite() && self.desired_temperature >= 0.0,
            "desired_temperature must be >= 0",
        )?;
        check(
            self.time_scale.is_finite() && self.time_scale >= 0.0,
            "time_scale must be >= 0",
        )?;
        check(
            self.containment_radius.is_finite() && self.containment_radius > 0.0,
            "containment_radius must be > 0",
        )?;
        check(
            self.thermostat_tau.is_finite() && self.thermostat_tau >= 0.0,
            "thermostat_tau must be >= 0",
        )?;
        check(
            self.containment_center.iter().all(|c| c.is_finite()),
            "containment_center must be finite",
        )
    }

    /// Fraction of the temperature gap closed in one step of length `dt`
    pub fn coupling(&self, dt: f64) -> f64 {
        if self.thermostat_tau <= 0.0 {
            return 1.0;
        }
        (dt / self.thermostat_tau).clamp(0.0, 1.0)
    }
}

/// Display helper for the temperature readout
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}
