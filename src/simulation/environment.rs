//! The cubic box atoms are spawned in.
//!
//! The box is defined by its volume (cubic Angstrom); the side follows as the
//! cube root. Spawned and user-placed atoms keep `error_buffer` away from
//! every wall.

use rand::Rng;

use crate::error::{Result, SimError};
use crate::simulation::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBox {
    pub center: NVec3,
    volume: f64,
    pub error_buffer: f64,
}

impl Default for SimulationBox {
    fn default() -> Self {
        Self {
            center: NVec3::zeros(),
            volume: 8000.0,
            error_buffer: 0.5,
        }
    }
}

impl SimulationBox {
    pub fn new(center: NVec3, volume: f64, error_buffer: f64) -> Result<Self> {
        let mut b = Self {
            center,
            volume: 1.0,
            error_buffer,
        };
        b.set_volume(volume)?;
        if !(error_buffer.is_finite() && error_buffer >= 0.0 && error_buffer < 0.5 * b.side()) {
            return Err(SimError::InvalidConfig(format!(
                "error_buffer {error_buffer} does not fit a box of side {}",
                b.side()
            )));
        }
        Ok(b)
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        if !(volume.is_finite() && volume > 0.0) {
            return Err(SimError::InvalidConfig(format!("box volume must be > 0, got {volume}")));
        }
        self.volume = volume;
        Ok(())
    }

    /// Width, height and depth of the cube
    pub fn side(&self) -> f64 {
        self.volume.cbrt()
    }

    /// Half side minus the wall buffer, never negative
    fn usable_half(&self) -> f64 {
        (0.5 * self.side() - self.error_buffer).max(0.0)
    }

    /// Uniform position inside the buffered box
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> NVec3 {
        let h = self.usable_half();
        if h == 0.0 {
            return self.center;
        }
        self.center + NVec3::new(rng.gen_range(-h..h), rng.gen_range(-h..h), rng.gen_range(-h..h))
    }

    /// Pull a dropped atom back inside the buffered box, axis by axis
    pub fn clamp(&self, position: NVec3) -> NVec3 {
        let h = self.usable_half();
        let lo = self.center.add_scalar(-h);
        let hi = self.center.add_scalar(h);
        NVec3::new(
            position.x.clamp(lo.x, hi.x),
            position.y.clamp(lo.y, hi.y),
            position.z.clamp(lo.z, hi.z),
        )
    }

    pub fn contains(&self, position: &NVec3) -> bool {
        let h = 0.5 * self.side();
        (position - self.center).iter().all(|c| c.abs() <= h)
    }
}
