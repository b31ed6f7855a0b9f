//! Read-only island height field.

use std::fmt;

use island_survival_core::WorldPoint;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Height reported for every point beyond the island shore.
pub(crate) const SEA_FLOOR: f32 = -2.0;

const NOISE_SCALE: f64 = 0.1;
const FALLOFF_PEAK: f32 = 2.0;
const HEIGHT_SCALE: f32 = 0.5;
const OCTAVES: usize = 4;

/// Height field combining a radial island falloff with fractal noise.
#[derive(Clone)]
pub(crate) struct Terrain {
    radius: f32,
    noise: Fbm<Perlin>,
}

impl Terrain {
    /// Generates the height field for an island of the provided radius.
    pub(crate) fn generate(radius: f32, seed: u64) -> Self {
        let noise = Fbm::<Perlin>::new(seed as u32)
            .set_octaves(OCTAVES)
            .set_frequency(1.0)
            .set_persistence(0.5)
            .set_lacunarity(2.0);
        Self { radius, noise }
    }

    /// Height halfway between the shore and the peak of the radial falloff.
    ///
    /// Ore veins are only placed above this line.
    pub(crate) fn mid_height(&self) -> f32 {
        FALLOFF_PEAK * HEIGHT_SCALE * 0.5
    }

    /// Height of the ground at the provided position.
    pub(crate) fn height_at(&self, point: WorldPoint) -> f32 {
        let distance = point.distance_from_origin();
        if self.radius <= 0.0 || distance >= self.radius {
            return SEA_FLOOR;
        }

        let falloff = (1.0 - distance / self.radius) * FALLOFF_PEAK;
        let sample = self.noise.get([
            f64::from(point.x()) * NOISE_SCALE,
            f64::from(point.z()) * NOISE_SCALE,
        ]) as f32;
        (falloff + sample) * HEIGHT_SCALE
    }
}

impl fmt::Debug for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terrain")
            .field("radius", &self.radius)
            .finish_non_exhaustive()
    }
}
