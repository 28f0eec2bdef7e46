//! Gradient noise and fractal Brownian motion.
//!
//! Improved Perlin noise over an explicit, immutable permutation table. The
//! table is a value owned by the noise generator, never module-level state,
//! so several differently-seeded generators can be used side by side.

use crate::hash::{hash_seed, seed_offset};
use crate::traits::ScalarField;
use crate::types::Point3;

/// Ken Perlin's reference permutation of 0..=255.
const CLASSIC_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// A permutation of 0..=255 used to hash lattice cell corners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; 256],
}

impl PermutationTable {
    /// The reference permutation.
    pub const fn classic() -> Self {
        Self {
            perm: CLASSIC_PERMUTATION,
        }
    }

    /// A deterministic shuffle of the reference permutation.
    ///
    /// Fisher-Yates driven by `hash_seed(seed, i)`; the same seed always
    /// gives the same table.
    pub fn seeded(seed: u32) -> Self {
        let mut perm = CLASSIC_PERMUTATION;
        for i in (1..perm.len()).rev() {
            let j = (hash_seed(seed, i as u32) % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }
        Self { perm }
    }

    /// Look up the permutation, wrapping the index into 0..=255.
    #[inline]
    pub fn get(&self, index: i32) -> i32 {
        self.perm[(index & 0xff) as usize] as i32
    }

    /// The raw permutation values.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::classic()
    }
}

/// Quintic fade curve `6t⁵ - 15t⁴ + 10t³` (C² continuous at lattice points).
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of the offset with one of 12 edge-direction gradients picked by `hash`.
#[inline]
fn grad(hash: i32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Gradient noise generator.
///
/// Output lies roughly in `[-1, 1]` and is exactly 0 at integer lattice points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradientNoise {
    perm: PermutationTable,
}

impl GradientNoise {
    /// Create a generator over the given permutation.
    pub const fn new(perm: PermutationTable) -> Self {
        Self { perm }
    }

    /// Generator over a seeded permutation; `None` uses the reference table.
    pub fn from_seed(seed: Option<u32>) -> Self {
        match seed {
            Some(seed) => Self::new(PermutationTable::seeded(seed)),
            None => Self::new(PermutationTable::classic()),
        }
    }

    /// The permutation this generator hashes with.
    #[inline]
    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    /// Sample 3D gradient noise.
    pub fn noise3(&self, point: Point3) -> f32 {
        let fx = libm::floorf(point.x);
        let fy = libm::floorf(point.y);
        let fz = libm::floorf(point.z);

        let xi = (fx as i32) & 0xff;
        let yi = (fy as i32) & 0xff;
        let zi = (fz as i32) & 0xff;

        let x = point.x - fx;
        let y = point.y - fy;
        let z = point.z - fz;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = (p.get(xi) + yi) & 0xff;
        let b = (p.get(xi + 1) + yi) & 0xff;
        let aa = (p.get(a) + zi) & 0xff;
        let ba = (p.get(b) + zi) & 0xff;
        let ab = (p.get(a + 1) + zi) & 0xff;
        let bb = (p.get(b + 1) + zi) & 0xff;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p.get(aa), x, y, z), grad(p.get(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p.get(ab), x, y - 1.0, z),
                    grad(p.get(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p.get(aa + 1), x, y, z - 1.0),
                    grad(p.get(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p.get(ab + 1), x, y - 1.0, z - 1.0),
                    grad(p.get(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Fractal sum of `octaves` noise layers.
    ///
    /// The first octave has amplitude 0.5; each further octave doubles the
    /// frequency and halves the amplitude.
    pub fn fbm(&self, point: Point3, octaves: u32) -> f32 {
        let mut sum = 0.0;
        let mut amplitude = 0.5;
        let mut p = point;
        for _ in 0..octaves {
            sum += amplitude * self.noise3(p);
            p = p * 2.0;
            amplitude *= 0.5;
        }
        sum
    }
}

/// fBm noise as a [`ScalarField`]: `fbm(point · frequency + offset)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FbmField {
    noise: GradientNoise,
    octaves: u32,
    frequency: f32,
    offset: Point3,
}

impl FbmField {
    /// Create an fBm field.
    ///
    /// A seed selects both the permutation and a lattice offset; `None`
    /// samples the reference table at the origin.
    pub fn new(seed: Option<u32>, octaves: u32, frequency: f32) -> Self {
        let offset = seed.map(|s| Point3::from(seed_offset(s))).unwrap_or_default();
        Self {
            noise: GradientNoise::from_seed(seed),
            octaves,
            frequency,
            offset,
        }
    }

    /// Number of octaves summed.
    #[inline]
    pub fn octaves(&self) -> u32 {
        self.octaves
    }
}

impl ScalarField for FbmField {
    #[inline]
    fn sample(&self, point: Point3) -> f32 {
        self.noise
            .fbm(point * self.frequency + self.offset, self.octaves)
    }
}
