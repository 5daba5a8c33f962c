//! Seeded 2D gradient noise.
//!
//! Classic Perlin gradient noise with hashed lattice gradients, summed over
//! several octaves (fractal Brownian motion). Output is continuous, fully
//! determined by the seed, and normalized to roughly `[-1, 1]`.

/// Fractal Perlin noise source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinNoise {
    seed: u32,
    /// Base frequency applied to input coordinates.
    pub frequency: f64,
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
}

const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
];

impl PerlinNoise {
    pub const DEFAULT_OCTAVES: u32 = 6;
    pub const DEFAULT_PERSISTENCE: f64 = 0.5;
    pub const DEFAULT_LACUNARITY: f64 = 2.0;

    /// Create a noise source with six octaves, persistence 0.5 and lacunarity 2.
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            seed,
            frequency,
            octaves: Self::DEFAULT_OCTAVES,
            persistence: Self::DEFAULT_PERSISTENCE,
            lacunarity: Self::DEFAULT_LACUNARITY,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the fractal noise at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;
        let mut frequency = self.frequency;

        for octave in 0..self.octaves.max(1) {
            let octave_seed = self.seed.wrapping_add(octave.wrapping_mul(0x9E37_79B9));
            total += amplitude * gradient_noise(x * frequency, y * frequency, octave_seed);
            max_amplitude += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        // Single-octave Perlin spans about [-sqrt(0.5), sqrt(0.5)].
        (total / max_amplitude * std::f64::consts::SQRT_2).clamp(-1.0, 1.0)
    }
}

fn gradient_noise(x: f64, y: f64, seed: u32) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let ix = x0 as i32;
    let iy = y0 as i32;

    let n00 = corner(ix, iy, fx, fy, seed);
    let n10 = corner(ix.wrapping_add(1), iy, fx - 1.0, fy, seed);
    let n01 = corner(ix, iy.wrapping_add(1), fx, fy - 1.0, seed);
    let n11 = corner(ix.wrapping_add(1), iy.wrapping_add(1), fx - 1.0, fy - 1.0, seed);

    let u = fade(fx);
    let v = fade(fy);
    let nx0 = n00 + u * (n10 - n00);
    let nx1 = n01 + u * (n11 - n01);
    nx0 + v * (nx1 - nx0)
}

#[inline]
fn corner(ix: i32, iy: i32, dx: f64, dy: f64, seed: u32) -> f64 {
    let (gx, gy) = GRADIENTS[(hash_xy(ix, iy, seed) & 7) as usize];
    gx * dx + gy * dy
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn hash_xy(x: i32, y: i32, seed: u32) -> u32 {
    let mut v = seed ^ (x as u32).wrapping_mul(0x27D4_EB2D) ^ (y as u32).wrapping_mul(0x1656_67B1);
    v ^= v >> 15;
    v = v.wrapping_mul(0x85EB_CA6B);
    v ^= v >> 13;
    v = v.wrapping_mul(0xC2B2_AE35);
    v ^= v >> 16;
    v
}
