use std::ops::Range;

use glam::Vec2;
use rand::Rng;

use crate::canvas::Bounds;

pub const SIZE_RANGE: Range<f32> = 0.5..2.5;
pub const OPACITY_RANGE: Range<f32> = 0.2..1.0;
pub const SPEED_RANGE: Range<f32> = 0.1..0.6;

/// Stars larger than this get a cyan halo.
pub const HALO_THRESHOLD: f32 = 1.5;

/// A single star. Immutable once generated, everything that moves is derived per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub speed: f32,
}

impl Particle {
    /// Brightness multiplier at `now_ms`, always within `0.4..=1.0`.
    pub fn twinkle(&self, now_ms: f64) -> f32 {
        twinkle(self.speed, self.position.x, now_ms)
    }

    pub fn has_halo(&self) -> bool {
        self.size > HALO_THRESHOLD
    }
}

pub fn twinkle(speed: f32, x: f32, now_ms: f64) -> f32 {
    // The phase is computed in f64, millisecond timestamps outgrow f32 precision quickly.
    let phase = now_ms * 0.001 * speed as f64 + x as f64;
    (phase.sin() * 0.3 + 0.7) as f32
}

/// Generate `count` particles spread uniformly over `bounds`.
///
/// Degenerate bounds are clamped to zero, which collapses every position to
/// the origin. The next resize regenerates them anyway.
pub fn generate_particles<R: Rng>(rng: &mut R, count: usize, bounds: Bounds) -> Vec<Particle> {
    let width = bounds.width.max(0.0);
    let height = bounds.height.max(0.0);

    (0..count)
        .map(|_| Particle {
            position: Vec2::new(sample(rng, 0.0..width), sample(rng, 0.0..height)),
            size: sample(rng, SIZE_RANGE),
            opacity: sample(rng, OPACITY_RANGE),
            speed: sample(rng, SPEED_RANGE),
        })
        .collect()
}

// `gen_range` panics on empty ranges, a zero-width viewport is a valid input here.
fn sample<R: Rng>(rng: &mut R, range: Range<f32>) -> f32 {
    rng.gen::<f32>() * (range.end - range.start) + range.start
}
