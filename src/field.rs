//! The starfield: a fixed particle set redrawn from scratch every frame.
//!
//! Nothing here accumulates between frames. Given the same particles, timestamp
//! and pointer position, [`render_frame`] issues exactly the same draw calls.

use glam::Vec2;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    canvas::{Bounds, Canvas, Color},
    particle::{generate_particles, Particle},
};

pub const DEFAULT_PARTICLE_COUNT: u32 = 200;
/// Upper bound for the particle count. Keeps the instance buffer well under
/// wgpu's default `max_buffer_size`.
pub const MAX_PARTICLES: u32 = 20_000;
pub const DEFAULT_PARALLAX_STRENGTH: f32 = 0.02;

/// Glows painted under the stars, as fractions of the canvas size.
pub struct Nebula {
    pub anchor: Vec2,
    pub radius: f32,
    pub color: Color,
}

pub fn nebulae() -> [Nebula; 2] {
    [
        Nebula {
            anchor: Vec2::new(0.2, 0.3),
            radius: 300.0,
            color: Color::CYAN.with_alpha(0.05),
        },
        Nebula {
            anchor: Vec2::new(0.8, 0.7),
            radius: 400.0,
            color: Color::MAGENTA.with_alpha(0.03),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// The surface had no drawable area, nothing was issued.
    Skipped,
}

/// Everything a frame depends on besides the particles themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub now_ms: f64,
    pub pointer: Vec2,
    pub bounds: Bounds,
}

pub fn parallax(pointer: Vec2, bounds: Bounds, strength: f32) -> Vec2 {
    (pointer - bounds.center()) * strength
}

pub fn render_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    particles: &[Particle],
    frame: &FrameInput,
    parallax_strength: f32,
) -> FrameOutcome {
    let bounds = frame.bounds;
    if !bounds.is_drawable() {
        return FrameOutcome::Skipped;
    }

    canvas.clear(bounds);

    for nebula in nebulae() {
        canvas.radial_glow(nebula.anchor * bounds.size(), nebula.radius, nebula.color);
    }

    let offset = parallax(frame.pointer, bounds, parallax_strength);

    for particle in particles {
        let twinkle = particle.twinkle(frame.now_ms);
        let center = particle.position + offset * particle.speed;

        canvas.fill_circle(
            center,
            particle.size,
            Color::WHITE.with_alpha(particle.opacity * twinkle),
        );

        if particle.has_halo() {
            canvas.fill_circle(
                center,
                particle.size * 2.0,
                Color::CYAN.with_alpha(particle.opacity * twinkle * 0.2),
            );
        }
    }

    FrameOutcome::Drawn
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub particle_count: u32,
    pub parallax_strength: f32,
    /// Fixed RNG seed, `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            parallax_strength: DEFAULT_PARALLAX_STRENGTH,
            seed: None,
        }
    }
}

pub struct ParticleField {
    config: FieldConfig,
    bounds: Bounds,
    rng: StdRng,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(mut config: FieldConfig, bounds: Bounds) -> Self {
        config.particle_count = config.particle_count.min(MAX_PARTICLES);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = generate_particles(&mut rng, config.particle_count as usize, bounds);

        Self {
            config,
            bounds,
            rng,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Regenerates every particle when the bounds actually changed.
    pub fn resize(&mut self, bounds: Bounds) {
        if bounds == self.bounds {
            return;
        }

        debug!(
            "Regenerating {} particles for {}x{}",
            self.config.particle_count, bounds.width, bounds.height
        );
        self.bounds = bounds;
        self.regenerate();
    }

    /// Counts above [`MAX_PARTICLES`] are capped.
    pub fn set_particle_count(&mut self, count: u32) {
        let count = count.min(MAX_PARTICLES);
        if count == self.config.particle_count {
            return;
        }

        self.config.particle_count = count;
        self.regenerate();
    }

    pub fn set_parallax_strength(&mut self, strength: f32) {
        self.config.parallax_strength = strength;
    }

    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        now_ms: f64,
        pointer: Vec2,
    ) -> FrameOutcome {
        let frame = FrameInput {
            now_ms,
            pointer,
            bounds: self.bounds,
        };
        render_frame(canvas, &self.particles, &frame, self.config.parallax_strength)
    }

    fn regenerate(&mut self) {
        self.particles = generate_particles(
            &mut self.rng,
            self.config.particle_count as usize,
            self.bounds,
        );
    }
}

#[cfg(test)]
impl ParticleField {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use crate::canvas::{DrawCommand, DrawList};

    use super::*;

    fn seeded(count: u32, bounds: Bounds) -> ParticleField {
        ParticleField::new(
            FieldConfig {
                particle_count: count,
                seed: Some(1234),
                ..Default::default()
            },
            bounds,
        )
    }

    fn particle(x: f32, y: f32, size: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            size,
            opacity: 0.5,
            speed: 0.5,
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let field = seeded(200, Bounds::new(1280.0, 720.0));
        let pointer = Vec2::new(100.0, 650.0);

        let mut first = DrawList::new();
        let mut second = DrawList::new();
        field.render(&mut first, 12_345.0, pointer);
        field.render(&mut second, 12_345.0, pointer);
        assert_eq!(first, second);

        // Re-rendering into a used list gives the same frame again.
        field.render(&mut second, 12_345.0, pointer);
        assert_eq!(first, second);
    }

    #[test]
    fn test_draw_order() {
        let bounds = Bounds::new(1000.0, 500.0);
        let particles = [particle(10.0, 10.0, 2.0), particle(20.0, 20.0, 1.0)];
        let frame = FrameInput {
            now_ms: 0.0,
            pointer: bounds.center(),
            bounds,
        };

        let mut list = DrawList::new();
        assert_eq!(
            render_frame(&mut list, &particles, &frame, DEFAULT_PARALLAX_STRENGTH),
            FrameOutcome::Drawn
        );

        let commands = list.commands();
        // clear, two glows, star with halo, star without
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], DrawCommand::Clear { bounds });
        assert_eq!(
            commands[1],
            DrawCommand::RadialGlow {
                center: Vec2::new(200.0, 150.0),
                radius: 300.0,
                color: Color::CYAN.with_alpha(0.05),
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::RadialGlow {
                center: Vec2::new(800.0, 350.0),
                radius: 400.0,
                color: Color::MAGENTA.with_alpha(0.03),
            }
        );
        assert!(matches!(commands[3], DrawCommand::Circle { radius, .. } if radius == 2.0));
        assert!(matches!(commands[4], DrawCommand::Circle { radius, .. } if radius == 4.0));
        assert!(matches!(commands[5], DrawCommand::Circle { radius, .. } if radius == 1.0));
    }

    #[test]
    fn test_star_and_halo_alpha() {
        let bounds = Bounds::new(100.0, 100.0);
        let star = particle(0.0, 0.0, 2.0);
        let frame = FrameInput {
            now_ms: 0.0,
            pointer: bounds.center(),
            bounds,
        };

        let mut list = DrawList::new();
        render_frame(&mut list, &[star], &frame, DEFAULT_PARALLAX_STRENGTH);

        // x = 0 and now = 0 puts the twinkle at 0.7
        let circles: Vec<_> = list.circles().collect();
        assert_eq!(circles.len(), 2);
        assert!((circles[0].2.a - 0.35).abs() < 1e-6);
        assert_eq!(circles[0].2.with_alpha(1.0), Color::WHITE);
        assert!((circles[1].2.a - 0.07).abs() < 1e-6);
        assert_eq!(circles[1].2.with_alpha(1.0), Color::CYAN);
    }

    #[test]
    fn test_parallax_scales_with_speed() {
        let bounds = Bounds::new(800.0, 600.0);
        let star = particle(100.0, 100.0, 1.0);

        // Pointer at the center means no parallax at all.
        let mut list = DrawList::new();
        let centered = FrameInput {
            now_ms: 0.0,
            pointer: Vec2::new(400.0, 300.0),
            bounds,
        };
        render_frame(&mut list, &[star], &centered, 0.02);
        assert_eq!(list.circles().next().map(|c| c.0), Some(Vec2::new(100.0, 100.0)));

        // 400px right, 300px down of center: (8, 6) * speed 0.5
        let corner = FrameInput {
            pointer: Vec2::new(800.0, 600.0),
            ..centered
        };
        render_frame(&mut list, &[star], &corner, 0.02);
        let center = list.circles().next().map(|c| c.0).unwrap();
        assert!((center - Vec2::new(104.0, 103.0)).length() < 1e-4);
    }

    #[test]
    fn test_parallax_offset() {
        let offset = parallax(Vec2::ZERO, Bounds::new(1000.0, 800.0), 0.02);
        assert!((offset - Vec2::new(-10.0, -8.0)).length() < 1e-5);
    }

    #[test]
    fn test_zero_bounds_is_noop() {
        let field = seeded(50, Bounds::new(0.0, 0.0));
        let mut list = DrawList::new();

        assert_eq!(field.render(&mut list, 0.0, Vec2::ZERO), FrameOutcome::Skipped);
        assert!(list.is_empty());
        assert_eq!(field.particles().len(), 50);
    }

    #[test]
    fn test_resize_regenerates_within_new_bounds() {
        let mut field = seeded(150, Bounds::new(1920.0, 1080.0));
        let before = field.particles().to_vec();

        let small = Bounds::new(64.0, 48.0);
        field.resize(small);
        assert_eq!(field.bounds(), small);
        assert_eq!(field.particles().len(), 150);
        assert!(field.particles().iter().all(|p| small.contains(p.position)));
        assert_ne!(field.particles(), &before[..]);
    }

    #[test]
    fn test_resize_same_bounds_keeps_particles() {
        let bounds = Bounds::new(640.0, 480.0);
        let mut field = seeded(10, bounds);
        let before = field.particles().to_vec();
        field.resize(bounds);
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn test_set_particle_count() {
        let mut field = seeded(10, Bounds::new(640.0, 480.0));
        field.set_particle_count(75);
        assert_eq!(field.particles().len(), 75);
        assert_eq!(field.config().particle_count, 75);
    }

    #[test]
    fn test_particle_count_capped() {
        let field = seeded(u32::MAX, Bounds::new(64.0, 48.0));
        assert_eq!(field.config().particle_count, MAX_PARTICLES);
        assert_eq!(field.particles().len(), MAX_PARTICLES as usize);

        let mut field = seeded(10, Bounds::new(64.0, 48.0));
        field.set_particle_count(MAX_PARTICLES + 1);
        assert_eq!(field.particles().len(), MAX_PARTICLES as usize);
    }

    #[test]
    fn test_render_draws_every_particle() {
        let field = seeded(120, Bounds::new(640.0, 480.0));
        let halos = field.particles().iter().filter(|p| p.has_halo()).count();

        let mut list = DrawList::new();
        field.render(&mut list, 5_000.0, Vec2::new(10.0, 10.0));
        assert_eq!(list.circles().count(), 120 + halos);
    }
}
