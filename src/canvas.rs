//! Drawing surface abstraction.
//!
//! The starfield never talks to the GPU directly. It issues draw calls on a
//! [`Canvas`], and [`DrawList`] records them so the render module can upload a
//! whole frame at once (and so tests can inspect exactly what was drawn).

use glam::Vec2;

/// Straight (non premultiplied) RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// `rgb(0, 245, 255)`
    pub const CYAN: Self = Self::new(0.0, 245.0 / 255.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface can only be drawn on when both sides are finite and positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Bounds {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

/// A 2D raster surface that accepts the handful of primitives the starfield needs.
pub trait Canvas {
    /// Discard everything drawn so far and reset the surface to `bounds`.
    fn clear(&mut self, bounds: Bounds);

    /// A disc whose color fades linearly from `color` at the center to fully
    /// transparent at `radius`.
    fn radial_glow(&mut self, center: Vec2, radius: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { bounds: Bounds },
    RadialGlow { center: Vec2, radius: f32, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// A [`Canvas`] that records draw calls in submission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, bounds: Bounds) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { bounds });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::RadialGlow {
            center,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
impl Bounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

#[cfg(test)]
impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Color)> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_discards_previous_frame() {
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ONE, 1.0, Color::WHITE);
        list.fill_circle(Vec2::ONE, 2.0, Color::WHITE);

        list.clear(Bounds::new(10.0, 10.0));

        assert_eq!(
            list.commands(),
            &[DrawCommand::Clear {
                bounds: Bounds::new(10.0, 10.0)
            }]
        );
    }

    #[test]
    fn test_bounds_drawable() {
        assert!(Bounds::new(800.0, 600.0).is_drawable());
        assert!(!Bounds::new(0.0, 600.0).is_drawable());
        assert!(!Bounds::new(800.0, -1.0).is_drawable());
        assert!(!Bounds::new(f32::NAN, 600.0).is_drawable());
        assert!(!Bounds::default().is_drawable());
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let glow = Color::CYAN.with_alpha(0.05);
        assert_eq!(glow.to_array(), [0.0, 245.0 / 255.0, 1.0, 0.05]);
    }
}
