//! egui overlays drawn over the starfield: the skill tree and a settings window.

use egui::{Align2, Color32, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use crate::{
    field::MAX_PARTICLES,
    layout::{RadialLayout, SkillNode},
    skills::{self, Skill},
};

/// Side of the square the tree is laid out in, centered on the origin.
const VIEWBOX: f32 = 600.0;

const CYAN: Color32 = Color32::from_rgb(0, 255, 255);
const MAGENTA: Color32 = Color32::from_rgb(255, 0, 255);

const NODE_HEXAGON: [[f32; 2]; 6] = [
    [0.0, -40.0],
    [35.0, -20.0],
    [35.0, 20.0],
    [0.0, 40.0],
    [-35.0, 20.0],
    [-35.0, -20.0],
];

const CENTER_HEXAGON: [[f32; 2]; 6] = [
    [0.0, -50.0],
    [43.0, -25.0],
    [43.0, 25.0],
    [0.0, 50.0],
    [-43.0, 25.0],
    [-43.0, -25.0],
];

fn faded(color: Color32, opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
}

/// Pixels per viewbox unit: the tree fills 90% of the short screen side, up to 600px.
pub fn viewbox_scale(screen: Vec2) -> f32 {
    (screen.min_elem() * 0.9).min(VIEWBOX) / VIEWBOX
}

fn hexagon(center: Pos2, points: &[[f32; 2]; 6], scale: f32) -> Vec<Pos2> {
    points
        .iter()
        .map(|[x, y]| center + Vec2::new(*x, *y) * scale)
        .collect()
}

/// Diagonal fill of the center hexagon, magenta at `t = 0` to cyan at `t = 1`.
fn gradient_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t).round() as u8;
    let opacity = 0.3 * (1.0 - t) + 0.2 * t;
    Color32::from_rgba_unmultiplied(
        lerp(MAGENTA.r(), CYAN.r()),
        lerp(MAGENTA.g(), CYAN.g()),
        lerp(MAGENTA.b(), CYAN.b()),
        (opacity * 255.0) as u8,
    )
}

/// Triangle fan over the hexagon, each vertex shaded by its position along
/// the top-left to bottom-right diagonal of the bounding box.
fn gradient_hexagon(center: Pos2, points: &[Pos2]) -> Mesh {
    let bbox = Rect::from_points(points);
    let shade = |p: Pos2| {
        let u = (p.x - bbox.min.x) / bbox.width().max(f32::EPSILON);
        let v = (p.y - bbox.min.y) / bbox.height().max(f32::EPSILON);
        gradient_color((u + v) * 0.5)
    };

    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, shade(center));
    for point in points {
        mesh.colored_vertex(*point, shade(*point));
    }

    let rim = points.len() as u32;
    for i in 0..rim {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % rim);
    }
    mesh
}

pub struct SkillTreeOverlay {
    pub visible: bool,
    nodes: Vec<SkillNode>,
    hovered: Option<&'static str>,
    selected: Option<&'static str>,
}

impl SkillTreeOverlay {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            nodes: skills::nodes(),
            hovered: None,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&'static Skill> {
        self.selected.and_then(skills::find)
    }

    /// Clicking the selected node closes it, any other node replaces the selection.
    pub fn toggle(&mut self, id: &'static str) {
        self.selected = match self.selected {
            Some(current) if current == id => None,
            _ => Some(id),
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn is_highlighted(&self, id: &str) -> bool {
        self.hovered == Some(id) || self.selected == Some(id)
    }

    pub fn show(&mut self, ctx: &egui::Context, now_ms: f64) {
        if !self.visible {
            return;
        }

        let scale = viewbox_scale(ctx.screen_rect().size());

        egui::Area::new(egui::Id::new("skill_tree"))
            .order(egui::Order::Background)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(Vec2::splat(VIEWBOX * scale), Sense::hover());
                let center = response.rect.center();

                let placed: Vec<(SkillNode, Pos2)> = RadialLayout::new(&self.nodes)
                    .positions(now_ms)
                    .map(|(node, offset)| {
                        (*node, center + Vec2::new(offset.x as f32, offset.y as f32) * scale)
                    })
                    .collect();

                self.hovered = None;
                let mut clicked = None;
                for (node, position) in &placed {
                    let rect = Rect::from_center_size(*position, Vec2::new(70.0, 80.0) * scale);
                    let node_response = ui.interact(rect, ui.id().with(node.id), Sense::click());
                    if node_response.hovered() {
                        self.hovered = Some(node.id);
                    }
                    if node_response.clicked() {
                        clicked = Some(node.id);
                    }
                }
                if let Some(id) = clicked {
                    self.toggle(id);
                }

                // Energy lines
                for (node, position) in &placed {
                    let highlighted = self.is_highlighted(node.id);
                    let (width, opacity) = if highlighted { (2.0, 0.8) } else { (1.0, 0.3) };
                    if highlighted {
                        painter.line_segment(
                            [center, *position],
                            Stroke::new(6.0, faded(CYAN, 0.3)),
                        );
                    }
                    painter.extend(Shape::dashed_line(
                        &[center, *position],
                        Stroke::new(width, faded(CYAN, opacity)),
                        8.0 * scale,
                        4.0 * scale,
                    ));
                }

                painter.circle_stroke(center, 55.0 * scale, Stroke::new(1.0, faded(MAGENTA, 0.3)));
                painter.circle_stroke(center, 100.0 * scale, Stroke::new(0.5, faded(CYAN, 0.2)));

                let outline = hexagon(center, &CENTER_HEXAGON, scale);
                painter.add(Shape::mesh(gradient_hexagon(center, &outline)));
                painter.add(Shape::closed_line(outline, Stroke::new(2.0, faded(MAGENTA, 0.8))));
                painter.text(
                    center + Vec2::new(0.0, -5.0) * scale,
                    Align2::CENTER_BOTTOM,
                    "UNITY",
                    FontId::proportional(14.0 * scale),
                    MAGENTA,
                );
                painter.text(
                    center + Vec2::new(0.0, 3.0) * scale,
                    Align2::CENTER_TOP,
                    "DEVELOPER",
                    FontId::proportional(10.0 * scale),
                    Color32::from_gray(204),
                );

                for (node, position) in &placed {
                    let highlighted = self.is_highlighted(node.id);
                    let (fill, stroke_width, stroke_opacity, text) = if highlighted {
                        (0.2, 2.0, 0.9, Color32::from_rgb(51, 255, 255))
                    } else {
                        (0.1, 1.0, 0.4, Color32::from_gray(179))
                    };

                    painter.add(Shape::convex_polygon(
                        hexagon(*position, &NODE_HEXAGON, scale),
                        faded(CYAN, fill),
                        Stroke::new(stroke_width, faded(CYAN, stroke_opacity)),
                    ));

                    let label = skills::find(node.id).map(|s| s.label).unwrap_or(node.id);
                    painter.text(
                        *position,
                        Align2::CENTER_CENTER,
                        label.split(' ').collect::<Vec<_>>().join("\n"),
                        FontId::proportional(9.0 * scale.max(0.75)),
                        text,
                    );
                }
            });

        self.show_details(ctx);
    }

    fn show_details(&mut self, ctx: &egui::Context) {
        let Some(skill) = self.selected() else {
            return;
        };

        let mut close = false;
        egui::Window::new(skill.label)
            .id(egui::Id::new("skill_details"))
            .anchor(Align2::RIGHT_CENTER, Vec2::new(-16.0, 0.0))
            .default_width(320.0)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(skill.description);
                ui.add_space(8.0);

                ui.colored_label(MAGENTA, "TOOLS & TECHNOLOGIES");
                ui.horizontal_wrapped(|ui| {
                    for tool in skill.tools {
                        ui.label(egui::RichText::new(*tool).color(CYAN));
                    }
                });
                ui.add_space(8.0);

                ui.colored_label(MAGENTA, "RELATED PROJECTS");
                ui.horizontal_wrapped(|ui| {
                    for project in skill.projects {
                        ui.label(egui::RichText::new(*project).color(MAGENTA));
                    }
                });
                ui.add_space(8.0);

                close = ui.button("Close").clicked();
            });

        if close {
            self.clear_selection();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsChange {
    ParticleCount(u32),
    ParallaxStrength(f32),
}

pub struct SettingsPanel {
    pub visible: bool,
    particles: u32,
    parallax: f32,
    edited_particles: u32,
}

impl SettingsPanel {
    pub fn new(particles: u32, parallax: f32) -> Self {
        Self {
            visible: true,
            particles,
            parallax,
            edited_particles: particles,
        }
    }

    /// Draws the window and returns what the user changed this frame.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        framerate: f32,
        show_skills: &mut bool,
    ) -> Vec<SettingsChange> {
        let mut changes = Vec::new();
        if !self.visible {
            return changes;
        }

        egui::Window::new("Settings")
            .default_width(160.0)
            .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 12.0))
            .show(ctx, |ui| {
                ui.label(format!("FPS {:.1}", framerate));
                ui.checkbox(show_skills, "Skill tree");
                ui.separator();

                let previous = self.parallax;
                ui.add(egui::Slider::new(&mut self.parallax, 0.0..=0.1).text("Parallax"));
                if self.parallax != previous {
                    changes.push(SettingsChange::ParallaxStrength(self.parallax));
                }

                ui.add(
                    egui::DragValue::new(&mut self.edited_particles)
                        .clamp_range(1..=MAX_PARTICLES)
                        .suffix(" Particles"),
                );
                if ui.button("Apply").clicked() {
                    if let Some(change) = self.apply() {
                        changes.push(change);
                    }
                }
            });

        changes
    }

    fn apply(&mut self) -> Option<SettingsChange> {
        let count = self.edited_particles.min(MAX_PARTICLES);
        if count == 0 || count == self.particles {
            return None;
        }

        self.particles = count;
        self.edited_particles = count;
        Some(SettingsChange::ParticleCount(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_selection() {
        let mut overlay = SkillTreeOverlay::new(true);
        assert!(overlay.selected().is_none());

        overlay.toggle("ai");
        assert_eq!(overlay.selected().map(|s| s.node.id), Some("ai"));

        overlay.toggle("mobile");
        assert_eq!(overlay.selected().map(|s| s.node.id), Some("mobile"));

        overlay.toggle("mobile");
        assert!(overlay.selected().is_none());
    }

    #[test]
    fn test_highlight_follows_selection() {
        let mut overlay = SkillTreeOverlay::new(true);
        overlay.toggle("camera");
        assert!(overlay.is_highlighted("camera"));
        assert!(!overlay.is_highlighted("ai"));

        overlay.clear_selection();
        assert!(!overlay.is_highlighted("camera"));
    }

    #[test]
    fn test_viewbox_scale() {
        assert_eq!(viewbox_scale(Vec2::new(1920.0, 1080.0)), 1.0);
        assert!((viewbox_scale(Vec2::new(400.0, 300.0)) - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_apply_only_reports_real_changes() {
        let mut panel = SettingsPanel::new(200, 0.02);
        assert_eq!(panel.apply(), None);

        panel.edited_particles = 500;
        assert_eq!(panel.apply(), Some(SettingsChange::ParticleCount(500)));
        assert_eq!(panel.apply(), None);

        panel.edited_particles = 0;
        assert_eq!(panel.apply(), None);
    }

    #[test]
    fn test_apply_from_large_count() {
        let mut panel = SettingsPanel::new(MAX_PARTICLES, 0.02);
        panel.edited_particles = 200;
        assert_eq!(panel.apply(), Some(SettingsChange::ParticleCount(200)));

        panel.edited_particles = MAX_PARTICLES + 500;
        assert_eq!(panel.apply(), Some(SettingsChange::ParticleCount(MAX_PARTICLES)));
        assert_eq!(panel.apply(), None);
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient_color(0.0), faded(MAGENTA, 0.3));
        assert_eq!(gradient_color(1.0), faded(CYAN, 0.2));
        assert_eq!(gradient_color(-1.0), gradient_color(0.0));
    }

    #[test]
    fn test_center_hexagon_gradient_mesh() {
        let center = Pos2::new(300.0, 300.0);
        let outline = hexagon(center, &CENTER_HEXAGON, 1.0);
        let mesh = gradient_hexagon(center, &outline);

        assert!(mesh.is_valid());
        assert_eq!(mesh.vertices.len(), 7);
        assert_eq!(mesh.indices.len(), 18);

        // The center sits halfway along the diagonal.
        assert_eq!(mesh.vertices[0].color, gradient_color(0.5));
        // [-43, -25] is the left edge, a quarter of the way down.
        assert_eq!(mesh.vertices[6].color, gradient_color(0.125));
        // [43, 25] mirrors it.
        assert_eq!(mesh.vertices[3].color, gradient_color(0.875));
        assert_ne!(mesh.vertices[6].color, mesh.vertices[3].color);
    }

    #[test]
    fn test_hexagon_scaled_around_center() {
        let points = hexagon(Pos2::new(100.0, 100.0), &NODE_HEXAGON, 0.5);
        assert_eq!(points[0], Pos2::new(100.0, 80.0));
        assert_eq!(points[1], Pos2::new(117.5, 90.0));
    }
}
