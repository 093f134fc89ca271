//! Shape generation for 2D primitives
//!
//! Everything on screen is triangles: quads for the road and cars, fans for
//! the particle circles. Coordinates are game units (1040x500, y down); the
//! pipeline maps them to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Append a filled axis-aligned quad
pub fn push_rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let (x2, y2) = (x + w, y + h);
    out.push(Vertex::new(x, y, color));
    out.push(Vertex::new(x2, y, color));
    out.push(Vertex::new(x, y2, color));

    out.push(Vertex::new(x2, y, color));
    out.push(Vertex::new(x2, y2, color));
    out.push(Vertex::new(x, y2, color));
}

/// Append a quad whose top and bottom edges carry different colors
/// (vertical gradient via interpolation)
pub fn push_gradient_rect(
    out: &mut Vec<Vertex>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    let (x2, y2) = (x + w, y + h);
    out.push(Vertex::new(x, y, top));
    out.push(Vertex::new(x2, y, top));
    out.push(Vertex::new(x, y2, bottom));

    out.push(Vertex::new(x2, y, top));
    out.push(Vertex::new(x2, y2, bottom));
    out.push(Vertex::new(x, y2, bottom));
}

/// Append a horizontal line as a thin quad, centered on `y`
pub fn push_hline(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, thickness: f32, color: [f32; 4]) {
    push_rect(out, x, y - thickness / 2.0, w, thickness, color);
}

/// Append a filled circle as a triangle fan
pub fn push_circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Append a car body: white outline, colored body, two white windows
pub fn push_car(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, body: [f32; 4]) {
    use super::vertex::colors::WHITE;

    // Outline as a slightly larger quad behind the body
    push_rect(out, x - 2.0, y - 2.0, w + 4.0, h + 4.0, WHITE);
    push_rect(out, x, y, w, h, body);
    // Windshield and rear window
    push_rect(out, x + 10.0, y + 5.0, 15.0, h - 10.0, WHITE);
    push_rect(out, x + w - 25.0, y + 5.0, 15.0, h - 10.0, WHITE);
}
