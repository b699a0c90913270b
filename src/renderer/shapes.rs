//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Map a screen pixel (origin top-left, +y down) to normalized device coords
#[inline]
pub fn pixel_to_ndc(p: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(p.x / screen.x * 2.0 - 1.0, 1.0 - p.y / screen.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 50.0);
        for v in circle(center, 7.5, [1.0; 4], 12) {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 7.5 + 1e-4);
        }
    }

    #[test]
    fn test_circle_minimum_segments() {
        assert_eq!(circle(Vec2::ZERO, 1.0, [1.0; 4], 0).len(), 9);
    }

    #[test]
    fn test_pixel_to_ndc_corners() {
        let screen = Vec2::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, screen), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(screen, screen), Vec2::new(1.0, -1.0));
        assert_eq!(pixel_to_ndc(screen * 0.5, screen), Vec2::ZERO);
    }
}
