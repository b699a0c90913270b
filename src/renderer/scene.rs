//! Frame description built from simulation state

use glam::Vec2;

use super::shapes::{circle, pixel_to_ndc};
use super::vertex::{Vertex, rgba};
use crate::sim::{Rgb, SimState};

/// One filled circle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDraw {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

/// Everything to draw this frame, back to front
///
/// Balls are emitted in insertion order, so newer balls paint over older ones.
pub fn build_scene(state: &SimState) -> Vec<CircleDraw> {
    let base = state.params.ball_radius;
    state
        .balls
        .iter()
        .map(|ball| CircleDraw {
            center: ball.pos,
            radius: ball.draw_radius(base),
            color: ball.color,
        })
        .collect()
}

/// Triangulate a scene into NDC vertices
pub fn tessellate(draws: &[CircleDraw], screen: Vec2, segments: u32, linear: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(draws.len() * segments as usize * 3);
    for draw in draws {
        let color = rgba(draw.color, linear);
        vertices.extend(
            circle(draw.center, draw.radius, color, segments)
                .into_iter()
                .map(|v| {
                    let p = pixel_to_ndc(Vec2::from(v.position), screen);
                    Vertex::new(p.x, p.y, v.color)
                }),
        );
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_draws_nothing() {
        let state = SimState::new(1);
        assert!(build_scene(&state).is_empty());
        assert!(tessellate(&[], state.bounds, 16, true).is_empty());
    }

    #[test]
    fn test_scene_follows_balls() {
        let mut state = SimState::new(2);
        state.spawn_ball(Vec2::new(10.0, 20.0));
        state.spawn_ball(Vec2::new(30.0, 40.0));
        state.balls[1].size_factor = 2.0;

        let draws = build_scene(&state);
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].center, Vec2::new(10.0, 20.0));
        assert_eq!(draws[0].radius, 5.0);
        assert_eq!(draws[1].radius, 10.0);
        assert_eq!(draws[1].color, state.balls[1].color);
    }

    #[test]
    fn test_tessellate_maps_to_ndc() {
        let draws = [CircleDraw {
            center: Vec2::new(400.0, 300.0),
            radius: 5.0,
            color: Rgb(255, 0, 0),
        }];
        let verts = tessellate(&draws, Vec2::new(800.0, 600.0), 8, false);
        assert_eq!(verts.len(), 24);
        assert_eq!(verts[0].position, [0.0, 0.0]);
        assert_eq!(verts[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert!(verts.iter().all(|v| v.position[0].abs() < 0.02));
    }
}
