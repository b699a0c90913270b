//! Screen-boundary collision response
//!
//! Balls only collide with the four screen edges. A hit reverses the
//! velocity component normal to the edge, scaled by bounciness, nudges the
//! ball a little along the other axis and repaints it.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, PhysicsParams, Surface, random_color};

/// Reverse a velocity component with energy loss
#[inline]
pub fn reflect_component(v: f32, bounciness: f32) -> f32 {
    v * -bounciness
}

/// Resolve `ball` against the rectangle `[0, bounds]`
///
/// Walls are checked first, then the ceiling, then the floor, so a ball in a
/// corner bounces on both axes in the same tick. Returns the ceiling or floor
/// impact worth a sound, with |vy| after the bounce.
pub fn resolve_bounds<R: Rng + ?Sized>(
    ball: &mut Ball,
    bounds: Vec2,
    params: &PhysicsParams,
    rng: &mut R,
) -> Option<(Surface, f32)> {
    let r = params.ball_radius;
    let jitter = params.bounce_jitter;
    let mut impact = None;

    if ball.pos.x <= r || ball.pos.x >= bounds.x - r {
        ball.vel.x = reflect_component(ball.vel.x, params.bounciness);
        if params.clamp_to_bounds {
            ball.pos.x = ball.pos.x.max(r).min(bounds.x - r);
        }
        ball.pos.y += nudge(rng, jitter);
        ball.color = random_color(rng);
    }

    if ball.pos.y <= r {
        ball.vel.y = reflect_component(ball.vel.y, params.bounciness);
        if params.clamp_to_bounds {
            ball.pos.y = r;
        }
        ball.pos.x += nudge(rng, jitter);
        ball.color = random_color(rng);
        // Moving down after the flip means it was rising into the ceiling
        if ball.prev_y.is_some() && ball.vel.y > 0.0 {
            impact = Some((Surface::Ceiling, ball.vel.y.abs()));
        }
    }

    if ball.pos.y >= bounds.y - r {
        ball.vel.y = reflect_component(ball.vel.y, params.bounciness);
        if params.clamp_to_bounds {
            ball.pos.y = bounds.y - r;
        }
        ball.pos.x += nudge(rng, jitter);
        ball.color = random_color(rng);
        if ball.prev_y.is_some() && ball.vel.y < 0.0 {
            impact = Some((Surface::Floor, ball.vel.y.abs()));
        }
    }

    impact
}

fn nudge<R: Rng + ?Sized>(rng: &mut R, jitter: f32) -> f32 {
    if jitter > 0.0 {
        rng.random_range(-jitter..=jitter)
    } else {
        0.0
    }
}
