//! Simulation state and entity types
//!
//! Everything the tick, input and render code touch lives on `SimState`;
//! there is no module-level mutable state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

const SIZE_EPSILON: f32 = 1e-4;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Ball palette: red, orange, yellow, green, blue, indigo, violet
pub const RAINBOW: [Rgb; 7] = [
    Rgb(255, 0, 0),
    Rgb(255, 165, 0),
    Rgb(255, 255, 0),
    Rgb(0, 128, 0),
    Rgb(0, 0, 255),
    Rgb(75, 0, 130),
    Rgb(238, 130, 238),
];

/// Pick a random palette entry
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    RAINBOW[rng.random_range(0..RAINBOW.len())]
}

/// Tunable physics parameters (defaults match `consts`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub bounciness: f32,
    /// Collision and pick-up radius; drawing scales it by `size_factor`
    pub ball_radius: f32,
    pub min_size_factor: f32,
    pub max_size_factor: f32,
    pub size_growth: f32,
    pub spawn_speed: f32,
    pub bounce_jitter: f32,
    pub launch_vx: f32,
    pub launch_vy_min: f32,
    pub launch_vy_max: f32,
    /// Snap a bouncing ball back onto the boundary it crossed
    pub clamp_to_bounds: bool,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounciness: BOUNCINESS,
            ball_radius: BALL_RADIUS,
            min_size_factor: MIN_SIZE_FACTOR,
            max_size_factor: MAX_SIZE_FACTOR,
            size_growth: SIZE_GROWTH,
            spawn_speed: SPAWN_SPEED,
            bounce_jitter: BOUNCE_JITTER,
            launch_vx: LAUNCH_VX,
            launch_vy_min: LAUNCH_VY_MIN,
            launch_vy_max: LAUNCH_VY_MAX,
            clamp_to_bounds: true,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Screen position (origin top-left, +y down)
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub color: Rgb,
    /// Visual scale, grows toward `max_size_factor` and never shrinks
    pub size_factor: f32,
    /// Bound to the pointer; integration is suspended while set
    pub held: bool,
    /// Vertical position before the last integration step
    pub prev_y: Option<f32>,
}

impl Ball {
    /// A fresh ball at `pos` with a small random velocity and color
    pub fn spawn<R: Rng + ?Sized>(pos: Vec2, params: &PhysicsParams, rng: &mut R) -> Self {
        let s = params.spawn_speed;
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s)),
            color: random_color(rng),
            size_factor: 1.0,
            held: false,
            prev_y: None,
        }
    }

    /// Radius to draw with
    pub fn draw_radius(&self, base_radius: f32) -> f32 {
        base_radius * self.size_factor
    }

    /// Replace velocity with a strong upward kick
    pub fn launch<R: Rng + ?Sized>(&mut self, params: &PhysicsParams, rng: &mut R) {
        self.vel = Vec2::new(
            rng.random_range(-params.launch_vx..=params.launch_vx),
            rng.random_range(params.launch_vy_min..=params.launch_vy_max),
        );
    }

    /// Grow one step, saturating at the cap
    pub fn grow(&mut self, params: &PhysicsParams) {
        let next = self.size_factor + params.size_growth;
        // Snap within f32 drift so the cap lands on the expected tick
        self.size_factor = if next >= params.max_size_factor - SIZE_EPSILON {
            params.max_size_factor
        } else {
            next.max(params.min_size_factor)
        };
    }
}

/// Boundary that produced an audible impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ceiling,
    Floor,
}

/// Side effects produced by a tick, drained by the loop driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A ball struck the ceiling or floor; `speed` is |vy| after the bounce
    Impact { surface: Surface, speed: f32 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Live balls in insertion order (draw order)
    pub balls: Vec<Ball>,
    /// Continuous spawn mode (secondary button held)
    pub spawning: bool,
    /// Latest pointer position in screen pixels
    pub pointer: Vec2,
    /// Screen size in pixels
    pub bounds: Vec2,
    pub params: PhysicsParams,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<SimEvent>,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Default 800x600 world with default physics
    pub fn new(seed: u64) -> Self {
        Self::with_params(
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            PhysicsParams::default(),
            seed,
        )
    }

    pub fn with_params(bounds: Vec2, params: PhysicsParams, seed: u64) -> Self {
        Self {
            balls: Vec::new(),
            spawning: false,
            pointer: Vec2::ZERO,
            bounds,
            params,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Append a ball at `pos`
    pub fn spawn_ball(&mut self, pos: Vec2) {
        let ball = Ball::spawn(pos, &self.params, &mut self.rng);
        self.balls.push(ball);
    }

    /// Remove every ball
    pub fn clear(&mut self) {
        self.balls.clear();
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of balls currently bound to the pointer
    pub fn held_count(&self) -> usize {
        self.balls.iter().filter(|b| b.held).count()
    }
}
