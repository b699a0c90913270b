//! Rainbow Drop - a 2D bouncing-ball toy
//!
//! Core modules:
//! - `sim`: Ball physics, input mapping and the simulation state
//! - `renderer`: wgpu circle renderer
//! - `platform`: winit input translation and fixed-tick pacing
//! - `audio`: Impact sounds played off the simulation thread
//! - `settings`: JSON-configurable tuning

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AppError, AppResult};
pub use settings::{QualityPreset, Settings};

/// Simulation configuration constants
///
/// Everything is tuned in screen pixels at a fixed 120 Hz tick; velocities
/// are pixels per tick, gravity is pixels per tick².
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE_HZ: u32 = 120;
    /// Maximum ticks run back-to-back before the clock resynchronizes
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const WINDOW_TITLE: &str = "Physics Simulation";

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    pub const MIN_SIZE_FACTOR: f32 = 0.25;
    pub const MAX_SIZE_FACTOR: f32 = 2.5;
    /// Size factor gained per free tick
    pub const SIZE_GROWTH: f32 = 0.02;
    /// Spawned balls get a velocity in [-SPAWN_SPEED, SPAWN_SPEED] per axis
    pub const SPAWN_SPEED: f32 = 2.0;

    /// Downward acceleration
    pub const GRAVITY: f32 = 0.1;
    /// Velocity retained on a boundary bounce (1 = perfectly elastic)
    pub const BOUNCINESS: f32 = 0.8;
    /// Positional nudge applied on bounce, +/- pixels
    pub const BOUNCE_JITTER: f32 = 1.0;

    /// Launch impulse ranges
    pub const LAUNCH_VX: f32 = 5.0;
    pub const LAUNCH_VY_MIN: f32 = -20.0;
    pub const LAUNCH_VY_MAX: f32 = -15.0;

    /// Impact speed that maps to full volume
    pub const AUDIO_SPEED_SCALE: f32 = 10.0;
    /// Extra playback speed at full volume when pitch scaling is on
    pub const AUDIO_PITCH_RANGE: f32 = 0.25;
    /// Impact volume below which no cue is queued (resting balls)
    pub const AUDIO_MIN_VOLUME: f32 = 0.01;
    /// Cues buffered for the audio thread before new ones are dropped
    pub const AUDIO_QUEUE_DEPTH: usize = 32;
}
