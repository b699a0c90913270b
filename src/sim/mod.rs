//! Ball simulation module
//!
//! All toy behavior lives here and stays free of window, GPU and audio
//! dependencies:
//! - Fixed timestep only (one call to `tick` per 1/120 s)
//! - Randomness drawn from the state's own seeded RNG
//! - Side effects reported as `SimEvent`s for the driver to act on

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{reflect_component, resolve_bounds};
pub use input::{Control, InputEvent, Key, PointerButton, apply_input, spawn_tick};
pub use state::{Ball, PhysicsParams, RAINBOW, Rgb, SimEvent, SimState, Surface, random_color};
pub use tick::{step_balls, tick};
