//! Fixed timestep simulation tick
//!
//! One call = one 1/120 s step: inputs, continuous spawn, then physics.

use super::collision::resolve_bounds;
use super::input::{Control, InputEvent, apply_input, spawn_tick};
use super::state::{SimEvent, SimState};

/// Advance the simulation by one tick
///
/// `inputs` are the events queued since the previous tick, applied in order.
/// A `Quit` event stops processing and is reported back without stepping.
pub fn tick(state: &mut SimState, inputs: &[InputEvent]) -> Control {
    for event in inputs {
        if apply_input(state, event) == Control::Quit {
            return Control::Quit;
        }
    }

    spawn_tick(state);
    step_balls(state);
    state.time_ticks += 1;

    Control::Continue
}

/// Physics for every ball: gravity, Euler step, bounds, growth
///
/// Held balls just follow the pointer; their velocity and size are frozen.
pub fn step_balls(state: &mut SimState) {
    let SimState {
        balls,
        pointer,
        bounds,
        params,
        events,
        rng,
        ..
    } = state;

    for ball in balls.iter_mut() {
        if ball.held {
            ball.pos = *pointer;
            continue;
        }

        ball.vel.y += params.gravity;
        ball.prev_y = Some(ball.pos.y);
        ball.pos += ball.vel;

        if let Some((surface, speed)) = resolve_bounds(ball, *bounds, params, rng) {
            events.push(SimEvent::Impact { surface, speed });
        }

        ball.grow(params);
    }
}
