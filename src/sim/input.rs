//! Input events and their effect on the simulation
//!
//! Platform code translates window events into `InputEvent`s; the tick
//! applies them in arrival order before stepping physics.

use glam::Vec2;

use super::state::SimState;

/// Pointer buttons the toy reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Pick up / drop balls
    Primary,
    /// Hold to spawn balls
    Secondary,
}

/// Keyboard actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Throw every ball upward
    Launch,
    /// Remove every ball
    Clear,
}

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerUp { button: PointerButton },
    PointerMove { pos: Vec2 },
    KeyDown { key: Key },
}

/// What the loop driver should do after an event or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply one input event to the state
pub fn apply_input(state: &mut SimState, event: &InputEvent) -> Control {
    match *event {
        InputEvent::Quit => return Control::Quit,
        InputEvent::PointerDown { button, pos } => {
            state.pointer = pos;
            match button {
                PointerButton::Primary => pick_up(state, pos),
                PointerButton::Secondary => {
                    state.spawning = true;
                    log::debug!("Spawn mode on");
                }
            }
        }
        InputEvent::PointerUp { button } => match button {
            PointerButton::Primary => {
                for ball in &mut state.balls {
                    ball.held = false;
                }
            }
            PointerButton::Secondary => {
                state.spawning = false;
                log::debug!("Spawn mode off ({} balls)", state.balls.len());
            }
        },
        InputEvent::PointerMove { pos } => state.pointer = pos,
        InputEvent::KeyDown { key } => match key {
            Key::Launch => {
                let SimState {
                    balls, params, rng, ..
                } = state;
                for ball in balls.iter_mut() {
                    ball.launch(params, rng);
                }
                log::debug!("Launched {} balls", balls.len());
            }
            Key::Clear => {
                log::debug!("Cleared {} balls", state.balls.len());
                state.clear();
            }
        },
    }
    Control::Continue
}

/// Hold every ball whose center is within one radius of `pos`
fn pick_up(state: &mut SimState, pos: Vec2) {
    let r = state.params.ball_radius;
    for ball in &mut state.balls {
        if ball.pos.distance(pos) < r {
            ball.held = true;
        }
    }
}

/// Continuous spawn: one new ball per tick at the pointer while active
pub fn spawn_tick(state: &mut SimState) {
    if state.spawning {
        let pos = state.pointer;
        state.spawn_ball(pos);
    }
}
