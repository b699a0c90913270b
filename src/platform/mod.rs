//! Platform layer
//!
//! Handles the native window side of the toy:
//! - Translating winit input into simulation `InputEvent`s
//! - Pacing ticks at a fixed rate

use std::time::{Duration, Instant};

use glam::Vec2;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{InputEvent, Key, PointerButton};

/// Map a mouse button to a simulation pointer button
pub fn map_mouse_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Map a physical key press to an input event
pub fn map_key(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Space => Some(InputEvent::KeyDown { key: Key::Launch }),
        KeyCode::KeyE => Some(InputEvent::KeyDown { key: Key::Clear }),
        KeyCode::Escape => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Build the event for a mouse button transition at `pointer`
pub fn mouse_event(state: ElementState, button: MouseButton, pointer: Vec2) -> Option<InputEvent> {
    let button = map_mouse_button(button)?;
    Some(match state {
        ElementState::Pressed => InputEvent::PointerDown {
            button,
            pos: pointer,
        },
        ElementState::Released => InputEvent::PointerUp { button },
    })
}

/// Fixed-rate tick scheduler
///
/// Tracks the deadline of the next tick. When the loop falls more than
/// `MAX_SUBSTEPS` ticks behind, the backlog is dropped and the schedule
/// restarts from now.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    /// First tick is due immediately
    pub fn new(rate_hz: u32, now: Instant) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1))),
            next: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next tick is due
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Number of ticks to run now (0..=MAX_SUBSTEPS)
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if now < self.next {
            return 0;
        }

        let mut ticks = 0;
        while now >= self.next && ticks < MAX_SUBSTEPS {
            self.next += self.period;
            ticks += 1;
        }

        if now >= self.next {
            log::debug!("Tick loop fell behind, resynchronizing");
            self.next = now + self.period;
        }
        ticks
    }
}
