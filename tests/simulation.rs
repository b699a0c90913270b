//! Drives the toy through its public API for many ticks at a time

use glam::Vec2;
use rainbow_drop::Settings;
use rainbow_drop::audio::{AudioManager, impact_volume};
use rainbow_drop::consts::*;
use rainbow_drop::renderer::build_scene;
use rainbow_drop::sim::{
    Control, InputEvent, Key, PointerButton, SimEvent, SimState, Surface, tick,
};

fn press(button: PointerButton, x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        button,
        pos: Vec2::new(x, y),
    }
}

fn release(button: PointerButton) -> InputEvent {
    InputEvent::PointerUp { button }
}

#[test]
fn spawned_balls_stay_on_screen() {
    let mut state = SimState::new(42);
    tick(&mut state, &[press(PointerButton::Secondary, 400.0, 100.0)]);
    for _ in 0..59 {
        tick(&mut state, &[]);
    }
    tick(&mut state, &[release(PointerButton::Secondary)]);
    assert_eq!(state.balls.len(), 60);

    for _ in 0..2_000 {
        tick(&mut state, &[]);
    }

    let slack = BALL_RADIUS + BOUNCE_JITTER * 2.0;
    for ball in &state.balls {
        assert!(ball.pos.x >= -slack && ball.pos.x <= SCREEN_WIDTH + slack);
        assert!(ball.pos.y >= -slack && ball.pos.y <= SCREEN_HEIGHT + slack);
        assert_eq!(ball.size_factor, MAX_SIZE_FACTOR);
    }
}

#[test]
fn falling_balls_make_floor_impacts() {
    let mut state = SimState::new(7);
    for i in 0..5 {
        state.spawn_ball(Vec2::new(100.0 + 120.0 * i as f32, 50.0));
    }

    let mut floor_hits = 0;
    for _ in 0..300 {
        tick(&mut state, &[]);
        for event in state.drain_events() {
            let SimEvent::Impact { surface, speed } = event;
            assert!(speed > 0.0);
            if surface == Surface::Floor {
                floor_hits += 1;
            }
        }
    }
    assert!(floor_hits >= 5);
}

#[test]
fn launch_sends_balls_upward_then_clear_empties_scene() {
    let mut state = SimState::new(3);
    for i in 0..8 {
        state.spawn_ball(Vec2::new(50.0 + 80.0 * i as f32, 500.0));
    }

    tick(&mut state, &[InputEvent::KeyDown { key: Key::Launch }]);
    for ball in &state.balls {
        assert!(ball.vel.y < 0.0);
    }
    assert_eq!(build_scene(&state).len(), 8);

    tick(&mut state, &[InputEvent::KeyDown { key: Key::Clear }]);
    assert!(build_scene(&state).is_empty());
}

#[test]
fn drag_and_drop() {
    let mut state = SimState::new(9);
    state.spawn_ball(Vec2::new(300.0, 300.0));
    state.balls[0].vel = Vec2::ZERO;
    let start = state.balls[0].pos;

    tick(&mut state, &[press(PointerButton::Primary, start.x, start.y)]);
    assert_eq!(state.held_count(), 1);

    for step in 1..=20 {
        let pos = start + Vec2::new(step as f32 * 10.0, -(step as f32) * 5.0);
        tick(&mut state, &[InputEvent::PointerMove { pos }]);
        assert_eq!(state.balls[0].pos, pos);
    }

    tick(&mut state, &[release(PointerButton::Primary)]);
    assert_eq!(state.held_count(), 0);
    let y = state.balls[0].pos.y;
    for _ in 0..10 {
        tick(&mut state, &[]);
    }
    assert!(state.balls[0].pos.y > y);
}

#[test]
fn quit_is_reported() {
    let mut state = SimState::new(1);
    assert_eq!(tick(&mut state, &[]), Control::Continue);
    assert_eq!(tick(&mut state, &[InputEvent::Quit]), Control::Quit);
}

#[test]
fn settings_feed_simulation_and_audio() {
    let settings = Settings::from_json(
        r#"{
            "window": { "width": 640, "height": 480 },
            "physics": { "gravity": 0.2, "clamp_to_bounds": false },
            "audio": { "master_volume": 0.5 }
        }"#,
    )
    .unwrap();

    let mut state = SimState::with_params(settings.bounds(), settings.physics, 5);
    assert_eq!(state.bounds, Vec2::new(640.0, 480.0));
    state.spawn_ball(Vec2::new(320.0, 240.0));
    let vy = state.balls[0].vel.y;
    tick(&mut state, &[]);
    assert!((state.balls[0].vel.y - (vy + 0.2)).abs() < 1e-6);

    let audio = AudioManager::disabled(&settings);
    let cue = audio.cue_for(5.0);
    assert!((cue.volume - impact_volume(5.0, 10.0) * 0.5).abs() < 1e-6);
}
