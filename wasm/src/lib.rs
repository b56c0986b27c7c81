use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use arcade_base::base::Direction;
use arcade_base::config::{DEFAULT_MAZE, SnakeConfig};
use arcade_base::score::MemoryScores;
use arcade_base::session::{Input, PacmanSession, Session, SnakeSession};

thread_local! {
    static PACMAN: RefCell<PacmanSession> =
        PacmanSession::new(DEFAULT_MAZE.clone(), None).into();
    static SNAKE: RefCell<SnakeSession> = SnakeSession::new(
        SnakeConfig::default(), Box::new(MemoryScores::default()), None).into();
}

// `ch` is a DOM keyCode: 37-40 are the arrow keys.
fn key_input(ch: i32) -> Option<Input> {
    match ch {
        37 => Some(Input::Steer(Direction::Left)),
        38 => Some(Input::Steer(Direction::Up)),
        39 => Some(Input::Steer(Direction::Right)),
        40 => Some(Input::Steer(Direction::Down)),
        _ => Input::from_char((ch as u8 as char).to_ascii_lowercase()),
    }
}

#[wasm_bindgen]
pub fn pacman_keydown(ch: i32) {
    let Some(input) = key_input(ch) else { return; };
    PACMAN.with_borrow_mut(|session| session.handle(input));
}

#[wasm_bindgen]
pub fn pacman_tick() -> String {
    PACMAN.with_borrow_mut(|session| {
        session.update();
        session.render()
    })
}

#[wasm_bindgen]
pub fn snake_keydown(ch: i32) {
    let Some(input) = key_input(ch) else { return; };
    SNAKE.with_borrow_mut(|session| session.handle(input));
}

#[wasm_bindgen]
pub fn snake_tick() -> String {
    SNAKE.with_borrow_mut(|session| {
        session.update();
        session.render()
    })
}
