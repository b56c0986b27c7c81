use std::collections::VecDeque;

use log::{debug, info, warn};
use rand::Rng;

use crate::base::{Direction, GameMode, Point, RNG};
use crate::config::SnakeConfig;
use crate::score::{HighScores, SNAKE_HIGH_SCORE_KEY};

//////////////////////////////////////////////////////////////////////////////

// Constants

pub const INITIAL_LENGTH: i32 = 3;
pub const MAX_FOOD_ATTEMPTS: usize = 1000;

// Food lands here when rejection sampling gives up. It may overlap the body.
pub const FALLBACK_FOOD: Point = Point(0, 0);

//////////////////////////////////////////////////////////////////////////////

// State

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnakeState {
    pub body: Vec<Point>,
    pub direction: Direction,
    pub next_direction: Direction,
    pub food: Point,
    pub score: i32,
    pub high_score: i32,
    pub game_over: bool,
    pub mode: GameMode,
    pub size: i32,
}

//////////////////////////////////////////////////////////////////////////////

// SnakeGame

pub struct SnakeGame<R: Rng = RNG> {
    body: VecDeque<Point>,
    direction: Direction,
    next_direction: Direction,
    food: Point,
    score: i32,
    high_score: i32,
    game_over: bool,
    mode: GameMode,
    size: i32,
    scores: Box<dyn HighScores>,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(config: SnakeConfig, scores: Box<dyn HighScores>, rng: R) -> Self {
        let high_score = scores.get(SNAKE_HIGH_SCORE_KEY).unwrap_or(0);
        let mut result = Self {
            body: VecDeque::with_capacity((config.size * config.size) as usize),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: FALLBACK_FOOD,
            score: 0,
            high_score,
            game_over: false,
            mode: GameMode::Paused,
            size: config.size,
            scores,
            rng,
        };
        result.reset();
        result
    }

    // The high score survives a reset.
    pub fn reset(&mut self) {
        let center = self.size / 2;
        self.body.clear();
        for i in 0..INITIAL_LENGTH { self.body.push_back(Point(center - i, center)); }
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.mode = GameMode::Paused;
        self.spawn_food();
        debug!("snake: reset, food at {}", self.food);
    }

    // Advances one tick. A queued 180-degree turn is dropped and the snake
    // keeps its current heading.
    pub fn move_snake(&mut self) {
        if self.game_over { return; }

        if !self.next_direction.is_opposite(self.direction) {
            self.direction = self.next_direction;
        }

        let head = self.head() + self.direction.delta();
        if self.collides(head) {
            self.game_over = true;
            self.update_high_score();
            info!("snake: game over at {} with score {}", head, self.score);
            return;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += 1;
            self.spawn_food();
        } else {
            self.body.pop_back();
        }
    }

    // Only the last direction set before a tick is considered.
    pub fn set_direction(&mut self, dir: Direction) {
        if dir == Direction::None { return; }
        self.next_direction = dir;
    }

    pub fn spawn_food(&mut self) {
        for _ in 0..MAX_FOOD_ATTEMPTS {
            let x = self.rng.gen_range(0..self.size);
            let y = self.rng.gen_range(0..self.size);
            let food = Point(x, y);
            if !self.body.contains(&food) {
                self.food = food;
                return;
            }
        }
        warn!("snake: no free cell found for food, using {}", FALLBACK_FOOD);
        self.food = FALLBACK_FOOD;
    }

    // Queries

    pub fn state(&self) -> SnakeState {
        SnakeState {
            body: self.body.iter().copied().collect(),
            direction: self.direction,
            next_direction: self.next_direction,
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            game_over: self.game_over,
            mode: self.mode,
            size: self.size,
        }
    }

    pub fn body(&self) -> &VecDeque<Point> { &self.body }

    pub fn direction(&self) -> Direction { self.direction }

    pub fn food(&self) -> Point { self.food }

    pub fn head(&self) -> Point {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn high_score(&self) -> i32 { self.high_score }

    pub fn is_game_over(&self) -> bool { self.game_over }

    pub fn mode(&self) -> GameMode { self.mode }

    pub fn score(&self) -> i32 { self.score }

    pub fn set_mode(&mut self, mode: GameMode) { self.mode = mode; }

    pub fn size(&self) -> i32 { self.size }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, food: Point) { self.food = food; }

    // Private helpers

    fn collides(&self, p: Point) -> bool {
        let Point(x, y) = p;
        if x < 0 || x >= self.size || y < 0 || y >= self.size { return true; }
        self.body.contains(&p)
    }

    fn update_high_score(&mut self) {
        if self.score <= self.high_score { return; }
        self.high_score = self.score;
        self.scores.set(SNAKE_HIGH_SCORE_KEY, self.score);
    }
}

impl<R: Rng> std::fmt::Display for SnakeGame<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            let line: String = (0..self.size).map(|x| {
                let p = Point(x, y);
                if self.head() == p { return '@'; }
                if self.body.contains(&p) { return 'o'; }
                if self.food == p { return '*'; }
                '.'
            }).collect();
            writeln!(f, "{}", line)?;
        }
        write!(f, "Score: {}  Best: {}", self.score, self.high_score)?;
        if self.game_over { write!(f, "  Game over")?; }
        Ok(())
    }
}

//////////////////////////////////////////////////////////////////////////////
