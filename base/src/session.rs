use log::debug;
use rand::SeedableRng;

use crate::base::{Direction, GameMode, RNG};
use crate::config::{MazeConfig, SnakeConfig};
use crate::pacman::PacmanGame;
use crate::pacman_ai::PacmanAI;
use crate::score::HighScores;
use crate::snake::SnakeGame;
use crate::snake_ai::SnakeAI;

//////////////////////////////////////////////////////////////////////////////

// Input

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Input { Steer(Direction), ToggleAI, TogglePause, Reset }

impl Input {
    // Arrow keys are mapped by the drivers; this covers the letter keys.
    pub fn from_char(ch: char) -> Option<Input> {
        match ch {
            'w' => Some(Input::Steer(Direction::Up)),
            's' => Some(Input::Steer(Direction::Down)),
            'a' => Some(Input::Steer(Direction::Left)),
            'd' => Some(Input::Steer(Direction::Right)),
            't' => Some(Input::ToggleAI),
            'p' => Some(Input::TogglePause),
            'r' => Some(Input::Reset),
            _ => None,
        }
    }
}

// The surface shared by both games, so drivers can hold either one.
pub trait Session {
    fn add_input(&mut self, dir: Direction);
    fn mode(&self) -> GameMode;
    fn set_mode(&mut self, mode: GameMode);
    fn reset(&mut self);
    fn update(&mut self);
    fn render(&self) -> String;

    // Steering a paused game starts it in manual mode.
    fn handle(&mut self, input: Input) {
        let mode = self.mode();
        match input {
            Input::Steer(dir) => {
                if mode == GameMode::Paused { self.set_mode(GameMode::Manual); }
                self.add_input(dir);
            }
            Input::ToggleAI => {
                let next = if mode == GameMode::AI { GameMode::Manual } else { GameMode::AI };
                self.set_mode(next);
            }
            Input::TogglePause => {
                let next = if mode == GameMode::Paused { GameMode::Manual } else { GameMode::Paused };
                self.set_mode(next);
            }
            Input::Reset => self.reset(),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

fn rng(seed: Option<u64>) -> RNG {
    match seed {
        Some(x) => RNG::seed_from_u64(x),
        None => RNG::from_entropy(),
    }
}

//////////////////////////////////////////////////////////////////////////////

// Pacman

pub struct PacmanSession {
    game: PacmanGame,
    ai: PacmanAI,
    input: Direction,
}

impl PacmanSession {
    pub fn new(config: MazeConfig, seed: Option<u64>) -> Self {
        let game = PacmanGame::new(config);
        let ai = PacmanAI::new(game.export_walkability(), rng(seed));
        Self { game, ai, input: Direction::None }
    }

    pub fn game(&self) -> &PacmanGame { &self.game }
}

impl Session for PacmanSession {
    // The latest input sticks: pacman keeps heading that way every tick.
    fn add_input(&mut self, dir: Direction) {
        if dir == Direction::None { return; }
        self.input = dir;
    }

    fn mode(&self) -> GameMode { self.game.mode() }

    fn set_mode(&mut self, mode: GameMode) {
        debug!("pacman: mode {:?}", mode);
        self.game.set_mode(mode);
    }

    fn reset(&mut self) {
        self.game.reset();
        self.input = Direction::None;
    }

    fn render(&self) -> String { self.game.to_string() }

    fn update(&mut self) {
        if self.game.is_game_over() { return; }

        let dir = match self.game.mode() {
            GameMode::Paused => return,
            GameMode::Manual => self.input,
            GameMode::AI => {
                let threats: Vec<_> = self.game.ghosts().iter().map(|(_, x)| x.pos).collect();
                self.ai.find_evasion_move(self.game.pacman().pos, &threats)
            }
        };
        self.game.move_pacman(dir);
        if self.game.is_game_over() { return; }

        self.game.update_ghost_targets();
        for id in self.game.ghost_ids() {
            let Some(ghost) = self.game.ghost(id) else { continue; };
            let (pos, target) = (ghost.pos, ghost.target);
            let dir = self.ai.find_path(pos, target);
            self.game.move_ghost(id, dir);
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

// Snake

pub struct SnakeSession {
    game: SnakeGame,
    ai: SnakeAI,
    input: Direction,
}

impl SnakeSession {
    pub fn new(config: SnakeConfig, scores: Box<dyn HighScores>, seed: Option<u64>) -> Self {
        let game = SnakeGame::new(config, scores, rng(seed));
        let ai = SnakeAI::new(config.size);
        Self { game, ai, input: Direction::None }
    }

    pub fn game(&self) -> &SnakeGame { &self.game }
}

impl Session for SnakeSession {
    // Consumed by the next tick; the snake keeps its heading otherwise.
    fn add_input(&mut self, dir: Direction) {
        if dir == Direction::None { return; }
        self.input = dir;
    }

    fn mode(&self) -> GameMode { self.game.mode() }

    fn set_mode(&mut self, mode: GameMode) {
        debug!("snake: mode {:?}", mode);
        self.game.set_mode(mode);
    }

    fn reset(&mut self) {
        self.game.reset();
        self.input = Direction::None;
    }

    fn render(&self) -> String { self.game.to_string() }

    fn update(&mut self) {
        if self.game.is_game_over() { return; }

        let dir = match self.game.mode() {
            GameMode::Paused => return,
            GameMode::Manual => std::mem::take(&mut self.input),
            GameMode::AI => {
                let state = self.game.state();
                self.ai.find_best_move(&state.body, state.food)
            }
        };
        self.game.set_direction(dir);
        self.game.move_snake();
    }
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Point;
    use crate::config::parse_maze;
    use crate::score::MemoryScores;

    fn pacman(rows: &[&str]) -> PacmanSession {
        PacmanSession::new(parse_maze(rows).unwrap(), Some(17))
    }

    fn snake(size: i32) -> SnakeSession {
        let config = SnakeConfig::new(size).unwrap();
        SnakeSession::new(config, Box::new(MemoryScores::default()), Some(17))
    }

    fn ghost_positions(session: &PacmanSession) -> Vec<Point> {
        session.game().ghosts().iter().map(|(_, x)| x.pos).collect()
    }

    #[test]
    fn test_paused_is_noop() {
        let mut session = pacman(&["#######", "#P...1#", "#######"]);
        session.add_input(Direction::Right);
        let before = session.game().state();
        for _ in 0..4 { session.update(); }
        assert!(session.game().state() == before);

        let mut session = snake(10);
        let before = session.game().state();
        for _ in 0..4 { session.update(); }
        assert!(session.game().state() == before);
    }

    #[test]
    fn test_pacman_manual_tick() {
        let mut session = pacman(&["#######", "#P...1#", "#######"]);
        session.set_mode(GameMode::Manual);
        session.add_input(Direction::Right);

        session.update();
        assert!(session.game().pacman().pos == Point(2, 1));
        assert!(session.game().score() == 10);
        assert!(ghost_positions(&session) == vec![Point(4, 1)]);

        // The ghost steps onto pacman. Contact only counts on pacman's move.
        session.update();
        assert!(session.game().pacman().pos == Point(3, 1));
        assert!(ghost_positions(&session) == vec![Point(3, 1)]);

        session.update();
        assert!(session.game().pacman().pos == Point(4, 1));
        assert!(session.game().is_game_over());
        assert!(session.game().lives() == 3);
        assert!(session.game().score() == 30);

        // Terminal until reset.
        session.update();
        assert!(ghost_positions(&session) == vec![Point(3, 1)]);
        session.reset();
        assert!(!session.game().is_game_over());
        assert!(session.game().mode() == GameMode::Paused);
        assert!(session.game().pacman().pos == Point(1, 1));
    }

    #[test]
    fn test_pacman_ai_flees() {
        let mut session = pacman(&["#########", "#1 P....#", "#########"]);
        session.set_mode(GameMode::AI);
        session.update();
        assert!(session.game().pacman().pos == Point(4, 1));
        assert!(session.game().score() == 10);
        assert!(ghost_positions(&session) == vec![Point(2, 1)]);
    }

    #[test]
    fn test_snake_manual_tick() {
        let mut session = snake(10);
        session.game.place_food(Point(0, 0));
        session.set_mode(GameMode::Manual);

        session.update();
        assert!(session.game().head() == Point(6, 5));

        session.add_input(Direction::Down);
        session.update();
        assert!(session.game().head() == Point(6, 6));

        // Input is consumed; the snake keeps its heading.
        session.update();
        assert!(session.game().head() == Point(6, 7));
        assert!(session.game().direction() == Direction::Down);
    }

    #[test]
    fn test_snake_ai_eats() {
        let mut session = snake(10);
        session.set_mode(GameMode::AI);
        for _ in 0..100 {
            session.update();
            if session.game().score() > 0 { break; }
        }
        assert!(session.game().score() > 0);
        assert!(!session.game().is_game_over());
    }

    #[test]
    fn test_handle_input() {
        assert!(Input::from_char('a') == Some(Input::Steer(Direction::Left)));
        assert!(Input::from_char('x').is_none());

        let mut session: Box<dyn Session> = Box::new(snake(10));
        assert!(session.mode() == GameMode::Paused);
        session.handle(Input::Steer(Direction::Down));
        assert!(session.mode() == GameMode::Manual);
        session.handle(Input::ToggleAI);
        assert!(session.mode() == GameMode::AI);
        session.handle(Input::ToggleAI);
        assert!(session.mode() == GameMode::Manual);
        session.handle(Input::TogglePause);
        assert!(session.mode() == GameMode::Paused);
        session.handle(Input::TogglePause);
        assert!(session.mode() == GameMode::Manual);

        session.update();
        assert!(session.render().contains("@"));
        session.handle(Input::Reset);
        assert!(session.mode() == GameMode::Paused);
        assert!(session.render().ends_with("Score: 0  Best: 0"));
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut a = snake(10);
        let mut b = snake(10);
        assert!(a.game().food() == b.game().food());
        a.set_mode(GameMode::AI);
        b.set_mode(GameMode::AI);
        for _ in 0..64 {
            a.update();
            b.update();
            assert!(a.game().state() == b.game().state());
        }
    }
}
