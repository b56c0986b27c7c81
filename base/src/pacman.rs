use log::{debug, info};

use crate::base::{Direction, GameMode, Matrix, Point};
use crate::config::{Cell, MazeConfig};
use crate::entity::{Entity, Ghost, GhostId, GhostMap};

//////////////////////////////////////////////////////////////////////////////

// Constants

pub const STARTING_LIVES: i32 = 3;
pub const PELLET_SCORE: i32 = 10;
pub const POWER_PELLET_SCORE: i32 = 50;

//////////////////////////////////////////////////////////////////////////////

// State

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PacmanState {
    pub pacman: Entity,
    pub ghosts: Vec<Ghost>,
    pub score: i32,
    pub pellets_eaten: i32,
    pub total_pellets: i32,
    pub lives: i32,
    pub game_over: bool,
    pub mode: GameMode,
}

//////////////////////////////////////////////////////////////////////////////

// PacmanGame

pub struct PacmanGame {
    config: MazeConfig,
    pacman: Entity,
    ghosts: GhostMap,
    maze: Matrix<Cell>,
    score: i32,
    pellets_eaten: i32,
    total_pellets: i32,
    lives: i32,
    game_over: bool,
    mode: GameMode,
}

impl PacmanGame {
    pub fn new(config: MazeConfig) -> Self {
        let mut ghosts = GhostMap::default();
        for start in &config.ghost_starts {
            ghosts.add(Ghost::new(start, config.pacman_start));
        }
        let mut result = Self {
            pacman: Entity::new(config.pacman_start),
            ghosts,
            maze: config.layout.clone(),
            score: 0,
            pellets_eaten: 0,
            total_pellets: config.total_pellets,
            lives: STARTING_LIVES,
            game_over: false,
            mode: GameMode::Paused,
            config,
        };
        result.reset();
        result
    }

    pub fn reset(&mut self) {
        let start = self.config.pacman_start;
        self.pacman = Entity::new(start);
        for (_, ghost) in &mut self.ghosts {
            ghost.respawn();
            ghost.target = start;
        }
        self.maze.clone_from(&self.config.layout);
        self.total_pellets = self.maze.data.iter().filter(|x| x.is_pellet()).count() as i32;
        self.score = 0;
        self.pellets_eaten = 0;
        self.lives = STARTING_LIVES;
        self.game_over = false;
        self.mode = GameMode::Paused;
        debug!("pacman: reset with {} pellets", self.total_pellets);
    }

    // Movement

    pub fn move_pacman(&mut self, dir: Direction) {
        if dir == Direction::None { return; }

        let next = self.next_position(self.pacman.pos, dir);
        if !self.is_walkable(next) { return; }

        self.pacman.pos = next;
        self.pacman.dir = dir;

        self.eat_pellet();
        self.check_ghost_collision();
    }

    // Ghosts never trigger a collision here: contact is only detected on the
    // next move_pacman call.
    pub fn move_ghost(&mut self, id: GhostId, dir: Direction) {
        if dir == Direction::None { return; }
        let Some(pos) = self.ghosts.get(id).map(|x| x.pos) else { return; };

        let next = self.next_position(pos, dir);
        if !self.is_walkable(next) { return; }

        let ghost = &mut self.ghosts[id];
        ghost.pos = next;
        ghost.dir = dir;
    }

    pub fn update_ghost_targets(&mut self) {
        let target = self.pacman.pos;
        for (_, ghost) in &mut self.ghosts { ghost.target = target; }
    }

    // Queries

    pub fn state(&self) -> PacmanState {
        PacmanState {
            pacman: self.pacman,
            ghosts: self.ghosts.iter().map(|(_, x)| *x).collect(),
            score: self.score,
            pellets_eaten: self.pellets_eaten,
            total_pellets: self.total_pellets,
            lives: self.lives,
            game_over: self.game_over,
            mode: self.mode,
        }
    }

    // true marks a walkable cell; everything off the grid is a wall.
    pub fn export_walkability(&self) -> Matrix<bool> {
        self.maze.map(|x| !x.is_wall())
    }

    pub fn cell(&self, p: Point) -> Cell { self.maze.get(p) }

    pub fn config(&self) -> &MazeConfig { &self.config }

    pub fn ghost(&self, id: GhostId) -> Option<&Ghost> { self.ghosts.get(id) }

    pub fn ghost_ids(&self) -> Vec<GhostId> { self.ghosts.ids() }

    pub fn ghosts(&self) -> &GhostMap { &self.ghosts }

    pub fn is_game_over(&self) -> bool { self.game_over }

    pub fn lives(&self) -> i32 { self.lives }

    pub fn mode(&self) -> GameMode { self.mode }

    pub fn pacman(&self) -> &Entity { &self.pacman }

    pub fn remaining_pellets(&self) -> i32 {
        self.maze.data.iter().filter(|x| x.is_pellet()).count() as i32
    }

    pub fn score(&self) -> i32 { self.score }

    pub fn set_mode(&mut self, mode: GameMode) { self.mode = mode; }

    // Private helpers

    fn eat_pellet(&mut self) {
        let pos = self.pacman.pos;
        let points = match self.maze.get(pos) {
            Cell::Pellet => PELLET_SCORE,
            Cell::PowerPellet => POWER_PELLET_SCORE,
            _ => 0,
        };
        if points > 0 {
            self.score += points;
            self.pellets_eaten += 1;
            self.maze.set(pos, Cell::Empty);
        }

        if self.pellets_eaten == self.total_pellets {
            debug!("pacman: cleared the maze with score {}", self.score);
            self.game_over = true;
        }
    }

    fn check_ghost_collision(&mut self) {
        let pos = self.pacman.pos;
        if !self.ghosts.iter().any(|(_, x)| x.pos == pos) { return; }

        self.lives -= 1;
        if self.lives <= 0 {
            info!("pacman: game over with score {}", self.score);
            self.game_over = true;
        } else {
            debug!("pacman: caught at {}, {} lives left", pos, self.lives);
            self.respawn();
        }
    }

    fn respawn(&mut self) {
        self.pacman = Entity::new(self.config.pacman_start);
        for (_, ghost) in &mut self.ghosts { ghost.respawn(); }
    }

    // x wraps through the side tunnels; y is bounded by the maze default,
    // which reads as a wall.
    fn next_position(&self, pos: Point, dir: Direction) -> Point {
        let width = self.maze.size.0;
        let Point(x, y) = pos + dir.delta();
        let x = if x < 0 { width - 1 } else if x >= width { 0 } else { x };
        Point(x, y)
    }

    fn is_walkable(&self, pos: Point) -> bool {
        self.maze.contains(pos) && !self.maze.get(pos).is_wall()
    }
}

impl std::fmt::Display for PacmanGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Point(sx, sy) = self.maze.size;
        for y in 0..sy {
            let line: String = (0..sx).map(|x| {
                let p = Point(x, y);
                if self.pacman.pos == p { return 'C'; }
                let ghost = self.ghosts.iter().find(|(_, g)| g.pos == p);
                if ghost.is_some() { return 'M'; }
                self.maze.get(p).show()
            }).collect();
            writeln!(f, "{}", line)?;
        }
        write!(f, "Score: {}  Lives: {}", self.score, self.lives)?;
        if !self.game_over { return Ok(()); }
        if self.lives > 0 { write!(f, "  Cleared!") } else { write!(f, "  Game over") }
    }
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use crate::base::RNG;
    use crate::config::{DEFAULT_MAZE, parse_maze};

    // A 10x10 maze with only a border wall and a single pellet at (5, 5).
    fn open_maze(pellet: Point, ghost: Option<Point>) -> MazeConfig {
        let mut rows = vec![];
        for y in 0..10 {
            let row: String = (0..10).map(|x| {
                let p = Point(x, y);
                if x == 0 || y == 0 || x == 9 || y == 9 { return '#'; }
                if p == Point(1, 1) { return 'P'; }
                if Some(p) == ghost { return '1'; }
                if p == pellet { return '.'; }
                ' '
            }).collect();
            rows.push(row);
        }
        parse_maze(&rows[..]).unwrap()
    }

    fn check_pellets(game: &PacmanGame) {
        let state = game.state();
        assert!(state.pellets_eaten + game.remaining_pellets() == state.total_pellets);
    }

    #[test]
    fn test_single_pellet_win() {
        let mut game = PacmanGame::new(open_maze(Point(5, 5), None));
        assert!(game.state().total_pellets == 1);

        for dir in [Direction::Right, Direction::Down] {
            for _ in 0..4 {
                assert!(!game.is_game_over());
                game.move_pacman(dir);
                check_pellets(&game);
            }
        }
        assert!(game.pacman().pos == Point(5, 5));
        assert!(game.is_game_over());
        assert!(game.score() == PELLET_SCORE);
        assert!(game.cell(Point(5, 5)) == Cell::Empty);
    }

    #[test]
    fn test_walls_and_none_are_noops() {
        let mut game = PacmanGame::new(open_maze(Point(5, 5), None));
        let before = game.state();
        game.move_pacman(Direction::Up);
        game.move_pacman(Direction::Left);
        game.move_pacman(Direction::None);
        assert!(game.state() == before);
    }

    #[test]
    fn test_power_pellet_score() {
        let config = parse_maze(&["#####", "#Po.#", "#####"]).unwrap();
        let mut game = PacmanGame::new(config);
        game.move_pacman(Direction::Right);
        assert!(game.score() == POWER_PELLET_SCORE);
        assert!(!game.is_game_over());
        game.move_pacman(Direction::Right);
        assert!(game.score() == POWER_PELLET_SCORE + PELLET_SCORE);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_tunnel_wrap() {
        let config = parse_maze(&["#####", "P . .", "#####"]).unwrap();
        let mut game = PacmanGame::new(config);
        game.move_pacman(Direction::Left);
        assert!(game.pacman().pos == Point(4, 1));
        assert!(game.score() == PELLET_SCORE);
        game.move_pacman(Direction::Right);
        assert!(game.pacman().pos == Point(0, 1));
        assert!(game.pacman().dir == Direction::Right);
    }

    #[test]
    fn test_no_vertical_wrap() {
        let config = parse_maze(&["# #", "#P#", "#.#", "# #"]).unwrap();
        let mut game = PacmanGame::new(config);
        game.move_pacman(Direction::Up);
        assert!(game.pacman().pos == Point(1, 0));
        game.move_pacman(Direction::Up);
        assert!(game.pacman().pos == Point(1, 0));
    }

    #[test]
    fn test_collision_respawns() {
        let mut game = PacmanGame::new(open_maze(Point(5, 5), Some(Point(4, 1))));
        let id = game.ghost_ids()[0];
        game.move_pacman(Direction::Down);
        game.move_pacman(Direction::Right);
        game.move_ghost(id, Direction::Left);
        game.move_ghost(id, Direction::Left);
        assert!(game.ghost(id).unwrap().pos == Point(2, 1));

        // The ghost sits on pacman's next cell.
        let score = game.score();
        game.move_pacman(Direction::Up);
        assert!(game.lives() == STARTING_LIVES - 1);
        assert!(!game.is_game_over());
        assert!(game.pacman().pos == Point(1, 1));
        assert!(game.pacman().dir == Direction::None);
        assert!(game.ghost(id).unwrap().pos == Point(4, 1));
        assert!(game.score() == score);
        assert!(game.state().pellets_eaten == 0);
        assert!(game.state().total_pellets == 1);
    }

    #[test]
    fn test_ghost_move_does_not_collide() {
        let mut game = PacmanGame::new(open_maze(Point(5, 5), Some(Point(3, 1))));
        let id = game.ghost_ids()[0];
        game.move_pacman(Direction::Right);
        game.move_ghost(id, Direction::Left);
        assert!(game.ghost(id).unwrap().pos == game.pacman().pos);
        assert!(game.lives() == STARTING_LIVES);

        // Contact is only checked when pacman itself moves onto a ghost.
        game.move_pacman(Direction::Left);
        assert!(game.lives() == STARTING_LIVES);
        game.move_ghost(id, Direction::Left);
        game.move_pacman(Direction::None);
        assert!(game.lives() == STARTING_LIVES);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut game = PacmanGame::new(open_maze(Point(5, 5), Some(Point(2, 1))));
        for _ in 0..STARTING_LIVES {
            assert!(!game.is_game_over());
            game.move_pacman(Direction::Right);
        }
        assert!(game.lives() == 0);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_ghost_targets_and_scatter() {
        let mut game = PacmanGame::new(DEFAULT_MAZE.clone());
        game.move_pacman(Direction::Left);
        game.update_ghost_targets();
        let pos = game.pacman().pos;
        for (_, ghost) in game.ghosts() {
            assert!(ghost.target == pos);
        }
        let scatter: Vec<_> = game.state().ghosts.iter().map(|x| x.scatter).collect();
        assert!(scatter[0] == Point(18, 0));
    }

    #[test]
    fn test_walkability() {
        let game = PacmanGame::new(DEFAULT_MAZE.clone());
        let walkable = game.export_walkability();
        assert!(walkable.size == DEFAULT_MAZE.size());
        for p in walkable.points() {
            assert!(walkable.get(p) == !game.cell(p).is_wall());
        }
        assert!(!walkable.get(Point(-1, 9)));
    }

    #[test]
    fn test_random_walk_invariants() {
        let mut rng = RNG::seed_from_u64(17);
        let mut game = PacmanGame::new(DEFAULT_MAZE.clone());
        let size = game.config().size();
        let ids = game.ghost_ids();
        for _ in 0..2048 {
            if game.is_game_over() { game.reset(); }
            let dir = Direction::CARDINAL[rng.gen_range(0..4)];
            game.move_pacman(dir);
            for &id in &ids {
                game.move_ghost(id, Direction::CARDINAL[rng.gen_range(0..4)]);
            }
            let state = game.state();
            let entities = std::iter::once(state.pacman)
                .chain(state.ghosts.iter().map(|x| x.entity));
            for entity in entities {
                let Point(x, y) = entity.pos;
                assert!(0 <= x && x < size.0);
                assert!(0 <= y && y < size.1);
                assert!(!game.cell(entity.pos).is_wall());
            }
            check_pellets(&game);
        }
    }

    #[test]
    fn test_reset() {
        let mut game = PacmanGame::new(DEFAULT_MAZE.clone());
        let fresh = game.state();
        let ids = game.ghost_ids();
        game.move_pacman(Direction::Left);
        game.move_ghost(ids[1], Direction::Left);
        game.set_mode(GameMode::AI);
        assert!(game.state() != fresh);
        game.reset();
        assert!(game.state() == fresh);
        assert!(game.ghost_ids() == ids);
        assert!(game.remaining_pellets() == fresh.total_pellets);
    }

    #[test]
    fn test_display() {
        let config = parse_maze(&["#####", "#P1o#", "#####"]).unwrap();
        let game = PacmanGame::new(config);
        let text = game.to_string();
        assert!(text.starts_with("#####\n#CMo#\n#####\n"));
        assert!(text.ends_with("Score: 0  Lives: 3"));
    }

    #[test]
    fn test_display_end_states() {
        let config = parse_maze(&["#####", "#P.1#", "#####"]).unwrap();
        let mut game = PacmanGame::new(config);
        game.move_pacman(Direction::Right);
        assert!(game.to_string().ends_with("Score: 10  Lives: 3  Cleared!"));

        let mut game = PacmanGame::new(open_maze(Point(5, 5), Some(Point(2, 1))));
        for _ in 0..STARTING_LIVES { game.move_pacman(Direction::Right); }
        assert!(game.to_string().ends_with("Score: 0  Lives: 0  Game over"));
    }
}
