use crate::base::{Direction, Matrix, Point};
use crate::pathing::{BFS, FloodFill};

//////////////////////////////////////////////////////////////////////////////

// Returned when every move collides; there is no way to survive the tick.
pub const LAST_RESORT: Direction = Direction::Up;

pub struct SnakeAI {
    size: i32,
}

impl SnakeAI {
    pub fn new(size: i32) -> Self { Self { size } }

    // Shortest path to food by BFS, else the safe move that leaves the most
    // room, else LAST_RESORT.
    //
    // The tail counts as passable since it moves away next tick, even on the
    // tick where food is eaten and it stays put.
    pub fn find_best_move(&self, body: &[Point], food: Point) -> Direction {
        let Some(&head) = body.first() else { return LAST_RESORT; };
        let blocked = self.blocked(body);
        let check = |p: Point| self.is_free(&blocked, p);

        if let Some(dir) = BFS(head, |p| p == food, &check) { return dir; }

        let mut best = None;
        let mut best_space = 0;
        for dir in Direction::CARDINAL {
            let next = head + dir.delta();
            if !check(next) { continue; }
            let space = FloodFill(next, &check);
            if best.is_none() || space > best_space {
                best = Some(dir);
                best_space = space;
            }
        }
        best.unwrap_or(LAST_RESORT)
    }

    fn blocked(&self, body: &[Point]) -> Matrix<bool> {
        let mut result = Matrix::new(Point(self.size, self.size), false);
        let Some((_tail, rest)) = body.split_last() else { return result; };
        for &p in rest { result.set(p, true); }
        result
    }

    fn is_free(&self, blocked: &Matrix<bool>, p: Point) -> bool {
        blocked.contains(p) && !blocked.get(p)
    }
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::base::RNG;
    use crate::config::SnakeConfig;
    use crate::score::MemoryScores;
    use crate::snake::SnakeGame;

    fn body(points: &[(i32, i32)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point(x, y)).collect()
    }

    #[test]
    fn test_eats_food_straight_ahead() {
        let config = SnakeConfig::new(20).unwrap();
        let scores = Box::new(MemoryScores::default());
        let mut game = SnakeGame::new(config, scores, RNG::seed_from_u64(17));
        let ai = SnakeAI::new(game.size());
        game.place_food(Point(15, 10));

        for _ in 0..5 {
            let state = game.state();
            let dir = ai.find_best_move(&state.body, state.food);
            assert!(dir == Direction::Right);
            game.set_direction(dir);
            game.move_snake();
        }
        assert!(game.head() == Point(15, 10));
        assert!(game.score() == 1);
        assert!(game.body().len() == 4);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_path_is_shortest() {
        let ai = SnakeAI::new(10);
        let food = Point(7, 5);
        let mut head = Point(2, 2);
        let mut steps = 0;
        while head != food {
            let dir = ai.find_best_move(&[head], food);
            assert!(dir != Direction::None);
            head = head + dir.delta();
            steps += 1;
            assert!(steps <= 8);
        }
        assert!(steps == food.distance(Point(2, 2)));
    }

    #[test]
    fn test_tail_is_passable() {
        // The only free cell is reachable through the tail at (0, 1).
        let snake = body(&[
            (1, 1), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0), (0, 0), (0, 1),
        ]);
        let ai = SnakeAI::new(3);
        assert!(ai.find_best_move(&snake, Point(0, 2)) == Direction::Left);
    }

    #[test]
    fn test_fallback_prefers_more_room() {
        let ai = SnakeAI::new(5);

        // Food sits under the body, so no path exists. Right opens onto three
        // columns, Left onto one.
        let snake = body(&[(1, 4), (1, 3), (1, 2), (1, 1), (1, 0), (2, 0)]);
        assert!(ai.find_best_move(&snake, Point(1, 2)) == Direction::Right);

        let snake = body(&[(3, 4), (3, 3), (3, 2), (3, 1), (3, 0), (4, 0)]);
        assert!(ai.find_best_move(&snake, Point(3, 2)) == Direction::Left);
    }

    #[test]
    fn test_trapped_defaults_to_up() {
        let ai = SnakeAI::new(3);
        let snake = body(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 2)]);
        assert!(ai.find_best_move(&snake, Point(2, 2)) == LAST_RESORT);
        assert!(ai.find_best_move(&[], Point(2, 2)) == LAST_RESORT);
    }
}
