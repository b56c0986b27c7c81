use rand::Rng;

use crate::base::{Direction, Matrix, Point, RNG, sample};
use crate::pathing::AStar;

//////////////////////////////////////////////////////////////////////////////

// Pacman only starts fleeing once the nearest ghost is this close.
pub const FLEE_RADIUS: i32 = 5;

// Ghost chase AI and pacman evasion AI over a fixed walkability grid. The
// search does not use the tunnel wrap; paths through a tunnel are not found.
pub struct PacmanAI<R: Rng = RNG> {
    walkable: Matrix<bool>,
    rng: R,
}

impl<R: Rng> PacmanAI<R> {
    pub fn new(walkable: Matrix<bool>, rng: R) -> Self {
        Self { walkable, rng }
    }

    // Replans from scratch on every call and returns only the first step.
    pub fn find_path(&mut self, start: Point, goal: Point) -> Direction {
        let Some(path) = AStar(start, goal, |p| self.is_walkable(p)) else {
            return self.random_direction(start);
        };
        match path.first() {
            Some(&next) => Direction::between(start, next),
            None => Direction::None,
        }
    }

    // Greedy single-step evasion from the nearest threat. When no threat is
    // within FLEE_RADIUS, wanders randomly instead.
    pub fn find_evasion_move(&mut self, pos: Point, threats: &[Point]) -> Direction {
        let nearest = threats.iter().copied().min_by_key(|x| pos.distance(*x));
        let Some(nearest) = nearest else { return self.random_direction(pos); };
        if pos.distance(nearest) > FLEE_RADIUS { return self.random_direction(pos); }

        let mut best = pos;
        let mut best_distance = 0;
        for next in self.neighbors(pos) {
            let distance = next.distance(nearest);
            if distance > best_distance {
                best = next;
                best_distance = distance;
            }
        }
        Direction::between(pos, best)
    }

    fn neighbors(&self, pos: Point) -> Vec<Point> {
        Direction::CARDINAL.iter().map(|x| pos + x.delta())
            .filter(|x| self.is_walkable(*x)).collect()
    }

    // Off-grid cells are never walkable, whatever the grid's default.
    fn is_walkable(&self, p: Point) -> bool {
        self.walkable.contains(p) && self.walkable.get(p)
    }

    fn random_direction(&mut self, pos: Point) -> Direction {
        let neighbors = self.neighbors(pos);
        if neighbors.is_empty() { return Direction::None; }
        Direction::between(pos, *sample(&neighbors, &mut self.rng))
    }
}

//////////////////////////////////////////////////////////////////////////////
