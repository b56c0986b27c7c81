use crate::base::HashMap;

//////////////////////////////////////////////////////////////////////////////

pub const SNAKE_HIGH_SCORE_KEY: &str = "snake-high-score";

// Read/write access to persisted high scores, keyed by game identity. The
// engines never own the storage; drivers decide where scores live.
pub trait HighScores {
    fn get(&self, game: &str) -> Option<i32>;
    fn set(&mut self, game: &str, score: i32);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryScores {
    scores: HashMap<String, i32>,
}

impl MemoryScores {
    pub fn with(game: &str, score: i32) -> Self {
        let mut result = Self::default();
        result.set(game, score);
        result
    }
}

impl HighScores for MemoryScores {
    fn get(&self, game: &str) -> Option<i32> {
        self.scores.get(game).copied()
    }

    fn set(&mut self, game: &str, score: i32) {
        self.scores.insert(game.to_owned(), score);
    }
}

// Scores shared between an engine and its driver.
impl<T: HighScores> HighScores for std::rc::Rc<std::cell::RefCell<T>> {
    fn get(&self, game: &str) -> Option<i32> { self.borrow().get(game) }
    fn set(&mut self, game: &str, score: i32) { self.borrow_mut().set(game, score) }
}

//////////////////////////////////////////////////////////////////////////////
