use lazy_static::lazy_static;

use crate::base::{Matrix, Point};

//////////////////////////////////////////////////////////////////////////////

// Constants

pub const DEFAULT_SNAKE_SIZE: i32 = 20;
pub const MIN_SNAKE_SIZE: i32 = 4;

const DEFAULT_MAZE_ROWS: [&str; 21] = [
    "###################",
    "#........#........#",
    "#o##.###.#.###.##o#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "####.#   2   #.####",
    "####.# ## ## #.####",
    "    .  #134#  .    ",
    "####.# ##### #.####",
    "####.#       #.####",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#.....P.....#.o#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

lazy_static! {
    pub static ref DEFAULT_MAZE: MazeConfig = match parse_maze(&DEFAULT_MAZE_ROWS) {
        Ok(config) => config,
        Err(error) => panic!("Invalid built-in maze: {}", error),
    };
}

//////////////////////////////////////////////////////////////////////////////

// ConfigError

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    EmptyMaze,
    RaggedRow { row: usize, expected: usize, actual: usize },
    UnknownCell { ch: char, pos: Point },
    MissingPacmanStart,
    DuplicatePacmanStart(Point),
    DuplicateGhostStart(char),
    GridTooSmall { min: i32, actual: i32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMaze => write!(f, "maze has no rows"),
            Self::RaggedRow { row, expected, actual } =>
                write!(f, "maze row {} has {} cells, expected {}", row, actual, expected),
            Self::UnknownCell { ch, pos } =>
                write!(f, "unknown maze cell {:?} at {}", ch, pos),
            Self::MissingPacmanStart => write!(f, "maze has no pacman start 'P'"),
            Self::DuplicatePacmanStart(pos) =>
                write!(f, "second pacman start at {}", pos),
            Self::DuplicateGhostStart(ch) =>
                write!(f, "ghost start {:?} appears more than once", ch),
            Self::GridTooSmall { min, actual } =>
                write!(f, "grid size {} is below the minimum of {}", actual, min),
        }
    }
}

impl std::error::Error for ConfigError {}

//////////////////////////////////////////////////////////////////////////////

// Maze

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Cell { #[default] Empty, Wall, Pellet, PowerPellet }

impl Cell {
    pub fn is_wall(&self) -> bool { *self == Cell::Wall }

    pub fn is_pellet(&self) -> bool {
        matches!(self, Cell::Pellet | Cell::PowerPellet)
    }

    pub fn show(&self) -> char {
        match self {
            Cell::Empty       => ' ',
            Cell::Wall        => '#',
            Cell::Pellet      => '.',
            Cell::PowerPellet => 'o',
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GhostColor { Red, Pink, Cyan, Orange }

impl GhostColor {
    pub const ALL: [GhostColor; 4] =
        [GhostColor::Red, GhostColor::Pink, GhostColor::Cyan, GhostColor::Orange];

    fn from_marker(ch: char) -> Option<GhostColor> {
        match ch {
            '1' => Some(GhostColor::Red),
            '2' => Some(GhostColor::Pink),
            '3' => Some(GhostColor::Cyan),
            '4' => Some(GhostColor::Orange),
            _ => None,
        }
    }

    // Each color keeps to its own corner when scattering.
    fn scatter(&self, size: Point) -> Point {
        let Point(sx, sy) = size;
        match self {
            GhostColor::Red    => Point(sx - 1, 0),
            GhostColor::Pink   => Point(0, 0),
            GhostColor::Cyan   => Point(sx - 1, sy - 1),
            GhostColor::Orange => Point(0, sy - 1),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GhostStart {
    pub pos: Point,
    pub color: GhostColor,
    pub scatter: Point,
}

/// Static chase-game configuration: the initial maze plus start positions.
///
/// Out-of-bounds reads from `layout` return `Cell::Wall`, so vertical moves
/// off the grid are rejected by the same wall check as interior walls.
#[derive(Clone, Debug)]
pub struct MazeConfig {
    pub layout: Matrix<Cell>,
    pub pacman_start: Point,
    pub ghost_starts: Vec<GhostStart>,
    pub total_pellets: i32,
}

impl MazeConfig {
    pub fn size(&self) -> Point { self.layout.size }
}

/// Parses an ASCII maze. Rows must all have the same width.
///
///   '#' wall, '.' pellet, 'o' power pellet, ' ' empty,
///   'P' pacman start, '1'..'4' ghost starts (red, pink, cyan, orange).
///
/// Start markers are empty cells in the resulting layout.
pub fn parse_maze<S: AsRef<str>>(rows: &[S]) -> Result<MazeConfig, ConfigError> {
    let Some(first) = rows.first() else { return Err(ConfigError::EmptyMaze); };
    let width = first.as_ref().chars().count();
    if width == 0 { return Err(ConfigError::EmptyMaze); }

    let size = Point(width as i32, rows.len() as i32);
    let mut layout = Matrix::new(size, Cell::Empty);
    layout.default = Cell::Wall;

    let mut pacman_start = None;
    let mut ghosts: Vec<(char, Point)> = vec![];
    let mut total_pellets = 0;

    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let actual = row.chars().count();
        if actual != width {
            return Err(ConfigError::RaggedRow { row: y, expected: width, actual });
        }
        for (x, ch) in row.chars().enumerate() {
            let pos = Point(x as i32, y as i32);
            let cell = match ch {
                '#' => Cell::Wall,
                '.' => Cell::Pellet,
                'o' => Cell::PowerPellet,
                ' ' => Cell::Empty,
                'P' => {
                    if pacman_start.is_some() {
                        return Err(ConfigError::DuplicatePacmanStart(pos));
                    }
                    pacman_start = Some(pos);
                    Cell::Empty
                }
                '1'..='4' => {
                    if ghosts.iter().any(|x| x.0 == ch) {
                        return Err(ConfigError::DuplicateGhostStart(ch));
                    }
                    ghosts.push((ch, pos));
                    Cell::Empty
                }
                _ => return Err(ConfigError::UnknownCell { ch, pos }),
            };
            if cell.is_pellet() { total_pellets += 1; }
            layout.set(pos, cell);
        }
    }

    let pacman_start = pacman_start.ok_or(ConfigError::MissingPacmanStart)?;

    ghosts.sort_by_key(|x| x.0);
    let ghost_starts = ghosts.into_iter().filter_map(|(ch, pos)| {
        let color = GhostColor::from_marker(ch)?;
        Some(GhostStart { pos, color, scatter: color.scatter(size) })
    }).collect();

    Ok(MazeConfig { layout, pacman_start, ghost_starts, total_pellets })
}

//////////////////////////////////////////////////////////////////////////////

// Snake

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SnakeConfig {
    pub size: i32,
}

impl Default for SnakeConfig {
    fn default() -> Self { Self { size: DEFAULT_SNAKE_SIZE } }
}

impl SnakeConfig {
    pub fn new(size: i32) -> Result<Self, ConfigError> {
        if size < MIN_SNAKE_SIZE {
            return Err(ConfigError::GridTooSmall { min: MIN_SNAKE_SIZE, actual: size });
        }
        Ok(Self { size })
    }
}

//////////////////////////////////////////////////////////////////////////////
