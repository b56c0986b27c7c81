use rand::Rng;

//////////////////////////////////////////////////////////////////////////////

// Basics

#[macro_export]
macro_rules! static_assert_size {
    ($x:ty, $y:expr) => {
        const _: fn() = || { let _ = std::mem::transmute::<$x, [u8; $y]>; };
    }
}

pub type RNG = rand::rngs::StdRng;
pub type HashSet<K> = fxhash::FxHashSet<K>;
pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;

pub fn sample<'a, T, R: Rng + ?Sized>(xs: &'a [T], rng: &mut R) -> &'a T {
    assert!(!xs.is_empty());
    &xs[rng.gen_range(0..xs.len())]
}

// Fresh and reset games start paused; only drivers consult the mode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GameMode { Manual, AI, #[default] Paused }

//////////////////////////////////////////////////////////////////////////////

// Point and Direction

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Point(pub i32, pub i32);
static_assert_size!(Point, 8);

impl Point {
    pub fn len_taxicab(&self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    // Manhattan distance: admissible for 4-connected, unit-cost grids.
    pub fn distance(&self, other: Point) -> i32 {
        (*self - other).len_taxicab()
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point(self.0 + other.0, self.1 + other.1)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point(self.0 - other.0, self.1 - other.1)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

pub mod dirs {
    use crate::base::Point;

    pub const NONE: Point = Point( 0,  0);
    pub const N:    Point = Point( 0, -1);
    pub const S:    Point = Point( 0,  1);
    pub const E:    Point = Point( 1,  0);
    pub const W:    Point = Point(-1,  0);
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction { Up, Down, Left, Right, #[default] None }

impl Direction {
    // Search order for every grid walk in the crate.
    pub const CARDINAL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(&self) -> Point {
        match self {
            Direction::Up    => dirs::N,
            Direction::Down  => dirs::S,
            Direction::Left  => dirs::W,
            Direction::Right => dirs::E,
            Direction::None  => dirs::NONE,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None  => Direction::None,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        *self != Direction::None && self.opposite() == other
    }

    // Horizontal moves win over vertical ones when both coordinates differ.
    pub fn between(from: Point, to: Point) -> Direction {
        if to.0 > from.0 { return Direction::Right; }
        if to.0 < from.0 { return Direction::Left; }
        if to.1 > from.1 { return Direction::Down; }
        if to.1 < from.1 { return Direction::Up; }
        Direction::None
    }
}

//////////////////////////////////////////////////////////////////////////////

// Matrix

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Matrix<T> {
    pub data: Vec<T>,
    pub size: Point,
    pub default: T,
}

impl<T: Clone> Matrix<T> {
    pub fn new(size: Point, value: T) -> Self {
        assert!(0 <= size.0);
        assert!(0 <= size.1);
        let mut data = Vec::new();
        data.resize((size.0 * size.1) as usize, value.clone());
        Self { data, size, default: value }
    }

    pub fn get(&self, point: Point) -> T {
        let Some(x) = self.index(point) else { return self.default.clone(); };
        self.data[x].clone()
    }

    pub fn set(&mut self, point: Point, value: T) {
        let Some(x) = self.index(point) else { return; };
        self.data[x] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn map<U: Clone, F: Fn(&T) -> U>(&self, f: F) -> Matrix<U> {
        let data = self.data.iter().map(&f).collect();
        Matrix { data, size: self.size, default: f(&self.default) }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Point(sx, sy) = self.size;
        (0..sy).flat_map(move |y| (0..sx).map(move |x| Point(x, y)))
    }

    #[inline(always)]
    pub fn contains(&self, point: Point) -> bool {
        let Point(px, py) = point;
        let Point(sx, sy) = self.size;
        0 <= px && px < sx && 0 <= py && py < sy
    }

    #[inline(always)]
    pub fn index(&self, point: Point) -> Option<usize> {
        if !self.contains(point) { return None; }
        Some((point.0 + point.1 * self.size.0) as usize)
    }
}

//////////////////////////////////////////////////////////////////////////////
