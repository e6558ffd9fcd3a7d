/// Grid coordinate: `x` is the column, `y` the row, both starting at 0 in the top left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// One cell of the board.
///
/// `merged_from` is look-back for the renderer only: it lists where this
/// tile's value came from during the most recent move. One entry means the
/// tile slid in, two entries mean two tiles combined here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub coord: Vec2,
    pub value: u32,
    pub age: u32,
    pub merged_from: Vec<Vec2>,
}

impl Tile {
    pub fn new(coord: Vec2) -> Self {
        Tile {
            coord,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    pub fn is_merged(&self) -> bool {
        self.merged_from.len() == 2
    }

    /// A tile that appeared in the spawn step of the last move.
    pub fn is_fresh_spawn(&self) -> bool {
        self.value != 0 && self.age == 0 && self.merged_from.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.value = 0;
        self.age = 0;
        self.merged_from.clear();
    }
}

/// Whether two tiles of the win value may still combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeRule {
    /// Tiles at or above the limit never combine.
    Capped(u32),
    Unbounded,
}

impl MergeRule {
    /// Whether two tiles of `value` combine. Never true once doubling would overflow.
    pub fn can_merge(&self, value: u32) -> bool {
        if value == 0 || value > u32::MAX / 2 {
            return false;
        }
        match *self {
            MergeRule::Capped(limit) => value < limit,
            MergeRule::Unbounded => true,
        }
    }

    /// Whether a cell may hold `value` at all: empty, or a power of two this rule can reach.
    pub fn allows_value(&self, value: u32) -> bool {
        if value == 0 {
            return true;
        }
        if value < 2 || !value.is_power_of_two() {
            return false;
        }
        match *self {
            MergeRule::Capped(limit) => value <= limit,
            MergeRule::Unbounded => true,
        }
    }
}

impl Default for MergeRule {
    fn default() -> Self {
        MergeRule::Capped(crate::core::WIN_TILE)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub score_delta: u64,
    pub reached_win: bool,
    pub changed: bool,
}
