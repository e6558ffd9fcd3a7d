use crate::core::bounds::BoundsOriginRoot;
use crate::core::{Direction, Vec2};

/// Where each line of a move starts and which way it is walked.
///
/// Lines start on the edge the tiles travel towards and step back across
/// the board, so index 0 of every line is the first destination slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversal {
    pub starts: Vec<Vec2>,
    pub step: Vec2,
    pub length: i32,
}

impl Traversal {
    pub fn new(bounds: BoundsOriginRoot, direction: Direction) -> Traversal {
        let Vec2 { x: w, y: h } = bounds.extent;
        let (starts, length): (Vec<Vec2>, i32) = match direction {
            Direction::Left => ((0..h).map(|y| Vec2 { x: 0, y }).collect(), w),
            Direction::Right => ((0..h).map(|y| Vec2 { x: w - 1, y }).collect(), w),
            Direction::Up => ((0..w).map(|x| Vec2 { x, y: 0 }).collect(), h),
            Direction::Down => ((0..w).map(|x| Vec2 { x, y: h - 1 }).collect(), h),
        };
        Traversal {
            starts,
            step: direction.opposite().vector(),
            length,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = Vec<Vec2>> + '_ {
        self.starts
            .iter()
            .map(|&start| line_coords(start, self.step, self.length))
    }
}

/// `count` coordinates from `start`, each one `step` further along.
pub fn line_coords(start: Vec2, step: Vec2, count: i32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2 {
            x: start.x + step.x * i,
            y: start.y + step.y * i,
        })
        .collect()
}

/// Precomputed traversals for all four directions, indexed like `Direction::ALL`.
#[derive(Clone, Debug)]
pub struct Traversals([Traversal; 4]);

impl Traversals {
    pub fn new(bounds: BoundsOriginRoot) -> Self {
        Traversals(Direction::ALL.map(|dir| Traversal::new(bounds, dir)))
    }

    pub fn get(&self, direction: Direction) -> &Traversal {
        let index = match direction {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        };
        &self.0[index]
    }
}
