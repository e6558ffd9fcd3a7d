use log::{debug, warn};
use rand::Rng;
use crate::config::GameConfig;
use crate::core::bounded_grid::BoundedGrid;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::merge::merge_line;
use crate::core::traversal::Traversals;
use crate::core::{
    Direction, GameError, MergeRule, MoveOutcome, Tile, Vec2, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE,
    SPAWN_TWO_PROBABILITY, START_TILES, WIN_TILE,
};

/// Board state for one game session.
///
/// The engine never draws random numbers on its own; every operation that
/// may spawn a tile takes the random source from the caller.
#[derive(Clone, Debug)]
pub struct GameEngine {
    grid: BoundedGrid<Tile>,
    score: u64,
    merge_rule: MergeRule,
    traversals: Traversals,
}

impl GameEngine {
    pub fn new(width: i32, height: i32, merge_rule: MergeRule) -> Result<Self, GameError> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidSize { width, height });
        }
        let bounds = BoundsOriginRoot::new(width, height);
        Ok(GameEngine {
            grid: BoundedGrid::from_fn(bounds, Tile::new),
            score: 0,
            merge_rule,
            traversals: Traversals::new(bounds),
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        GameEngine::new(config.width, config.height, config.merge_rule.into())
    }

    /// Builds an engine from rows of values, zero meaning empty.
    ///
    /// Every other value must be a power of two no smaller than 2, and no
    /// larger than the limit of a capped merge rule.
    pub fn from_values(rows: &[Vec<u32>], merge_rule: MergeRule) -> Result<Self, GameError> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len() as i32);
        if rows.iter().any(|r| r.len() as i32 != width) {
            return Err(GameError::InvalidSize { width, height });
        }
        if let Some(&bad) = rows.iter().flatten().find(|&&v| !merge_rule.allows_value(v)) {
            return Err(GameError::InvalidCell(bad.to_string()));
        }
        let mut engine = GameEngine::new(width, height, merge_rule)?;
        for tile in engine.grid.iter_mut() {
            tile.value = rows[tile.coord.y as usize][tile.coord.x as usize];
        }
        Ok(engine)
    }

    pub fn width(&self) -> i32 {
        self.grid.size().extent.x
    }

    pub fn height(&self) -> i32 {
        self.grid.size().extent.y
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn merge_rule(&self) -> MergeRule {
        self.merge_rule
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter()
    }

    pub fn tile(&self, pos: &Vec2) -> Option<&Tile> {
        self.grid.get(pos)
    }

    pub fn values(&self) -> Vec<Vec<u32>> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| self.grid[&Vec2 { x, y }].value)
                    .collect()
            })
            .collect()
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for tile in self.grid.iter_mut() {
            tile.clear();
        }
        self.score = 0;
        self.spawn(START_TILES, rng);
        debug!("reset {}x{} board", self.width(), self.height());
    }

    /// Places `count` new tiles on distinct empty cells.
    ///
    /// Leaves the board untouched and returns false when fewer than `count`
    /// cells are empty.
    pub fn spawn<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> bool {
        let mut empty: Vec<Vec2> = self
            .grid
            .iter()
            .filter(|t| t.is_empty())
            .map(|t| t.coord)
            .collect();
        if empty.len() < count {
            warn!("cannot spawn {} tiles, only {} empty", count, empty.len());
            return false;
        }

        for _ in 0..count {
            let pos = empty.remove(rng.random_range(0..empty.len()));
            let value = if rng.random_bool(SPAWN_TWO_PROBABILITY) {
                SPAWN_LOW_VALUE
            } else {
                SPAWN_HIGH_VALUE
            };
            let tile = &mut self.grid[&pos];
            tile.value = value;
            tile.age = 0;
            tile.merged_from.clear();
            debug!("spawned {} at {:?}", value, pos);
        }
        true
    }

    /// Slides every line towards `direction`, then spawns one tile.
    ///
    /// A full board after the slide just skips the spawn.
    pub fn make_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        let traversal = self.traversals.get(direction);
        for line in traversal.lines() {
            let merged = merge_line(&mut self.grid, &line, self.merge_rule);
            outcome.score_delta += merged.score;
            outcome.changed |= merged.changed;
        }
        self.score += outcome.score_delta;
        outcome.reached_win = self.has_won();

        self.spawn(1, rng);
        debug!(
            "move {:?}: +{} (score {}), changed {}",
            direction, outcome.score_delta, self.score, outcome.changed
        );
        outcome
    }

    pub fn has_won(&self) -> bool {
        self.grid.iter().any(|t| t.value == WIN_TILE)
    }

    pub fn highest_tile(&self) -> u32 {
        self.grid.iter().map(|t| t.value).max().unwrap_or(0)
    }

    pub fn count_empty(&self) -> usize {
        self.grid.iter().filter(|t| t.is_empty()).count()
    }

    /// Whether any direction could still slide or merge a tile.
    pub fn can_move(&self) -> bool {
        if self.count_empty() > 0 {
            return true;
        }
        let neighbours = [Vec2 { x: 1, y: 0 }, Vec2 { x: 0, y: 1 }];
        self.grid.iter().any(|tile| {
            neighbours.iter().any(|&step| {
                self.grid
                    .get(&(tile.coord + step))
                    .is_some_and(|other| other.value == tile.value && self.merge_rule.can_merge(tile.value))
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_board_is_empty() {
        let engine = GameEngine::new(4, 4, MergeRule::default()).unwrap();
        assert_eq!(engine.count_empty(), 16);
        assert_eq!(engine.score(), 0);
        assert!(engine.iter_tiles().all(|t| t.value == 0 && t.merged_from.is_empty()));
    }

    #[test]
    fn tiles_know_their_coordinates() {
        let engine = GameEngine::new(3, 2, MergeRule::default()).unwrap();
        let coords: Vec<Vec2> = engine.iter_tiles().map(|t| t.coord).collect();
        assert_eq!(coords[4], Vec2 { x: 1, y: 1 });
        assert_eq!(engine.tile(&Vec2 { x: 2, y: 1 }).unwrap().coord, Vec2 { x: 2, y: 1 });
        assert!(engine.tile(&Vec2 { x: 3, y: 0 }).is_none());
    }

    #[test]
    fn rejects_empty_board() {
        assert!(matches!(
            GameEngine::new(0, 4, MergeRule::default()),
            Err(GameError::InvalidSize { width: 0, height: 4 })
        ));
        assert!(GameEngine::from_values(&[vec![2, 0], vec![2]], MergeRule::default()).is_err());
    }

    #[test]
    fn rejects_values_no_tile_can_hold() {
        let capped = MergeRule::default();
        for bad in [1, 3, 6, 5000, 4096] {
            assert!(
                matches!(
                    GameEngine::from_values(&[vec![2, bad]], capped),
                    Err(GameError::InvalidCell(ref s)) if *s == bad.to_string()
                ),
                "{} should be rejected",
                bad
            );
        }
        assert!(GameEngine::from_values(&[vec![0, 2, 2048]], capped).is_ok());
        assert!(GameEngine::from_values(&[vec![4096, 1 << 31]], MergeRule::Unbounded).is_ok());
        assert!(GameEngine::from_values(&[vec![3]], MergeRule::Unbounded).is_err());
    }

    #[test]
    fn reset_spawns_two_tiles_and_clears_score() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut engine =
            GameEngine::from_values(&[vec![1024, 1024], vec![0, 0]], MergeRule::default()).unwrap();
        engine.make_move(Direction::Left, &mut rng);
        assert_eq!(engine.score(), 2048);

        engine.reset(&mut rng);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.count_empty(), 2);
        assert!(engine.iter_tiles().filter(|t| !t.is_empty()).all(|t| t.value == 2 || t.value == 4));
    }

    #[test]
    fn can_move_respects_merge_rule() {
        let rows = vec![vec![2048, 2048], vec![2, 4]];
        let capped = GameEngine::from_values(&rows, MergeRule::default()).unwrap();
        assert!(!capped.can_move());
        let unbounded = GameEngine::from_values(&rows, MergeRule::Unbounded).unwrap();
        assert!(unbounded.can_move());
    }

    #[test]
    fn largest_tiles_stay_apart_instead_of_overflowing() {
        let mut rng = StdRng::seed_from_u64(3);
        let top = 1u32 << 31;
        let mut engine =
            GameEngine::from_values(&[vec![top, top], vec![2, 4]], MergeRule::Unbounded).unwrap();
        assert!(!engine.can_move());
        let outcome = engine.make_move(Direction::Left, &mut rng);
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.changed);
        assert_eq!(engine.values(), vec![vec![top, top], vec![2, 4]]);
    }

    #[test]
    fn reports_win_after_reaching_win_tile() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine =
            GameEngine::from_values(&[vec![0, 1024, 1024]], MergeRule::default()).unwrap();
        let outcome = engine.make_move(Direction::Right, &mut rng);
        assert!(outcome.reached_win);
        assert_eq!(outcome.score_delta, 2048);
        assert_eq!(engine.highest_tile(), 2048);
    }
}
