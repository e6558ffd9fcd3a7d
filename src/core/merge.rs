use crate::core::bounded_grid::BoundedGrid;
use crate::core::{MergeRule, Tile, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineMerge {
    pub score: u64,
    pub changed: bool,
}

/// Slides and merges one line of tiles towards `line[0]`.
///
/// Each destination slot takes at most one merge per move, so 2,2,2,2
/// becomes 4,4 rather than 8.
pub fn merge_line(grid: &mut BoundedGrid<Tile>, line: &[Vec2], rule: MergeRule) -> LineMerge {
    let mut result = LineMerge::default();
    let Some(first) = line.first() else {
        return result;
    };
    begin_move(&mut grid[first]);

    let mut last = 0;
    for &pos in &line[1..] {
        begin_move(&mut grid[&pos]);

        let value = grid[&pos].value;
        let dest = line[last];
        let dest_value = grid[&dest].value;

        if value != 0 && value == dest_value && rule.can_merge(value) {
            let doubled = value * 2;
            let target = &mut grid[&dest];
            if target.merged_from.is_empty() {
                target.merged_from.push(target.coord);
            }
            target.merged_from.push(pos);
            target.value = doubled;
            grid[&pos].clear();

            result.score += doubled as u64;
            result.changed = true;
            last += 1;
        } else if value != 0 {
            if dest_value != 0 {
                last += 1;
            }
            let dest = line[last];
            if dest != pos {
                let age = grid[&pos].age;
                grid[&pos].clear();
                let target = &mut grid[&dest];
                target.value = value;
                target.age = age;
                target.merged_from.push(pos);
                result.changed = true;
            }
        }

        if grid[&pos].value == 0 {
            grid[&pos].age = 0;
        }
    }

    result
}

fn begin_move(tile: &mut Tile) {
    tile.merged_from.clear();
    tile.age += 1;
    if tile.value == 0 {
        tile.age = 0;
    }
}
