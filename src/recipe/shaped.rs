//! Pattern and key derivation for shaped crafting recipes.

use super::{Grid, ItemId, GRID_SIZE};

/// Trimmed pattern rows plus the key table, in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedLayout {
    pub pattern: Vec<String>,
    pub keys: Vec<(char, ItemId)>,
}

impl ShapedLayout {
    pub fn key_for(&self, item: &ItemId) -> Option<char> {
        self.keys.iter().find(|(_, id)| id == item).map(|(key, _)| *key)
    }
}

/// Bounds `(first_row, last_row, first_col, last_col)` of the filled cells,
/// or `None` for an empty grid. Empty rows and columns inside the bounds
/// are kept.
pub fn bounds(grid: &Grid) -> Option<(usize, usize, usize, usize)> {
    let filled = |row: usize, col: usize| grid[row * GRID_SIZE + col].is_some();
    let rows: Vec<usize> = (0..GRID_SIZE)
        .filter(|&r| (0..GRID_SIZE).any(|c| filled(r, c)))
        .collect();
    let cols: Vec<usize> = (0..GRID_SIZE)
        .filter(|&c| (0..GRID_SIZE).any(|r| filled(r, c)))
        .collect();
    Some((*rows.first()?, *rows.last()?, *cols.first()?, *cols.last()?))
}

/// The trimmed sub-grid, row-major.
pub fn trimmed_rows(grid: &Grid) -> Vec<Vec<Option<&ItemId>>> {
    let Some((top, bottom, left, right)) = bounds(grid) else {
        return Vec::new();
    };
    (top..=bottom)
        .map(|r| {
            (left..=right)
                .map(|c| grid[r * GRID_SIZE + c].as_ref())
                .collect()
        })
        .collect()
}

/// Build the pattern. Keys are handed out `A`, `B`, ... in first
/// occurrence order, reading row by row; an item used in several cells
/// keeps one key.
pub fn layout(grid: &Grid) -> Option<ShapedLayout> {
    let rows = trimmed_rows(grid);
    if rows.is_empty() {
        return None;
    }
    let mut keys: Vec<(char, ItemId)> = Vec::new();
    let mut pattern = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = String::with_capacity(row.len());
        for cell in row {
            match cell {
                None => line.push(' '),
                Some(item) => {
                    let key = match keys.iter().find(|(_, id)| id == item) {
                        Some((key, _)) => *key,
                        None => {
                            let key = char::from(b'A' + keys.len() as u8);
                            keys.push((key, item.clone()));
                            key
                        }
                    };
                    line.push(key);
                }
            }
        }
        pattern.push(line);
    }
    Some(ShapedLayout { pattern, keys })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid(cells: [&str; 9]) -> Grid {
        cells.map(|c| if c.is_empty() { None } else { ItemId::parse(c).ok() })
    }

    #[test]
    fn test_center_only_is_one_by_one() {
        let layout = layout(&grid(["", "", "", "", "diamond", "", "", "", ""])).unwrap();
        assert_eq!(layout.pattern, vec!["A".to_string()]);
        assert_eq!(layout.keys.len(), 1);
        let key_chars: HashSet<char> = layout.pattern.concat().chars().filter(|c| *c != ' ').collect();
        assert_eq!(key_chars.len(), 1);
    }

    #[test]
    fn test_edges_trimmed_interior_kept() {
        // Stick column with a hole in the middle row.
        let layout = layout(&grid(["", "stick", "", "", "", "", "", "stick", ""])).unwrap();
        assert_eq!(layout.pattern, vec!["A", " ", "A"]);
    }

    #[test]
    fn test_leading_empty_row_stripped() {
        let layout = layout(&grid(["", "", "", "plank", "plank", "", "plank", "plank", ""])).unwrap();
        assert_eq!(layout.pattern, vec!["AA", "AA"]);
    }

    #[test]
    fn test_same_item_same_key_distinct_items_distinct_keys() {
        let g = grid([
            "iron_ingot", "iron_ingot", "iron_ingot",
            "", "stick", "",
            "", "stick", "",
        ]);
        let layout = layout(&g).unwrap();
        assert_eq!(layout.pattern, vec!["AAA", " B ", " B "]);
        assert_eq!(layout.key_for(&ItemId::parse("iron_ingot").unwrap()), Some('A'));
        assert_eq!(layout.key_for(&ItemId::parse("stick").unwrap()), Some('B'));
    }

    #[test]
    fn test_nine_distinct_items() {
        let g = grid(["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
        let layout = layout(&g).unwrap();
        let keys: HashSet<char> = layout.keys.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), 9);
        assert_eq!(layout.pattern, vec!["ABC", "DEF", "GHI"]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(layout(&Default::default()).is_none());
    }
}
