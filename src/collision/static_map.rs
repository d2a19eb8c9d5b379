// Implements a bucketed grid for broad-phase area queries.

use std::collections::HashSet;

use log::{debug, info};

use crate::collision::aabb::AABB;
use crate::error::{PhysicsError, PhysicsResult};
use crate::objects::PhysicalItemState;
use crate::shapes::Shape;

/// Anything occupying a rectangular area of the world.
pub trait Bounded {
    fn bounding_box(&self) -> AABB;
}

impl Bounded for AABB {
    fn bounding_box(&self) -> AABB {
        *self
    }
}

impl Bounded for Shape {
    fn bounding_box(&self) -> AABB {
        Shape::bounding_box(self)
    }
}

impl Bounded for PhysicalItemState {
    fn bounding_box(&self) -> AABB {
        PhysicalItemState::bounding_box(self)
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bounding_box(&self) -> AABB {
        (**self).bounding_box()
    }
}

/// An item known by a key, for instance its index in the caller's storage.
impl<K> Bounded for (K, AABB) {
    fn bounding_box(&self) -> AABB {
        self.1
    }
}

/// A grid of fixed-size square cells covering `[0, width] x [0, height]`.
///
/// Each cell keeps the items whose bounding box overlaps it, so an item
/// spanning several cells is listed in each of them. Items outside the covered
/// area are kept in the border cells. The map is meant to be filled once per
/// pass and queried, then cleared.
#[derive(Debug)]
pub struct StaticMap<T> {
    box_size: f64,
    inv_box_size: f64, // 1.0 / box_size, cached for performance
    num_cols: usize,
    num_rows: usize,
    cells: Vec<Vec<usize>>, // Flattened 1D vector of the 2D grid, holding item indices
    items: Vec<T>,          // Inserted items, in insertion order
}

impl<T: Bounded> StaticMap<T> {
    /// Creates a map covering `[0, width] x [0, height]` with cells of
    /// `box_size`.
    ///
    /// # Panics
    /// If `box_size` is not strictly positive.
    pub fn new(width: f64, height: f64, box_size: f64) -> Self {
        assert!(box_size > 0.0, "Box size must be positive");
        let inv_box_size = 1.0 / box_size;

        // Ensure at least one cell
        let num_cols = (width * inv_box_size).ceil().max(1.0) as usize;
        let num_rows = (height * inv_box_size).ceil().max(1.0) as usize;
        let total_cells = num_cols * num_rows;

        debug!(
            "Creating StaticMap: size={}x{}, box_size={}, dims={}x{}, total_cells={}",
            width, height, box_size, num_cols, num_rows, total_cells
        );

        StaticMap {
            box_size,
            inv_box_size,
            num_cols,
            num_rows,
            cells: vec![Vec::new(); total_cells],
            items: Vec::new(),
        }
    }

    /// Same as `new()` but rejects an invalid box size instead of panicking.
    pub fn try_new(width: f64, height: f64, box_size: f64) -> PhysicsResult<Self> {
        if !(box_size.is_finite() && box_size > 0.0) {
            return Err(PhysicsError::InvalidBoxSize(box_size));
        }
        Ok(Self::new(width, height, box_size))
    }

    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Number of cells as `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.num_cols, self.num_rows)
    }

    /// Number of inserted items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // --- Helper Methods ---

    /// Converts a coordinate to a cell index along an axis of `count` cells.
    #[inline]
    fn cell_coordinate(&self, value: f64, count: usize) -> usize {
        let index = (value * self.inv_box_size).floor() as isize;
        index.clamp(0, count as isize - 1) as usize
    }

    /// Range of cells `(min_col, min_row, max_col, max_row)` overlapped by a
    /// rectangle, clamped to the grid.
    fn cell_range(&self, rect: &AABB) -> (usize, usize, usize, usize) {
        (
            self.cell_coordinate(rect.left(), self.num_cols),
            self.cell_coordinate(rect.bottom(), self.num_rows),
            self.cell_coordinate(rect.right(), self.num_cols),
            self.cell_coordinate(rect.top(), self.num_rows),
        )
    }

    /// Indices of the cells overlapped by a rectangle.
    fn cells_in(&self, rect: &AABB) -> impl Iterator<Item = usize> {
        let (min_col, min_row, max_col, max_row) = self.cell_range(rect);
        let num_cols = self.num_cols;
        (min_row..=max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| col + row * num_cols))
    }

    /// Pushes the items of the cells overlapped by `area`. With `seen`, an item
    /// already in the set is skipped.
    fn collect_area<'a>(
        &'a self,
        area: &AABB,
        items: &mut Vec<&'a T>,
        mut seen: Option<&mut HashSet<usize>>,
    ) {
        for cell in self.cells_in(area) {
            for &index in &self.cells[cell] {
                if let Some(seen) = seen.as_deref_mut() {
                    if !seen.insert(index) {
                        continue;
                    }
                }
                items.push(&self.items[index]);
            }
        }
    }

    // --- Public API Methods ---

    /// Removes every item from the map.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        self.items.clear();
    }

    /// Inserts an item in every cell overlapped by its bounding box.
    pub fn insert(&mut self, item: T) {
        let index = self.items.len();
        let area = item.bounding_box();

        for cell in self.cells_in(&area) {
            self.cells[cell].push(index);
        }

        self.items.push(item);
    }

    /// Appends to `items` the items of the cells overlapped by `area`. These
    /// are candidates: their bounding box may not meet `area`. An item found in
    /// several cells is appended several times.
    pub fn get_area<'a>(&'a self, area: &AABB, items: &mut Vec<&'a T>) {
        self.collect_area(area, items, None);
    }

    /// Same as `get_area()`, each item once.
    pub fn get_area_unique<'a>(&'a self, area: &AABB, items: &mut Vec<&'a T>) {
        let mut seen = HashSet::new();
        self.collect_area(area, items, Some(&mut seen));
    }

    /// Same as `get_area()` for several areas.
    pub fn get_areas<'a, 'r, I>(&'a self, areas: I, items: &mut Vec<&'a T>)
    where
        I: IntoIterator<Item = &'r AABB>,
    {
        for area in areas {
            self.collect_area(area, items, None);
        }
    }

    /// Same as `get_areas()`, each item once.
    pub fn get_areas_unique<'a, 'r, I>(&'a self, areas: I, items: &mut Vec<&'a T>)
    where
        I: IntoIterator<Item = &'r AABB>,
    {
        let mut seen = HashSet::new();
        for area in areas {
            self.collect_area(area, items, Some(&mut seen));
        }
    }

    /// Appends to `items` every item of the map, each one once.
    pub fn get_all_unique<'a>(&'a self, items: &mut Vec<&'a T>) {
        let mut seen = HashSet::with_capacity(self.items.len());
        for cell in &self.cells {
            for &index in cell {
                if seen.insert(index) {
                    items.push(&self.items[index]);
                }
            }
        }
    }

    /// Number of cells holding no item.
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Smallest, largest and average number of items per cell.
    pub fn cells_load(&self) -> (usize, usize, f64) {
        let min = self.cells.iter().map(Vec::len).min().unwrap_or(0);
        let max = self.cells.iter().map(Vec::len).max().unwrap_or(0);
        let total: usize = self.cells.iter().map(Vec::len).sum();
        let avg = total as f64 / self.cells.len() as f64;
        (min, max, avg)
    }

    /// Logs the load of the cells, to help tuning the box size.
    pub fn log_stats(&self) {
        let (min, max, avg) = self.cells_load();
        info!(
            "StaticMap {}x{} (box_size={}): {} items, load min={} max={} avg={:.2}, {} empty cells",
            self.num_cols,
            self.num_rows,
            self.box_size,
            self.items.len(),
            min,
            max,
            avg,
            self.empty_cells()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    const EPSILON: f64 = 1e-12;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> AABB {
        AABB::from_bottom_left(Vec2::new(x, y), w, h)
    }

    #[test]
    fn test_map_new() {
        let map: StaticMap<AABB> = StaticMap::new(100.0, 50.0, 20.0);
        assert_eq!(map.dimensions(), (5, 3));
        assert_eq!(map.cells.len(), 15);
        assert_eq!(map.inv_box_size, 1.0 / 20.0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_map_new_has_at_least_one_cell() {
        let map: StaticMap<AABB> = StaticMap::new(0.0, -5.0, 10.0);
        assert_eq!(map.dimensions(), (1, 1));
    }

    #[test]
    #[should_panic]
    fn test_map_new_rejects_zero_box_size() {
        let _map: StaticMap<AABB> = StaticMap::new(10.0, 10.0, 0.0);
    }

    #[test]
    fn test_try_new() {
        assert!(StaticMap::<AABB>::try_new(10.0, 10.0, 5.0).is_ok());
        assert!(matches!(
            StaticMap::<AABB>::try_new(10.0, 10.0, -1.0),
            Err(PhysicsError::InvalidBoxSize(v)) if v == -1.0
        ));
        assert!(StaticMap::<AABB>::try_new(10.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_cell_range_clamped() {
        let map: StaticMap<AABB> = StaticMap::new(100.0, 100.0, 10.0);
        assert_eq!(map.cell_range(&rect(15.0, 25.0, 10.0, 0.0)), (1, 2, 2, 2));
        assert_eq!(map.cell_range(&rect(-50.0, -50.0, 20.0, 20.0)), (0, 0, 0, 0));
        assert_eq!(map.cell_range(&rect(95.0, 95.0, 50.0, 50.0)), (9, 9, 9, 9));
    }

    #[test]
    fn test_insert_spanning_cells() {
        let mut map = StaticMap::new(100.0, 100.0, 10.0);
        map.insert(rect(5.0, 5.0, 10.0, 10.0));
        assert_eq!(map.len(), 1);
        assert_eq!(map.empty_cells(), 96);

        let mut found = Vec::new();
        map.get_area(&rect(0.0, 0.0, 100.0, 100.0), &mut found);
        assert_eq!(found.len(), 4);

        found.clear();
        map.get_area_unique(&rect(0.0, 0.0, 100.0, 100.0), &mut found);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_get_area_returns_cell_contents() {
        let mut map = StaticMap::new(100.0, 100.0, 50.0);
        map.insert((1, rect(0.0, 0.0, 10.0, 10.0)));
        map.insert((2, rect(30.0, 30.0, 10.0, 10.0)));
        map.insert((3, rect(60.0, 60.0, 10.0, 10.0)));

        // Item 2 shares the cell without meeting the area.
        let mut found = Vec::new();
        map.get_area_unique(&rect(5.0, 5.0, 10.0, 10.0), &mut found);
        let keys: Vec<i32> = found.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2]);

        found.clear();
        map.get_area_unique(&rect(55.0, 55.0, 5.0, 5.0), &mut found);
        let keys: Vec<i32> = found.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3]);

        found.clear();
        map.get_area_unique(&rect(45.0, 45.0, 10.0, 10.0), &mut found);
        let keys: Vec<i32> = found.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_areas_unique() {
        let mut map = StaticMap::new(100.0, 100.0, 10.0);
        map.insert((1, rect(0.0, 0.0, 30.0, 5.0)));
        map.insert((2, rect(80.0, 80.0, 5.0, 5.0)));

        let areas = [rect(0.0, 0.0, 5.0, 5.0), rect(25.0, 0.0, 5.0, 5.0), rect(81.0, 81.0, 1.0, 1.0)];
        let mut found = Vec::new();
        map.get_areas(&areas, &mut found);
        // The second area spans two of the cells holding item 1.
        assert_eq!(found.len(), 4);

        found.clear();
        map.get_areas_unique(&areas, &mut found);
        let keys: Vec<i32> = found.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn test_items_outside_are_kept_on_the_border() {
        let mut map = StaticMap::new(100.0, 100.0, 10.0);
        map.insert(rect(-20.0, 50.0, 5.0, 5.0));
        let mut found = Vec::new();
        map.get_all_unique(&mut found);
        assert_eq!(found.len(), 1);

        found.clear();
        map.get_area_unique(&rect(-30.0, 40.0, 20.0, 20.0), &mut found);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_partition_of_the_domain_finds_every_item() {
        let mut map = StaticMap::new(100.0, 100.0, 10.0);
        map.insert((0, rect(10.0, 10.0, 5.0, 5.0)));
        map.insert((1, rect(-20.0, 50.0, 5.0, 5.0)));

        let mut all = Vec::new();
        map.get_all_unique(&mut all);
        let mut all_keys: Vec<i32> = all.iter().map(|(k, _)| *k).collect();
        all_keys.sort();

        let mut union = Vec::new();
        for half in [rect(0.0, 0.0, 50.0, 100.0), rect(50.0, 0.0, 50.0, 100.0)] {
            let mut found = Vec::new();
            map.get_area_unique(&half, &mut found);
            union.extend(found.iter().map(|(k, _)| *k));
        }
        union.sort();
        union.dedup();

        assert_eq!(all_keys, vec![0, 1]);
        assert_eq!(union, all_keys);
    }

    #[test]
    fn test_get_all_unique_and_clear() {
        let mut map = StaticMap::new(64.0, 64.0, 16.0);
        for i in 0..10 {
            map.insert(rect(i as f64 * 6.0, i as f64 * 6.0, 12.0, 12.0));
        }
        let mut found = Vec::new();
        map.get_all_unique(&mut found);
        assert_eq!(found.len(), 10);
        drop(found);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.empty_cells(), 16);
        let mut found = Vec::new();
        map.get_all_unique(&mut found);
        assert!(found.is_empty());
    }

    #[test]
    fn test_cells_load() {
        let mut map = StaticMap::new(20.0, 10.0, 10.0);
        map.insert(rect(1.0, 1.0, 2.0, 2.0));
        map.insert(rect(2.0, 2.0, 2.0, 2.0));
        map.insert(rect(5.0, 5.0, 10.0, 2.0));
        let (min, max, avg) = map.cells_load();
        assert_eq!(min, 1);
        assert_eq!(max, 3);
        assert!((avg - 2.0).abs() < EPSILON);
        assert_eq!(map.empty_cells(), 0);
        map.log_stats();
    }

    #[test]
    fn test_map_of_references() {
        let shapes = [
            Shape::Rectangle(crate::shapes::Rectangle::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0))),
            Shape::Rectangle(crate::shapes::Rectangle::new(Vec2::new(50.0, 1.0), Vec2::new(2.0, 2.0))),
        ];
        let mut map: StaticMap<&Shape> = StaticMap::new(100.0, 100.0, 25.0);
        for s in &shapes {
            map.insert(s);
        }
        let mut found = Vec::new();
        map.get_area_unique(&rect(0.0, 0.0, 10.0, 10.0), &mut found);
        assert_eq!(found.len(), 1);
        assert_eq!(**found[0], shapes[0]);
    }
}
