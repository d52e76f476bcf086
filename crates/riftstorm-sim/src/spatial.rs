//! Uniform grid broad phase, rebuilt every tick.

use riftstorm_core::types::Vec2;

pub struct SpatialGrid<K> {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<K>>,
    results: Vec<K>,
    largest_radius: f32,
}

impl<K: Copy> SpatialGrid<K> {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            cells: (0..cols * rows).map(|_| Vec::new()).collect(),
            results: Vec::new(),
            largest_radius: 0.0,
        }
    }

    /// Empty every bucket, keeping allocations.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.largest_radius = 0.0;
    }

    /// Insert `key` at `pos`. Positions outside the world land in the nearest
    /// edge cell.
    pub fn insert(&mut self, key: K, pos: Vec2, radius: f32) {
        let col = self.col(pos.x);
        let row = self.row(pos.y);
        self.cells[row * self.cols + col].push(key);
        self.largest_radius = self.largest_radius.max(radius);
    }

    /// Keys in every cell touched by the query's bounding box. A superset of
    /// the keys truly within `radius`; callers run the exact test. The slice
    /// is valid until the next query.
    pub fn query_radius(&mut self, pos: Vec2, radius: f32) -> &[K] {
        let mut results = std::mem::take(&mut self.results);
        results.clear();
        self.query_into(pos, radius, &mut results);
        self.results = results;
        &self.results
    }

    /// Same as [`query_radius`](Self::query_radius), appending to `out`.
    pub fn query_into(&self, pos: Vec2, radius: f32, out: &mut Vec<K>) {
        let (c0, c1) = (self.col(pos.x - radius), self.col(pos.x + radius));
        let (r0, r1) = (self.row(pos.y - radius), self.row(pos.y + radius));
        for row in r0..=r1 {
            for col in c0..=c1 {
                out.extend_from_slice(&self.cells[row * self.cols + col]);
            }
        }
    }

    /// Largest radius inserted since the last clear.
    pub fn largest_radius(&self) -> f32 {
        self.largest_radius
    }

    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    fn col(&self, x: f32) -> usize {
        clamp_cell(x / self.cell_size, self.cols)
    }

    fn row(&self, y: f32) -> usize {
        clamp_cell(y / self.cell_size, self.rows)
    }
}

fn clamp_cell(v: f32, count: usize) -> usize {
    if v.is_nan() || v < 0.0 {
        0
    } else {
        (v.floor() as usize).min(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nearby_keys() {
        let mut grid = SpatialGrid::new(1000.0, 1000.0, 100.0);
        grid.insert(1u32, Vec2::new(50.0, 50.0), 5.0);
        grid.insert(2u32, Vec2::new(950.0, 950.0), 5.0);
        let found = grid.query_radius(Vec2::new(60.0, 60.0), 30.0);
        assert_eq!(found, &[1]);
    }

    #[test]
    fn out_of_bounds_clamps_to_edge() {
        let mut grid = SpatialGrid::new(1000.0, 1000.0, 100.0);
        grid.insert(7u32, Vec2::new(-500.0, 2000.0), 5.0);
        let found = grid.query_radius(Vec2::new(10.0, 990.0), 20.0);
        assert_eq!(found, &[7]);
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut grid = SpatialGrid::new(500.0, 500.0, 100.0);
        grid.insert(1u32, Vec2::new(10.0, 10.0), 40.0);
        assert_eq!(grid.largest_radius(), 40.0);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.largest_radius(), 0.0);
        assert!(grid.query_radius(Vec2::new(10.0, 10.0), 100.0).is_empty());
    }

    #[test]
    fn query_is_superset_of_true_neighbors() {
        let mut grid = SpatialGrid::new(2000.0, 2000.0, 150.0);
        let points: Vec<Vec2> = (0..400)
            .map(|i| {
                let t = i as f32;
                Vec2::new((t * 137.5) % 2100.0 - 50.0, (t * 71.3) % 2100.0 - 50.0)
            })
            .collect();
        for (i, &p) in points.iter().enumerate() {
            grid.insert(i, p, 1.0);
        }
        for &(center, r) in &[
            (Vec2::new(1000.0, 1000.0), 200.0),
            (Vec2::new(0.0, 0.0), 75.0),
            (Vec2::new(1990.0, 10.0), 300.0),
        ] {
            let found = grid.query_radius(center, r).to_vec();
            for (i, &p) in points.iter().enumerate() {
                if p.distance(center) <= r {
                    assert!(found.contains(&i), "missed {i} at {p}");
                }
            }
        }
    }
}
