use formicary_data::{Marker, Vec2};

/// Anything with a fixed position that can be bucketed into a [`SpatialGrid`].
pub trait Located {
    fn position(&self) -> Vec2;
}

impl Located for Marker {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }
}

impl Located for Vec2 {
    #[inline]
    fn position(&self) -> Vec2 {
        *self
    }
}

#[derive(Clone, Debug)]
/// Uniform bucket grid over a wrap-around world.
///
/// Items are owned by the grid and stored in the cell containing their
/// position. Positions are wrapped onto the torus before bucketing, so an item
/// at `x = -1` lands in the last column and a query near one edge also visits
/// the cells on the opposite edge.
///
/// Queries are a coarse filter: they return every item of every cell that
/// overlaps the square `[p - r, p + r]`. Callers still check exact distances.
///
/// # Performance Characteristics
/// - Insert: O(1)
/// - Query: O(items in the visited cells); with `cell_size >= radius` at most
///   a 3x3 block of cells is visited
/// - Memory: O(items) + O(cols * rows) for the (mostly empty) cell vectors
///
/// # Invariant
/// Every item lives in exactly the cell its position maps to. Items never move
/// while stored; anything that mutates positions must call [`rebuild`].
///
/// [`rebuild`]: SpatialGrid::rebuild
///
/// # Examples
/// ```
/// use formicary_core::spatial_grid::SpatialGrid;
/// use formicary_data::Vec2;
///
/// let mut grid = SpatialGrid::new(40.0, 1920.0, 1080.0);
/// grid.insert(Vec2::new(15.0, 15.0));
/// grid.insert(Vec2::new(1900.0, 15.0));
///
/// // The query window wraps past x = 0 and reaches the second point.
/// assert_eq!(grid.query_near(Vec2::new(5.0, 10.0), 30.0).count(), 2);
/// ```
pub struct SpatialGrid<T> {
    cell_size: f32,
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<T>>,
    len: usize,
}

impl<T: Located> SpatialGrid<T> {
    /// Creates an empty grid covering a `width x height` torus.
    ///
    /// The last row/column may be partial when the extent is not a multiple of
    /// `cell_size`.
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        let mut cells = Vec::with_capacity(cols * rows);
        cells.resize_with(cols * rows, Vec::new);
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cells,
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions as `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cell `(col, row)` a point maps to after wrapping.
    ///
    /// Returns `None` for non-finite coordinates and for coordinates so large
    /// that the cell index would overflow `i32`.
    #[inline]
    pub fn cell_coords(&self, point: Vec2) -> Option<(usize, usize)> {
        if !point.is_finite() {
            return None;
        }
        let limit = i32::MAX as f32 * self.cell_size;
        if point.x.abs() > limit || point.y.abs() > limit {
            return None;
        }

        let col = wrap_axis(point.x, self.width, self.cell_size, self.cols);
        let row = wrap_axis(point.y, self.height, self.cell_size, self.rows);
        Some((col, row))
    }

    #[inline]
    fn cell_idx(&self, point: Vec2) -> Option<usize> {
        self.cell_coords(point)
            .map(|(col, row)| row * self.cols + col)
    }

    /// Stores `item` in the cell matching its position.
    ///
    /// Returns `false` (and drops the item) when the position cannot be bucketed.
    pub fn insert(&mut self, item: T) -> bool {
        match self.cell_idx(item.position()) {
            Some(idx) => {
                self.cells[idx].push(item);
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Removes the first stored item equal to `item`. Cell order is preserved.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(idx) = self.cell_idx(item.position()) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        match cell.iter().position(|stored| stored == item) {
            Some(pos) => {
                cell.remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Flat indices of the cells overlapping the query square around `point`.
    ///
    /// Each cell appears once, even when the square is wider than the world.
    /// Invalid input (non-finite point or radius, negative radius) yields no cells.
    pub fn cells_near(&self, point: Vec2, radius: f32) -> Vec<usize> {
        if !radius.is_finite() || radius < 0.0 || self.cell_coords(point).is_none() {
            return Vec::new();
        }
        let x = point.x.rem_euclid(self.width);
        let y = point.y.rem_euclid(self.height);

        let cols = wrapped_span(x, radius, self.width, self.cell_size, self.cols);
        let rows = wrapped_span(y, radius, self.height, self.cell_size, self.rows);

        let mut out = Vec::with_capacity(cols.len() * rows.len());
        for &row in &rows {
            for &col in &cols {
                out.push(row * self.cols + col);
            }
        }
        out
    }

    /// Every item in the cells overlapping the square of half-width `radius`
    /// around `point`.
    pub fn query_near(&self, point: Vec2, radius: f32) -> impl Iterator<Item = &T> + '_ {
        self.cells_near(point, radius)
            .into_iter()
            .flat_map(move |idx| self.cells[idx].iter())
    }

    /// Number of items [`query_near`](Self::query_near) would yield.
    pub fn count_near(&self, point: Vec2, radius: f32) -> usize {
        self.cells_near(point, radius)
            .into_iter()
            .map(|idx| self.cells[idx].len())
            .sum()
    }

    /// All items, cell by cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter().flatten()
    }

    /// Keeps only the items for which `keep` returns `true`; returns how many
    /// were removed. `keep` may mutate items but must not move them.
    pub fn retain_mut<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let before = self.len;
        let mut kept = 0;
        for cell in &mut self.cells {
            cell.retain_mut(|item| keep(item));
            kept += cell.len();
        }
        self.len = kept;
        before - kept
    }

    /// Re-buckets every item from its current position.
    ///
    /// Items whose position can no longer be bucketed are dropped.
    pub fn rebuild(&mut self) {
        let items: Vec<T> = self.cells.iter_mut().flat_map(std::mem::take).collect();
        self.len = 0;
        for item in items {
            self.insert(item);
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.len = 0;
    }

    /// Checks that every item sits in the cell its position maps to.
    pub fn is_consistent(&self) -> bool {
        let counted: usize = self.cells.iter().map(Vec::len).sum();
        counted == self.len
            && self.cells.iter().enumerate().all(|(idx, cell)| {
                cell.iter()
                    .all(|item| self.cell_idx(item.position()) == Some(idx))
            })
    }
}

/// Cell index along one axis for a coordinate wrapped into `[0, extent)`.
#[inline]
fn wrap_axis(value: f32, extent: f32, cell_size: f32, count: usize) -> usize {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    let wrapped = if wrapped >= extent { 0.0 } else { wrapped };
    ((wrapped / cell_size) as usize).min(count - 1)
}

/// Sorted, de-duplicated cell indices covering `[center - radius, center + radius]`
/// on a circle of circumference `extent`. `center` must already be wrapped.
fn wrapped_span(center: f32, radius: f32, extent: f32, cell_size: f32, count: usize) -> Vec<usize> {
    if 2.0 * radius >= extent {
        return (0..count).collect();
    }
    let cell = |v: f32| ((v / cell_size).floor().max(0.0) as usize).min(count - 1);

    let lo = center - radius;
    let hi = center + radius;
    let mut span: Vec<usize> = if lo < 0.0 {
        (cell(lo + extent)..count).chain(0..=cell(hi)).collect()
    } else if hi >= extent {
        (cell(lo)..count).chain(0..=cell(hi - extent)).collect()
    } else {
        (cell(lo)..=cell(hi)).collect()
    };
    span.sort_unstable();
    span.dedup();
    span
}
