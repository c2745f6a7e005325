/// Toroidal 2D grid of resource units.
/// Each cell holds a non-negative integer amount of consumable resource.

/// Side length of the square grid. Positions wrap modulo this on both axes.
pub const GRID_SIZE: usize = 100;

#[derive(Clone, Debug)]
pub struct ResourceField {
    cells: Vec<u32>,
}

impl ResourceField {
    /// Create a field with every cell set to `initial_value`.
    pub fn new(initial_value: u32) -> Self {
        Self {
            cells: vec![initial_value; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Build a field from an already-parsed row-major raster.
    ///
    /// The ingestion boundary accepts any rectangular grid: rows and columns
    /// beyond `GRID_SIZE` are ignored, missing cells are zero-filled. Rasters
    /// in the wild are often wider than the simulated area.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        let mut field = Self::new(0);
        for (row_idx, row) in rows.iter().take(GRID_SIZE).enumerate() {
            for (col_idx, &value) in row.iter().take(GRID_SIZE).enumerate() {
                field.cells[row_idx * GRID_SIZE + col_idx] = value;
            }
        }
        field
    }

    fn cell_index(x: f64, y: f64) -> usize {
        let size = GRID_SIZE as f64;
        let cx = x.rem_euclid(size).floor() as usize % GRID_SIZE;
        let cy = y.rem_euclid(size).floor() as usize % GRID_SIZE;
        cy * GRID_SIZE + cx
    }

    pub fn get(&self, x: f64, y: f64) -> u32 {
        self.cells[Self::cell_index(x, y)]
    }

    /// Remove up to `amount` units from the cell under (x, y), never driving
    /// it below zero. Returns the amount actually removed.
    pub fn consume(&mut self, x: f64, y: f64, amount: u32) -> u32 {
        let cell = &mut self.cells[Self::cell_index(x, y)];
        let taken = amount.min(*cell);
        *cell -= taken;
        taken
    }

    /// Add `amount` units to the cell under (x, y). Unbounded.
    pub fn deposit(&mut self, x: f64, y: f64, amount: u32) {
        self.cells[Self::cell_index(x, y)] += amount;
    }

    /// Row-major snapshot of every cell, for external persistence.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Iterate rows top to bottom, each as a `GRID_SIZE`-long slice.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(GRID_SIZE)
    }

    /// Sum of each row, in row order.
    pub fn row_sums(&self) -> Vec<u64> {
        self.rows()
            .map(|row| row.iter().map(|&v| v as u64).sum())
            .collect()
    }

    /// Total resource remaining across the whole field.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }
}
