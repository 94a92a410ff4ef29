/// The r-pentomino, the smallest pattern with a long chaotic evolution.
/// Coordinates are `(row, col)` offsets from the pattern's top-left corner.
///
/// ```notrust
///     .##
///     ##.
///     .#.
/// ```
///
/// See: https://conwaylife.com/wiki/R-pentomino
pub const R_PENTOMINO: &[(usize, usize)] = &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)];

/// A bounded Life grid with two generation buffers.
///
/// `cells` is only ever read during a step, `next` is only ever written.
/// Outside of a step, `next` holds the generation currently on screen and
/// is the draw target for cells placed by hand while the game is paused.
///
/// The grid does not wrap. Cells beyond the edges act as a permanently
/// dead halo, so edge and corner cells simply have fewer neighbors.
pub struct Grid {
    width: usize,
    height: usize,

    /// Snapshot of the previous generation, read for neighbor counts
    cells: Vec<bool>,

    /// The displayed generation, written by [`Grid::step`] and by toggles
    next: Vec<bool>,

    /// Alive count of the last generation computed by [`Grid::step`]
    alive: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "grid width must be nonzero");
        assert!(height > 0, "grid height must be nonzero");

        Self {
            width,
            height,
            cells: vec![false; width * height],
            next: vec![false; width * height],
            alive: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Alive cells in the most recently computed generation.
    ///
    /// Toggles made while paused are not reflected here until the next
    /// call to [`Grid::step`].
    pub fn alive(&self) -> usize {
        self.alive
    }

    /// Whether the cell is alive in the displayed generation
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.next[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let i = self.index(row, col);
        self.next[i] = alive;
    }

    /// Flip a single cell in the displayed generation, returning its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let i = self.index(row, col);
        self.next[i] = !self.next[i];
        self.next[i]
    }

    /// Stamp a pattern of `(row, col)` offsets with its top-left corner at
    /// `(row, col)`. Cells that would land outside the grid are dropped.
    pub fn place(&mut self, pattern: &[(usize, usize)], row: usize, col: usize) {
        for &(dr, dc) in pattern {
            let (r, c) = (row + dr, col + dc);

            if r < self.height && c < self.width {
                self.set(r, c, true);
            }
        }
    }

    /// Advance the grid by one generation and return the new alive count.
    ///
    /// The displayed generation becomes the read-only snapshot, then every
    /// cell of the write buffer is recomputed from it. All transitions see
    /// the same pre-step generation (the classic synchronous update).
    pub fn step(&mut self) -> usize {
        std::mem::swap(&mut self.cells, &mut self.next);

        let mut alive = 0;

        for row in 0..self.height {
            for col in 0..self.width {
                let i = row * self.width + col;
                let n = self.neighbor_count(row, col);

                // B3/S23
                let state = matches!((self.cells[i], n), (true, 2 | 3) | (false, 3));

                self.next[i] = state;
                alive += state as usize;
            }
        }

        self.alive = alive;
        alive
    }

    /// Count alive cells among the up-to-8 in-bounds neighbors, read from
    /// the pre-step snapshot. Out-of-range coordinates are never formed.
    fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        let r0 = row.saturating_sub(1);
        let r1 = (row + 1).min(self.height - 1);
        let c0 = col.saturating_sub(1);
        let c1 = (col + 1).min(self.width - 1);

        let mut count = 0;

        for r in r0..=r1 {
            for c in c0..=c1 {
                if (r, c) != (row, col) && self.cells[r * self.width + c] {
                    count += 1;
                }
            }
        }

        count
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.height, "row is out of bounds");
        assert!(col < self.width, "col is out of bounds");

        row * self.width + col
    }
}
