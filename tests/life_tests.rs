use termlife::grid::Grid;
use termlife::grid::R_PENTOMINO;

const BLOCK: &[(usize, usize)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
const BLINKER: &[(usize, usize)] = &[(0, 0), (0, 1), (0, 2)];

// .#.
// ..#
// ###
const GLIDER: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.is_alive(row, col) {
                cells.push((row, col));
            }
        }
    }

    cells
}

#[test]
fn block_survives_many_generations() {
    let mut grid = Grid::new(6, 6);
    grid.place(BLOCK, 2, 2);

    let before = vec![(2, 2), (2, 3), (3, 2), (3, 3)];

    for _ in 0..10 {
        assert_eq!(grid.step(), 4);
        assert_eq!(alive_cells(&grid), before);
    }
}

#[test]
fn blinker_has_period_two() {
    let mut grid = Grid::new(7, 7);
    grid.place(BLINKER, 3, 2);

    grid.step();
    assert_eq!(alive_cells(&grid), vec![(2, 3), (3, 3), (4, 3)]);

    grid.step();
    assert_eq!(alive_cells(&grid), vec![(3, 2), (3, 3), (3, 4)]);
}

#[test]
fn glider_translates_every_four_generations() {
    let mut grid = Grid::new(16, 16);
    grid.place(GLIDER, 2, 2);

    let start = alive_cells(&grid);

    for _ in 0..4 {
        grid.step();
    }

    let shifted: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();

    assert_eq!(alive_cells(&grid), shifted);
}

#[test]
fn the_fixed_seed_pattern_fits_the_grid() {
    let mut grid = Grid::new(10, 10);
    grid.place(R_PENTOMINO, 4, 4);

    assert_eq!(alive_cells(&grid).len(), 5);

    // the r-pentomino lives well past a few generations
    for _ in 0..5 {
        assert!(grid.step() > 0);
    }
}

#[test]
fn hand_drawn_cells_join_the_next_generation() {
    let mut grid = Grid::new(7, 7);

    // draw a blinker cell by cell, the way pause-mode clicks do
    grid.toggle(3, 2);
    grid.toggle(3, 3);
    grid.toggle(3, 4);

    // the count still describes the last computed generation
    assert_eq!(grid.alive(), 0);

    assert_eq!(grid.step(), 3);
    assert_eq!(alive_cells(&grid), vec![(2, 3), (3, 3), (4, 3)]);
}

#[test]
fn patterns_at_the_edge_stay_in_bounds() {
    let mut grid = Grid::new(4, 4);

    // blinker flush against the top edge, its vertical phase is clipped
    grid.place(BLINKER, 0, 1);
    grid.step();

    assert_eq!(alive_cells(&grid), vec![(0, 2), (1, 2)]);
}
