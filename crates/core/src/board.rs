//! Board module - manages the 4x4 tile grid
//!
//! The board is a 4x4 grid where each cell is empty or holds a power of two.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..3 (left to right), y ranges 0..3 (top to bottom).
//!
//! Every move is expressed as "rotate clockwise, push left, rotate back", so
//! the merge rules exist exactly once, in [`push_row_left`].

use arrayvec::ArrayVec;

use crate::types::{is_tile_value, Cell, Direction, BOARD_SIDE, CELL_COUNT};

/// Where each cell lands after one 90° clockwise turn.
///
/// `(x, y)` moves to `(3 - y, x)`, i.e. index `i = x + 4y` goes to
/// `ROTATE_CW[i] = (3 - y) + 4x`.
pub const ROTATE_CW: [usize; CELL_COUNT] = [3, 7, 11, 15, 2, 6, 10, 14, 1, 5, 9, 13, 0, 4, 8, 12];

/// The game board - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * SIDE + x)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Create from a flat row-major array
    ///
    /// Values are taken as given; see [`Board::is_valid`].
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Create from rows of raw values, `0` meaning empty
    ///
    /// ```
    /// use tui_2048_core::Board;
    ///
    /// let board = Board::from_rows([
    ///     [2, 0, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 4, 0],
    ///     [0, 0, 0, 0],
    /// ]);
    /// assert_eq!(board.get(0, 0), Some(Some(2)));
    /// assert_eq!(board.get(2, 2), Some(Some(4)));
    /// assert_eq!(board.get(1, 0), Some(None));
    /// ```
    pub fn from_rows(rows: [[u32; BOARD_SIDE]; BOARD_SIDE]) -> Self {
        let mut cells = [None; CELL_COUNT];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y * BOARD_SIDE + x] = (v != 0).then_some(v);
            }
        }
        Self { cells }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_SIDE as i8 || y < 0 || y >= BOARD_SIDE as i8 {
            return None;
        }
        Some((y as usize) * BOARD_SIDE + (x as usize))
    }

    /// Get cell at position (x, y)
    ///
    /// Returns None if out of bounds, `Some(None)` for an empty cell.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or the value is not a tile
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => self.set_index(idx, cell),
            None => false,
        }
    }

    /// Set cell by flat index
    /// Returns false if out of bounds or the value is not a tile
    pub fn set_index(&mut self, idx: usize, cell: Cell) -> bool {
        if cell.is_some_and(|v| !is_tile_value(v)) {
            return false;
        }
        match self.cells.get_mut(idx) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Every occupied cell holds `2^k` with `k >= 1`
    pub fn is_valid(&self) -> bool {
        self.cells.iter().flatten().all(|&v| is_tile_value(v))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    /// Flat indices of all empty cells, in index order
    pub fn empty_cells(&self) -> ArrayVec<usize, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of occupied cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    /// One 90° clockwise turn
    pub fn rotated_cw(&self) -> Self {
        let mut out = [None; CELL_COUNT];
        for (from, &to) in ROTATE_CW.iter().enumerate() {
            out[to] = self.cells[from];
        }
        Self { cells: out }
    }

    /// `times` clockwise turns (taken mod 4)
    pub fn rotated(&self, times: u8) -> Self {
        let mut board = *self;
        for _ in 0..times % 4 {
            board = board.rotated_cw();
        }
        board
    }

    /// Push every row toward the left edge, returning the merge score
    pub fn push_left(&mut self) -> u32 {
        let mut score: u32 = 0;
        for row in self.cells.chunks_exact_mut(BOARD_SIDE) {
            score = score.saturating_add(push_row_left(row));
        }
        score
    }

    /// Candidate board and score for a push in `direction`
    ///
    /// The receiver is untouched; callers compare the candidate with the
    /// current board to decide whether the move does anything.
    pub fn shifted(&self, direction: Direction) -> (Self, u32) {
        let mut turned = self.rotated(direction.rotations());
        let score = turned.push_left();
        (turned.rotated(direction.inverse_rotations()), score)
    }

    /// Would a push in `direction` change any cell?
    pub fn can_shift(&self, direction: Direction) -> bool {
        let mut turned = self.rotated(direction.rotations());
        let before = turned;
        turned.push_left();
        turned != before
    }

    /// True iff at least one direction changes the board
    pub fn has_moves(&self) -> bool {
        Direction::ALL.iter().any(|&d| self.can_shift(d))
    }

    /// Write values into a grid of raw u32 (0 = empty)
    pub fn write_u32_grid(&self, out: &mut [[u32; BOARD_SIDE]; BOARD_SIDE]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * BOARD_SIDE + x].unwrap_or(0);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Slide and merge one row toward index 0, returning the merge score
///
/// A write cursor walks the row. An empty slot pulls in the next tile to its
/// right and is examined again; an occupied slot merges with the next tile to
/// its right only if the values match, then the cursor advances. The cursor
/// never revisits a slot, so a merged tile cannot merge twice in one push.
/// A pair whose sum does not fit in a `u32` stays apart, and the returned
/// score saturates.
///
/// ```
/// use tui_2048_core::board::push_row_left;
///
/// let mut row = [Some(2), Some(2), Some(2), Some(2)];
/// assert_eq!(push_row_left(&mut row), 8);
/// assert_eq!(row, [Some(4), Some(4), None, None]);
/// ```
pub fn push_row_left(row: &mut [Cell]) -> u32 {
    let mut score: u32 = 0;
    let mut idx = 0;

    while idx < row.len() {
        let next = (idx + 1..row.len()).find(|&i| row[i].is_some());

        match (row[idx], next) {
            (None, Some(src)) => {
                let tile = row[src].take();
                row[idx] = tile;
            }
            (None, None) => break,
            (Some(v), Some(src)) => {
                if row[src] == Some(v) {
                    if let Some(merged) = v.checked_mul(2) {
                        row[idx] = Some(merged);
                        row[src] = None;
                        score = score.saturating_add(merged);
                    }
                }
                idx += 1;
            }
            (Some(_), None) => idx += 1,
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(values: [u32; 4]) -> [Cell; 4] {
        values.map(|v| (v != 0).then_some(v))
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(3, 0), Some(3));
        assert_eq!(Board::index(0, 1), Some(4));
        assert_eq!(Board::index(3, 3), Some(15));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(4, 0), None);
        assert_eq!(Board::index(0, 4), None);
    }

    #[test]
    fn test_rotation_table_is_permutation() {
        let mut seen = [false; CELL_COUNT];
        for &to in ROTATE_CW.iter() {
            assert!(!seen[to], "index {} hit twice", to);
            seen[to] = true;
        }
    }

    #[test]
    fn test_rotate_cw_moves_left_column_to_top_row() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [4, 0, 0, 0],
            [8, 0, 0, 0],
            [16, 0, 0, 0],
        ]);
        let turned = board.rotated_cw();
        let expected = Board::from_rows([
            [16, 8, 4, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert_eq!(turned, expected);
    }

    #[test]
    fn test_push_row_compacts_gaps() {
        let mut r = row([0, 2, 0, 4]);
        assert_eq!(push_row_left(&mut r), 0);
        assert_eq!(r, row([2, 4, 0, 0]));
    }

    #[test]
    fn test_push_row_merge_then_slide() {
        let mut r = row([2, 2, 4, 0]);
        assert_eq!(push_row_left(&mut r), 4);
        assert_eq!(r, row([4, 4, 0, 0]));
    }

    #[test]
    fn test_push_row_pairs_merge_once() {
        let mut r = row([2, 2, 2, 2]);
        assert_eq!(push_row_left(&mut r), 8);
        assert_eq!(r, row([4, 4, 0, 0]));
    }

    #[test]
    fn test_push_row_merges_across_gap() {
        let mut r = row([2, 0, 0, 2]);
        assert_eq!(push_row_left(&mut r), 4);
        assert_eq!(r, row([4, 0, 0, 0]));
    }

    #[test]
    fn test_push_row_merged_tile_does_not_merge_again() {
        let mut r = row([2, 0, 2, 4]);
        assert_eq!(push_row_left(&mut r), 4);
        assert_eq!(r, row([4, 4, 0, 0]));

        let mut r = row([4, 4, 8, 0]);
        assert_eq!(push_row_left(&mut r), 8);
        assert_eq!(r, row([8, 8, 0, 0]));
    }

    #[test]
    fn test_push_row_different_values_block() {
        let mut r = row([2, 4, 2, 4]);
        assert_eq!(push_row_left(&mut r), 0);
        assert_eq!(r, row([2, 4, 2, 4]));
    }

    #[test]
    fn test_push_row_three_equal() {
        let mut r = row([8, 8, 8, 0]);
        assert_eq!(push_row_left(&mut r), 16);
        assert_eq!(r, row([16, 8, 0, 0]));
    }

    #[test]
    fn test_shift_each_direction() {
        let board = Board::from_rows([
            [2, 0, 0, 2],
            [0, 0, 0, 0],
            [0, 4, 0, 0],
            [0, 4, 0, 0],
        ]);

        let (left, s) = board.shifted(Direction::Left);
        assert_eq!(s, 4);
        assert_eq!(
            left,
            Board::from_rows([[4, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0]])
        );

        let (right, s) = board.shifted(Direction::Right);
        assert_eq!(s, 4);
        assert_eq!(
            right,
            Board::from_rows([[0, 0, 0, 4], [0, 0, 0, 0], [0, 0, 0, 4], [0, 0, 0, 4]])
        );

        let (up, s) = board.shifted(Direction::Up);
        assert_eq!(s, 8);
        assert_eq!(
            up,
            Board::from_rows([[2, 8, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
        );

        let (down, s) = board.shifted(Direction::Down);
        assert_eq!(s, 8);
        assert_eq!(
            down,
            Board::from_rows([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 8, 0, 2]])
        );
    }

    #[test]
    fn test_can_shift_matches_shifted() {
        let board = Board::from_rows([
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert!(!board.can_shift(Direction::Left));
        assert!(!board.can_shift(Direction::Right));
        assert!(!board.can_shift(Direction::Up));
        assert!(board.can_shift(Direction::Down));
    }

    #[test]
    fn test_full_board_without_pairs_is_stuck() {
        let board = Board::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(board.empty_cells().is_empty());
        assert!(!board.has_moves());
    }

    #[test]
    fn test_full_board_with_vertical_pair_has_move() {
        let board = Board::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 8],
            [4, 2, 4, 8],
        ]);
        assert!(board.has_moves());
        assert!(board.can_shift(Direction::Up));
        assert!(board.can_shift(Direction::Down));
        assert!(!board.can_shift(Direction::Left));
        assert!(!board.can_shift(Direction::Right));
    }

    #[test]
    fn test_empty_cells_and_counts() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 128],
        ]);
        let empties = board.empty_cells();
        assert_eq!(empties.len(), 14);
        assert!(!empties.contains(&0));
        assert!(!empties.contains(&15));
        assert_eq!(board.tile_count(), 2);
        assert_eq!(board.max_tile(), 128);
        assert_eq!(board.tile_sum(), 130);
    }

    #[test]
    fn test_write_u32_grid() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [0, 4, 0, 0],
            [0, 0, 8, 0],
            [0, 0, 0, 16],
        ]);
        let mut grid = [[9u32; 4]; 4];
        board.write_u32_grid(&mut grid);
        assert_eq!(grid, [[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 8, 0], [0, 0, 0, 16]]);
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let top = 1u32 << 31;
        let board = Board::from_rows([[top, top, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(board.is_valid());
        assert!(!board.can_shift(Direction::Left));

        let (left, score) = board.shifted(Direction::Left);
        assert_eq!(score, 0);
        assert_eq!(left, board);

        let (right, score) = board.shifted(Direction::Right);
        assert_eq!(score, 0);
        assert_eq!(
            right,
            Board::from_rows([[0, 0, top, top], [0; 4], [0; 4], [0; 4]])
        );
    }

    #[test]
    fn test_merge_into_largest_tile() {
        let half = 1u32 << 30;
        let mut r = row([half, half, 0, 0]);
        assert_eq!(push_row_left(&mut r), 1 << 31);
        assert_eq!(r, row([1 << 31, 0, 0, 0]));
    }

    #[test]
    fn test_merge_score_saturates() {
        let half = 1u32 << 30;
        let mut r = row([half; 4]);
        assert_eq!(push_row_left(&mut r), u32::MAX);
        assert_eq!(r, row([1 << 31, 1 << 31, 0, 0]));

        let mut board = Board::from_rows([[half; 4], [half; 4], [0; 4], [0; 4]]);
        assert_eq!(board.push_left(), u32::MAX);
    }

    #[test]
    fn test_set_rejects_non_tiles() {
        let mut board = Board::new();
        assert!(!board.set(0, 0, Some(3)));
        assert!(!board.set(0, 0, Some(1)));
        assert!(!board.set_index(5, Some(0)));
        assert!(!board.set(4, 0, Some(2)));
        assert_eq!(board, Board::new());

        assert!(board.set(0, 0, Some(2)));
        assert!(board.set_index(5, Some(1 << 31)));
        assert!(board.set(0, 0, None));
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn test_is_valid() {
        assert!(Board::new().is_valid());
        assert!(Board::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]).is_valid());
        assert!(!Board::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_valid());
        assert!(!Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_valid());

        let mut cells = [None; CELL_COUNT];
        cells[7] = Some(0);
        assert!(!Board::from_cells(cells).is_valid());
    }

    fn arb_cell() -> impl Strategy<Value = Cell> {
        prop_oneof![Just(None), (1u32..=11).prop_map(|k| Some(1u32 << k))]
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        proptest::array::uniform16(arb_cell()).prop_map(Board::from_cells)
    }

    proptest! {
        #[test]
        fn prop_four_rotations_are_identity(board in arb_board()) {
            prop_assert_eq!(board.rotated(4), board);
            prop_assert_eq!(board.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), board);
        }

        #[test]
        fn prop_push_left_is_idempotent_once_settled(board in arb_board()) {
            // Every scoring push removes a tile, so this settles quickly.
            let mut settled = board;
            while settled.push_left() != 0 {}
            let mut again = settled;
            prop_assert_eq!(again.push_left(), 0);
            prop_assert_eq!(again, settled);
        }

        #[test]
        fn prop_shift_conserves_tile_sum(board in arb_board(), d in 0usize..4) {
            let (next, _) = board.shifted(Direction::ALL[d]);
            prop_assert_eq!(next.tile_sum(), board.tile_sum());
            prop_assert!(next.tile_count() <= board.tile_count());
        }

        #[test]
        fn prop_any_tile_size_shifts_without_overflow(
            cells in proptest::array::uniform16(
                prop_oneof![Just(None), (1u32..=31).prop_map(|k| Some(1u32 << k))]
            ),
            d in 0usize..4,
        ) {
            let board = Board::from_cells(cells);
            let (next, _) = board.shifted(Direction::ALL[d]);
            prop_assert!(next.is_valid());
            prop_assert!(next.tile_count() <= board.tile_count());
            prop_assert_eq!(next.tile_sum(), board.tile_sum());
        }

        #[test]
        fn prop_score_counts_merged_tiles(board in arb_board(), d in 0usize..4) {
            // Each merge removes one tile and scores the doubled value, which is
            // at least 4, so the score is zero exactly when nothing merged.
            let (next, score) = board.shifted(Direction::ALL[d]);
            let merges = board.tile_count() - next.tile_count();
            prop_assert_eq!(score == 0, merges == 0);
            prop_assert!(score as usize >= merges * 4);
        }
    }
}
