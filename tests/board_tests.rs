//! Board engine tests: rotation table, push-left and move detection.

use tui_2048::core::{push_row_left, Board, ROTATE_CW};
use tui_2048::types::{Cell, Direction, BOARD_SIDE};

fn row(values: [u32; 4]) -> [Cell; 4] {
    values.map(|v| (v != 0).then_some(v))
}

fn push(values: [u32; 4]) -> ([Cell; 4], u32) {
    let mut r = row(values);
    let score = push_row_left(&mut r);
    (r, score)
}

fn grid(board: &Board) -> [[u32; BOARD_SIDE]; BOARD_SIDE] {
    let mut out = [[0; BOARD_SIDE]; BOARD_SIDE];
    board.write_u32_grid(&mut out);
    out
}

#[test]
fn test_push_examples() {
    assert_eq!(push([2, 2, 4, 0]), (row([4, 4, 0, 0]), 4));
    assert_eq!(push([2, 2, 2, 2]), (row([4, 4, 0, 0]), 8));
    assert_eq!(push([0, 0, 0, 2]), (row([2, 0, 0, 0]), 0));
    assert_eq!(push([2, 0, 0, 2]), (row([4, 0, 0, 0]), 4));
    assert_eq!(push([4, 4, 8, 8]), (row([8, 16, 0, 0]), 24));
    assert_eq!(push([2, 4, 8, 16]), (row([2, 4, 8, 16]), 0));
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    // 4+4 must not cascade into the following 8.
    assert_eq!(push([4, 4, 8, 0]), (row([8, 8, 0, 0]), 8));
    assert_eq!(push([8, 4, 4, 0]), (row([8, 8, 0, 0]), 8));
}

#[test]
fn test_push_is_idempotent_on_packed_row() {
    let (once, _) = push([2, 2, 8, 16]);
    assert_eq!(once, row([4, 8, 16, 0]));
    let mut twice = once;
    assert_eq!(push_row_left(&mut twice), 0);
    assert_eq!(once, twice);
}

#[test]
fn test_rotation_table_matches_formula() {
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(ROTATE_CW[x + 4 * y], (3 - y) + 4 * x);
        }
    }
}

#[test]
fn test_rotation_has_order_four() {
    let board = Board::from_rows([
        [2, 0, 0, 4],
        [0, 8, 0, 0],
        [0, 0, 16, 0],
        [32, 0, 0, 64],
    ]);
    assert_ne!(board.rotated_cw(), board);
    assert_eq!(board.rotated(4), board);
    assert_eq!(board.rotated_cw().rotated(3), board);
}

#[test]
fn test_every_direction() {
    let board = Board::from_rows([
        [2, 0, 2, 0],
        [0, 0, 0, 0],
        [0, 4, 0, 0],
        [0, 4, 0, 0],
    ]);

    let (left, score) = board.shifted(Direction::Left);
    assert_eq!(score, 4);
    assert_eq!(
        grid(&left),
        [[4, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0]]
    );

    let (right, _) = board.shifted(Direction::Right);
    assert_eq!(
        grid(&right),
        [[0, 0, 0, 4], [0, 0, 0, 0], [0, 0, 0, 4], [0, 0, 0, 4]]
    );

    let (up, score) = board.shifted(Direction::Up);
    assert_eq!(score, 8);
    assert_eq!(
        grid(&up),
        [[2, 8, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
    );

    let (down, score) = board.shifted(Direction::Down);
    assert_eq!(score, 8);
    assert_eq!(
        grid(&down),
        [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 8, 2, 0]]
    );
}

#[test]
fn test_stuck_and_almost_stuck_boards() {
    let stuck = Board::from_rows([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    assert!(!stuck.has_moves());
    for dir in Direction::ALL {
        assert!(!stuck.can_shift(dir));
    }

    let one_pair = Board::from_rows([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [8, 16, 8, 8],
    ]);
    assert!(one_pair.has_moves());
    assert!(one_pair.can_shift(Direction::Left));
    assert!(one_pair.can_shift(Direction::Right));
    assert!(!one_pair.can_shift(Direction::Up));
    assert!(!one_pair.can_shift(Direction::Down));

    let mut with_gap = stuck;
    with_gap.set(1, 1, None);
    assert!(with_gap.has_moves());
}

#[test]
fn test_out_of_range_reads_are_absent() {
    let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    assert_eq!(board.get(0, 0), Some(Some(2)));
    assert_eq!(board.get(1, 0), Some(None));
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, 4), None);
}
