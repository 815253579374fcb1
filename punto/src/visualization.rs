use crate::{Board, GRID_HEIGHT, GRID_WIDTH};

/// Renders the board as a grid with column and row indices.
///
/// Indices outside of the outer bounds are replaced by `·`, since no card can
/// be played in those columns/rows anymore. Empty cells inside of the inner
/// bounds are drawn as `.`, cards as owner letter + value (e.g. `B7`).
pub fn visualize_board(board: &Board) -> String {
    let outer = board.outer_bounds();
    let inner = board.inner_bounds();

    // Column indices above the box
    let mut result = String::from("    ");
    for x in 0..GRID_WIDTH {
        if outer.contains_x(x) {
            result += &format!("{:>3}", x);
        } else {
            result += "  ·";
        }
    }
    result += "\n    ╭";
    for _ in 0..GRID_WIDTH {
        result += "───";
    }
    result += "─╮\n";

    for y in 0..GRID_HEIGHT {
        if outer.contains_y(y) {
            result += &format!("{:>3} │", y);
        } else {
            result += "  · │";
        }
        for x in 0..GRID_WIDTH {
            match board.card(x, y) {
                Some(card) => result += &format!("{:>3}", card.to_string()),
                None if inner.contains(x, y) => result += "  .",
                None => result += "   ",
            }
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..GRID_WIDTH {
        result += "───";
    }
    result += "─╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    #[test]
    fn renders_seed_card_and_inner_bounds() {
        let mut board = Board::new(card!("A5"));
        board.play(card!("B7"), 6, 5).unwrap();
        let rendered = visualize_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        // Header, top border, 11 rows, bottom border
        assert_eq!(lines.len(), 14);
        let row_5 = lines[2 + 5];
        assert!(row_5.starts_with("  5 │"));
        assert!(row_5.contains(" A5 B7  ."));
        // The outer bounds shrank to x >= 1 after playing at x = 6
        assert!(lines[0].starts_with("      ·  1"));
        assert_eq!(board.to_string(), rendered);
    }
}
