//! Parsing of interactive `play` input.
//!
//! A move is two cells, written either as `row,col row,col` or as two
//! linear indices `from to`. Range checks happen here so the engine only
//! ever sees indices on the board; occupancy and reachability remain the
//! engine's call.

use line98_engine::grid::{to_index, BOARD_SIZE, TOTAL_CELLS};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    Move { from: usize, to: usize },
    /// `h` or `hint`
    Hint,
    /// `q` or `quit`
    Quit,
    Invalid(String),
}

/// Parses one line typed at the `play` prompt.
///
/// ```rust
/// # use line98_cli::validation::{parse_play_input, ParseResult};
/// assert_eq!(parse_play_input("0,3 0,4"), ParseResult::Move { from: 3, to: 4 });
/// assert_eq!(parse_play_input("3 4"), ParseResult::Move { from: 3, to: 4 });
/// assert_eq!(parse_play_input("HINT"), ParseResult::Hint);
/// assert_eq!(parse_play_input("q"), ParseResult::Quit);
/// assert!(matches!(parse_play_input("9,0 0,0"), ParseResult::Invalid(_)));
/// ```
pub fn parse_play_input(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    match parts.as_slice() {
        [] => ParseResult::Invalid("Empty input".to_string()),
        ["h"] | ["hint"] => ParseResult::Hint,
        ["q"] | ["quit"] => ParseResult::Quit,
        [from, to] => match (parse_cell(from), parse_cell(to)) {
            (Ok(from), Ok(to)) => ParseResult::Move { from, to },
            (Err(msg), _) | (_, Err(msg)) => ParseResult::Invalid(msg),
        },
        _ => ParseResult::Invalid(format!(
            "Unrecognized input '{}'. Use 'r,c r,c', 'from to', 'hint' or 'quit'",
            input
        )),
    }
}

/// A single cell as `row,col` or as a linear index.
pub fn parse_cell(token: &str) -> Result<usize, String> {
    if let Some((row, col)) = token.split_once(',') {
        let row = parse_axis(row, "row")?;
        let col = parse_axis(col, "column")?;
        return Ok(to_index(row, col));
    }
    let index: usize = token
        .parse()
        .map_err(|_| format!("'{}' is not a cell; use row,col or an index", token))?;
    if index >= TOTAL_CELLS {
        return Err(format!(
            "Index {} out of range (0-{})",
            index,
            TOTAL_CELLS - 1
        ));
    }
    Ok(index)
}

fn parse_axis(value: &str, name: &str) -> Result<usize, String> {
    let n: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {} '{}'", name, value))?;
    if n >= BOARD_SIZE {
        return Err(format!(
            "{} {} out of range (0-{})",
            name,
            n,
            BOARD_SIZE - 1
        ));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_and_indices_agree() {
        assert_eq!(
            parse_play_input("8,8 0,0"),
            ParseResult::Move { from: 80, to: 0 }
        );
        assert_eq!(
            parse_play_input("80 0"),
            ParseResult::Move { from: 80, to: 0 }
        );
        assert_eq!(
            parse_play_input("  2,1   40 "),
            ParseResult::Move { from: 19, to: 40 }
        );
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_play_input("H"), ParseResult::Hint);
        assert_eq!(parse_play_input("Quit"), ParseResult::Quit);
    }

    #[test]
    fn out_of_range_cells() {
        assert!(matches!(parse_play_input("81 0"), ParseResult::Invalid(m) if m.contains("out of range")));
        assert!(matches!(parse_play_input("0,9 0,0"), ParseResult::Invalid(m) if m.contains("column")));
        assert!(matches!(parse_play_input("0,0 -1,0"), ParseResult::Invalid(_)));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(
            parse_play_input(""),
            ParseResult::Invalid("Empty input".to_string())
        );
        assert!(matches!(parse_play_input("move 1 2"), ParseResult::Invalid(m) if m.contains("Unrecognized")));
        assert!(matches!(parse_play_input("a b"), ParseResult::Invalid(m) if m.contains("not a cell")));
        assert!(matches!(parse_play_input("4"), ParseResult::Invalid(_)));
    }
}
