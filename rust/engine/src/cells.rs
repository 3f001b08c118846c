use serde::{Deserialize, Serialize};

/// Symbol used for an empty cell in the persisted string form.
pub const EMPTY_SYMBOL: char = '-';

/// One of the seven ball colors on the palette.
/// Each color has a fixed single-letter symbol used by the string codec.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    /// Red (R)
    Red,
    /// Green (G)
    Green,
    /// Blue (B)
    Blue,
    /// Yellow (Y)
    Yellow,
    /// Purple (P)
    Purple,
    /// Cyan (C)
    Cyan,
    /// Magenta (M)
    Magenta,
}

impl Color {
    /// The full palette in symbol order `R G B Y P C M`.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Cyan,
        Color::Magenta,
    ];

    pub fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
            Color::Cyan => 'C',
            Color::Magenta => 'M',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            'P' => Some(Color::Purple),
            'C' => Some(Color::Cyan),
            'M' => Some(Color::Magenta),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single grid position: either empty or holding one ball.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Ball(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Ball(color) => Some(color),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Ball(color) => color.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Cell> {
        if symbol == EMPTY_SYMBOL {
            Some(Cell::Empty)
        } else {
            Color::from_symbol(symbol).map(Cell::Ball)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_color_symbol_round_trips() {
        for color in Color::ALL {
            assert_eq!(Color::from_symbol(color.symbol()), Some(color));
        }
    }

    #[test]
    fn palette_symbols_are_distinct() {
        let mut symbols: Vec<char> = Color::ALL.iter().map(|c| c.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), Color::ALL.len());
        assert!(!symbols.contains(&EMPTY_SYMBOL));
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        assert_eq!(Cell::from_symbol('x'), None);
        assert_eq!(Cell::from_symbol('r'), None);
        assert_eq!(Cell::from_symbol('-'), Some(Cell::Empty));
    }
}
