//! Console colours.
//!
//! The editor only paints with the eight basic ANSI colours, so a colour is
//! one of those or the terminal's own default.

/// A basic ANSI colour or the terminal default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// All named colours in ANSI index order.
    pub const NAMED: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// ANSI palette index (0-7), `None` for the terminal default.
    #[must_use]
    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Default => None,
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::White => Some(7),
        }
    }

    /// SGR parameter selecting this colour as foreground.
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self.index() {
            Some(i) => 30 + i,
            None => 39,
        }
    }

    /// SGR parameter selecting this colour as background.
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        match self.index() {
            Some(i) => 40 + i,
            None => 49,
        }
    }
}
