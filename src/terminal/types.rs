//! Terminal data types.
//!
//! - Color: ANSI color codes as emitted by the game (16 colors plus extended forms)
//! - CellStyle: the attributes that influence the recorded palette index
//!   (foreground color and bold; backgrounds never reach a frame)
//! - Cell: a single character with its style

/// ANSI color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 256-color palette index
    Indexed(u8),
    /// RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Map a 16-color palette index back to a color.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            7 => Color::White,
            8 => Color::BrightBlack,
            9 => Color::BrightRed,
            10 => Color::BrightGreen,
            11 => Color::BrightYellow,
            12 => Color::BrightBlue,
            13 => Color::BrightMagenta,
            14 => Color::BrightCyan,
            15 => Color::BrightWhite,
            n => Color::Indexed(n),
        }
    }

    /// Palette index in 0..16, or `None` for the terminal default.
    ///
    /// Extended colors outside the first 16 entries collapse to 7 (gray).
    pub fn palette_index(self) -> Option<u8> {
        let index = match self {
            Color::Default => return None,
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
            Color::BrightBlack => 8,
            Color::BrightRed => 9,
            Color::BrightGreen => 10,
            Color::BrightYellow => 11,
            Color::BrightBlue => 12,
            Color::BrightMagenta => 13,
            Color::BrightCyan => 14,
            Color::BrightWhite => 15,
            Color::Indexed(n) if n < 16 => n,
            Color::Indexed(_) | Color::Rgb(..) => 7,
        };
        Some(index)
    }
}

/// Style attributes for a terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bold: bool,
}

impl CellStyle {
    /// Foreground palette index as stored in a frame's color grid.
    ///
    /// The default foreground is 0. Bold lifts a base color into the bright
    /// half of the palette, the way the game's curses output renders it.
    pub fn palette_index(&self) -> i8 {
        match self.fg.palette_index() {
            None if self.bold => 8,
            None => 0,
            Some(n) if self.bold && n < 8 => (n + 8) as i8,
            Some(n) => n as i8,
        }
    }
}

/// A single cell in the terminal buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub style: CellStyle,
}

impl Cell {
    /// The cell's character as a Latin-1 byte; anything wider becomes `?`.
    pub fn byte(&self) -> u8 {
        u8::try_from(u32::from(self.char)).unwrap_or(b'?')
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            style: CellStyle::default(),
        }
    }
}
