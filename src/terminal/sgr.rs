//! SGR (CSI m) parsing.
//!
//! Only the attributes that end up in a frame's palette index are tracked:
//! the foreground color and bold. Everything else (backgrounds, dim,
//! reverse, underline, blink) is accepted and dropped.

use std::slice::Iter;

use super::types::{CellStyle, Color};

impl CellStyle {
    /// Apply one SGR parameter list to this style.
    pub(crate) fn apply_sgr(&mut self, params: &[u16]) {
        // bare "CSI m" is a reset
        if params.is_empty() {
            *self = CellStyle::default();
            return;
        }

        let mut iter = params.iter();
        while let Some(&param) = iter.next() {
            match param {
                0 => *self = CellStyle::default(),
                1 => self.bold = true,
                22 => self.bold = false,
                30..=37 => self.fg = Color::from_index((param - 30) as u8),
                39 => self.fg = Color::Default,
                90..=97 => self.fg = Color::from_index((param - 82) as u8),
                38 => {
                    if let Some(color) = extended_color(&mut iter) {
                        self.fg = color;
                    }
                }
                // background colors still carry parameters to skip
                48 => {
                    extended_color(&mut iter);
                }
                _ => {}
            }
        }
    }
}

/// The tail of a 38/48 sequence: `5;n` (256-color) or `2;r;g;b`.
fn extended_color(iter: &mut Iter<'_, u16>) -> Option<Color> {
    let mut channel = || iter.next().map_or(0, |&v| v as u8);
    match channel() {
        5 => Some(Color::Indexed(channel())),
        2 => Some(Color::Rgb(channel(), channel(), channel())),
        _ => None,
    }
}
