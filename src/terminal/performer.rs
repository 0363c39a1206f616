//! Escape sequence dispatch.
//!
//! [`Grid`] implements `vte::Perform` directly: the parser hands over
//! printable characters, C0 controls and complete CSI/ESC sequences, and each
//! one is mapped onto a grid operation here.

use tracing::trace;
use vte::{Params, Perform};

use super::grid::{Charset, Grid};

/// CSI parameters with xterm's defaulting rules (a missing or zero
/// parameter takes the default).
struct Args(Vec<u16>);

impl Args {
    fn new(params: &Params) -> Self {
        Self(params.iter().map(|p| p.first().copied().unwrap_or(0)).collect())
    }

    fn or(&self, index: usize, default: usize) -> usize {
        match self.0.get(index) {
            Some(&0) | None => default,
            Some(&v) => usize::from(v),
        }
    }

    /// Repeat counts default to one.
    fn count(&self) -> usize {
        self.or(0, 1)
    }

    /// Signed repeat count for relative cursor moves.
    fn step(&self) -> isize {
        isize::try_from(self.count()).unwrap_or(isize::MAX)
    }

    /// Erase modes default to zero.
    fn mode(&self) -> u16 {
        self.0.first().copied().unwrap_or(0)
    }

    /// One-indexed coordinate converted to zero-indexed.
    fn coord(&self, index: usize) -> usize {
        self.or(index, 1) - 1
    }
}

impl Perform for Grid {
    fn print(&mut self, c: char) {
        self.put(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' | 0x0b | 0x0c => self.line_feed(),
            b'\r' => self.carriage_return(),
            0x08 => self.backspace(),
            b'\t' => self.tab(),
            0x0e => self.shift(true),
            0x0f => self.shift(false),
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        // DEC private modes (cursor visibility, alternate screen, ...) leave
        // the grid untouched.
        if intermediates.iter().any(|&b| b == b'?' || b == b'<' || b == b'>') {
            return;
        }

        let args = Args::new(params);
        match action {
            'A' => self.shift_cursor(-args.step(), 0),
            'B' | 'e' => self.shift_cursor(args.step(), 0),
            'C' | 'a' => self.shift_cursor(0, args.step()),
            'D' => self.shift_cursor(0, -args.step()),
            'E' => {
                self.shift_cursor(args.step(), 0);
                self.carriage_return();
            }
            'F' => {
                self.shift_cursor(-args.step(), 0);
                self.carriage_return();
            }
            'H' | 'f' => self.goto(Some(args.coord(0)), Some(args.coord(1))),
            'G' | '`' => self.goto(None, Some(args.coord(0))),
            'd' => self.goto(Some(args.coord(0)), None),
            's' => self.save_cursor(),
            'u' => self.restore_cursor(),

            'J' => self.erase_display(args.mode()),
            'K' => self.erase_line(args.mode()),
            'X' => self.erase_chars(args.count()),
            'P' => self.delete_chars(args.count()),
            '@' => self.insert_chars(args.count()),
            'M' => self.delete_lines(args.count()),
            'L' => self.insert_lines(args.count()),

            'm' => self.pen.apply_sgr(&args.0),

            'r' => {
                let bottom = args.or(1, self.height());
                self.set_margins(args.or(0, 1), bottom);
            }
            'S' => self.scroll_up(args.count()),
            'T' => self.scroll_down(args.count()),

            _ => trace!(
                action = %action,
                params = ?args.0,
                intermediates = ?intermediates,
                "Unhandled CSI sequence"
            ),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        if let [slot @ (b'(' | b')')] = intermediates {
            let charset = if byte == b'0' {
                Charset::LineDrawing
            } else {
                Charset::Ascii
            };
            self.designate(usize::from(*slot == b')'), charset);
            return;
        }

        match (intermediates, byte) {
            ([], b'7') => self.save_cursor(),
            ([], b'8') => self.restore_cursor(),
            ([], b'D') => self.line_feed(),
            ([], b'E') => {
                self.line_feed();
                self.carriage_return();
            }
            ([], b'M') => self.reverse_index(),
            ([], b'c') => self.reset(),
            _ => trace!(
                byte = byte,
                byte_char = %char::from(byte),
                intermediates = ?intermediates,
                "Unhandled ESC sequence"
            ),
        }
    }
}
