//! Palette mapping screen color indices to SGR foreground codes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, Result};

/// Number of palette slots the emulator produces.
pub const PALETTE_SIZE: usize = 16;

/// SGR codes for the sixteen screen colors.
///
/// Slot 0 is what the emulator reports for the terminal's default
/// foreground, so the built-in palette maps it to `39` rather than black.
/// Slots 8..16 are the bright variants used for bold text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                39, 31, 32, 33, 34, 35, 36, 37, 90, 91, 92, 93, 94, 95, 96, 97,
            ],
        }
    }
}

impl Palette {
    /// Read a palette file of the form `colors = [39, 31, ...]`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReplayError::MissingAsset {
            path: path.to_path_buf(),
            what: format!("color palette: {}", e),
        })?;
        let palette: Palette = toml::from_str(&content).map_err(|e| ReplayError::MissingAsset {
            path: path.to_path_buf(),
            what: format!("color palette: {}", e.message()),
        })?;
        if palette.colors.len() != PALETTE_SIZE {
            return Err(ReplayError::MissingAsset {
                path: path.to_path_buf(),
                what: format!(
                    "color palette needs {} entries, found {}",
                    PALETTE_SIZE,
                    palette.colors.len()
                ),
            });
        }
        Ok(palette)
    }

    /// SGR code for a screen color index. Out-of-range indices use slot 0.
    pub fn code(&self, index: i8) -> u8 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.colors.get(i))
            .or_else(|| self.colors.first())
            .copied()
            .unwrap_or(39)
    }

    /// Write one row with color changes as SGR sequences.
    ///
    /// Trailing blanks are dropped and the row always ends reset, so rows can
    /// be concatenated freely.
    pub fn write_row(&self, chars: &[u8], colors: &[i8], out: &mut impl Write) -> io::Result<()> {
        let end = chars
            .iter()
            .rposition(|&c| c != b' ' && c != 0)
            .map_or(0, |i| i + 1);
        if end == 0 {
            return Ok(());
        }

        let mut line = String::with_capacity(end * 2);
        let mut current = None;
        for (&ch, &color) in chars[..end].iter().zip(colors) {
            let code = self.code(color);
            if current != Some(code) {
                line.push_str(&format!("\x1b[{}m", code));
                current = Some(code);
            }
            line.push(if ch == 0 { ' ' } else { ch as char });
        }
        line.push_str("\x1b[0m");
        out.write_all(line.as_bytes())
    }
}
