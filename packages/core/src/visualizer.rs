//! Rail Fence pattern visualizer.
//!
//! Documents, without computing, how Rail Fence lays text out: a cursor starts
//! on row 0 moving down and reverses at the top and bottom rails, placing one
//! character per column. Reading the populated cells row by row yields the
//! Rail Fence ciphertext.

use crate::config::Config;
use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;

/// Row index assigned to each column for `len` characters over `rails` rails.
///
/// `rails` must be at least 2.
pub fn zigzag_rows(len: usize, rails: usize) -> impl Iterator<Item = usize> {
    let period = 2 * (rails - 1);
    (0..len).map(move |col| {
        let phase = col % period;
        if phase < rails {
            phase
        } else {
            period - phase
        }
    })
}

/// `rails × len` display grid with exactly one populated cell per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RailFenceGrid {
    rails: usize,
    cells: Vec<Vec<Option<char>>>,
}

impl RailFenceGrid {
    pub fn build(text: &str, rails: usize) -> Result<Self, ValidationError> {
        if rails < 2 {
            return Err(ValidationError::RailCountTooSmall(rails));
        }
        let max = Config::global().max_rails();
        if rails > max {
            return Err(ValidationError::RailCountTooLarge { max });
        }

        let chars: Vec<char> = text.chars().collect();
        let mut cells = vec![vec![None; chars.len()]; rails];
        for (col, row) in zigzag_rows(chars.len(), rails).enumerate() {
            cells[row][col] = Some(chars[col]);
        }

        Ok(Self { rails, cells })
    }

    pub fn rails(&self) -> usize {
        self.rails
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Option<char>>] {
        &self.cells
    }

    /// Populated cells read row by row, left to right.
    pub fn read_rows(&self) -> String {
        self.cells.iter().flatten().flatten().collect()
    }

    /// One line per rail, empty cells rendered as spaces.
    pub fn render(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.unwrap_or(' ')).collect())
            .collect()
    }
}

impl fmt::Display for RailFenceGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
