use super::keyword;
use cipherbench_core::crypto::provider::{TextKey, TextPrimitive};
use cipherbench_core::ProviderError;

/// 5×5 key square over A–Z with J folded into I.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySquare {
    cells: [u8; 25],
}

impl KeySquare {
    pub fn new(keyword: &str) -> Self {
        let mut seen = [false; 26];
        let mut cells = [0u8; 25];
        let mut filled = 0;

        let letters = keyword
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| fold_j(b.to_ascii_uppercase()))
            .chain((b'A'..=b'Z').filter(|&b| b != b'J'));

        for letter in letters {
            let slot = &mut seen[(letter - b'A') as usize];
            if !*slot {
                *slot = true;
                cells[filled] = letter;
                filled += 1;
            }
        }

        Self { cells }
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * 5..row * 5 + 5]
    }

    fn position(&self, letter: u8) -> (usize, usize) {
        let index = self
            .cells
            .iter()
            .position(|&c| c == letter)
            .unwrap_or_default();
        (index / 5, index % 5)
    }

    fn at(&self, row: usize, col: usize) -> u8 {
        self.cells[row * 5 + col]
    }
}

fn fold_j(letter: u8) -> u8 {
    if letter == b'J' {
        b'I'
    } else {
        letter
    }
}

/// Uppercases, drops non-letters, folds J, splits doubled pairs with `X`
/// and pads odd length with `X`.
pub fn prepare(text: &str) -> Vec<u8> {
    let mut prepared: Vec<u8> = text
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| fold_j(b.to_ascii_uppercase()))
        .collect();

    let mut i = 0;
    while i + 1 < prepared.len() {
        if prepared[i] == prepared[i + 1] {
            prepared.insert(i + 1, b'X');
        }
        i += 2;
    }

    if prepared.len() % 2 != 0 {
        prepared.push(b'X');
    }
    prepared
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Playfair;

impl Playfair {
    fn process(text: &str, key: &str, encrypt: bool) -> String {
        let square = KeySquare::new(key);
        // +1 to move right/down, +4 ≡ -1 to move left/up.
        let step = if encrypt { 1 } else { 4 };

        let mut result = String::with_capacity(text.len() + 1);
        for pair in prepare(text).chunks_exact(2) {
            let (r1, c1) = square.position(pair[0]);
            let (r2, c2) = square.position(pair[1]);

            let (a, b) = if r1 == r2 {
                (square.at(r1, (c1 + step) % 5), square.at(r2, (c2 + step) % 5))
            } else if c1 == c2 {
                (square.at((r1 + step) % 5, c1), square.at((r2 + step) % 5, c2))
            } else {
                (square.at(r1, c2), square.at(r2, c1))
            };
            result.push(a as char);
            result.push(b as char);
        }
        result
    }
}

impl TextPrimitive for Playfair {
    fn encrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        Ok(Self::process(text, keyword(key)?, true))
    }

    fn decrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        Ok(Self::process(text, keyword(key)?, false))
    }
}
