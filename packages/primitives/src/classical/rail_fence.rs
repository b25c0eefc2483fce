use cipherbench_core::crypto::provider::{TextKey, TextPrimitive};
use cipherbench_core::ProviderError;

/// Zigzag transposition over `rails` rows, operating on characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RailFence;

/// Rail of each position: start on rail 0 going down, bounce at either end.
fn rail_sequence(len: usize, rails: usize) -> Vec<usize> {
    let mut sequence = Vec::with_capacity(len);
    let mut row = 0usize;
    let mut down = true;
    for _ in 0..len {
        sequence.push(row);
        if row == rails - 1 {
            down = false;
        } else if row == 0 {
            down = true;
        }
        if down {
            row += 1;
        } else {
            row -= 1;
        }
    }
    sequence
}

/// More rails than characters never bounce, so `len` rails lay text out the same.
fn effective_rails(rails: usize, len: usize) -> usize {
    rails.min(len.max(2))
}

fn rails(key: TextKey<'_>) -> Result<usize, ProviderError> {
    match key {
        TextKey::Rails(rails) if rails >= 2 => Ok(rails),
        TextKey::Rails(rails) => Err(ProviderError::InvalidInput(format!(
            "Rail count must be at least 2, got {}",
            rails
        ))),
        TextKey::Keyword(_) => Err(ProviderError::InvalidInput(
            "Expected a rail count, got a keyword".to_string(),
        )),
    }
}

impl TextPrimitive for RailFence {
    fn encrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        let chars: Vec<char> = text.chars().collect();
        let rails = effective_rails(rails(key)?, chars.len());

        let mut fence = vec![String::new(); rails];
        for (c, row) in chars.iter().zip(rail_sequence(chars.len(), rails)) {
            fence[row].push(*c);
        }
        Ok(fence.concat())
    }

    fn decrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        let chars: Vec<char> = text.chars().collect();
        let rails = effective_rails(rails(key)?, chars.len());
        let sequence = rail_sequence(chars.len(), rails);

        // Cut the ciphertext into rails of the lengths the zigzag produces.
        let mut lengths = vec![0usize; rails];
        for &row in &sequence {
            lengths[row] += 1;
        }
        let mut fence: Vec<std::slice::Iter<'_, char>> = Vec::with_capacity(rails);
        let mut offset = 0;
        for len in lengths {
            fence.push(chars[offset..offset + len].iter());
            offset += len;
        }

        Ok(sequence
            .into_iter()
            .filter_map(|row| fence[row].next().copied())
            .collect())
    }
}
