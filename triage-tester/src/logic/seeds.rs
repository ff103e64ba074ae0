use std::collections::HashSet;

use thiserror::Error;

/// Seed used when the CLI resolves to nothing.
pub const DEFAULT_SEED: u64 = 1337;
/// Seeds covered by the `sweep` keyword.
const SWEEP_SEEDS: std::ops::Range<u64> = 1..33;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("unrecognized seed token: {0}")]
    Unrecognized(String),
    #[error("empty seed range: {0}")]
    EmptyRange(String),
}

/// Resolve CLI seed tokens into a deduplicated list of numeric seeds.
///
/// Accepts literal integers (negative values use their magnitude), inclusive
/// ranges like `10..14`, and the keyword `sweep` for a fixed batch of seeds.
/// Order of first appearance is kept.
///
/// # Errors
///
/// Returns an error for tokens that are neither numbers, ranges nor keywords.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>, SeedError> {
    let mut pending: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("sweep") {
            pending.extend(SWEEP_SEEDS);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            pending.push(value.unsigned_abs());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            pending.push(value);
            continue;
        }

        if let Some((start, end)) = token.split_once("..")
            && let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>())
        {
            if start > end {
                return Err(SeedError::EmptyRange(token.clone()));
            }
            pending.extend(start..=end);
            continue;
        }

        return Err(SeedError::Unrecognized(token.clone()));
    }

    let mut seen = HashSet::new();
    pending.retain(|seed| seen.insert(*seed));

    if pending.is_empty() {
        pending.push(DEFAULT_SEED);
    }

    Ok(pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_numbers_ranges_and_duplicates() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "-7", "3..5", "4", "42"])).unwrap();
        assert_eq!(seeds, vec![42, 7, 3, 4, 5]);
    }

    #[test]
    fn sweep_expands_to_a_batch() {
        let seeds = resolve_seed_inputs(&tokens(&["sweep"])).unwrap();
        assert_eq!(seeds.len(), 32);
        assert_eq!(seeds.first(), Some(&1));
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        assert_eq!(resolve_seed_inputs(&[]).unwrap(), vec![DEFAULT_SEED]);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            resolve_seed_inputs(&tokens(&["banana"])),
            Err(SeedError::Unrecognized("banana".to_string()))
        );
        assert_eq!(
            resolve_seed_inputs(&tokens(&["9..2"])),
            Err(SeedError::EmptyRange("9..2".to_string()))
        );
    }
}
