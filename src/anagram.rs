//! Anagram variant: titles become scrambled letter tiles
//!
//! `"Halo: CE!"` normalizes to `HALOCE` and is presented as something like
//! `"E L C A O H"`. Scrambling goes through the sequencer so every tile
//! order is equally likely.

use crate::sequencer::{shuffle, RandomSource, SequencerResult};

/// Strip everything but ASCII letters and digits, then uppercase
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Shuffle the characters of `s` without normalizing them
pub fn shuffle_string<S>(s: &str, source: &mut S) -> SequencerResult<String>
where
    S: RandomSource + ?Sized,
{
    let chars: Vec<char> = s.chars().collect();
    Ok(shuffle(&chars, source)?.into_iter().collect())
}

/// Build the space-separated tile puzzle for `title`.
///
/// A title without letters or digits produces an empty puzzle; callers
/// that need a playable round reject such titles first.
pub fn generate_anagram<S>(title: &str, source: &mut S) -> SequencerResult<String>
where
    S: RandomSource + ?Sized,
{
    let letters: Vec<char> = normalize_title(title).chars().collect();
    let tiles: Vec<String> = shuffle(&letters, source)?
        .into_iter()
        .map(String::from)
        .collect();
    Ok(tiles.join(" "))
}

/// Whether `guess` names `title`, ignoring case, spacing and punctuation
pub fn is_matching_title(guess: &str, title: &str) -> bool {
    let guess = normalize_title(guess);
    !guess.is_empty() && guess == normalize_title(title)
}
