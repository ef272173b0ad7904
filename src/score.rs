/// Guesses allowed per round; solving on guess `n` is worth `MAX_GUESSES + 1 - n`
pub const MAX_GUESSES: u32 = 5;

/// Levels needed for each bonus step
pub const ZOOM_BONUS_LEVEL_STEP: u32 = 5;

/// Bonus added per completed step
pub const ZOOM_BONUS_PER_STEP: u32 = 10;

/// Points for solving a round with `guesses_used` attempts.
///
/// 1 guess is worth 5 points down to 1 point for 5 guesses. Anything
/// outside 1..=5 (0, or more guesses than allowed) is worth nothing.
pub fn calculate_score(guesses_used: u32) -> u32 {
    match guesses_used {
        1..=MAX_GUESSES => MAX_GUESSES + 1 - guesses_used,
        _ => 0,
    }
}

/// Difficulty bonus for endless mode: +10 for every 5 completed levels.
///
/// Only the number is computed here; whether it feeds the score or the
/// screenshot zoom is up to the caller.
pub fn difficulty_zoom_bonus(level: u32) -> u64 {
    u64::from(level / ZOOM_BONUS_LEVEL_STEP) * u64::from(ZOOM_BONUS_PER_STEP)
}
