//! Session and round state
//!
//! A `Session` owns a shuffled copy of the candidate pool and hands out one
//! `SessionRound` at a time. Neither is persisted; the only thing that
//! leaves a session is the signed `RunRecord`.

use crate::anagram::{generate_anagram, is_matching_title};
use crate::crop::CropPosition;
use crate::score::{calculate_score, difficulty_zoom_bonus, MAX_GUESSES};
use crate::sequencer::{shuffle, RandomSource, SequencerResult};
use crate::signing::{ScoreSigner, SignatureError};
use crate::types::{
    GameMode, GameRecord, GameRecordId, RedactedRegion, RunId, RunRecord, SCREENSHOT_COUNT,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    InProgress,
    Solved,
    Failed,
}

/// Result of a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: u32 },
    Incorrect { remaining: u32 },
    /// The last allowed guess was wrong
    OutOfGuesses,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("Round is already finished")]
    AlreadyFinished,

    #[error("Round is still in progress")]
    StillInProgress,

    #[error("Round was not issued by this session or is no longer outstanding")]
    ForeignRound,
}

/// What the player currently sees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenshotView<'a> {
    pub index: usize,
    pub screenshot: &'a str,
    pub crop: CropPosition,
    pub redacted_regions: &'a [RedactedRegion],
}

/// A single game being guessed
#[derive(Debug, Clone)]
pub struct SessionRound {
    /// Issuing session and queue slot, set by `Session::next_round`
    session_id: RunId,
    slot: usize,
    game: GameRecord,
    anagram: Option<String>,
    guesses_used: u32,
    status: RoundStatus,
}

impl SessionRound {
    pub(crate) fn new(game: GameRecord) -> Self {
        Self {
            session_id: RunId::new(),
            slot: 0,
            game,
            anagram: None,
            guesses_used: 0,
            status: RoundStatus::InProgress,
        }
    }

    /// Round for the anagram variant: the title is shown as scrambled tiles
    pub(crate) fn with_anagram<S>(game: GameRecord, source: &mut S) -> SequencerResult<Self>
    where
        S: RandomSource + ?Sized,
    {
        let anagram = generate_anagram(&game.name, source)?;
        Ok(Self {
            anagram: Some(anagram),
            ..Self::new(game)
        })
    }

    pub fn game(&self) -> &GameRecord {
        &self.game
    }

    pub fn anagram(&self) -> Option<&str> {
        self.anagram.as_deref()
    }

    pub fn guesses_used(&self) -> u32 {
        self.guesses_used
    }

    pub fn remaining_guesses(&self) -> u32 {
        MAX_GUESSES.saturating_sub(self.guesses_used)
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    /// Screenshot and crop anchor to show. Each wrong guess reveals the next
    /// screenshot; the last one stays up once all have been shown.
    pub fn current_view(&self) -> ScreenshotView<'_> {
        let index = (self.guesses_used as usize).min(SCREENSHOT_COUNT - 1);
        ScreenshotView {
            index,
            screenshot: &self.game.screenshots[index],
            crop: self.game.crop_positions[index],
            redacted_regions: &self.game.redacted_regions,
        }
    }

    /// Submit a guess, consuming one attempt
    pub fn guess(&mut self, guess: &str) -> Result<GuessOutcome, RoundError> {
        if self.is_finished() {
            return Err(RoundError::AlreadyFinished);
        }

        self.guesses_used += 1;

        if is_matching_title(guess, &self.game.name) {
            self.status = RoundStatus::Solved;
            return Ok(GuessOutcome::Correct {
                points: self.points(),
            });
        }

        if self.guesses_used >= MAX_GUESSES {
            self.status = RoundStatus::Failed;
            return Ok(GuessOutcome::OutOfGuesses);
        }

        Ok(GuessOutcome::Incorrect {
            remaining: self.remaining_guesses(),
        })
    }

    /// Points earned so far: nothing unless solved
    pub fn points(&self) -> u32 {
        match self.status {
            RoundStatus::Solved => calculate_score(self.guesses_used),
            RoundStatus::InProgress | RoundStatus::Failed => 0,
        }
    }
}

/// One player's run through a shuffled pool
#[derive(Debug, Clone)]
pub struct Session {
    id: RunId,
    mode: GameMode,
    queue: Vec<GameRecord>,
    next_index: usize,
    /// Slot of the round handed out and not yet completed
    outstanding: Option<usize>,
    total_score: u64,
    level: u32,
}

impl Session {
    /// Start a session over a shuffled copy of `pool`
    pub fn new<S>(mode: GameMode, pool: &[GameRecord], source: &mut S) -> SequencerResult<Self>
    where
        S: RandomSource + ?Sized,
    {
        let queue = shuffle(pool, source)?;
        let session = Self {
            id: ulid::Ulid::new().to_string(),
            mode,
            queue,
            next_index: 0,
            outstanding: None,
            total_score: 0,
            level: 0,
        };
        tracing::info!(
            session_id = %session.id,
            mode = ?mode,
            pool_size = session.queue.len(),
            "Session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Completed rounds so far
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn remaining_rounds(&self) -> usize {
        self.queue.len() - self.next_index
    }

    /// Game ids in presentation order
    pub fn order(&self) -> impl Iterator<Item = GameRecordId> + '_ {
        self.queue.iter().map(|game| game.id)
    }

    /// Zoom bonus for the current level. Not added to the score.
    pub fn zoom_bonus(&self) -> u64 {
        difficulty_zoom_bonus(self.level)
    }

    /// Hand out the next round, or None once the pool is used up
    pub fn next_round<S>(&mut self, source: &mut S) -> SequencerResult<Option<SessionRound>>
    where
        S: RandomSource + ?Sized,
    {
        let Some(game) = self.queue.get(self.next_index).cloned() else {
            return Ok(None);
        };

        let mut round = match self.mode {
            GameMode::Anagram => SessionRound::with_anagram(game, source)?,
            GameMode::Classic | GameMode::Endless => SessionRound::new(game),
        };
        round.session_id = self.id.clone();
        round.slot = self.next_index;
        self.outstanding = Some(self.next_index);
        self.next_index += 1;

        tracing::debug!(
            session_id = %self.id,
            game_id = round.game().id,
            "Round started"
        );
        Ok(Some(round))
    }

    /// Record a finished round and return the points it added.
    ///
    /// Only the most recently issued round is accepted, and only once.
    /// Rounds built elsewhere, taken from another session or abandoned by
    /// a later `next_round` are `ForeignRound`.
    pub fn complete_round(&mut self, round: SessionRound) -> Result<u32, RoundError> {
        if round.session_id != self.id || self.outstanding != Some(round.slot) {
            tracing::warn!(
                session_id = %self.id,
                game_id = round.game().id,
                "Rejecting round not issued by this session"
            );
            return Err(RoundError::ForeignRound);
        }
        if !round.is_finished() {
            return Err(RoundError::StillInProgress);
        }
        self.outstanding = None;

        let points = round.points();
        self.total_score += u64::from(points);
        self.level += 1;

        tracing::debug!(
            session_id = %self.id,
            game_id = round.game().id,
            status = ?round.status(),
            points,
            level = self.level,
            "Round completed"
        );
        Ok(points)
    }

    /// Produce the signed run record for submission
    pub fn finish(&self, signer: &ScoreSigner) -> Result<RunRecord, SignatureError> {
        let signature = signer.sign(self.total_score)?;
        tracing::info!(
            session_id = %self.id,
            total_score = self.total_score,
            rounds_played = self.level,
            "Session finished"
        );
        Ok(RunRecord {
            id: self.id.clone(),
            mode: self.mode,
            total_score: self.total_score,
            rounds_played: self.level,
            signature,
        })
    }
}
