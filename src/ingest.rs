//! Turning admin-submitted drafts into catalog records
//!
//! This is the only place crop anchors are generated.

use crate::anagram::normalize_title;
use crate::crop::generate_crop_anchors;
use crate::sequencer::{RandomSource, RandomSourceError};
use crate::types::{GameRecord, GameRecordId, RedactedRegion, SCREENSHOT_COUNT};
use serde::Deserialize;

/// A game as submitted for ingestion, before anchors are assigned
#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub release_year: u16,
    pub platform: String,
    pub genre: String,
    pub synopsis: String,
    pub rating: f32,
    pub screenshots: Vec<String>,
    pub cover: String,
    #[serde(default)]
    pub redacted_regions: Vec<RedactedRegion>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    #[error("Expected {expected} screenshots, got {found}")]
    ScreenshotCount { expected: usize, found: usize },

    #[error("Title has no letters or digits")]
    EmptyTitle,

    #[error("Invalid rating: {0}")]
    InvalidRating(f32),

    #[error("Redacted region {0:?} extends past the screenshot")]
    RegionOutOfBounds(RedactedRegion),

    #[error("Random source failed: {0}")]
    Random(#[from] RandomSourceError),
}

/// Validate `draft` and create the immutable record with its crop anchors
pub fn ingest_game<S>(
    id: GameRecordId,
    draft: NewGame,
    source: &mut S,
) -> Result<GameRecord, IngestError>
where
    S: RandomSource + ?Sized,
{
    if normalize_title(&draft.name).is_empty() {
        return Err(IngestError::EmptyTitle);
    }
    if !draft.rating.is_finite() {
        return Err(IngestError::InvalidRating(draft.rating));
    }
    if let Some(region) = draft.redacted_regions.iter().find(|r| !r.is_in_bounds()) {
        return Err(IngestError::RegionOutOfBounds(*region));
    }

    let found = draft.screenshots.len();
    let screenshots: [String; SCREENSHOT_COUNT] =
        draft
            .screenshots
            .try_into()
            .map_err(|_| IngestError::ScreenshotCount {
                expected: SCREENSHOT_COUNT,
                found,
            })?;

    let crop_positions = generate_crop_anchors(source)?;

    tracing::debug!(id, name = %draft.name, "Ingested game");

    Ok(GameRecord {
        id,
        name: draft.name,
        release_year: draft.release_year,
        platform: draft.platform,
        genre: draft.genre,
        synopsis: draft.synopsis,
        rating: draft.rating,
        screenshots,
        cover: draft.cover,
        crop_positions,
        redacted_regions: draft.redacted_regions,
    })
}
