use crate::crop::{CropPosition, CROP_POSITION_COUNT};
use crate::signing::ScoreSigner;
use serde::{Deserialize, Serialize};

pub type GameRecordId = u64;
pub type RunId = String;

/// Screenshots stored per game
pub const SCREENSHOT_COUNT: usize = 5;

/// A game in the catalog. Created once by ingestion and never modified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub id: GameRecordId,
    pub name: String,
    pub release_year: u16,
    pub platform: String,
    pub genre: String,
    pub synopsis: String,
    pub rating: f32,
    pub screenshots: [String; SCREENSHOT_COUNT],
    pub cover: String,
    /// One crop anchor per screenshot, assigned at ingestion
    pub crop_positions: [CropPosition; CROP_POSITION_COUNT],
    #[serde(default)]
    pub redacted_regions: Vec<RedactedRegion>,
}

/// Rectangle hidden from a screenshot (e.g. a visible logo), in percentages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedactedRegion {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl RedactedRegion {
    /// Whether the region lies entirely within the screenshot
    pub fn is_in_bounds(&self) -> bool {
        u16::from(self.x) + u16::from(self.width) <= 100
            && u16::from(self.y) + u16::from(self.height) <= 100
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Fixed pool, one screenshot revealed per wrong guess
    Classic,
    /// Title shown as scrambled letter tiles
    Anagram,
    /// Escalating difficulty with the zoom bonus
    Endless,
}

/// A finished run as submitted for verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    pub id: RunId,
    pub mode: GameMode,
    pub total_score: u64,
    pub rounds_played: u32,
    pub signature: String,
}

impl RunRecord {
    /// Check the signature against the total score
    pub fn verify(&self, signer: &ScoreSigner) -> bool {
        let verified = signer.verify(self.total_score, &self.signature);
        if !verified {
            tracing::warn!(
                run_id = %self.id,
                total_score = self.total_score,
                "Run signature does not match"
            );
        }
        verified
    }
}
